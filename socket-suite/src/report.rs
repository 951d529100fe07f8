use anyhow::{Context, Result};
use exclusion_harness::OsFamily;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// A skipped test and the manifest reason that excluded it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkippedEntry {
  pub id: String,
  pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Summary {
  pub total: usize,
  pub selected: usize,
  pub skipped: usize,
}

/// Selection report consumed by the external test-execution driver.
///
/// Byte-stable when serialized: `run` preserves the test list's order and
/// `skipped` is sorted by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Report {
  pub schema_version: u32,
  pub os_family: OsFamily,
  pub summary: Summary,
  pub run: Vec<String>,
  pub skipped: Vec<SkippedEntry>,
}

impl Report {
  pub fn new(os_family: OsFamily, run: Vec<String>, skipped: &BTreeMap<String, String>) -> Self {
    let skipped: Vec<SkippedEntry> = skipped
      .iter()
      .map(|(id, reason)| SkippedEntry {
        id: id.clone(),
        reason: reason.clone(),
      })
      .collect();

    Self {
      schema_version: REPORT_SCHEMA_VERSION,
      os_family,
      summary: Summary {
        total: run.len() + skipped.len(),
        selected: run.len(),
        skipped: skipped.len(),
      },
      run,
      skipped,
    }
  }

  pub fn to_json_pretty(&self) -> Result<String> {
    serde_json::to_string_pretty(self).context("format selection report")
  }

  /// Write the report as pretty JSON with a trailing newline.
  pub fn write_to(&self, writer: &mut impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, self).context("write selection report")?;
    writeln!(writer).ok();
    Ok(())
  }

  /// Write the report to `path`, creating parent directories as needed.
  pub fn write_to_path(&self, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
      if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
      }
    }

    let file = fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    self
      .write_to(&mut writer)
      .with_context(|| format!("write report to {}", path.display()))?;
    writer.flush().ok();
    Ok(())
  }

  pub fn write_to_stdout(&self) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    self.write_to(&mut handle)
  }
}
