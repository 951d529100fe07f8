use crate::filter::CandidateFilter;
use crate::report::Report;
use crate::testlist::load_test_list;
use anyhow::{anyhow, bail, Result};
use clap::Args;
use exclusion_harness::{select, EnvSnapshot, Exclusions, OsFamily, Shard};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Args, Debug, Default)]
pub struct SelectArgs {
  /// Path to the ordered test list (one id per line, `#` comments).
  #[arg(long, value_name = "PATH")]
  pub tests: PathBuf,

  /// Path to the exclusion manifest (TOML or JSON). Omit to select every
  /// listed test.
  #[arg(long, value_name = "PATH")]
  pub excludes: Option<PathBuf>,

  /// Override the detected host os family.
  #[arg(long, value_enum)]
  pub os_family: Option<OsFamily>,

  /// Restrict candidates to ids matching a pattern (glob first, regex
  /// fallback).
  #[arg(long, value_name = "PATTERN")]
  pub filter: Option<String>,

  /// Slice the run set for one of N parallel workers, 0-based, e.g. `0/4`.
  #[arg(long, value_name = "INDEX/TOTAL")]
  pub shard: Option<String>,

  /// Write a JSON selection report to this path (`-` for stdout).
  #[arg(long, value_name = "PATH")]
  pub report: Option<PathBuf>,
}

/// Everything a `select` invocation decides: which ids it runs, which it
/// skips, and under which snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
  pub os_family: OsFamily,
  pub run: Vec<String>,
  pub skipped: BTreeMap<String, String>,
}

pub fn run_select(args: &SelectArgs) -> Result<Selection> {
  let ids = load_test_list(&args.tests)?;

  let filter = CandidateFilter::parse(args.filter.as_deref())?;
  let candidates = filter.narrow(ids)?;

  let exclusions = match &args.excludes {
    Some(path) => Exclusions::from_path(path)?,
    None => Exclusions::empty(),
  };

  let os_family = args.os_family.unwrap_or_else(OsFamily::host);
  let snapshot = EnvSnapshot::with_os_family(os_family);
  let partition = select(candidates, &exclusions, &snapshot);

  let run = match args.shard.as_deref() {
    Some(raw) => {
      let shard: Shard = raw.parse().map_err(|err| anyhow!("--shard: {err}"))?;
      let sliced = shard.slice(&partition.run);
      if sliced.is_empty() {
        bail!(
          "shard {shard} owns none of the {} selected tests",
          partition.run.len()
        );
      }
      sliced
    }
    None => partition.run,
  };

  Ok(Selection {
    os_family,
    run,
    skipped: partition.skipped,
  })
}

pub fn run_cli(args: SelectArgs) -> Result<ExitCode> {
  let selection = run_select(&args)?;

  let report_to_stdout = matches!(&args.report, Some(path) if path.as_os_str() == "-");
  if let Some(path) = &args.report {
    let report = Report::new(
      selection.os_family,
      selection.run.clone(),
      &selection.skipped,
    );
    if report_to_stdout {
      report.write_to_stdout()?;
    } else {
      report.write_to_path(path)?;
    }
  }

  if !report_to_stdout {
    for id in &selection.run {
      println!("{id}");
    }
  }
  for (id, reason) in &selection.skipped {
    eprintln!("skip {id}: {reason}");
  }
  eprintln!(
    "{} selected, {} skipped ({} total, os_family={})",
    selection.run.len(),
    selection.skipped.len(),
    selection.run.len() + selection.skipped.len(),
    selection.os_family,
  );

  Ok(ExitCode::SUCCESS)
}
