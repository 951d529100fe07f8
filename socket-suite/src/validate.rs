use crate::testlist::load_test_list;
use anyhow::Result;
use clap::Args;
use exclusion_harness::{Exclusions, Matcher};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Args, Debug)]
pub struct ValidateArgs {
  /// Path to the ordered test list (one id per line, `#` comments).
  #[arg(long, value_name = "PATH")]
  pub tests: PathBuf,

  /// Path to the exclusion manifest (TOML or JSON) to audit.
  #[arg(long, value_name = "PATH")]
  pub excludes: PathBuf,

  /// Print match counts for glob/regex entries (useful for auditing).
  #[arg(long)]
  pub counts: bool,
}

#[derive(Default, Debug)]
pub struct ValidationReport {
  pub errors: Vec<String>,
  pub warnings: Vec<String>,
  pub notes: Vec<String>,
}

impl ValidationReport {
  pub fn has_errors(&self) -> bool {
    !self.errors.is_empty()
  }

  fn sort_deterministic(&mut self) {
    self.errors.sort();
    self.warnings.sort();
    self.notes.sort();
  }
}

pub fn run_cli(args: ValidateArgs) -> Result<ExitCode> {
  let report = run_validate(&args)?;

  for line in &report.notes {
    println!("{line}");
  }
  for line in &report.warnings {
    eprintln!("warning: {line}");
  }
  for line in &report.errors {
    eprintln!("error: {line}");
  }

  Ok(if report.has_errors() {
    ExitCode::FAILURE
  } else {
    ExitCode::SUCCESS
  })
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidationReport> {
  let ids = load_test_list(&args.tests)?;
  let exclusions = Exclusions::from_path(&args.excludes)?;

  let mut report = validate_exclusions(&exclusions, &ids, args.counts);
  report.sort_deterministic();
  Ok(report)
}

/// Audit a loaded manifest against the test list.
///
/// Entries are identified by their pattern as written in the manifest, not
/// by position, since registry lookup order differs from file order. Stale
/// exact ids are errors: they are the drift an exclusion list accumulates as
/// the upstream suite renames tests. Pattern entries matching zero tests are
/// warnings, since a pattern may legitimately cover tests that only exist on
/// another host's checkout.
pub fn validate_exclusions(
  exclusions: &Exclusions,
  ids: &[String],
  report_counts: bool,
) -> ValidationReport {
  let mut report = ValidationReport::default();

  let id_set: BTreeSet<&str> = ids.iter().map(String::as_str).collect();

  if exclusions.is_empty() {
    report
      .warnings
      .push("manifest contains no exclusion entries".to_string());
  }

  for entry in exclusions.entries() {
    match &entry.matcher {
      Matcher::Exact(id) => {
        if !id_set.contains(id.as_str()) {
          report
            .errors
            .push(format!("exclusion id {id:?} does not appear in the test list"));
        }
      }
      matcher @ (Matcher::Glob(_) | Matcher::Regex(_)) => {
        let pattern = matcher.pattern();
        let count = ids.iter().filter(|id| matcher.matches(id)).count();
        if report_counts {
          report
            .notes
            .push(format!("exclusion pattern {pattern:?} matched {count}"));
        }
        if count == 0 {
          report
            .warnings
            .push(format!("exclusion pattern {pattern:?} matched 0 tests"));
        }
      }
    }
  }

  report
}
