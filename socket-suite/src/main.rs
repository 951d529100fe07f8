use anyhow::Result;
use clap::{Parser, Subcommand};
use socket_suite::{select, validate};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Partition the test list into run and skipped sets.
  Select(select::SelectArgs),
  /// Audit an exclusion manifest against the test list.
  Validate(validate::ValidateArgs),
}

fn main() -> ExitCode {
  match try_main() {
    Ok(code) => code,
    Err(err) => {
      eprintln!("{err:#}");
      ExitCode::FAILURE
    }
  }
}

fn try_main() -> Result<ExitCode> {
  let cli = Cli::parse();
  match cli.command {
    Command::Select(args) => select::run_cli(args),
    Command::Validate(args) => validate::run_cli(args),
  }
}
