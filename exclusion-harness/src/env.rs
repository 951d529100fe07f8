use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Host operating-system family, the only environment fact exclusion
/// predicates currently consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OsFamily {
  Windows,
  Unix,
  Other,
}

impl OsFamily {
  /// Family of the host this binary was compiled for.
  pub fn host() -> Self {
    if cfg!(windows) {
      OsFamily::Windows
    } else if cfg!(unix) {
      OsFamily::Unix
    } else {
      OsFamily::Other
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      OsFamily::Windows => "windows",
      OsFamily::Unix => "unix",
      OsFamily::Other => "other",
    }
  }
}

impl fmt::Display for OsFamily {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Immutable capture of the runtime facts predicates may consult.
///
/// Built once before selection starts; predicate evaluation itself performs
/// no I/O and reads no global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvSnapshot {
  pub os_family: OsFamily,
}

impl EnvSnapshot {
  /// Snapshot of the current host.
  pub fn current() -> Self {
    Self {
      os_family: OsFamily::host(),
    }
  }

  pub fn with_os_family(os_family: OsFamily) -> Self {
    Self { os_family }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn display_matches_manifest_spelling() {
    assert_eq!(OsFamily::Windows.to_string(), "windows");
    assert_eq!(OsFamily::Unix.to_string(), "unix");
    assert_eq!(OsFamily::Other.to_string(), "other");
  }

  #[test]
  fn current_snapshot_matches_host_family() {
    assert_eq!(EnvSnapshot::current().os_family, OsFamily::host());
  }
}
