use crate::env::{EnvSnapshot, OsFamily};

/// Activation condition attached to an exclusion entry.
///
/// Predicates are pure functions of the snapshot: no I/O, no global state.
/// Unknown condition kinds are rejected when the manifest is loaded, so
/// evaluation is total and never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
  /// The entry applies on every host.
  Always,
  /// The entry applies only when the host os family matches.
  OsFamilyIs(OsFamily),
}

impl Default for Predicate {
  fn default() -> Self {
    Predicate::Always
  }
}

impl Predicate {
  pub fn evaluate(&self, snapshot: &EnvSnapshot) -> bool {
    match self {
      Predicate::Always => true,
      Predicate::OsFamilyIs(family) => snapshot.os_family == *family,
    }
  }
}
