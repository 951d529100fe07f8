use crate::env::EnvSnapshot;
use crate::error::ExclusionError;
use crate::predicate::Predicate;
use regex::Regex;

/// How an exclusion entry names the tests it covers.
#[derive(Debug, Clone)]
pub enum Matcher {
  Exact(String),
  Glob(globset::GlobMatcher),
  Regex(Regex),
}

impl Matcher {
  pub fn matches(&self, id: &str) -> bool {
    match self {
      Matcher::Exact(pattern) => pattern == id,
      Matcher::Glob(glob) => glob.is_match(id),
      Matcher::Regex(re) => re.is_match(id),
    }
  }

  /// The pattern as written in the manifest, for diagnostics.
  pub fn pattern(&self) -> &str {
    match self {
      Matcher::Exact(pattern) => pattern,
      Matcher::Glob(glob) => glob.glob().glob(),
      Matcher::Regex(re) => re.as_str(),
    }
  }
}

/// A single registered exclusion: which tests it covers, why, and when.
#[derive(Debug, Clone)]
pub struct ExclusionEntry {
  pub matcher: Matcher,
  pub reason: String,
  pub condition: Predicate,
}

/// Registry of exclusions, grouped by matcher tier.
///
/// Exact entries are consulted before globs, and globs before regexes.
/// Within a tier, first-registered wins, which makes duplicate entries for
/// the same id deterministic. Populated once at startup, immutable
/// thereafter; lookups are read-only and safe to share across workers.
#[derive(Debug, Clone, Default)]
pub struct Exclusions {
  exact: Vec<ExclusionEntry>,
  globs: Vec<ExclusionEntry>,
  regexes: Vec<ExclusionEntry>,
}

impl Exclusions {
  pub fn empty() -> Self {
    Self::default()
  }

  /// Append an entry to its matcher tier.
  ///
  /// Fails when the reason is empty or whitespace-only; a skip without an
  /// explanation is a manifest bug.
  pub fn register(
    &mut self,
    matcher: Matcher,
    reason: impl Into<String>,
    condition: Predicate,
  ) -> Result<(), ExclusionError> {
    let reason = reason.into();
    if reason.trim().is_empty() {
      return Err(ExclusionError::EmptyReason {
        target: matcher.pattern().to_string(),
      });
    }

    let entry = ExclusionEntry {
      matcher,
      reason,
      condition,
    };
    match entry.matcher {
      Matcher::Exact(_) => self.exact.push(entry),
      Matcher::Glob(_) => self.globs.push(entry),
      Matcher::Regex(_) => self.regexes.push(entry),
    }
    Ok(())
  }

  /// Reason of the first entry covering `id` whose condition holds against
  /// `snapshot`, if any.
  ///
  /// An entry whose matcher covers `id` but whose condition does not hold is
  /// passed over, so a later entry may still exclude the same id.
  pub fn resolve(&self, id: &str, snapshot: &EnvSnapshot) -> Option<&str> {
    for tier in [&self.exact, &self.globs, &self.regexes] {
      for entry in tier {
        if entry.matcher.matches(id) && entry.condition.evaluate(snapshot) {
          return Some(entry.reason.as_str());
        }
      }
    }
    None
  }

  /// Entries in lookup order: exact, then glob, then regex, registration
  /// order within each tier.
  pub fn entries(&self) -> impl Iterator<Item = &ExclusionEntry> {
    self.exact.iter().chain(&self.globs).chain(&self.regexes)
  }

  pub fn len(&self) -> usize {
    self.exact.len() + self.globs.len() + self.regexes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::env::OsFamily;
  use globset::Glob;

  fn exact(id: &str) -> Matcher {
    Matcher::Exact(id.to_string())
  }

  #[test]
  fn empty_reason_is_rejected() {
    let mut exclusions = Exclusions::empty();
    let err = exclusions
      .register(exact("test_linger"), "  ", Predicate::Always)
      .unwrap_err();
    assert!(matches!(err, ExclusionError::EmptyReason { .. }));
    assert!(exclusions.is_empty());
  }

  #[test]
  fn unmatched_id_resolves_to_none() {
    let mut exclusions = Exclusions::empty();
    exclusions
      .register(exact("test_tcp"), "needs investigation", Predicate::Always)
      .unwrap();

    let snapshot = EnvSnapshot::with_os_family(OsFamily::Unix);
    assert_eq!(exclusions.resolve("test_udp_server", &snapshot), None);
  }

  #[test]
  fn duplicate_ids_resolve_first_registered() {
    let mut exclusions = Exclusions::empty();
    exclusions
      .register(exact("test_tcp"), "first", Predicate::Always)
      .unwrap();
    exclusions
      .register(exact("test_tcp"), "second", Predicate::Always)
      .unwrap();

    let snapshot = EnvSnapshot::with_os_family(OsFamily::Unix);
    assert_eq!(exclusions.resolve("test_tcp", &snapshot), Some("first"));
  }

  #[test]
  fn exact_entries_win_over_globs() {
    let glob = Glob::new("test_*").unwrap().compile_matcher();
    let mut exclusions = Exclusions::empty();
    exclusions
      .register(Matcher::Glob(glob), "glob reason", Predicate::Always)
      .unwrap();
    exclusions
      .register(exact("test_unix"), "exact reason", Predicate::Always)
      .unwrap();

    let snapshot = EnvSnapshot::with_os_family(OsFamily::Unix);
    assert_eq!(
      exclusions.resolve("test_unix", &snapshot),
      Some("exact reason")
    );
    assert_eq!(
      exclusions.resolve("test_tcp", &snapshot),
      Some("glob reason")
    );
  }

  #[test]
  fn non_matching_condition_falls_through_to_later_entries() {
    let mut exclusions = Exclusions::empty();
    exclusions
      .register(
        exact("test_unix"),
        "windows only",
        Predicate::OsFamilyIs(OsFamily::Windows),
      )
      .unwrap();
    exclusions
      .register(exact("test_unix"), "everywhere", Predicate::Always)
      .unwrap();

    let unix = EnvSnapshot::with_os_family(OsFamily::Unix);
    assert_eq!(exclusions.resolve("test_unix", &unix), Some("everywhere"));

    let windows = EnvSnapshot::with_os_family(OsFamily::Windows);
    assert_eq!(
      exclusions.resolve("test_unix", &windows),
      Some("windows only")
    );
  }
}
