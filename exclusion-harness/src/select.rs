use crate::env::EnvSnapshot;
use crate::registry::Exclusions;
use std::collections::BTreeMap;

/// The split of a test list into run and skipped groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
  /// Ids to execute, in the order the input listed them.
  pub run: Vec<String>,
  /// Skipped ids with the reason that excluded them, keyed by id so
  /// reporting is deterministic.
  pub skipped: BTreeMap<String, String>,
}

impl Partition {
  pub fn total(&self) -> usize {
    self.run.len() + self.skipped.len()
  }
}

/// Partition `ids` against the registry under the given snapshot.
///
/// Pure: nothing is executed here, no state is mutated, and calling it twice
/// with the same inputs yields identical partitions.
pub fn select<I, S>(ids: I, exclusions: &Exclusions, snapshot: &EnvSnapshot) -> Partition
where
  I: IntoIterator<Item = S>,
  S: Into<String>,
{
  let mut partition = Partition::default();
  for id in ids {
    let id = id.into();
    match exclusions.resolve(&id, snapshot) {
      Some(reason) => {
        let reason = reason.to_string();
        partition.skipped.insert(id, reason);
      }
      None => partition.run.push(id),
    }
  }
  partition
}
