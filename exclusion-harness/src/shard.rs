use std::fmt;
use std::str::FromStr;

/// One worker's `<index>/<total>` slice of a selected run set.
///
/// Ownership is positional: worker `i` of `n` owns every id whose position
/// in the run list is congruent to `i` mod `n`. Workers must therefore be
/// handed the same selection (same test list, manifest, and snapshot) for
/// the shards to cover every selected id exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shard {
  index: usize,
  total: usize,
}

impl Shard {
  pub fn new(index: usize, total: usize) -> Result<Self, String> {
    if total == 0 {
      return Err("shard total must be nonzero".to_string());
    }
    if index >= total {
      return Err(format!("shard index {index} out of range for total {total}"));
    }
    Ok(Self { index, total })
  }

  pub fn index(&self) -> usize {
    self.index
  }

  pub fn total(&self) -> usize {
    self.total
  }

  /// The ids this shard owns, in run order.
  pub fn slice(&self, run: &[String]) -> Vec<String> {
    run
      .iter()
      .enumerate()
      .filter(|(position, _)| position % self.total == self.index)
      .map(|(_, id)| id.clone())
      .collect()
  }
}

impl fmt::Display for Shard {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.index, self.total)
  }
}

impl FromStr for Shard {
  type Err = String;

  fn from_str(raw: &str) -> Result<Self, Self::Err> {
    let (index, total) = raw
      .split_once('/')
      .ok_or_else(|| format!("expected `<index>/<total>`, got `{raw}`"))?;
    let index = index
      .parse::<usize>()
      .map_err(|err| format!("bad shard index `{index}`: {err}"))?;
    let total = total
      .parse::<usize>()
      .map_err(|err| format!("bad shard total `{total}`: {err}"))?;
    Shard::new(index, total)
  }
}
