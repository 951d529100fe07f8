use anyhow::{anyhow, bail, Result};
use globset::Glob;
use regex::Regex;

/// Optional candidate narrowing for ad hoc runs.
///
/// A pattern is compiled as a glob when it parses as one, otherwise as a
/// regex. Ids the pattern rejects never reach the exclusion registry, so a
/// narrowed run still reports only the skips relevant to it.
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
  pattern: Option<CompiledPattern>,
}

#[derive(Debug, Clone)]
enum CompiledPattern {
  Glob(globset::GlobMatcher),
  Regex(Regex),
}

impl CandidateFilter {
  /// Compile a pattern; `None` keeps every candidate.
  pub fn parse(pattern: Option<&str>) -> Result<Self> {
    let Some(raw) = pattern else {
      return Ok(Self::default());
    };

    let compiled = match Glob::new(raw) {
      Ok(glob) => CompiledPattern::Glob(glob.compile_matcher()),
      Err(_) => CompiledPattern::Regex(Regex::new(raw).map_err(|err| {
        anyhow!("filter `{raw}` is neither a valid glob nor a valid regex: {err}")
      })?),
    };

    Ok(Self {
      pattern: Some(compiled),
    })
  }

  fn keeps(&self, id: &str) -> bool {
    match &self.pattern {
      None => true,
      Some(CompiledPattern::Glob(glob)) => glob.is_match(id),
      Some(CompiledPattern::Regex(re)) => re.is_match(id),
    }
  }

  /// Narrow an ordered candidate list, preserving order.
  ///
  /// An empty result is an error: a filter matching nothing is a typo, not a
  /// request to run zero tests.
  pub fn narrow(&self, ids: Vec<String>) -> Result<Vec<String>> {
    let narrowed: Vec<String> = ids.into_iter().filter(|id| self.keeps(id)).collect();
    if narrowed.is_empty() {
      bail!("filter matched no tests");
    }
    Ok(narrowed)
  }
}
