use crate::env::OsFamily;
use crate::error::ExclusionError;
use crate::predicate::Predicate;
use crate::registry::{Exclusions, Matcher};
use globset::Glob;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
struct RawManifest {
  #[serde(default)]
  exclusions: Vec<RawEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawEntry {
  id: Option<String>,
  glob: Option<String>,
  regex: Option<String>,
  reason: Option<String>,
  os_family: Option<OsFamily>,
}

impl Exclusions {
  pub fn from_path(path: &Path) -> Result<Self, ExclusionError> {
    let raw = fs::read_to_string(path).map_err(|source| ExclusionError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_str(&raw)
  }

  /// Parse a manifest, trying TOML first and falling back to JSON.
  pub fn from_str(raw: &str) -> Result<Self, ExclusionError> {
    let manifest = match toml::from_str::<RawManifest>(raw) {
      Ok(manifest) => manifest,
      Err(toml_err) => {
        serde_json::from_str::<RawManifest>(raw).map_err(|json_err| ExclusionError::Parse {
          toml_err: toml_err.to_string(),
          json_err: json_err.to_string(),
        })?
      }
    };

    from_manifest(manifest)
  }
}

fn from_manifest(manifest: RawManifest) -> Result<Exclusions, ExclusionError> {
  let mut exclusions = Exclusions::empty();
  for (index, entry) in manifest.exclusions.into_iter().enumerate() {
    let matcher = build_matcher(index, &entry)?;
    let condition = entry.os_family.map(Predicate::OsFamilyIs).unwrap_or_default();
    exclusions.register(matcher, entry.reason.unwrap_or_default(), condition)?;
  }
  Ok(exclusions)
}

fn build_matcher(index: usize, entry: &RawEntry) -> Result<Matcher, ExclusionError> {
  let present = [
    entry.id.is_some(),
    entry.glob.is_some(),
    entry.regex.is_some(),
  ]
  .into_iter()
  .filter(|present| *present)
  .count();

  if present == 0 {
    return Err(ExclusionError::MissingMatcher { index });
  }
  if present > 1 {
    return Err(ExclusionError::AmbiguousMatcher { index });
  }

  if let Some(id) = &entry.id {
    return Ok(Matcher::Exact(id.clone()));
  }

  if let Some(pattern) = &entry.glob {
    let compiled = Glob::new(pattern)
      .map_err(|source| ExclusionError::InvalidGlob {
        pattern: pattern.clone(),
        source,
      })?
      .compile_matcher();
    return Ok(Matcher::Glob(compiled));
  }

  // `present == 1` and neither `id` nor `glob` was set.
  let pattern = entry.regex.as_deref().unwrap_or_default();
  let compiled = Regex::new(pattern).map_err(|source| ExclusionError::InvalidRegex {
    pattern: pattern.to_string(),
    source,
  })?;
  Ok(Matcher::Regex(compiled))
}
