use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or registering exclusions.
///
/// Every variant is a load-time failure: once a registry has been built,
/// resolution and selection are total and never error. Loading is fail-fast,
/// so a bad entry aborts the whole manifest rather than producing a partial
/// registry.
#[derive(Debug, Error)]
pub enum ExclusionError {
  #[error("read manifest {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse manifest as TOML ({toml_err}) or JSON ({json_err})")]
  Parse { toml_err: String, json_err: String },

  #[error("manifest entry #{index} is missing `id`/`glob`/`regex`")]
  MissingMatcher { index: usize },

  #[error("manifest entry #{index} must specify exactly one of `id`/`glob`/`regex`")]
  AmbiguousMatcher { index: usize },

  #[error("exclusion for `{target}` is missing a non-empty `reason`")]
  EmptyReason { target: String },

  #[error("invalid glob `{pattern}`: {source}")]
  InvalidGlob {
    pattern: String,
    #[source]
    source: globset::Error,
  },

  #[error("invalid regex `{pattern}`: {source}")]
  InvalidRegex {
    pattern: String,
    #[source]
    source: regex::Error,
  },
}
