//! Exclusion and selection engine for conformance test suite drivers.
//!
//! This crate is intentionally small and dependency-light so driver binaries
//! can share behavior without copy/pasting: it loads exclusion manifests,
//! evaluates their host predicates against an environment snapshot, and
//! partitions an ordered test list into run/skipped sets. It never executes
//! tests itself.

mod env;
mod error;
mod manifest;
mod predicate;
mod registry;
mod select;
mod shard;

pub use env::{EnvSnapshot, OsFamily};
pub use error::ExclusionError;
pub use predicate::Predicate;
pub use registry::{ExclusionEntry, Exclusions, Matcher};
pub use select::{select, Partition};
pub use shard::Shard;
