//! Driver for partitioning the socket conformance suite against an
//! exclusion manifest. The suite itself is external; this crate only decides
//! which test ids run and which are skipped, and with what reason.

pub mod filter;
pub mod report;
pub mod select;
pub mod testlist;
pub mod validate;

pub use report::REPORT_SCHEMA_VERSION;
