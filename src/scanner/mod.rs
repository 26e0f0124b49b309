//! Package metadata acquisition.
//!
//! - [`directory`] — `*.json` metadata files in a directory.
//! - [`site_packages`] — installed distributions via `*.dist-info/METADATA`.
//!
//! Scanners surface unreadable or malformed inputs as errors naming the
//! offending file; a failure is never downgraded to an UNKNOWN finding.

pub mod directory;
pub mod site_packages;
