//! Loki, a minimal content-addressed version control engine
//!
//! - `areas`: repository areas (object database, index, refs, workspace, config)
//! - `artifacts`: object model and on-disk record formats
//! - `commands`: porcelain and plumbing commands, one `impl Repository` block each
//! - `errors`: error kinds callers branch on

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
