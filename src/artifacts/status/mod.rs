//! Staged change kinds
//!
//! - `file_status`: The status recorded for a path when it is staged

pub mod file_status;
