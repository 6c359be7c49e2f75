//! Loki data structures
//!
//! This module contains the core types shared by the repository areas:
//!
//! - `core`: Shared utilities (pager wrapper, console colours)
//! - `index`: Index file framing (header, entries, checksum)
//! - `log`: Commit log records
//! - `objects`: Object types (blob, tree, commit)
//! - `status`: Staged change statuses

pub mod core;
pub mod index;
pub mod log;
pub mod objects;
pub mod status;
