//! Commit history
//!
//! History is linear and kept in `.loki/commits.log`, one line per commit:
//! `<commit-sha> <summary>`. Reading it never touches the object store.
//!
//! - `log_entry`: One parsed log line

pub mod log_entry;
