//! Porcelain commands (user-facing operations)
//!
//! Porcelain commands provide the high-level user interface for version control.
//! They compose the repository areas into the everyday workflow.
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `add`: Stage files for commit
//! - `commit`: Create a new commit
//! - `status`: Show staged changes
//! - `log`: Show commit history
//! - `config`: Read or write layered configuration

pub mod add;
pub mod commit;
pub mod config;
pub mod init;
pub mod log;
pub mod status;
