//! Error kinds callers need to tell apart.
//!
//! Everything else travels as a plain `anyhow::Error` with context attached.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LokiError {
    /// No `.loki` directory in the start directory or any parent.
    #[error("not a loki repository (or any of the parent directories): {0}")]
    NotARepository(PathBuf),

    /// Neither the working tree nor the last commit knows the path.
    #[error("pathspec '{0}' did not match any files")]
    PathNotFound(String),

    /// Directories cannot be staged.
    #[error("'{0}' is a directory")]
    PathIsDirectory(String),

    /// The path resolves outside the working tree or into `.loki`.
    #[error("'{0}' is outside repository")]
    PathOutsideRepository(String),

    /// Tree entry names must be non-empty and free of NUL bytes.
    #[error("invalid tree entry name {0:?}")]
    InvalidTreeEntryName(String),

    /// `commit` was called with an empty index.
    #[error("nothing to commit")]
    NothingToCommit,

    /// A stored object, ref or index file could not be parsed.
    #[error("corrupt object: {0}")]
    CorruptObject(String),
}
