use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::errors::LokiError;
use anyhow::Context;
use bytes::Bytes;
use is_executable::IsExecutable;
use std::fs::Metadata;
use std::path::{Component, Path, PathBuf};

pub const LOKI_DIR: &str = ".loki";

/// Working directory file system operations
///
/// Paths handed to the workspace are repository-relative and `/`-separated,
/// the same form used for index records and tree entry names.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Map a user-supplied path (relative to `cwd`, or absolute) to a repository-relative name
    ///
    /// The path does not have to exist, so deleted files can still be staged.
    pub fn resolve(&self, cwd: &Path, user_path: &str) -> anyhow::Result<String> {
        let outside = || LokiError::PathOutsideRepository(user_path.to_string());

        let absolute = Self::normalize(&cwd.join(user_path));
        let relative = absolute.strip_prefix(&self.path).map_err(|_| outside())?;

        let components = relative
            .components()
            .map(|component| match component {
                Component::Normal(name) => name.to_str().map(str::to_string),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| anyhow::anyhow!("path is not valid UTF-8: {}", user_path))?;

        match components.first() {
            None => Err(LokiError::PathIsDirectory(user_path.to_string()).into()),
            Some(first) if first == LOKI_DIR => Err(outside().into()),
            Some(_) => Ok(components.join("/")),
        }
    }

    /// Lexically resolve `.` and `..` without touching the file system
    fn normalize(path: &Path) -> PathBuf {
        let mut normalized = PathBuf::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    normalized.pop();
                }
                other => normalized.push(other.as_os_str()),
            }
        }
        normalized
    }

    /// Metadata for a repository-relative path, `None` if nothing is there
    pub fn metadata(&self, file_path: &str) -> anyhow::Result<Option<Metadata>> {
        match std::fs::metadata(self.path.join(file_path)) {
            Ok(metadata) => Ok(Some(metadata)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).context(format!("Unable to stat {file_path}")),
        }
    }

    pub fn read_file(&self, file_path: &str) -> anyhow::Result<Bytes> {
        let content = std::fs::read(self.path.join(file_path))
            .context(format!("Unable to read {file_path}"))?;

        Ok(content.into())
    }

    pub fn parse_blob(&self, file_path: &str) -> anyhow::Result<Blob> {
        Ok(Blob::new(self.read_file(file_path)?))
    }

    pub fn stat_file(&self, file_path: &str) -> anyhow::Result<EntryMode> {
        let full_path = self.path.join(file_path);
        if !full_path.is_file() {
            anyhow::bail!("not a regular file: {file_path}");
        }

        if full_path.is_executable() {
            Ok(EntryMode::Executable)
        } else {
            Ok(EntryMode::Regular)
        }
    }
}
