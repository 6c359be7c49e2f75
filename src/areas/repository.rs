use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::{LOKI_DIR, Workspace};
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::tree::Tree;
use crate::artifacts::status::file_status::FileStatus;
use crate::errors::LokiError;
use anyhow::Context;
use file_guard::{FileGuard, Lock};
use std::cell::{RefCell, RefMut};
use std::fs::File;
use std::path::{Path, PathBuf};

const LOCK_FILE_NAME: &str = "lock";

/// Exclusive advisory lock over the whole repository, released on drop
pub type RepositoryLock = FileGuard<Box<File>>;

/// Walk up from `start` looking for a directory that holds `.loki`
pub fn find_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(LOKI_DIR).is_dir())
        .map(Path::to_path_buf)
}

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Bind to `path` whether or not a repository exists there yet
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path)
                .context(format!("Unable to create directory {}", path.display()))?;
        }
        let path = path
            .canonicalize()
            .context(format!("Unable to resolve {}", path.display()))?;
        let loki_path = path.join(LOKI_DIR);

        let index = Index::new(loki_path.join("index").into_boxed_path());
        let database = Database::new(
            loki_path.join("objects").into_boxed_path(),
            loki_path.join("commits.log").into_boxed_path(),
        );
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(loki_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: RefCell::new(index),
            database,
            workspace,
            refs,
        })
    }

    /// Open the repository containing `cwd`
    pub fn open(cwd: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let root =
            find_root(cwd).ok_or_else(|| LokiError::NotARepository(cwd.to_path_buf()))?;
        tracing::debug!(root = %root.display(), "found repository");

        Self::new(&root, writer)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn loki_path(&self) -> PathBuf {
        self.path.join(LOKI_DIR)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&'_ self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Block until this process holds the repository lock
    pub fn lock(&self) -> anyhow::Result<RepositoryLock> {
        let lock_path = self.loki_path().join(LOCK_FILE_NAME);
        let lock_file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .context(format!("Unable to open lock file {}", lock_path.display()))?;

        let lock = file_guard::lock(Box::new(lock_file), Lock::Exclusive, 0, 1)
            .context(format!("Unable to lock {}", lock_path.display()))?;
        tracing::debug!("acquired repository lock");

        Ok(lock)
    }

    /// Tree of the commit HEAD resolves to
    ///
    /// Any missing or malformed link between HEAD and the tree means there is
    /// no prior history, so failures are logged and mapped to `None`.
    pub fn last_commit_tree(&self) -> Option<Tree> {
        match self.try_last_commit_tree() {
            Ok(tree) => tree,
            Err(err) => {
                tracing::debug!(error = %err, "unable to resolve last commit tree");
                None
            }
        }
    }

    fn try_last_commit_tree(&self) -> anyhow::Result<Option<Tree>> {
        let Some(head) = self.refs.read_head()? else {
            tracing::debug!("HEAD does not point to a commit yet");
            return Ok(None);
        };

        let commit = self
            .database
            .parse_object_as_commit(&head)?
            .ok_or_else(|| anyhow::anyhow!("HEAD {head} is not a commit"))?;

        let tree = self
            .database
            .parse_object_as_tree(commit.tree_oid())?
            .ok_or_else(|| anyhow::anyhow!("{} is not a tree", commit.tree_oid()))?;

        Ok(Some(tree))
    }

    /// Stage one repository-relative path against the last commit
    ///
    /// Returns the recorded status, or `None` when the working file already
    /// matches the last commit. The index is updated in memory only.
    pub fn add_file(&self, path: &str) -> anyhow::Result<Option<FileStatus>> {
        let last_tree = self.last_commit_tree();
        self.stage_file(path, last_tree.as_ref())
    }

    pub(crate) fn stage_file(
        &self,
        path: &str,
        last_tree: Option<&Tree>,
    ) -> anyhow::Result<Option<FileStatus>> {
        let metadata = self.workspace.metadata(path)?;
        let committed = last_tree.and_then(|tree| tree.get(path));

        let status = match (committed, metadata) {
            (_, Some(metadata)) if metadata.is_dir() => {
                return Err(LokiError::PathIsDirectory(path.to_string()).into());
            }
            (None, None) => {
                self.index().remove(path);
                return Err(LokiError::PathNotFound(path.to_string()).into());
            }
            (None, Some(_)) => Some(FileStatus::Added),
            (Some(_), None) => Some(FileStatus::Deleted),
            (Some(entry), Some(_)) => {
                let blob_id = self.workspace.parse_blob(path)?.object_id()?;
                let mode = self.workspace.stat_file(path)?;

                if &blob_id == entry.oid() && mode == entry.mode() {
                    None
                } else {
                    Some(FileStatus::Modified)
                }
            }
        };

        let mut index = self.index();
        match status {
            Some(status) => index.add(path.to_string(), status),
            None => index.remove(path),
        }
        tracing::debug!(path, status = ?status, "staged path");

        Ok(status)
    }
}
