use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::LokiError;
use std::io::Write;

impl Repository {
    /// Turn the index into a tree and a commit, move HEAD, then clear the index
    ///
    /// The index is cleared only after every object, the log line and the
    /// ref have been written, so an interrupted commit leaves it staged.
    pub fn commit(&self, message: &str) -> anyhow::Result<ObjectId> {
        let message = message.trim();
        if message.is_empty() {
            anyhow::bail!("Aborting commit due to empty commit message");
        }

        let _lock = self.lock()?;
        self.index().rehydrate()?;

        if self.index().is_empty() {
            return Err(LokiError::NothingToCommit.into());
        }

        let last_tree = self.last_commit_tree();
        let is_root = match last_tree {
            Some(_) => "",
            None => "(root-commit) ",
        };

        let tree_id = self
            .index()
            .write_tree(self.database(), self.workspace(), last_tree)?;
        let commit_id = self.database().write_commit(tree_id, message)?;
        self.refs().update_head(&commit_id)?;

        self.index().clear()?;

        writeln!(
            self.writer(),
            "[{}{}] {}",
            is_root,
            commit_id.to_short_oid(),
            message.lines().next().unwrap_or_default()
        )?;

        Ok(commit_id)
    }
}
