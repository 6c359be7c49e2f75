use crate::areas::refs::HEAD_REF_NAME;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// List a tree, given its ID, a commit ID or `HEAD`
    pub fn ls_tree(&self, revision: &str) -> anyhow::Result<()> {
        let oid = if revision == HEAD_REF_NAME {
            self.refs()
                .read_head()?
                .ok_or_else(|| anyhow::anyhow!("HEAD does not point to a commit yet"))?
        } else {
            ObjectId::try_parse(revision.to_string())?
        };

        let tree_oid = match self.database().parse_object_as_commit(&oid)? {
            Some(commit) => commit.tree_oid().clone(),
            None => oid,
        };

        let tree = self
            .database()
            .parse_object_as_tree(&tree_oid)?
            .ok_or_else(|| anyhow::anyhow!("not a tree object: {tree_oid}"))?;

        if !tree.is_empty() {
            writeln!(self.writer(), "{}", tree.display())?;
        }

        Ok(())
    }
}
