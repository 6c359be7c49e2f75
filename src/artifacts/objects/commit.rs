//! Loki commit object
//!
//! A commit points at one tree and carries a message. History is linear and
//! recorded in `.loki/commits.log`, so commits have no parent, author or
//! timestamp fields: a commit's ID depends only on its tree ID and message.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0tree <tree-sha>
//! <commit message>
//! ```

use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::LokiError;
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

const TREE_PREFIX: &str = "tree ";

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Commit {
    tree_oid: ObjectId,
    message: String,
}

impl Commit {
    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First line of the message
    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let content = format!("{TREE_PREFIX}{}\n{}", self.tree_oid, self.message);
        frame(self.object_type(), content.as_bytes())
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut tree_line = String::new();
        reader.read_line(&mut tree_line)?;

        let tree_oid = tree_line
            .strip_prefix(TREE_PREFIX)
            .map(|oid| oid.trim_end_matches('\n'))
            .ok_or_else(|| LokiError::CorruptObject("commit has no tree line".into()))?;
        let tree_oid = ObjectId::try_parse(tree_oid.to_string())
            .map_err(|err| LokiError::CorruptObject(err.to_string()))?;

        // messages are arbitrary bytes; invalid UTF-8 is replaced, not rejected
        let mut message = Vec::new();
        reader.read_to_end(&mut message)?;

        Ok(Commit::new(tree_oid, String::from_utf8_lossy(&message).into_owned()))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        format!("{TREE_PREFIX}{}\n\n{}", self.tree_oid, self.message)
    }
}
