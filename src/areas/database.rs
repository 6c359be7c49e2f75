use crate::artifacts::log::log_entry::LogEntry;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, ObjectBox, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::LokiError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use sha1::{Digest, Sha1};
use std::io::{BufRead, Cursor, Write};
use std::path::{Path, PathBuf};

/// Content-addressed object store rooted at `.loki/objects`
///
/// Objects are written uncompressed, so the bytes of every object file hash
/// to the file's own name.
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
    log_path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>, log_path: Box<Path>) -> Self {
        Database { path, log_path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    /// Raw serialized bytes of an object, header included
    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());

        self.read_object(object_path)
    }

    /// Write an object unless it already exists and return its ID
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object_id.to_path());

        if self.exists(&object_id) {
            tracing::debug!(oid = %object_id, "object already stored");
            return Ok(object_id);
        }

        std::fs::create_dir_all(
            object_path
                .parent()
                .context(format!("Invalid object path {}", object_path.display()))?,
        )
        .context(format!(
            "Unable to create object directory {}",
            object_path.display()
        ))?;

        self.write_object(object_path, object.serialize()?)?;
        tracing::debug!(oid = %object_id, kind = %object.object_type(), "stored object");

        Ok(object_id)
    }

    /// Store a commit for `tree_oid` and append it to the commit log
    ///
    /// The log append happens after the object write. A crash in between
    /// leaves a stored commit that the log does not list.
    pub fn write_commit(&self, tree_oid: ObjectId, message: &str) -> anyhow::Result<ObjectId> {
        let commit = Commit::new(tree_oid, message.to_string());
        let commit_id = self.store(&commit)?;

        let mut log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .context(format!("Unable to open commit log {}", self.log_path.display()))?;
        let entry = LogEntry::new(commit_id.clone(), commit.short_message().to_string());
        log_file
            .write_all(entry.to_line().as_bytes())
            .context(format!("Unable to append to commit log {}", self.log_path.display()))?;

        tracing::info!(oid = %commit_id, "recorded commit");
        Ok(commit_id)
    }

    /// All commits in the order they were made
    pub fn read_log(&self) -> anyhow::Result<Vec<LogEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.log_path)
            .context(format!("Unable to read commit log {}", self.log_path.display()))?;

        Ok(content.lines().filter_map(LogEntry::parse_line).collect())
    }

    pub fn parse_object(&self, object_id: &ObjectId) -> anyhow::Result<ObjectBox> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => Ok(ObjectBox::Blob(Box::new(Blob::deserialize(object_reader)?))),
            ObjectType::Tree => Ok(ObjectBox::Tree(Box::new(Tree::deserialize(object_reader)?))),
            ObjectType::Commit => Ok(ObjectBox::Commit(Box::new(Commit::deserialize(
                object_reader,
            )?))),
        }
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Option<Blob>> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => Ok(Some(Blob::deserialize(object_reader)?)),
            _ => Ok(None),
        }
    }

    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> anyhow::Result<Option<Tree>> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Tree => Ok(Some(Tree::deserialize(object_reader)?)),
            _ => Ok(None),
        }
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Option<Commit>> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Commit => Ok(Some(Commit::deserialize(object_reader)?)),
            _ => Ok(None),
        }
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> anyhow::Result<(ObjectType, impl BufRead)> {
        let object_content = self.load(object_id)?;

        let digest = Sha1::digest(&object_content);
        if ObjectId::from_digest(digest.as_slice())? != *object_id {
            return Err(LokiError::CorruptObject(format!(
                "{object_id} does not match its content"
            ))
            .into());
        }

        let mut object_reader = Cursor::new(object_content);
        let (object_type, size) = ObjectType::parse_header(&mut object_reader)?;

        let remaining = object_reader.get_ref().len() - object_reader.position() as usize;
        if remaining != size {
            return Err(LokiError::CorruptObject(format!(
                "{object_id} declares {size} bytes but holds {remaining}"
            ))
            .into());
        }

        Ok((object_type, object_reader))
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Ok(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;
        file.sync_all()?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
