//! Loki index (staging area)
//!
//! The index tracks which paths should change in the next commit and how.
//! Entries keep the order in which paths were first staged, which makes both
//! `status` output and the trees built from the index deterministic.
//!
//! ## Index File Format
//!
//! The index file contains:
//! - Header: Signature, version, and entry count
//! - Entries: Status and path for each staged file, in insertion order
//! - Checksum: SHA-1 hash of the entire index for integrity verification

use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_entry::{ENTRY_PREFIX_SIZE, IndexEntry};
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use crate::artifacts::status::file_status::FileStatus;
use crate::errors::LokiError;
use anyhow::Context;
use std::ops::DerefMut;
use std::path::Path;

/// Loki index (staging area)
#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.loki/index`)
    path: Box<Path>,
    /// Staged records in insertion order, unique by path
    entries: Vec<IndexEntry>,
    /// Index file header metadata
    header: IndexHeader,
    /// Flag indicating if the index has been modified since loading
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: Vec::new(),
            header: IndexHeader::empty(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn entry_by_path(&self, path: &str) -> Option<&IndexEntry> {
        self.entries.iter().find(|entry| entry.path == path)
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn reset(&mut self) {
        self.entries.clear();
        self.header = IndexHeader::empty();
        self.changed = false;
    }

    /// Load the index from disk
    ///
    /// A missing or empty index file is an empty index.
    ///
    /// # Locking
    ///
    /// Acquires a shared lock on the index file during reading.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.reset();

        if !self.path().exists() {
            return Ok(());
        }

        let mut index_file = std::fs::OpenOptions::new()
            .read(true)
            .open(self.path())
            .context(format!("Unable to open index file {}", self.path().display()))?;
        let mut lock = file_guard::lock(&mut index_file, file_guard::Lock::Shared, 0, 1)?;

        if lock.deref_mut().metadata()?.len() == 0 {
            return Ok(());
        }

        let mut reader = Checksum::new(lock);
        let entries_count = self.parse_header(&mut reader)?;
        self.parse_entries(entries_count, &mut reader)?;

        reader.verify()
    }

    fn parse_header(&self, reader: &mut Checksum) -> anyhow::Result<u32> {
        let header_bytes = reader.read(HEADER_SIZE)?;
        let header = IndexHeader::deserialize(std::io::Cursor::new(header_bytes))?;

        if header.marker != SIGNATURE {
            return Err(LokiError::CorruptObject("invalid index file signature".into()).into());
        }

        if header.version != VERSION {
            return Err(LokiError::CorruptObject(format!(
                "unsupported index file version: {}",
                header.version
            ))
            .into());
        }

        Ok(header.entries_count)
    }

    fn parse_entries(&mut self, entries_count: u32, reader: &mut Checksum) -> anyhow::Result<()> {
        for _ in 0..entries_count {
            let prefix = reader.read(ENTRY_PREFIX_SIZE)?;
            let (_, path_len) = IndexEntry::parse_prefix(&prefix)?;
            let path = reader.read(path_len)?;

            let entry_bytes = [&prefix[..], &path[..]].concat();
            let entry = IndexEntry::deserialize(entry_bytes.as_slice())?;

            if self.entry_by_path(&entry.path).is_some() {
                return Err(LokiError::CorruptObject(format!(
                    "duplicate index entry {}",
                    entry.path
                ))
                .into());
            }
            self.entries.push(entry);
        }

        self.header.entries_count = entries_count;

        Ok(())
    }

    /// Record `status` for `path`, replacing any earlier record for it
    ///
    /// A replaced record keeps its original position.
    pub fn add(&mut self, path: String, status: FileStatus) {
        match self.entries.iter_mut().find(|entry| entry.path == path) {
            Some(entry) => entry.status = status,
            None => self.entries.push(IndexEntry::new(path, status)),
        }

        self.header.entries_count = self.entries.len() as u32;
        self.changed = true;
    }

    /// Drop the record for `path`, if any
    pub fn remove(&mut self, path: &str) {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.path != path);

        if self.entries.len() != before {
            self.header.entries_count = self.entries.len() as u32;
            self.changed = true;
        }
    }

    /// Persist the index
    ///
    /// # Locking
    ///
    /// Acquires an exclusive lock on the index file during writing.
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        let mut index_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path())
            .context(format!("Unable to open index file {}", self.path().display()))?;
        let lock = file_guard::lock(&mut index_file, file_guard::Lock::Exclusive, 0, 1)?;

        let mut writer = Checksum::new(lock);

        self.header = IndexHeader {
            entries_count: self.entries.len() as u32,
            ..self.header.clone()
        };
        writer.write(&self.header.serialize()?)?;

        for entry in &self.entries {
            writer.write(&entry.serialize()?)?;
        }

        writer.write_checksum()?;
        self.changed = false;

        Ok(())
    }

    /// Empty the staging area and persist the empty index
    pub fn clear(&mut self) -> anyhow::Result<()> {
        self.reset();
        self.write_updates()
    }

    /// Turn the staged records into a tree and store it
    ///
    /// `base` is the last commit's tree. Unstaged entries are carried over
    /// unchanged, added and modified paths get a freshly stored blob read from
    /// the working tree, and deleted paths are dropped.
    pub fn write_tree(
        &self,
        database: &Database,
        workspace: &Workspace,
        base: Option<Tree>,
    ) -> anyhow::Result<ObjectId> {
        let mut tree = base.unwrap_or_default();

        for entry in &self.entries {
            match entry.status {
                FileStatus::Deleted => {
                    let restored = match tree.get(&entry.path) {
                        Some(committed) => Self::matches_working_file(workspace, committed)?,
                        None => false,
                    };
                    if restored {
                        tracing::debug!(path = %entry.path, "deleted path is back unchanged");
                    } else {
                        tree.remove(&entry.path);
                    }
                }
                FileStatus::Added | FileStatus::Modified => {
                    let blob = workspace
                        .parse_blob(&entry.path)
                        .context(format!("Unable to read staged file {}", entry.path))?;
                    let mode = workspace.stat_file(&entry.path)?;
                    let blob_id = database.store(&blob)?;

                    tree.upsert(TreeEntry::try_new(mode, entry.path.clone(), blob_id)?);
                }
            }
        }

        database.store(&tree)
    }

    /// Whether the working file for `committed` exists with the same content and mode
    fn matches_working_file(workspace: &Workspace, committed: &TreeEntry) -> anyhow::Result<bool> {
        match workspace.metadata(committed.name())? {
            Some(metadata) if metadata.is_file() => {
                let blob_id = workspace.parse_blob(committed.name())?.object_id()?;
                let mode = workspace.stat_file(committed.name())?;

                Ok(&blob_id == committed.oid() && mode == committed.mode())
            }
            _ => Ok(false),
        }
    }
}
