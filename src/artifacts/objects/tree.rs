//! Loki tree object
//!
//! A tree is the full snapshot of tracked paths at one commit. Trees are flat:
//! each entry name is a repository-relative path such as `src/main.rs`.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<20-byte-sha1>`
//!
//! Entries are written in insertion order. There is no per-entry length
//! prefix, so names containing NUL are rejected when the entry is built.

use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::LokiError;
use bytes::Bytes;
use std::io::{BufRead, Write};

/// One path's last-known content identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    mode: EntryMode,
    name: String,
    oid: ObjectId,
}

impl TreeEntry {
    pub fn try_new(
        mode: EntryMode,
        name: impl Into<String>,
        oid: ObjectId,
    ) -> anyhow::Result<Self> {
        let name = name.into();
        if name.is_empty() || name.contains('\0') {
            return Err(LokiError::InvalidTreeEntryName(name).into());
        }

        Ok(TreeEntry { mode, name, oid })
    }

    pub fn mode(&self) -> EntryMode {
        self.mode
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }
}

/// Ordered sequence of entries, unique by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// Build a tree from entries, rejecting duplicate names
    pub fn try_from_entries(entries: impl IntoIterator<Item = TreeEntry>) -> anyhow::Result<Self> {
        let mut tree = Self::default();
        for entry in entries {
            if tree.get(entry.name()).is_some() {
                anyhow::bail!("duplicate tree entry name: {}", entry.name());
            }
            tree.entries.push(entry);
        }

        Ok(tree)
    }

    /// Look up an entry by name
    pub fn get(&self, name: &str) -> Option<&TreeEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Replace the entry with the same name in place, or append it
    pub fn upsert(&mut self, entry: TreeEntry) {
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Remove an entry by name, returning it if it was present
    pub fn remove(&mut self, name: &str) -> Option<TreeEntry> {
        let position = self.entries.iter().position(|entry| entry.name == name)?;
        Some(self.entries.remove(position))
    }

    pub fn entries(&self) -> impl Iterator<Item = &TreeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Packable for Tree {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut content_bytes = Vec::new();

        for entry in &self.entries {
            let header = format!("{} {}", entry.mode.as_str(), entry.name);
            content_bytes.write_all(header.as_bytes())?;
            content_bytes.push(0);
            entry.oid.write_h40_to(&mut content_bytes)?;
        }

        frame(self.object_type(), &content_bytes)
    }
}

impl Unpackable for Tree {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let mut entries = Vec::new();
        let mut reader = reader;

        // Reuse scratch buffers to reduce allocs
        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            // Read "mode " (space-delimited)
            let n = reader.read_until(b' ', &mut mode_bytes)?;
            if n == 0 {
                break; // clean EOF: no more entries
            }
            if mode_bytes.pop() != Some(b' ') {
                return Err(
                    LokiError::CorruptObject("unexpected EOF in tree entry mode".into()).into(),
                );
            }
            let mode = EntryMode::try_from(std::str::from_utf8(&mode_bytes)?)?;

            // Read "name\0"
            name_bytes.clear();
            reader.read_until(b'\0', &mut name_bytes)?;
            if name_bytes.pop() != Some(b'\0') {
                return Err(
                    LokiError::CorruptObject("unexpected EOF in tree entry name".into()).into(),
                );
            }
            let name = std::str::from_utf8(&name_bytes)?.to_owned();

            let oid = ObjectId::read_h40_from(&mut reader)
                .map_err(|_| LokiError::CorruptObject(format!("truncated object id for {name}")))?;

            entries.push(TreeEntry::try_new(mode, name, oid)?);
        }

        Tree::try_from_entries(entries)
            .map_err(|err| LokiError::CorruptObject(err.to_string()).into())
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                format!(
                    "{} {} {}\t{}",
                    entry.mode.as_str(),
                    ObjectType::Blob,
                    entry.oid,
                    entry.name
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}
