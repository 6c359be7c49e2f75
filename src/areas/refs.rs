//! Loki references (HEAD and branches)
//!
//! References are human-readable names pointing to commits. They can be:
//! - Direct: containing a commit SHA-1
//! - Symbolic: pointing to another reference (e.g., HEAD -> refs/main)
//!
//! ## File Format
//!
//! References are stored as text files containing either:
//! - A 40-character SHA-1 hash (direct reference)
//! - `ref: <path>` for symbolic references, `<path>` relative to `.loki`

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use regex::Regex;
use std::io::Write;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

static SYMREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(SYMREF_REGEX).unwrap_or_else(|err| panic!("invalid symref pattern: {err}"))
});

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Symbolic chains longer than this are treated as a loop
const MAX_SYMREF_DEPTH: usize = 5;

/// References manager rooted at the `.loki` directory
#[derive(Debug, new)]
pub struct Refs {
    path: Box<Path>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SymRefOrOid {
    SymRef(String),
    Oid(ObjectId),
}

impl SymRefOrOid {
    fn read(path: &Path) -> anyhow::Result<Option<SymRefOrOid>> {
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        match SYMREF.captures(content) {
            Some(symref_match) => Ok(Some(SymRefOrOid::SymRef(symref_match[1].to_string()))),
            None => Ok(Some(SymRefOrOid::Oid(ObjectId::try_parse(
                content.to_string(),
            )?))),
        }
    }
}

impl Refs {
    /// Resolve HEAD to a commit ID
    ///
    /// Missing or empty ref files along the chain give `None`.
    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        self.read_symref(&self.head_path(), 0)
    }

    fn read_symref(&self, path: &Path, depth: usize) -> anyhow::Result<Option<ObjectId>> {
        if depth > MAX_SYMREF_DEPTH {
            anyhow::bail!("symbolic reference chain too deep at {:?}", path);
        }

        match SymRefOrOid::read(path)? {
            Some(SymRefOrOid::SymRef(target)) => {
                self.read_symref(&self.path.join(target), depth + 1)
            }
            Some(SymRefOrOid::Oid(oid)) => Ok(Some(oid)),
            None => Ok(None),
        }
    }

    /// Path of the ref file HEAD ultimately points to
    pub fn current_ref(&self) -> anyhow::Result<PathBuf> {
        let mut path = self.head_path().to_path_buf();

        for _ in 0..=MAX_SYMREF_DEPTH {
            match SymRefOrOid::read(&path)? {
                Some(SymRefOrOid::SymRef(target)) => path = self.path.join(target),
                Some(SymRefOrOid::Oid(_)) | None => return Ok(path),
            }
        }

        anyhow::bail!("symbolic reference chain too deep at {:?}", path)
    }

    /// Point HEAD at a branch, e.g. `main` becomes `ref: refs/main`
    pub fn set_head(&self, branch: &str) -> anyhow::Result<()> {
        self.update_ref_file(&self.head_path(), &format!("ref: refs/{branch}"))
    }

    /// Move the branch HEAD points to onto `oid`
    ///
    /// A detached HEAD (one holding a raw ID) is overwritten directly.
    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        let target = self.current_ref()?;
        self.update_ref_file(&target, oid.as_ref())?;

        tracing::info!(oid = %oid, reference = %target.display(), "updated reference");
        Ok(())
    }

    /// Overwrite a ref file under an exclusive lock, creating parent directories
    pub fn update_ref_file(&self, path: &Path, raw_ref: &str) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }
}
