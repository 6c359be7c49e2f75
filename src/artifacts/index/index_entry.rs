//! Index entry representation
//!
//! Each entry records the staged intention for one repository-relative path:
//! the path itself and whether it was added, modified or deleted relative to
//! the last commit.
//!
//! ## Entry Format
//!
//! ```text
//! status (u8) | path length (u32, big endian) | path bytes
//! ```

use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::status::file_status::FileStatus;
use crate::errors::LokiError;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};

/// Size of the fixed part of an entry (status byte and path length)
pub const ENTRY_PREFIX_SIZE: usize = 5;

/// Maximum path length supported in index entries
pub const MAX_PATH_SIZE: usize = 4095;

/// Staged record for one path
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    /// Path relative to repository root, `/`-separated
    pub path: String,
    pub status: FileStatus,
}

impl IndexEntry {
    /// Decode the fixed-size prefix, returning the status and the path length to read next
    pub fn parse_prefix(mut prefix: &[u8]) -> anyhow::Result<(FileStatus, usize)> {
        let status = FileStatus::try_from(prefix.read_u8()?)?;
        let path_len = prefix.read_u32::<BigEndian>()? as usize;

        if path_len == 0 || path_len > MAX_PATH_SIZE {
            return Err(LokiError::CorruptObject(format!(
                "invalid index path length {path_len}"
            ))
            .into());
        }

        Ok((status, path_len))
    }
}

impl Packable for IndexEntry {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        if self.path.len() > MAX_PATH_SIZE {
            anyhow::bail!("path too long for index: {}", self.path);
        }

        let mut entry_bytes = Vec::with_capacity(ENTRY_PREFIX_SIZE + self.path.len());
        entry_bytes.write_u8(self.status.code())?;
        entry_bytes.write_u32::<BigEndian>(self.path.len() as u32)?;
        entry_bytes.write_all(self.path.as_bytes())?;

        Ok(Bytes::from(entry_bytes))
    }
}

impl Unpackable for IndexEntry {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut prefix = [0u8; ENTRY_PREFIX_SIZE];
        reader.read_exact(&mut prefix)?;
        let (status, path_len) = Self::parse_prefix(&prefix)?;

        let mut path = vec![0u8; path_len];
        reader.read_exact(&mut path)?;
        let path = String::from_utf8(path)
            .map_err(|_| LokiError::CorruptObject("index path is not valid UTF-8".into()))?;

        Ok(IndexEntry::new(path, status))
    }
}
