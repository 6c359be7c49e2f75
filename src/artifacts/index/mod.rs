//! Loki index file format
//!
//! The index (staging area) records which paths have a pending change and
//! what kind of change it is. It does not store content: blobs are read from
//! the working tree when the index is turned into a tree.
//!
//! ## File Format (Version 1)
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "LIDX" (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Entry count (4 bytes)
//!
//! Entries (variable length, insertion order):
//!   - Status (1 byte)
//!   - Path length (4 bytes)
//!   - Path (UTF-8)
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```

pub mod checksum;
pub mod index_entry;
pub mod index_header;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of index header in bytes
pub const HEADER_SIZE: usize = 12; // 4 bytes for marker, 4 for version, 4 for entries_count

/// Magic signature identifying index files
pub const SIGNATURE: &str = "LIDX";

/// Index file format version
pub const VERSION: u32 = 1;
