//! Loki object types and operations
//!
//! Loki stores all content as objects identified by SHA-1 hashes. There are three types:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Flat snapshot of tracked paths (mode, name and blob ID per entry)
//! - **Commit**: A tree ID plus a message
//!
//! All objects share the on-disk framing `<type> <size>\0<content>`, so two
//! objects of different kinds never hash to the same ID.

pub mod blob;
pub mod commit;
pub mod entry_mode;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 hash in raw bytes
pub const RAW_OBJECT_ID_LENGTH: usize = 20;
