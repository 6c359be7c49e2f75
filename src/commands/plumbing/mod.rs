//! Plumbing commands (low-level operations)
//!
//! Plumbing commands provide direct access to the object store. They're
//! primarily used for scripting and debugging.
//!
//! ## Commands
//!
//! - `hash-object`: Compute object ID and optionally store in database
//! - `cat-file`: Pretty-print a stored object
//! - `ls-tree`: List contents of a tree object

pub mod cat_file;
pub mod hash_object;
pub mod ls_tree;
