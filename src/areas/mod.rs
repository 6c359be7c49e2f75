//! Core repository components
//!
//! This module contains the fundamental building blocks of a Loki repository:
//!
//! - `config`: Layered key/value configuration (system, global, local)
//! - `database`: Object database for storing blobs, trees, and commits
//! - `index`: Staging area for recording added, modified and deleted paths
//! - `refs`: Reference management (HEAD and branches)
//! - `repository`: High-level repository operations and coordination
//! - `workspace`: Working directory file system operations

pub mod config;
pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
