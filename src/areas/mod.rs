//! Core repository components
//!
//! - `database`: content-addressed object store for blobs and commits
//! - `index`: staging area for pending additions and removals
//! - `refs`: branch table and the active branch
//! - `repository`: the per-command session tying the areas together
//! - `workspace`: working directory file system operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
