//! Gitlet: a small, local, single-user version-control engine
//!
//! The crate is split the same way a git implementation usually is:
//!
//! - `areas`: the stateful parts of a repository (object store, staging index,
//!   branch table, working directory, and the session that ties them together)
//! - `artifacts`: data types and algorithms (objects, branch names, manifest
//!   transitions, split-point discovery, three-way resolution, status, snapshot codec)
//! - `commands`: one user-facing verb per file, each an `impl Repository` block

pub mod areas;
pub mod artifacts;
pub mod commands;
