//! Working-directory synchronisation
//!
//! Switching the working directory between commits while refusing to clobber
//! files the user never told the repository about.

pub mod migration;
