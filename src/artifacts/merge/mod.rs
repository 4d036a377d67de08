//! Merge engine building blocks
//!
//! - `split_point`: common-ancestor discovery over the commit graph
//! - `resolution`: three-way classification of a single path
//! - `conflict`: textual conflict markers for irreconcilable paths

pub mod conflict;
pub mod resolution;
pub mod split_point;
