//! Gitlet command implementations
//!
//! - `porcelain`: one user-facing verb per module, each extending `Repository`

pub mod porcelain;
