//! Working tree status inspection
//!
//! - `file_change`: why a tracked file differs from what would be committed
//! - `inspector`: derives the modified and untracked views
//! - `status_info`: renders the five-section status report

pub mod file_change;
pub mod inspector;
pub mod status_info;
