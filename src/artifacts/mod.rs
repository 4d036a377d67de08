//! Gitlet data structures and algorithms
//!
//! - `branch`: Branch names and commit ID prefix resolution
//! - `checkout`: Manifest transitions of the working directory
//! - `core`: Error taxonomy
//! - `merge`: Split point, three-way resolution and conflict markers
//! - `objects`: Object types (blob, commit)
//! - `session`: Snapshot codec and the advisory session lock
//! - `status`: Working directory inspection and the status report

pub mod branch;
pub mod checkout;
pub mod core;
pub mod merge;
pub mod objects;
pub mod session;
pub mod status;
