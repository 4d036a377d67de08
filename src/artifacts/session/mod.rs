//! Session snapshot file format
//!
//! The snapshot holds everything that survives between invocations apart
//! from the object store: branch table, head, staging index and commit history.
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "GLET" (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Section count: 7 (4 bytes)
//!
//! Sections (big-endian u32 counts and lengths, 20-byte binary IDs):
//!   - head branch name + head commit
//!   - branches: name, target
//!   - tracked: path, blob
//!   - removed: path
//!   - modified: path, change tag
//!   - untracked: path, blob
//!   - history: commit
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```

pub mod checksum;
pub mod lock;
pub mod session_header;
pub mod snapshot;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of an object ID in its binary form
pub const OID_SIZE: usize = 20;

/// Size of the snapshot header in bytes
pub const HEADER_SIZE: usize = 12;

/// Magic signature identifying snapshot files
pub const SIGNATURE: &str = "GLET";

/// Snapshot file format version
pub const VERSION: u32 = 1;

/// Number of sections following the header
pub const SECTION_COUNT: u32 = 7;
