//! Object types and operations
//!
//! Everything the engine persists is an object identified by a SHA-1 digest:
//!
//! - **Blob**: one file's content, named by `sha1(path + content)`
//! - **Commit**: a manifest snapshot with metadata and one or two parents
//!
//! All objects are framed on disk as `<type> <size>\0<payload>`.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
