//! Shared building blocks used across the engine

pub mod error;
pub mod output;

pub use error::GitletError;
pub use output::PipeWriter;
