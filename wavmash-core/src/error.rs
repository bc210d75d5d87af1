//! Error types for the wavmash pipeline
//!
//! Defines pipeline-specific error types using thiserror for clear error
//! propagation. Per-source decode failures are recoverable (the assembler
//! skips the source); configuration and emptiness errors are terminal.

use thiserror::Error;

/// Main error type for the wavmash pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration value (zero segment length, chunk size, or
    /// target rate)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Audio decoding errors
    #[error("Audio decode error: {0}")]
    Decode(String),

    /// Resampler construction or processing errors
    #[error("Resample error: {0}")]
    Resample(String),

    /// Buffers with differing rates reached concatenation
    #[error("Sample rate mismatch: expected {expected} Hz, found {found} Hz")]
    SampleRateMismatch { expected: u32, found: u32 },

    /// No source survived filtering and decoding
    #[error("No valid input: all sources were filtered out or failed to decode")]
    NoValidInput,

    /// Audio encoding errors
    #[error("Audio encode error: {0}")]
    Encode(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type using the wavmash Error
pub type Result<T> = std::result::Result<T, Error>;
