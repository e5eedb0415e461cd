//! # World Error Types
//!
//! All errors that can occur while storing, generating or persisting chunks.
//!
//! Reads never produce errors: an out-of-bounds or unset coordinate is the
//! canonical "no block" signal and is reported as `None`. Only writes and I/O
//! can fail.

use thiserror::Error;

/// Errors that can occur in the world core.
#[derive(Error, Debug)]
pub enum WorldError {
    /// A write targeted a coordinate outside the chunk.
    #[error("block coordinates out of bounds: ({x}, {y}, {z}) not inside {width}x{height}x{width}")]
    OutOfBounds {
        /// Requested X.
        x: i32,
        /// Requested Y.
        y: i32,
        /// Requested Z.
        z: i32,
        /// Chunk width/depth.
        width: u32,
        /// Chunk height.
        height: u32,
    },

    /// Chunk dimensions must be non-zero.
    #[error("invalid chunk size: {width}x{height}")]
    InvalidChunkSize {
        /// Requested width/depth.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Snapshot file could not be read or written.
    #[error("snapshot i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot bytes are truncated or hold unknown data.
    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    /// Snapshot was written by an incompatible format version.
    #[error("unsupported snapshot version {0}")]
    UnsupportedSnapshotVersion(u32),

    /// Snapshot body does not match the chunk size in its header.
    #[error("snapshot holds {actual} cells, expected {expected}")]
    SnapshotSizeMismatch {
        /// Cell count implied by the header.
        expected: usize,
        /// Cell count actually decoded.
        actual: usize,
    },

    /// Generation parameters could not be parsed.
    #[error("invalid generation parameters: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for world operations.
pub type WorldResult<T> = Result<T, WorldError>;
