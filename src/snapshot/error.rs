//! Snapshot error types.

use thiserror::Error;

/// Failures turning a session snapshot into bytes or back
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Could not encode snapshot: {0}")]
    Encode(String),

    /// The input was not a snapshot in the expected encoding
    #[error("Could not decode snapshot: {0}")]
    Decode(String),

    /// Written by a newer or older build with a different layout
    #[error("Snapshot version {found} cannot be read, expected {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}
