//! Snapshot error types.

use crate::engine::{MachineError, Strictness};
use thiserror::Error;

/// Errors that can occur while encoding, decoding, or restoring a snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Serialization to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot version is not supported by this version
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Snapshot taken from a {found:?} machine cannot restore into a {expected:?} machine")]
    StrictnessMismatch {
        found: Strictness,
        expected: Strictness,
    },

    /// Re-assigning the saved state failed
    #[error("Restoring saved state failed: {0}")]
    Restore(#[from] MachineError),
}
