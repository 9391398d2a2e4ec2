//! State store error types.

use thiserror::Error;

/// Errors that can occur while loading or saving flow state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Encoding a snapshot to JSON or binary format failed
    #[error("Encoding state failed: {0}")]
    Encode(String),

    /// The stored payload is not a flow state
    #[error("Decoding state failed: {0}")]
    Decode(String),

    /// Snapshot version is not supported by this version
    #[error("Unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Snapshot was written by a different flow
    #[error("Snapshot belongs to flow '{found}', expected '{expected}'")]
    FlowMismatch { expected: String, found: String },

    /// The backing storage itself failed
    #[error("State backend failed: {0}")]
    Backend(String),
}

impl StoreError {
    /// Whether the stored payload exists but cannot be read back as a
    /// flow state for this flow.
    pub fn is_invalid_payload(&self) -> bool {
        matches!(
            self,
            Self::Decode(_) | Self::UnsupportedVersion { .. } | Self::FlowMismatch { .. }
        )
    }
}
