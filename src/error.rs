//! Per-request errors.

use crate::lifecycle::Phase;
use crate::store::StoreError;
use thiserror::Error;

/// Fatal errors raised while handling one request.
///
/// A blocked transition or an abort is not an error: both are reported
/// through the request outcome.
#[derive(Debug, Error)]
pub enum FlowError {
    /// The store returned something that is not a flow state of this flow
    #[error("load() must return a flow state: {0}")]
    InvalidState(#[source] StoreError),

    #[error("State store failed: {0}")]
    Store(#[source] StoreError),

    #[error("Unknown event '{event}' for flow '{flow}'")]
    UnknownEvent { flow: String, event: String },

    #[error("State '{state}' is not declared by flow '{flow}'")]
    UndeclaredState { flow: String, state: String },

    #[error("No event is permitted from state '{state}'")]
    NoPermittedEvent { state: String },

    #[error("Lifecycle step requires phase {expected}, but the request is {found}")]
    Lifecycle { expected: Phase, found: Phase },
}

impl From<StoreError> for FlowError {
    fn from(err: StoreError) -> Self {
        if err.is_invalid_payload() {
            Self::InvalidState(err)
        } else {
            Self::Store(err)
        }
    }
}
