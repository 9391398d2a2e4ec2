//! Lifecycle configuration.

use serde::{Deserialize, Serialize};

/// What to do when the store hands back a state the flow no longer declares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndeclaredStatePolicy {
    /// Fail the request with `FlowError::UndeclaredState`
    #[default]
    Reject,

    /// Log a warning and continue from the initial state
    ResetToInitial,
}

/// Settings for [`FlowController`](super::FlowController).
///
/// # Example
///
/// ```rust
/// use flowstate::lifecycle::{LifecycleConfig, UndeclaredStatePolicy};
///
/// let config = LifecycleConfig::from_json(r#"{ "abort_status": 409 }"#).unwrap();
/// assert_eq!(config.abort_status, 409);
/// assert_eq!(config.success_status, 200);
/// assert_eq!(config.undeclared_state, UndeclaredStatePolicy::Reject);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Status used for normal renders
    pub success_status: u16,

    /// Status used when a request aborted and no hook chose one
    pub abort_status: u16,

    pub undeclared_state: UndeclaredStatePolicy,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            success_status: 200,
            abort_status: 422,
            undeclared_state: UndeclaredStatePolicy::Reject,
        }
    }
}

impl LifecycleConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_abort_status(mut self, status: u16) -> Self {
        self.abort_status = status;
        self
    }

    pub fn with_undeclared_state(mut self, policy: UndeclaredStatePolicy) -> Self {
        self.undeclared_state = policy;
        self
    }
}
