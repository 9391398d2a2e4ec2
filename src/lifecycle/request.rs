//! Inbound requests and how they map onto events.

use crate::core::{param_is_truthy, param_str, EventId, Params, StateId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Action that discards the persisted state and starts over.
pub const START: &str = "start";

/// Action that fires the first permitted event.
pub const NEXT: &str = "next";

/// Action names that can never be declared as events.
pub const RESERVED_ACTIONS: [&str; 2] = [START, NEXT];

/// Parameter honored by `start`: a state to force the flow into.
pub const INITIAL_PARAM: &str = "initial";

/// Parameter that resets the flow before an ordinary request is processed.
pub const CLEAR_PARAM: &str = "clear";

/// What the host transport hands the engine for one request.
///
/// # Example
///
/// ```rust
/// use flowstate::lifecycle::{FlowRequest, RequestKind};
///
/// let request = FlowRequest::new("submit").with_param("clear", "1");
/// assert!(request.clear_requested());
/// assert_eq!(request.kind(), RequestKind::Event("submit".into()));
/// assert_eq!(FlowRequest::new("next").kind(), RequestKind::Next);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowRequest {
    /// The routed action name
    pub action: String,
    /// Untyped request parameters
    #[serde(default)]
    pub params: Params,
}

/// How a request is dispatched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestKind {
    Start,
    Next,
    Event(EventId),
}

impl FlowRequest {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            params: Params::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params.extend(params);
        self
    }

    /// Resolve the action name, intercepting the reserved actions.
    pub fn kind(&self) -> RequestKind {
        match self.action.as_str() {
            START => RequestKind::Start,
            NEXT => RequestKind::Next,
            other => RequestKind::Event(EventId::from(other)),
        }
    }

    /// State override requested through the `initial` parameter.
    pub fn initial_override(&self) -> Option<StateId> {
        initial_override(&self.params)
    }

    pub fn clear_requested(&self) -> bool {
        clear_requested(&self.params)
    }
}

pub(crate) fn initial_override(params: &Params) -> Option<StateId> {
    param_str(params, INITIAL_PARAM)
        .filter(|s| !s.is_empty())
        .map(StateId::from)
}

pub(crate) fn clear_requested(params: &Params) -> bool {
    params.get(CLEAR_PARAM).is_some_and(param_is_truthy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_actions_are_intercepted() {
        assert_eq!(FlowRequest::new("start").kind(), RequestKind::Start);
        assert_eq!(FlowRequest::new("next").kind(), RequestKind::Next);
        assert_eq!(
            FlowRequest::new("run").kind(),
            RequestKind::Event(EventId::from("run"))
        );
    }

    #[test]
    fn initial_override_reads_string_param() {
        let request = FlowRequest::new("start").with_param("initial", "cleaning");
        assert_eq!(request.initial_override(), Some(StateId::from("cleaning")));
        assert_eq!(FlowRequest::new("start").with_param("initial", "").initial_override(), None);
        assert_eq!(FlowRequest::new("start").initial_override(), None);
    }

    #[test]
    fn clear_follows_param_truthiness() {
        assert!(FlowRequest::new("run").with_param("clear", true).clear_requested());
        assert!(!FlowRequest::new("run").with_param("clear", "false").clear_requested());
        assert!(!FlowRequest::new("run").clear_requested());
    }

    #[test]
    fn request_deserializes_without_params() {
        let request: FlowRequest = serde_json::from_str(r#"{"action":"ask"}"#).unwrap();
        assert_eq!(request, FlowRequest::new("ask"));
    }
}
