//! Configuration errors raised while building a flow definition.

use std::fmt;
use thiserror::Error;

/// One problem found in a flow definition.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No initial state. Declare one with .initial_state(state)")]
    MissingInitialState,

    #[error("Only one initial state is allowed, found: {}", .states.join(", "))]
    MultipleInitialStates { states: Vec<String> },

    #[error("State '{state}' is declared more than once")]
    DuplicateState { state: String },

    #[error("Event '{event}' is declared more than once")]
    DuplicateEvent { event: String },

    #[error("Event name '{event}' is reserved")]
    ReservedEvent { event: String },

    #[error("Event '{event}' has no transitions. Add at least one transition")]
    NoTransitions { event: String },

    #[error("Transition {index} of event '{event}' has no target. Call .to(state)")]
    MissingTarget { event: String, index: usize },

    #[error("{referenced_by} references undeclared state '{state}'")]
    UndeclaredState { state: String, referenced_by: String },

    #[error("Guard '{guard}' used by event '{event}' is not registered")]
    UnknownGuard { guard: String, event: String },

    #[error("Guard '{guard}' is registered more than once")]
    DuplicateGuard { guard: String },

    #[error("State '{state}' has more than one before_view hook")]
    DuplicateHook { state: String },
}

/// Every problem found by one [`FlowBuilder::build`](super::FlowBuilder::build).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigErrors(Vec<ConfigError>);

impl ConfigErrors {
    pub(crate) fn new(errors: Vec<ConfigError>) -> Self {
        Self(errors)
    }

    pub fn errors(&self) -> &[ConfigError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, error: &ConfigError) -> bool {
        self.0.contains(error)
    }
}

impl fmt::Display for ConfigErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid flow definition ({} problem", self.0.len())?;
        if self.0.len() != 1 {
            f.write_str("s")?;
        }
        f.write_str(")")?;
        for error in &self.0 {
            write!(f, "; {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigErrors {}

impl IntoIterator for ConfigErrors {
    type Item = ConfigError;
    type IntoIter = std::vec::IntoIter<ConfigError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
