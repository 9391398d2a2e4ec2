//! Builders for events and their transition rules.

use crate::builder::error::ConfigError;
use crate::core::{EventId, GuardRef, StateId};
use crate::engine::{FlowContext, HookFn, TransitionRule};
use std::sync::Arc;

/// Builder for one transition rule with a fluent API.
///
/// Leaving out `.from(..)` makes the rule apply from any state.
#[derive(Clone, Debug, Default)]
pub struct TransitionBuilder {
    from: Vec<StateId>,
    to: Option<StateId>,
    guards: Vec<GuardRef>,
}

impl TransitionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source state. May be called several times.
    pub fn from(mut self, state: impl Into<StateId>) -> Self {
        self.from.push(state.into());
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: impl Into<StateId>) -> Self {
        self.to = Some(state.into());
        self
    }

    /// Only eligible when the named guard passes.
    pub fn when(mut self, guard: impl Into<String>) -> Self {
        self.guards.push(GuardRef::when(guard));
        self
    }

    /// Only eligible when the named guard fails.
    pub fn unless(mut self, guard: impl Into<String>) -> Self {
        self.guards.push(GuardRef::unless(guard));
        self
    }

    pub(crate) fn build_for(self, event: &EventId, index: usize) -> Result<TransitionRule, ConfigError> {
        let to = self.to.ok_or_else(|| ConfigError::MissingTarget {
            event: event.to_string(),
            index,
        })?;
        Ok(TransitionRule {
            from: self.from,
            to,
            guards: self.guards,
        })
    }
}

/// Builder for an event (an "action"): its guards, rules and body.
pub struct EventBuilder {
    pub(crate) id: EventId,
    pub(crate) guards: Vec<GuardRef>,
    pub(crate) transitions: Vec<TransitionBuilder>,
    pub(crate) action: Option<HookFn>,
}

impl EventBuilder {
    pub fn new(id: impl Into<EventId>) -> Self {
        Self {
            id: id.into(),
            guards: Vec::new(),
            transitions: Vec::new(),
            action: None,
        }
    }

    /// Event-level guard: no rule is considered unless it passes.
    pub fn when(mut self, guard: impl Into<String>) -> Self {
        self.guards.push(GuardRef::when(guard));
        self
    }

    /// Event-level negated guard.
    pub fn unless(mut self, guard: impl Into<String>) -> Self {
        self.guards.push(GuardRef::unless(guard));
        self
    }

    /// Append a rule. Rules are tried in the order they are added.
    pub fn transition(mut self, rule: TransitionBuilder) -> Self {
        self.transitions.push(rule);
        self
    }

    pub fn transitions(mut self, rules: impl IntoIterator<Item = TransitionBuilder>) -> Self {
        self.transitions.extend(rules);
        self
    }

    /// Body run on every request for this event after the attempt, unless
    /// the request was aborted. It can branch on [`FlowContext::fired`].
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut FlowContext<'_>) + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }
}
