//! Records of fired transitions.

use super::ids::{EventId, StateId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a single fired transition.
///
/// Produced by the engine when an event fires and handed back to the
/// caller on the request outcome. Records are immutable values.
///
/// # Example
///
/// ```rust
/// use flowstate::core::TransitionRecord;
///
/// let record = TransitionRecord::now("run", "sleeping", "running");
/// assert_eq!(record.event, "run");
/// assert!(record.changed_state());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The event that fired
    pub event: EventId,
    /// The state being transitioned from
    pub from: StateId,
    /// The state being transitioned to
    pub to: StateId,
    /// When the transition fired
    pub timestamp: DateTime<Utc>,
}

impl TransitionRecord {
    /// Record a transition stamped with the current time.
    pub fn now(
        event: impl Into<EventId>,
        from: impl Into<StateId>,
        to: impl Into<StateId>,
    ) -> Self {
        Self {
            event: event.into(),
            from: from.into(),
            to: to.into(),
            timestamp: Utc::now(),
        }
    }

    /// Self-transitions fire without changing the state identifier.
    pub fn changed_state(&self) -> bool {
        self.from != self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_transition_does_not_change_state() {
        let record = TransitionRecord::now("refresh", "welcome", "welcome");
        assert!(!record.changed_state());
    }

    #[test]
    fn record_serializes_correctly() {
        let record = TransitionRecord::now("ask", "welcome", "what_is_your_favorite_day");
        let json = serde_json::to_string(&record).unwrap();
        let back: TransitionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
