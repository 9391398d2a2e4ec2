//! The immutable transition table of a flow.
//!
//! A [`FlowDefinition`] is produced once by
//! [`FlowBuilder`](crate::builder::FlowBuilder) and then shared read-only
//! (typically behind an `Arc`) by every request of that flow. Rules are
//! plain data; guards and hooks are looked up through explicit name and
//! state registrations that were validated when the definition was built.

use crate::core::{EventId, Guard, GuardRef, StateId};
use crate::engine::hooks::HookFn;
use std::collections::HashMap;
use std::fmt;

/// A declared state and the view it renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateDef {
    pub id: StateId,
    /// View name override; the state id is used when absent.
    pub view: Option<String>,
}

impl StateDef {
    pub fn view_name(&self) -> &str {
        self.view.as_deref().unwrap_or(self.id.as_str())
    }
}

/// One guarded transition rule of an event.
///
/// An empty `from` set matches any state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionRule {
    pub from: Vec<StateId>,
    pub to: StateId,
    pub guards: Vec<GuardRef>,
}

impl TransitionRule {
    pub fn matches_source(&self, current: &StateId) -> bool {
        self.from.is_empty() || self.from.contains(current)
    }

    pub fn is_unconditional(&self) -> bool {
        self.guards.is_empty()
    }
}

/// An event with its event-level guards and ordered rules.
pub struct EventDef {
    pub id: EventId,
    /// Guards that must all pass before any rule is considered.
    pub guards: Vec<GuardRef>,
    pub rules: Vec<TransitionRule>,
    pub(crate) action: Option<HookFn>,
}

impl EventDef {
    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// Every state this event can move a flow into, in rule order.
    pub fn targets(&self) -> impl Iterator<Item = &StateId> {
        self.rules.iter().map(|rule| &rule.to)
    }
}

impl fmt::Debug for EventDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDef")
            .field("id", &self.id)
            .field("guards", &self.guards)
            .field("rules", &self.rules)
            .field("action", &self.action.is_some())
            .finish()
    }
}

/// Immutable definition of one flow.
pub struct FlowDefinition {
    pub(crate) name: String,
    pub(crate) initial: StateId,
    pub(crate) states: Vec<StateDef>,
    pub(crate) events: Vec<EventDef>,
    pub(crate) guards: HashMap<String, Guard>,
    pub(crate) hooks: HashMap<StateId, HookFn>,
}

impl FlowDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn initial_state(&self) -> &StateId {
        &self.initial
    }

    /// Declared states in declaration order.
    pub fn states(&self) -> &[StateDef] {
        &self.states
    }

    pub fn state(&self, id: &str) -> Option<&StateDef> {
        self.states.iter().find(|s| s.id == id)
    }

    pub fn is_declared(&self, id: &StateId) -> bool {
        self.state(id.as_str()).is_some()
    }

    /// Declared events in declaration order.
    pub fn events(&self) -> &[EventDef] {
        &self.events
    }

    pub fn event(&self, id: &str) -> Option<&EventDef> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn guard(&self, name: &str) -> Option<&Guard> {
        self.guards.get(name)
    }

    /// Registered guard names, sorted.
    pub fn guard_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.guards.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn has_hook(&self, state: &StateId) -> bool {
        self.hooks.contains_key(state)
    }

    pub(crate) fn hook(&self, state: &StateId) -> Option<&HookFn> {
        self.hooks.get(state)
    }

    /// View rendered for `state`. Undeclared states render under their own
    /// identifier.
    pub fn view_for<'a>(&'a self, state: &'a StateId) -> &'a str {
        self.state(state.as_str())
            .map_or(state.as_str(), StateDef::view_name)
    }
}

impl fmt::Debug for FlowDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut hooks: Vec<&StateId> = self.hooks.keys().collect();
        hooks.sort();
        f.debug_struct("FlowDefinition")
            .field("name", &self.name)
            .field("initial", &self.initial)
            .field("states", &self.states)
            .field("events", &self.events)
            .field("guards", &self.guard_names())
            .field("hooks", &hooks)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{EventBuilder, FlowBuilder, TransitionBuilder};

    fn definition() -> FlowDefinition {
        FlowBuilder::new("chores")
            .initial_state("sleeping")
            .state("running")
            .state("cleaning")
            .view("cleaning", "chores/cleaning")
            .event(EventBuilder::new("run").transition(
                TransitionBuilder::new().from("sleeping").to("running"),
            ))
            .event(
                EventBuilder::new("sleep").transition(
                    TransitionBuilder::new()
                        .from("running")
                        .from("cleaning")
                        .to("sleeping"),
                ),
            )
            .state_guard("clean?", "clean")
            .build()
            .unwrap()
    }

    #[test]
    fn states_and_events_keep_declaration_order() {
        let def = definition();
        let states: Vec<&str> = def.states().iter().map(|s| s.id.as_str()).collect();
        let events: Vec<&str> = def.events().iter().map(|e| e.id.as_str()).collect();

        assert_eq!(states, ["sleeping", "running", "cleaning"]);
        assert_eq!(events, ["run", "sleep"]);
        assert_eq!(def.initial_state(), "sleeping");
    }

    #[test]
    fn view_defaults_to_state_id() {
        let def = definition();
        assert_eq!(def.view_for(&StateId::from("running")), "running");
        assert_eq!(def.view_for(&StateId::from("cleaning")), "chores/cleaning");
        assert_eq!(def.view_for(&StateId::from("gone")), "gone");
    }

    #[test]
    fn rule_with_empty_source_matches_any_state() {
        let rule = TransitionRule {
            from: Vec::new(),
            to: StateId::from("goodbye"),
            guards: Vec::new(),
        };
        assert!(rule.matches_source(&StateId::from("welcome")));
        assert!(rule.matches_source(&StateId::from("goodbye")));
        assert!(rule.is_unconditional());
    }

    #[test]
    fn lookups_by_name() {
        let def = definition();
        assert!(def.is_declared(&StateId::from("cleaning")));
        assert!(!def.is_declared(&StateId::from("finishing")));
        assert!(def.event("sleep").is_some());
        assert!(def.event("fly").is_none());
        assert_eq!(def.guard_names(), ["clean?"]);
        let targets: Vec<&StateId> = def.event("sleep").unwrap().targets().collect();
        assert_eq!(targets, [&StateId::from("sleeping")]);
    }

    #[test]
    fn debug_lists_guard_names() {
        let rendered = format!("{:?}", definition());
        assert!(rendered.contains("clean?"));
        assert!(rendered.contains("chores"));
    }
}
