//! Builder for constructing flow definitions.

use crate::builder::error::{ConfigError, ConfigErrors};
use crate::builder::transition::EventBuilder;
use crate::core::{EventId, Guard, GuardContext, GuardRef, StateId};
use crate::engine::{EventDef, FlowContext, FlowDefinition, HookFn, StateDef};
use crate::lifecycle::RESERVED_ACTIONS;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<ConfigError>>;

fn check(ok: bool, error: impl FnOnce() -> ConfigError) -> Check {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(error())
    }
}

/// Builder for constructing a [`FlowDefinition`] with a fluent API.
///
/// Nothing is validated until [`build`](Self::build), which reports every
/// problem at once.
///
/// # Example
///
/// ```rust
/// use flowstate::builder::{EventBuilder, FlowBuilder, TransitionBuilder};
///
/// let flow = FlowBuilder::new("chores")
///     .initial_state("sleeping")
///     .state("running")
///     .event(EventBuilder::new("run")
///         .transition(TransitionBuilder::new().from("sleeping").to("running"))
///         .action(|ctx| {
///             ctx.set("tired", true);
///         }))
///     .build()
///     .unwrap();
///
/// assert_eq!(flow.initial_state(), "sleeping");
/// ```
pub struct FlowBuilder {
    name: String,
    states: Vec<(StateId, bool)>,
    views: Vec<(StateId, String)>,
    events: Vec<EventBuilder>,
    guards: Vec<(String, Guard)>,
    hooks: Vec<(StateId, HookFn)>,
}

impl FlowBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            states: Vec::new(),
            views: Vec::new(),
            events: Vec::new(),
            guards: Vec::new(),
            hooks: Vec::new(),
        }
    }

    /// Declare the initial state (exactly one is required).
    pub fn initial_state(mut self, state: impl Into<StateId>) -> Self {
        self.states.push((state.into(), true));
        self
    }

    /// Declare a non-initial state.
    pub fn state(mut self, state: impl Into<StateId>) -> Self {
        self.states.push((state.into(), false));
        self
    }

    pub fn states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateId>,
    {
        self.states
            .extend(states.into_iter().map(|s| (s.into(), false)));
        self
    }

    /// Render `state` with a view name other than its identifier.
    pub fn view(mut self, state: impl Into<StateId>, view: impl Into<String>) -> Self {
        self.views.push((state.into(), view.into()));
        self
    }

    pub fn event(mut self, event: EventBuilder) -> Self {
        self.events.push(event);
        self
    }

    /// Register a named guard.
    pub fn guard<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&GuardContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.guards.push((name.into(), Guard::new(predicate)));
        self
    }

    /// Register a guard that passes when the user field `field` is truthy.
    pub fn state_guard(mut self, name: impl Into<String>, field: impl Into<String>) -> Self {
        self.guards.push((name.into(), Guard::field(field)));
        self
    }

    /// Register the hook run before `state` is displayed.
    pub fn before_view<F>(mut self, state: impl Into<StateId>, hook: F) -> Self
    where
        F: Fn(&mut FlowContext<'_>) + Send + Sync + 'static,
    {
        self.hooks.push((state.into(), Arc::new(hook)));
        self
    }

    /// Validate and build the definition.
    pub fn build(self) -> Result<FlowDefinition, ConfigErrors> {
        let mut checks: Vec<Check> = Vec::new();

        let initials: Vec<&StateId> = self
            .states
            .iter()
            .filter(|(_, initial)| *initial)
            .map(|(id, _)| id)
            .collect();
        checks.push(check(!initials.is_empty(), || ConfigError::MissingInitialState));
        checks.push(check(initials.len() <= 1, || ConfigError::MultipleInitialStates {
            states: initials.iter().map(|s| s.to_string()).collect(),
        }));

        let mut declared: HashSet<&StateId> = HashSet::new();
        for (id, _) in &self.states {
            checks.push(check(declared.insert(id), || ConfigError::DuplicateState {
                state: id.to_string(),
            }));
        }

        let mut guard_names: HashSet<&str> = HashSet::new();
        for (name, _) in &self.guards {
            checks.push(check(guard_names.insert(name.as_str()), || {
                ConfigError::DuplicateGuard {
                    guard: name.clone(),
                }
            }));
        }

        let state_ref = |state: &StateId, referenced_by: String| {
            check(declared.contains(state), || ConfigError::UndeclaredState {
                state: state.to_string(),
                referenced_by,
            })
        };
        let guard_ref = |guard: &GuardRef, event: &EventId| {
            check(guard_names.contains(guard.name.as_str()), || {
                ConfigError::UnknownGuard {
                    guard: guard.name.clone(),
                    event: event.to_string(),
                }
            })
        };

        let mut event_names: HashSet<EventId> = HashSet::new();
        let mut events = Vec::with_capacity(self.events.len());
        for event in self.events {
            let id = event.id;
            checks.push(check(!RESERVED_ACTIONS.contains(&id.as_str()), || {
                ConfigError::ReservedEvent {
                    event: id.to_string(),
                }
            }));
            checks.push(check(event_names.insert(id.clone()), || {
                ConfigError::DuplicateEvent {
                    event: id.to_string(),
                }
            }));
            checks.push(check(!event.transitions.is_empty(), || {
                ConfigError::NoTransitions {
                    event: id.to_string(),
                }
            }));
            for guard in &event.guards {
                checks.push(guard_ref(guard, &id));
            }

            let mut rules = Vec::with_capacity(event.transitions.len());
            for (index, builder) in event.transitions.into_iter().enumerate() {
                let rule = match builder.build_for(&id, index) {
                    Ok(rule) => rule,
                    Err(err) => {
                        checks.push(Validation::fail(err));
                        continue;
                    }
                };
                let referenced_by = format!("Transition {index} of event '{id}'");
                for from in &rule.from {
                    checks.push(state_ref(from, referenced_by.clone()));
                }
                checks.push(state_ref(&rule.to, referenced_by));
                for guard in &rule.guards {
                    checks.push(guard_ref(guard, &id));
                }
                rules.push(rule);
            }

            events.push(EventDef {
                id,
                guards: event.guards,
                rules,
                action: event.action,
            });
        }

        for (state, _) in &self.views {
            checks.push(state_ref(state, "View override".to_string()));
        }

        let mut hooked: HashSet<&StateId> = HashSet::new();
        for (state, _) in &self.hooks {
            checks.push(state_ref(state, "before_view hook".to_string()));
            checks.push(check(hooked.insert(state), || ConfigError::DuplicateHook {
                state: state.to_string(),
            }));
        }

        if let Validation::Failure(errors) = Validation::all_vec(checks) {
            let errors: Vec<ConfigError> = errors.iter().cloned().collect();
            tracing::debug!(flow = %self.name, problems = errors.len(), "flow definition rejected");
            return Err(ConfigErrors::new(errors));
        }

        let initial = self
            .states
            .iter()
            .find(|(_, initial)| *initial)
            .map(|(id, _)| id.clone())
            .ok_or_else(|| ConfigErrors::new(vec![ConfigError::MissingInitialState]))?;

        let mut views: HashMap<StateId, String> = self.views.into_iter().collect();
        let states = self
            .states
            .into_iter()
            .map(|(id, _)| {
                let view = views.remove(&id);
                StateDef { id, view }
            })
            .collect();

        tracing::debug!(flow = %self.name, "flow definition built");
        Ok(FlowDefinition {
            name: self.name,
            initial,
            states,
            events,
            guards: self.guards.into_iter().collect(),
            hooks: self.hooks.into_iter().collect(),
        })
    }
}
