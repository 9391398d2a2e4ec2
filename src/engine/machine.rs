//! Event resolution, guard evaluation and rule selection.
//!
//! These functions never run hooks or touch the store; they only read the
//! transition table and move `current_state` when an event fires.

use crate::core::{
    EventId, FlowState, GuardContext, GuardRef, Params, StateId, TransitionRecord,
};
use crate::engine::definition::{EventDef, FlowDefinition, TransitionRule};
use crate::error::FlowError;

/// Evaluate one guard reference.
///
/// Guard names were validated when the definition was built, so a missing
/// guard can only mean a hand-assembled definition; it never passes.
pub fn evaluate(definition: &FlowDefinition, guard: &GuardRef, ctx: &GuardContext<'_>) -> bool {
    definition
        .guard(&guard.name)
        .is_some_and(|g| guard.passes(g.check(ctx)))
}

fn all_pass(definition: &FlowDefinition, guards: &[GuardRef], ctx: &GuardContext<'_>) -> bool {
    guards.iter().all(|g| evaluate(definition, g, ctx))
}

fn current_of<'a>(definition: &'a FlowDefinition, state: &'a FlowState) -> &'a StateId {
    state.current_state().unwrap_or(definition.initial_state())
}

/// First rule of `event` eligible from the current state, if any.
fn select_rule<'d>(
    definition: &'d FlowDefinition,
    event: &'d EventDef,
    current: &StateId,
    ctx: &GuardContext<'_>,
) -> Option<&'d TransitionRule> {
    if !all_pass(definition, &event.guards, ctx) {
        return None;
    }
    event
        .rules
        .iter()
        .find(|rule| rule.matches_source(current) && all_pass(definition, &rule.guards, ctx))
}

/// Look up an event, failing for names the flow does not declare.
pub fn resolve_event<'d>(
    definition: &'d FlowDefinition,
    event: &str,
) -> Result<&'d EventDef, FlowError> {
    definition
        .event(event)
        .ok_or_else(|| FlowError::UnknownEvent {
            flow: definition.name().to_string(),
            event: event.to_string(),
        })
}

/// Try to fire `event`, returning the fired transition.
///
/// `Ok(None)` means no rule was eligible (the guard-blocked case); the
/// state is left untouched.
pub fn fire(
    definition: &FlowDefinition,
    state: &mut FlowState,
    params: &Params,
    event: &EventId,
) -> Result<Option<TransitionRecord>, FlowError> {
    let event_def = resolve_event(definition, event.as_str())?;
    let current = current_of(definition, state).clone();

    let target = {
        let ctx = GuardContext::new(state, params);
        select_rule(definition, event_def, &current, &ctx).map(|rule| rule.to.clone())
    };

    let Some(target) = target else {
        tracing::debug!(
            flow = %definition.name(),
            state = %current,
            event = %event,
            "no eligible transition"
        );
        return Ok(None);
    };

    tracing::info!(
        flow = %definition.name(),
        event = %event,
        from = %current,
        to = %target,
        "transition fired"
    );
    state.set_current_state(target.clone());
    Ok(Some(TransitionRecord::now(event.clone(), current, target)))
}

/// Attempt `event` against `state`. Returns whether it fired.
///
/// # Example
///
/// ```rust
/// use flowstate::builder::{EventBuilder, FlowBuilder, TransitionBuilder};
/// use flowstate::core::{FlowState, Params};
/// use flowstate::engine::attempt;
///
/// let flow = FlowBuilder::new("chores")
///     .initial_state("sleeping")
///     .state("running")
///     .event(EventBuilder::new("run")
///         .transition(TransitionBuilder::new().from("sleeping").to("running")))
///     .build()
///     .unwrap();
///
/// let mut state = FlowState::at("sleeping");
/// assert!(attempt(&flow, &mut state, &Params::new(), &"run".into()).unwrap());
/// assert_eq!(state.current_state().unwrap(), "running");
///
/// // No rule leaves "running" for this event.
/// assert!(!attempt(&flow, &mut state, &Params::new(), &"run".into()).unwrap());
/// ```
pub fn attempt(
    definition: &FlowDefinition,
    state: &mut FlowState,
    params: &Params,
    event: &EventId,
) -> Result<bool, FlowError> {
    Ok(fire(definition, state, params, event)?.is_some())
}

/// Events that would fire from the current state, in declaration order.
pub fn permitted_events(
    definition: &FlowDefinition,
    state: &FlowState,
    params: &Params,
) -> Vec<EventId> {
    let current = current_of(definition, state);
    let ctx = GuardContext::new(state, params);
    definition
        .events()
        .iter()
        .filter(|event| select_rule(definition, event, current, &ctx).is_some())
        .map(|event| event.id.clone())
        .collect()
}

/// The event the `next` operation uses: the first permitted one.
///
/// When several events are permitted the choice is by declaration order
/// only.
pub fn next_event(
    definition: &FlowDefinition,
    state: &FlowState,
    params: &Params,
) -> Option<EventId> {
    let permitted = permitted_events(definition, state, params);
    tracing::debug!(
        flow = %definition.name(),
        permitted = ?permitted,
        "choosing first of the permitted events"
    );
    permitted.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{EventBuilder, FlowBuilder, TransitionBuilder};

    fn chores() -> FlowDefinition {
        FlowBuilder::new("chores")
            .initial_state("sleeping")
            .state("running")
            .state("cleaning")
            .state("finishing")
            .event(EventBuilder::new("run").transition(
                TransitionBuilder::new().from("sleeping").to("running"),
            ))
            .event(EventBuilder::new("clean").unless("clean?").transition(
                TransitionBuilder::new().from("running").to("cleaning"),
            ))
            .event(EventBuilder::new("sleep").unless("finished?").transition(
                TransitionBuilder::new()
                    .from("running")
                    .from("cleaning")
                    .to("sleeping"),
            ))
            .event(
                EventBuilder::new("finish")
                    .when("finished?")
                    .transition(TransitionBuilder::new().to("finishing")),
            )
            .state_guard("clean?", "clean")
            .guard("finished?", |ctx| ctx.state().int("nights").unwrap_or(0) >= 2)
            .build()
            .unwrap()
    }

    fn submit_flow() -> FlowDefinition {
        FlowBuilder::new("submit")
            .initial_state("form")
            .state("special")
            .state("done")
            .event(
                EventBuilder::new("submit")
                    .transition(TransitionBuilder::new().from("form").to("special").when("ready?"))
                    .transition(TransitionBuilder::new().from("form").to("done")),
            )
            .guard("ready?", |ctx| ctx.state().is_truthy("ready"))
            .build()
            .unwrap()
    }

    fn ev(name: &str) -> EventId {
        EventId::from(name)
    }

    #[test]
    fn unconditional_rule_fires() {
        let def = chores();
        let mut state = FlowState::at("sleeping");

        let record = fire(&def, &mut state, &Params::new(), &ev("run")).unwrap().unwrap();
        assert_eq!(record.from, "sleeping");
        assert_eq!(record.to, "running");
        assert_eq!(state.current_state().unwrap(), "running");
    }

    #[test]
    fn unmatched_source_does_not_fire() {
        let def = chores();
        let mut state = FlowState::at("sleeping");

        assert!(!attempt(&def, &mut state, &Params::new(), &ev("clean")).unwrap());
        assert_eq!(state, FlowState::at("sleeping"));
    }

    #[test]
    fn unknown_event_is_an_error() {
        let def = chores();
        let mut state = FlowState::at("sleeping");

        let err = attempt(&def, &mut state, &Params::new(), &ev("fly")).unwrap_err();
        assert!(matches!(err, FlowError::UnknownEvent { ref event, .. } if event == "fly"));
    }

    #[test]
    fn first_eligible_rule_wins() {
        let def = submit_flow();

        let mut state = FlowState::at("form");
        assert!(attempt(&def, &mut state, &Params::new(), &ev("submit")).unwrap());
        assert_eq!(state.current_state().unwrap(), "done");

        let mut state = FlowState::at("form").with("ready", true);
        assert!(attempt(&def, &mut state, &Params::new(), &ev("submit")).unwrap());
        assert_eq!(state.current_state().unwrap(), "special");
    }

    #[test]
    fn event_level_unless_guard_blocks() {
        let def = chores();
        let mut state = FlowState::at("running").with("clean", true);

        assert!(!attempt(&def, &mut state, &Params::new(), &ev("clean")).unwrap());
        assert_eq!(state.current_state().unwrap(), "running");

        state.set("clean", false);
        assert!(attempt(&def, &mut state, &Params::new(), &ev("clean")).unwrap());
        assert_eq!(state.current_state().unwrap(), "cleaning");
    }

    #[test]
    fn rule_without_source_matches_any_state() {
        let def = chores();
        for from in ["sleeping", "running", "cleaning"] {
            let mut state = FlowState::at(from).with("nights", 2);
            assert!(attempt(&def, &mut state, &Params::new(), &ev("finish")).unwrap());
            assert_eq!(state.current_state().unwrap(), "finishing");
        }
    }

    #[test]
    fn unloaded_state_starts_from_initial() {
        let def = chores();
        let mut state = FlowState::new();

        assert!(attempt(&def, &mut state, &Params::new(), &ev("run")).unwrap());
        assert_eq!(state.current_state().unwrap(), "running");
    }

    #[test]
    fn permitted_events_follow_guards_and_sources() {
        let def = chores();
        let params = Params::new();

        assert_eq!(
            permitted_events(&def, &FlowState::at("sleeping"), &params),
            [ev("run")]
        );
        assert_eq!(
            permitted_events(&def, &FlowState::at("running"), &params),
            [ev("clean"), ev("sleep")]
        );
        assert_eq!(
            permitted_events(&def, &FlowState::at("running").with("nights", 2), &params),
            [ev("clean"), ev("finish")]
        );
    }

    #[test]
    fn next_event_picks_first_in_declaration_order() {
        let def = chores();
        let state = FlowState::at("running");

        for _ in 0..3 {
            assert_eq!(next_event(&def, &state, &Params::new()), Some(ev("clean")));
        }
    }

    #[test]
    fn next_event_is_none_when_nothing_permitted() {
        let def = chores();
        let state = FlowState::at("finishing");
        assert_eq!(next_event(&def, &state, &Params::new()), None);
    }
}
