//! Pre-view hooks and event actions.
//!
//! A hook is registered for a state and runs whenever a request is about
//! to show that state or has just arrived at it. Event actions share the
//! same shape and run after an event was attempted. Both may change user
//! fields, choose a response status, or abort the request.

use crate::core::{FieldValue, FlowState, Params, StateId};
use crate::engine::context::ExecutionContext;
use crate::engine::definition::FlowDefinition;
use std::sync::Arc;

/// Boxed hook or action body.
pub type HookFn = Arc<dyn Fn(&mut FlowContext<'_>) + Send + Sync>;

/// The view of an [`ExecutionContext`] handed to hooks and actions.
///
/// Hooks may only touch user fields; the current state identifier stays
/// under the engine's control.
pub struct FlowContext<'a> {
    exec: &'a mut ExecutionContext,
}

impl<'a> FlowContext<'a> {
    pub(crate) fn new(exec: &'a mut ExecutionContext) -> Self {
        Self { exec }
    }

    pub fn state(&self) -> &FlowState {
        &self.exec.state
    }

    pub fn params(&self) -> &Params {
        &self.exec.params
    }

    pub fn current_state(&self) -> &StateId {
        self.exec.current_state()
    }

    pub fn previous_state(&self) -> &StateId {
        &self.exec.previous_state
    }

    /// Whether the event of this request fired. Always `false` inside a
    /// pre-transition hook.
    pub fn fired(&self) -> bool {
        self.exec.fired
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.exec.state.set(name, value)
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.exec.state.remove(name)
    }

    /// Suppress the transition (if it has not happened yet) and any
    /// persistence for this request.
    pub fn abort(&mut self) {
        self.exec.aborted = true;
    }

    pub fn is_aborted(&self) -> bool {
        self.exec.aborted
    }

    /// Status code for the response of this request.
    pub fn set_status(&mut self, status: u16) {
        self.exec.status = Some(status);
    }
}

/// Run the hook registered for `state`, if any. Returns whether a hook ran.
pub fn run_hook_if_present(
    definition: &FlowDefinition,
    state: &StateId,
    exec: &mut ExecutionContext,
) -> bool {
    let Some(hook) = definition.hook(state) else {
        return false;
    };
    tracing::debug!(flow = %definition.name(), state = %state, "running before_view hook");
    hook(&mut FlowContext::new(exec));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{EventBuilder, FlowBuilder, TransitionBuilder};

    fn definition() -> FlowDefinition {
        FlowBuilder::new("forms")
            .initial_state("welcome")
            .state("goodbye")
            .event(EventBuilder::new("finish").transition(TransitionBuilder::new().to("goodbye")))
            .before_view("goodbye", |ctx| {
                ctx.set("farewell", "see you");
                ctx.set_status(201);
            })
            .before_view("welcome", |ctx| {
                if ctx.params().contains_key("stop") {
                    ctx.abort();
                }
            })
            .build()
            .unwrap()
    }

    #[test]
    fn missing_hook_is_a_no_op() {
        let def = FlowBuilder::new("bare")
            .initial_state("only")
            .event(EventBuilder::new("stay").transition(TransitionBuilder::new().to("only")))
            .build()
            .unwrap();
        let mut exec = ExecutionContext::new(FlowState::new(), Params::new(), def.initial_state());

        assert!(!run_hook_if_present(&def, &"only".into(), &mut exec));
        assert_eq!(exec.state().fields().count(), 0);
    }

    #[test]
    fn hook_mutates_fields_and_status() {
        let def = definition();
        let mut exec = ExecutionContext::new(FlowState::at("goodbye"), Params::new(), def.initial_state());

        assert!(run_hook_if_present(&def, &"goodbye".into(), &mut exec));
        assert_eq!(exec.state().text("farewell"), Some("see you"));
        assert_eq!(exec.status(), Some(201));
        assert!(!exec.aborted());
    }

    #[test]
    fn hook_can_abort() {
        let def = definition();
        let mut params = Params::new();
        params.insert("stop".into(), serde_json::json!(true));
        let mut exec = ExecutionContext::new(FlowState::new(), params, def.initial_state());

        run_hook_if_present(&def, &"welcome".into(), &mut exec);
        assert!(exec.aborted());
    }
}
