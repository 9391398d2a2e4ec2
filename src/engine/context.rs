//! Per-request execution context.

use crate::core::{FlowState, Params, StateId, TransitionRecord};

/// Everything one request works on.
///
/// Created when the state is loaded and discarded when the request
/// finishes; its only durable output is the (possibly mutated)
/// [`FlowState`] handed to the store.
#[derive(Clone, Debug)]
pub struct ExecutionContext {
    pub(crate) state: FlowState,
    pub(crate) params: Params,
    pub(crate) previous_state: StateId,
    pub(crate) fired: bool,
    pub(crate) aborted: bool,
    pub(crate) status: Option<u16>,
    pub(crate) transition: Option<TransitionRecord>,
}

impl ExecutionContext {
    /// Wrap a loaded state. A state without a current state identifier is
    /// positioned at `initial`.
    pub fn new(mut state: FlowState, params: Params, initial: &StateId) -> Self {
        let current = match state.current_state() {
            Some(current) => current.clone(),
            None => {
                state.set_current_state(initial.clone());
                initial.clone()
            }
        };
        Self {
            state,
            params,
            previous_state: current,
            fired: false,
            aborted: false,
            status: None,
            transition: None,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn current_state(&self) -> &StateId {
        self.state
            .current_state()
            .unwrap_or(&self.previous_state)
    }

    /// State the current attempt started from.
    pub fn previous_state(&self) -> &StateId {
        &self.previous_state
    }

    pub fn fired(&self) -> bool {
        self.fired
    }

    pub fn aborted(&self) -> bool {
        self.aborted
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn transition(&self) -> Option<&TransitionRecord> {
        self.transition.as_ref()
    }

    /// Reset per-attempt flags and remember where the attempt started.
    pub(crate) fn begin_attempt(&mut self) {
        self.previous_state = self.current_state().clone();
        self.fired = false;
        self.aborted = false;
        self.transition = None;
    }

    pub(crate) fn state_changed(&self) -> bool {
        *self.current_state() != self.previous_state
    }

    pub(crate) fn into_state(self) -> FlowState {
        self.state
    }
}
