//! The per-request lifecycle: load, process, finish, render.

use crate::core::{EventId, FlowState, Params, StateId, TransitionRecord};
use crate::engine::{
    fire, next_event, resolve_event, run_hook_if_present, ExecutionContext, FlowContext,
    FlowDefinition,
};
use crate::error::FlowError;
use crate::lifecycle::config::{LifecycleConfig, UndeclaredStatePolicy};
use crate::lifecycle::phase::Phase;
use crate::lifecycle::render::{RenderTarget, Renderer};
use crate::lifecycle::request::{clear_requested, initial_override, FlowRequest, RequestKind};
use crate::store::StateStore;

/// What one request did.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestOutcome {
    /// The event attempted, if the request attempted one
    pub event: Option<EventId>,
    pub fired: bool,
    pub aborted: bool,
    /// Whether the state was handed to the store
    pub saved: bool,
    /// State the request started from
    pub previous_state: StateId,
    /// State after the request. Rolled back when the request aborted.
    pub state: FlowState,
    pub transition: Option<TransitionRecord>,
    pub render: RenderTarget,
}

impl RequestOutcome {
    pub fn current_state(&self) -> Option<&StateId> {
        self.state.current_state()
    }
}

/// Drives one request of one flow.
///
/// A controller is created per request and thrown away afterwards; the
/// only thing that outlives it is what it saved through the store.
///
/// # Example
///
/// ```rust
/// use flowstate::builder::{EventBuilder, FlowBuilder, TransitionBuilder};
/// use flowstate::lifecycle::{FlowController, FlowRequest, RecordingRenderer};
/// use flowstate::store::MemoryStore;
///
/// let flow = FlowBuilder::new("ab")
///     .initial_state("a")
///     .state("b")
///     .event(EventBuilder::new("go").transition(TransitionBuilder::new().from("a").to("b")))
///     .build()
///     .unwrap();
///
/// let mut store = MemoryStore::new("ab");
/// let mut renderer = RecordingRenderer::new();
///
/// let outcome = FlowController::new(&flow, &mut store)
///     .handle(&FlowRequest::new("go"), &mut renderer)
///     .unwrap();
///
/// assert!(outcome.fired);
/// assert!(outcome.saved);
/// assert_eq!(renderer.last().unwrap().view, "b");
/// ```
pub struct FlowController<'a> {
    definition: &'a FlowDefinition,
    store: &'a mut dyn StateStore,
    config: LifecycleConfig,
    phase: Phase,
    exec: Option<ExecutionContext>,
    loaded_state: Option<StateId>,
    /// Set when the persisted state was undeclared and got repositioned.
    reset_on_load: bool,
    rollback: Option<FlowState>,
    event: Option<EventId>,
}

impl<'a> FlowController<'a> {
    pub fn new(definition: &'a FlowDefinition, store: &'a mut dyn StateStore) -> Self {
        Self {
            definition,
            store,
            config: LifecycleConfig::default(),
            phase: Phase::Idle,
            exec: None,
            loaded_state: None,
            reset_on_load: false,
            rollback: None,
            event: None,
        }
    }

    pub fn with_config(mut self, config: LifecycleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The working context, between load and finish.
    pub fn context(&self) -> Option<&ExecutionContext> {
        self.exec.as_ref()
    }

    /// Run a whole request and render its result.
    pub fn handle(
        &mut self,
        request: &FlowRequest,
        renderer: &mut dyn Renderer,
    ) -> Result<RequestOutcome, FlowError> {
        tracing::debug!(flow = %self.definition.name(), action = %request.action, "handling request");
        let outcome = match request.kind() {
            RequestKind::Start => self.start(request.params.clone())?,
            RequestKind::Next => {
                self.load(request.params.clone())?;
                self.advance()?;
                self.finish()?
            }
            RequestKind::Event(event) => {
                self.load(request.params.clone())?;
                self.process(event.as_str())?;
                self.finish()?
            }
        };
        renderer.render(&outcome.render.view, outcome.render.status);
        Ok(outcome)
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), FlowError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(FlowError::Lifecycle {
                expected,
                found: self.phase,
            })
        }
    }

    /// Load state from the store, honoring the `clear` parameter.
    pub fn load(&mut self, params: Params) -> Result<&ExecutionContext, FlowError> {
        self.expect_phase(Phase::Idle)?;
        if clear_requested(&params) {
            tracing::debug!(flow = %self.definition.name(), "clear requested, discarding state");
            self.store.save(None)?;
        }
        let (exec, reset) = self.load_context(params)?;
        self.loaded_state = Some(exec.current_state().clone());
        self.reset_on_load = reset;
        self.phase = Phase::Loaded;
        let exec: &ExecutionContext = self.exec.insert(exec);
        Ok(exec)
    }

    /// Load and wrap the stored state. The flag reports whether an
    /// undeclared persisted state was reset to the initial state.
    fn load_context(&mut self, params: Params) -> Result<(ExecutionContext, bool), FlowError> {
        let state = self.store.load()?;
        tracing::debug!(flow = %self.definition.name(), state = ?state, "load returned");
        let (state, reset) = self.check_loaded(state)?;
        let exec = ExecutionContext::new(state, params, self.definition.initial_state());
        Ok((exec, reset))
    }

    fn check_loaded(&self, mut state: FlowState) -> Result<(FlowState, bool), FlowError> {
        let undeclared = state
            .current_state()
            .filter(|current| !self.definition.is_declared(current))
            .cloned();
        let Some(current) = undeclared else {
            return Ok((state, false));
        };
        match self.config.undeclared_state {
            UndeclaredStatePolicy::Reject => Err(FlowError::UndeclaredState {
                flow: self.definition.name().to_string(),
                state: current.to_string(),
            }),
            UndeclaredStatePolicy::ResetToInitial => {
                tracing::warn!(
                    flow = %self.definition.name(),
                    state = %current,
                    "persisted state is no longer declared, restarting at the initial state"
                );
                state.set_current_state(self.definition.initial_state().clone());
                Ok((state, true))
            }
        }
    }

    /// Attempt an ordinary event. Returns whether it fired.
    pub fn process(&mut self, event: &str) -> Result<bool, FlowError> {
        self.expect_phase(Phase::Loaded)?;
        let event = resolve_event(self.definition, event)?.id.clone();
        let fired = self.run_attempt(event)?;
        self.phase = Phase::Processed;
        Ok(fired)
    }

    /// The `next` operation: attempt the first permitted event.
    pub fn advance(&mut self) -> Result<EventId, FlowError> {
        self.expect_phase(Phase::Loaded)?;
        let exec = self.exec.as_ref().ok_or(FlowError::Lifecycle {
            expected: Phase::Loaded,
            found: self.phase,
        })?;
        let event = next_event(self.definition, exec.state(), exec.params()).ok_or_else(|| {
            FlowError::NoPermittedEvent {
                state: exec.current_state().to_string(),
            }
        })?;
        self.run_attempt(event.clone())?;
        self.phase = Phase::Processed;
        Ok(event)
    }

    fn run_attempt(&mut self, event: EventId) -> Result<bool, FlowError> {
        let definition = self.definition;
        let found = self.phase;
        let Some(exec) = self.exec.as_mut() else {
            return Err(FlowError::Lifecycle {
                expected: Phase::Loaded,
                found,
            });
        };

        exec.begin_attempt();
        self.rollback = Some(exec.state.clone());
        self.event = Some(event.clone());

        let before = exec.current_state().clone();
        run_hook_if_present(definition, &before, exec);

        if exec.aborted {
            tracing::debug!(flow = %definition.name(), event = %event, "aborted before firing");
        } else {
            let record = fire(definition, &mut exec.state, &exec.params, &event)?;
            exec.fired = record.is_some();
            exec.transition = record;
        }

        if exec.state_changed() {
            let after = exec.current_state().clone();
            run_hook_if_present(definition, &after, exec);
        }

        if !exec.aborted {
            if let Some(action) = definition.event(event.as_str()).and_then(|e| e.action.as_ref()) {
                tracing::debug!(flow = %definition.name(), event = %event, "running event action");
                action(&mut FlowContext::new(exec));
            }
        }

        Ok(exec.fired)
    }

    /// Persist (unless aborted or unchanged) and pick the view to render.
    pub fn finish(&mut self) -> Result<RequestOutcome, FlowError> {
        self.expect_phase(Phase::Processed)?;
        let (Some(exec), Some(loaded)) = (self.exec.take(), self.loaded_state.take()) else {
            return Err(FlowError::Lifecycle {
                expected: Phase::Processed,
                found: self.phase,
            });
        };
        let definition = self.definition;

        let render = if exec.aborted {
            RenderTarget {
                view: definition.view_for(exec.previous_state()).to_string(),
                status: exec.status.unwrap_or(self.config.abort_status),
            }
        } else {
            RenderTarget {
                view: definition.view_for(exec.current_state()).to_string(),
                status: exec.status.unwrap_or(self.config.success_status),
            }
        };

        // A reset state differs from what is persisted even when nothing fired.
        let changed = *exec.current_state() != loaded || std::mem::take(&mut self.reset_on_load);
        let saved = if exec.aborted {
            tracing::debug!(flow = %definition.name(), "request aborted, nothing persisted");
            false
        } else if changed {
            tracing::debug!(flow = %definition.name(), state = ?exec.state(), "calling save");
            self.store.save(Some(exec.state()))?;
            true
        } else {
            tracing::debug!(flow = %definition.name(), "state unchanged, skipping save");
            false
        };

        let rollback = self.rollback.take();
        let outcome = RequestOutcome {
            event: self.event.take(),
            fired: exec.fired,
            aborted: exec.aborted,
            saved,
            previous_state: loaded,
            transition: exec.transition.clone(),
            render,
            state: match rollback {
                Some(snapshot) if exec.aborted => snapshot,
                _ => exec.into_state(),
            },
        };
        self.phase = Phase::Finished;
        Ok(outcome)
    }

    /// The `start` operation: discard, reload, optionally force a state,
    /// and run only that state's hook. Nothing is saved.
    pub fn start(&mut self, params: Params) -> Result<RequestOutcome, FlowError> {
        self.expect_phase(Phase::Idle)?;
        let definition = self.definition;

        self.store.save(None)?;
        let (mut exec, _) = self.load_context(params)?;
        let loaded = exec.current_state().clone();
        let rollback = exec.state.clone();

        if let Some(target) = initial_override(exec.params()) {
            if !definition.is_declared(&target) {
                return Err(FlowError::UndeclaredState {
                    flow: definition.name().to_string(),
                    state: target.to_string(),
                });
            }
            tracing::debug!(flow = %definition.name(), state = %target, "forcing initial state");
            exec.state.set_current_state(target);
        }

        let current = exec.current_state().clone();
        run_hook_if_present(definition, &current, &mut exec);

        // An aborted start shows the state it started from, as any abort does.
        let (view, status) = if exec.aborted {
            (
                definition.view_for(&loaded).to_string(),
                exec.status.unwrap_or(self.config.abort_status),
            )
        } else {
            (
                definition.view_for(&current).to_string(),
                exec.status.unwrap_or(self.config.success_status),
            )
        };
        self.phase = Phase::Finished;
        Ok(RequestOutcome {
            event: None,
            fired: false,
            aborted: exec.aborted,
            saved: false,
            previous_state: loaded,
            transition: None,
            render: RenderTarget { view, status },
            state: if exec.aborted {
                rollback
            } else {
                exec.into_state()
            },
        })
    }
}
