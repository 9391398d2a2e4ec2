//! Request lifecycle around the engine.
//!
//! Every request walks `Idle → Loaded → Processed → Finished`:
//!
//! 1. **Load** the state from the [`StateStore`](crate::store::StateStore)
//!    (discarding it first when `clear` is set) and default a fresh state to
//!    the flow's initial state.
//! 2. **Process** the resolved event: pre-view hook of the current state,
//!    the transition attempt, the hook of the new state if it changed, then
//!    the event's action. `next` picks the first permitted event instead.
//! 3. **Finish**: save when the state identifier changed and nothing
//!    aborted, then render the current view (or the previous one after an
//!    abort).
//!
//! `start` skips processing: it discards, reloads, optionally forces the
//! `initial` state and runs only that state's hook.

mod config;
mod controller;
mod phase;
mod render;
mod request;

pub use config::{LifecycleConfig, UndeclaredStatePolicy};
pub use controller::{FlowController, RequestOutcome};
pub use phase::Phase;
pub use render::{RecordingRenderer, RenderTarget, Renderer};
pub use request::{
    FlowRequest, RequestKind, CLEAR_PARAM, INITIAL_PARAM, NEXT, RESERVED_ACTIONS, START,
};
