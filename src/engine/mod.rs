//! The FSM execution core.
//!
//! # Key Concepts
//!
//! - **Definition**: an inert, inspectable transition table built once per flow
//! - **Machine**: picks the first eligible rule of an event and moves the state
//! - **Hooks**: pre-view code registered per state, plus per-event actions
//! - **Context**: the per-request working set (state, params, flags)
//!
//! Guard evaluation is ordered and deterministic: event guards first, then
//! rules in declaration order, each rule's guards in declaration order.

mod context;
mod definition;
mod hooks;
mod machine;

pub use context::ExecutionContext;
pub use definition::{EventDef, FlowDefinition, StateDef, TransitionRule};
pub use hooks::{run_hook_if_present, FlowContext, HookFn};
pub use machine::{attempt, evaluate, fire, next_event, permitted_events, resolve_event};
