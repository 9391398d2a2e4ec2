//! Flowstate: a request-driven state machine engine
//!
//! Flowstate drives multi-step interactions (surveys, form wizards,
//! registration flows) one request at a time. Each request maps onto an
//! event, the event is attempted against an immutable transition table,
//! hooks run around the transition, and the resulting state is handed to a
//! store so the next, independent request can pick it up.
//!
//! # Core Concepts
//!
//! - **State**: the persisted [`FlowState`](core::FlowState) container
//! - **Definition**: states, events and guarded rules, built and validated once
//! - **Guards**: named predicates registered on the definition
//! - **Hooks**: pre-view code per state, which may abort the request
//! - **Lifecycle**: load, process, finish, render
//!
//! # Example
//!
//! ```rust
//! use flowstate::builder::{EventBuilder, FlowBuilder, TransitionBuilder};
//! use flowstate::lifecycle::{FlowController, FlowRequest, RecordingRenderer};
//! use flowstate::store::{MemoryStore, StateStore};
//!
//! let flow = FlowBuilder::new("chores")
//!     .initial_state("sleeping")
//!     .state("running")
//!     .event(EventBuilder::new("run")
//!         .transition(TransitionBuilder::new().from("sleeping").to("running")))
//!     .event(EventBuilder::new("sleep")
//!         .transition(TransitionBuilder::new().from("running").to("sleeping")))
//!     .build()
//!     .unwrap();
//!
//! let mut store = MemoryStore::new("chores");
//! let mut renderer = RecordingRenderer::new();
//!
//! for action in ["run", "sleep", "run"] {
//!     FlowController::new(&flow, &mut store)
//!         .handle(&FlowRequest::new(action), &mut renderer)
//!         .unwrap();
//! }
//!
//! assert_eq!(store.load().unwrap().current_state().unwrap(), "running");
//! assert_eq!(renderer.rendered.len(), 3);
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod store;

// Re-export commonly used types
pub use crate::builder::{ConfigError, ConfigErrors, EventBuilder, FlowBuilder, TransitionBuilder};
pub use crate::core::{EventId, FieldValue, FlowState, Guard, StateId};
pub use crate::engine::FlowDefinition;
pub use crate::error::FlowError;
pub use crate::lifecycle::{FlowController, FlowRequest, LifecycleConfig, RequestOutcome};
pub use crate::store::{MemoryStore, StateStore, StoreError};
