//! Core flow types.
//!
//! This module contains the data the engine works on:
//! - Opaque state and event identifiers
//! - The persisted state container and its user fields
//! - Guard predicates and references to them
//! - Records of fired transitions
//!
//! Nothing in here performs I/O.

mod guard;
mod history;
mod ids;
mod params;
mod state;

pub use guard::{Guard, GuardContext, GuardRef};
pub use history::TransitionRecord;
pub use ids::{EventId, StateId};
pub use params::{param_is_truthy, param_str, Params};
pub use state::{FieldValue, FlowState};
