//! Persistence collaborators for flow state.
//!
//! The engine never decides where state lives. It only calls
//! [`StateStore::load`] once at the start of a request and
//! [`StateStore::save`] at most once at the end (plus a discard for
//! `start` and `clear`).
//!
//! # Example
//!
//! ```rust
//! use flowstate::core::FlowState;
//! use flowstate::store::{StateStore, StoreError};
//!
//! #[derive(Default)]
//! struct SessionSlot(Option<FlowState>);
//!
//! impl StateStore for SessionSlot {
//!     fn load(&mut self) -> Result<FlowState, StoreError> {
//!         Ok(self.0.clone().unwrap_or_default())
//!     }
//!
//!     fn save(&mut self, state: Option<&FlowState>) -> Result<(), StoreError> {
//!         self.0 = state.cloned();
//!         Ok(())
//!     }
//! }
//! ```

mod error;
mod memory;
mod snapshot;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use snapshot::{Codec, Snapshot, SNAPSHOT_VERSION};

use crate::core::FlowState;

/// Where flow state lives between requests.
pub trait StateStore {
    /// Load the persisted state, or a fresh [`FlowState`] when nothing has
    /// been saved yet.
    fn load(&mut self) -> Result<FlowState, StoreError>;

    /// Persist `Some(state)`, or discard the persisted state on `None`.
    ///
    /// Discarding must be safe to call when nothing is stored.
    fn save(&mut self, state: Option<&FlowState>) -> Result<(), StoreError>;
}
