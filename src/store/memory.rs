//! In-memory state store holding one encoded snapshot.

use crate::core::FlowState;
use crate::store::error::StoreError;
use crate::store::snapshot::{Codec, Snapshot};
use crate::store::StateStore;

/// A single-slot store, standing in for a session or a database row.
///
/// State is kept encoded so that every load goes through the same decode
/// path a real backend would.
///
/// # Example
///
/// ```rust
/// use flowstate::core::FlowState;
/// use flowstate::store::{Codec, MemoryStore, StateStore};
///
/// let mut store = MemoryStore::new("survey").with_codec(Codec::Bincode);
/// assert_eq!(store.load().unwrap(), FlowState::new());
///
/// store.save(Some(&FlowState::at("goodbye"))).unwrap();
/// assert_eq!(store.load().unwrap().current_state().unwrap(), "goodbye");
///
/// store.save(None).unwrap();
/// assert!(store.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct MemoryStore {
    flow: String,
    codec: Codec,
    slot: Option<Vec<u8>>,
    saves: usize,
    discards: usize,
}

impl MemoryStore {
    pub fn new(flow: impl Into<String>) -> Self {
        Self {
            flow: flow.into(),
            codec: Codec::default(),
            slot: None,
            saves: 0,
            discards: 0,
        }
    }

    pub fn with_codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    /// Seed the slot with raw bytes, bypassing encoding.
    pub fn with_raw(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.slot = Some(bytes.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn raw(&self) -> Option<&[u8]> {
        self.slot.as_deref()
    }

    /// Decode the stored snapshot without going through `load`.
    pub fn snapshot(&self) -> Result<Option<Snapshot>, StoreError> {
        let Some(bytes) = &self.slot else {
            return Ok(None);
        };
        let snapshot = self.codec.decode(bytes)?;
        snapshot.validate(&self.flow)?;
        Ok(Some(snapshot))
    }

    /// Number of saves that actually wrote a new snapshot.
    pub fn save_count(&self) -> usize {
        self.saves
    }

    pub fn discard_count(&self) -> usize {
        self.discards
    }
}

impl StateStore for MemoryStore {
    fn load(&mut self) -> Result<FlowState, StoreError> {
        Ok(self
            .snapshot()?
            .map(|snapshot| snapshot.state)
            .unwrap_or_default())
    }

    fn save(&mut self, state: Option<&FlowState>) -> Result<(), StoreError> {
        let Some(state) = state else {
            self.slot = None;
            self.discards += 1;
            return Ok(());
        };

        // Leave an identical snapshot untouched, id and timestamp included.
        if let Ok(Some(existing)) = self.snapshot() {
            if existing.state == *state {
                return Ok(());
            }
        }

        let snapshot = Snapshot::new(self.flow.clone(), state.clone());
        self.slot = Some(self.codec.encode(&snapshot)?);
        self.saves += 1;
        Ok(())
    }
}
