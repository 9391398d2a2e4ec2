//! Versioned persistence records for flow state.

use crate::core::FlowState;
use crate::store::error::StoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable record of one persisted flow state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: String,

    /// When the snapshot was written
    pub saved_at: DateTime<Utc>,

    /// Name of the flow that owns the state
    pub flow: String,

    /// The persisted state
    pub state: FlowState,
}

impl Snapshot {
    pub fn new(flow: impl Into<String>, state: FlowState) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4().to_string(),
            saved_at: Utc::now(),
            flow: flow.into(),
            state,
        }
    }

    /// Check the version and owning flow of a decoded snapshot.
    pub fn validate(&self, flow: &str) -> Result<(), StoreError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        if self.flow != flow {
            return Err(StoreError::FlowMismatch {
                expected: flow.to_string(),
                found: self.flow.clone(),
            });
        }
        Ok(())
    }
}

/// Wire format used for snapshots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Codec {
    #[default]
    Json,
    Bincode,
}

impl Codec {
    pub fn encode(self, snapshot: &Snapshot) -> Result<Vec<u8>, StoreError> {
        match self {
            Self::Json => {
                serde_json::to_vec(snapshot).map_err(|e| StoreError::Encode(e.to_string()))
            }
            Self::Bincode => {
                bincode::serialize(snapshot).map_err(|e| StoreError::Encode(e.to_string()))
            }
        }
    }

    pub fn decode(self, bytes: &[u8]) -> Result<Snapshot, StoreError> {
        match self {
            Self::Json => {
                serde_json::from_slice(bytes).map_err(|e| StoreError::Decode(e.to_string()))
            }
            Self::Bincode => {
                bincode::deserialize(bytes).map_err(|e| StoreError::Decode(e.to_string()))
            }
        }
    }
}
