//! Persisted view state
//!
//! Three independent slots on top of a [`KeyValueStore`]:
//!
//! | key                 | value                                      |
//! |---------------------|--------------------------------------------|
//! | `tm_nodePositions`  | JSON object `{taskId: {x, y}}`             |
//! | `tm_viewport`       | JSON object `{zoom, pan: {x, y}}`          |
//! | `tm_selectedTeamId` | bare team id string (absent = Unaffiliated)|
//!
//! Writes always replace the whole slot. A missing slot and a slot holding
//! unparseable JSON both read as `None`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::model::{NodePositions, ViewportState};
use crate::storage::KeyValueStore;

pub const NODE_POSITIONS_KEY: &str = "tm_nodePositions";
pub const VIEWPORT_KEY: &str = "tm_viewport";
pub const SELECTED_TEAM_KEY: &str = "tm_selectedTeamId";

/// Typed access to the view-state slots
#[derive(Debug, Clone, Default)]
pub struct ViewStore<S> {
    store: S,
}

impl<S: KeyValueStore> ViewStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    // =========================================================================
    // Node positions
    // =========================================================================

    pub fn node_positions(&self) -> Option<NodePositions> {
        self.read_json(NODE_POSITIONS_KEY)
    }

    pub fn set_node_positions(&mut self, positions: &NodePositions) -> Result<()> {
        self.write_json(NODE_POSITIONS_KEY, positions)
    }

    // =========================================================================
    // Viewport
    // =========================================================================

    pub fn viewport(&self) -> Option<ViewportState> {
        self.read_json(VIEWPORT_KEY)
    }

    pub fn set_viewport(&mut self, viewport: &ViewportState) -> Result<()> {
        self.write_json(VIEWPORT_KEY, viewport)
    }

    // =========================================================================
    // Selected team
    // =========================================================================

    pub fn selected_team_id(&self) -> Option<String> {
        self.store
            .get(SELECTED_TEAM_KEY)
            .filter(|id| !id.is_empty())
    }

    pub fn set_selected_team_id(&mut self, team_id: &str) -> Result<()> {
        self.store.set(SELECTED_TEAM_KEY, team_id)
    }

    pub fn clear_selected_team_id(&mut self) -> Result<()> {
        self.store.remove(SELECTED_TEAM_KEY)
    }

    /// Reset action: drop positions and viewport, keep the team selection
    pub fn clear_all(&mut self) -> Result<()> {
        self.store.remove(NODE_POSITIONS_KEY)?;
        self.store.remove(VIEWPORT_KEY)?;
        tracing::debug!("cleared node positions and viewport");
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.store.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key, error = %err, "discarding malformed persisted value");
                None
            }
        }
    }

    fn write_json<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.store.set(key, &json)
    }
}
