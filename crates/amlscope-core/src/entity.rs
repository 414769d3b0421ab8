//! Entity: a graph node representing an account or counterpart.
//!
//! Topology fields (adjacency, incident edges) are derived by the graph
//! builder and are read-only outside this crate. The display position is the
//! one field an external layout engine may write, and only through the
//! [`Layout`](crate::graph::Layout) view.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::id::{EdgeId, EntityId};

/// Risk status tag assigned by the backend's detection pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskStatus {
    /// No elevated risk signal.
    #[default]
    Normal,
    /// Elevated risk, below the critical threshold.
    High,
    /// Critical risk.
    Critical,
}

impl RiskStatus {
    /// Returns `true` for `High` and `Critical`.
    pub fn is_elevated(&self) -> bool {
        !matches!(self, RiskStatus::Normal)
    }
}

/// 2-D display position, written by the external layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A graph node: an account or counterpart with risk metadata.
///
/// `neighbors` and `incident` are recomputed on every graph build and hold
/// ids, not references -- they resolve against the owning snapshot only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Backend account identifier.
    pub id: EntityId,
    /// Category/group tag (1 = account, 2 = counterparty, 3 = high risk).
    pub group: u32,
    /// Risk status assigned by the backend.
    pub status: RiskStatus,
    /// Numeric risk score, 0..=100.
    pub risk: f64,
    /// Aggregate transaction volume.
    pub value: f64,
    pub(crate) position: Position,
    pub(crate) neighbors: SmallVec<[EntityId; 4]>,
    pub(crate) incident: SmallVec<[EdgeId; 4]>,
}

impl Entity {
    /// Current display position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Ids of entities sharing a valid edge with this one.
    pub fn neighbors(&self) -> &[EntityId] {
        &self.neighbors
    }

    /// Edges incident to this entity, as snapshot edge ids.
    pub fn incident_edges(&self) -> &[EdgeId] {
        &self.incident
    }

    /// Number of direct connections.
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_elevation() {
        assert!(!RiskStatus::Normal.is_elevated());
        assert!(RiskStatus::High.is_elevated());
        assert!(RiskStatus::Critical.is_elevated());
    }

    #[test]
    fn status_deserializes_lowercase_wire_values() {
        let status: RiskStatus = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(status, RiskStatus::Critical);

        let status: RiskStatus = serde_json::from_str("\"normal\"").unwrap();
        assert_eq!(status, RiskStatus::Normal);
    }

    #[test]
    fn status_defaults_to_normal() {
        assert_eq!(RiskStatus::default(), RiskStatus::Normal);
    }
}
