//! Relationship: a directed edge between two entities.
//!
//! An edge is only valid inside the snapshot that built it -- the builder
//! guarantees both endpoints exist in the same snapshot's entity table.

use serde::{Deserialize, Serialize};

use crate::id::EntityId;

/// A directed relationship between two entities, derived from a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Originating entity.
    pub source: EntityId,
    /// Receiving entity.
    pub target: EntityId,
    /// Relationship type tag (e.g. "transfer", "credit", "debit").
    #[serde(rename = "type")]
    pub kind: String,
    /// Transaction amount carried on this edge.
    pub value: f64,
    /// ISO-8601 timestamp as sent by the backend, pass-through only.
    pub time: Option<String>,
}

impl Relationship {
    /// Returns `true` if `id` is one of the two endpoints.
    pub fn touches(&self, id: &EntityId) -> bool {
        self.source == *id || self.target == *id
    }

    /// Given one endpoint, returns the opposite one. `None` if `id` is not
    /// an endpoint of this edge.
    pub fn other_end(&self, id: &EntityId) -> Option<&EntityId> {
        if self.source == *id {
            Some(&self.target)
        } else if self.target == *id {
            Some(&self.source)
        } else {
            None
        }
    }
}
