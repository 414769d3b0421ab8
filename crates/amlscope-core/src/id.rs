//! Identifier newtypes for the entity graph.
//!
//! Entities are keyed by the backend's account identifiers, so [`EntityId`]
//! wraps a `String` rather than a numeric index. [`EdgeId`] is an index into
//! a graph snapshot's edge vector and is only meaningful relative to the
//! snapshot that produced it -- adjacency is stored as id lists, never as
//! object handles, so a stale id can always be detected at resolve time.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Backend-assigned entity (account) identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

/// Edge identifier: position of the edge in its snapshot's edge vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u32);

impl EntityId {
    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        EntityId(s)
    }
}
