//! Core error types for amlscope-core.
//!
//! Only explicit, named failures cross the core's public contract: a missing
//! selection target and a missed search. Invalid edges in a raw payload are
//! not errors -- they are dropped and counted at the ingestion boundary.

use thiserror::Error;

use crate::id::EntityId;

/// Recoverable failures produced by the core. State is never mutated on the
/// error path.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The selection target is absent from the current graph snapshot
    /// (stale or removed entity).
    #[error("entity not found: '{id}'")]
    EntityNotFound { id: EntityId },

    /// No entity id contains the search query as a substring.
    #[error("no entity id matches '{query}'")]
    NoMatch { query: String },
}
