//! Free-text search over entity ids.

use crate::error::CoreError;
use crate::graph::EntityGraph;
use crate::id::EntityId;

/// Resolves `query` to an entity id by case-insensitive substring match,
/// scanning in node insertion order and returning the first hit.
///
/// Fails with [`CoreError::NoMatch`] when no id contains the query,
/// including on an empty graph. Resolution never mutates state -- the
/// caller feeds the returned id into
/// [`Selection::select`](crate::selection::Selection::select).
pub fn resolve(graph: &EntityGraph, query: &str) -> Result<EntityId, CoreError> {
    let needle = query.to_lowercase();
    graph
        .entities()
        .find(|entity| entity.id.as_str().to_lowercase().contains(&needle))
        .map(|entity| entity.id.clone())
        .ok_or_else(|| CoreError::NoMatch {
            query: query.to_string(),
        })
}
