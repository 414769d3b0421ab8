//! Selection: the focus state machine and its derived highlight sets.
//!
//! Two states: idle (no focus) and focused on one entity. The highlight
//! sets -- focused entity plus its neighbors, and its incident edges -- are
//! derived state, recomputed from the passed graph snapshot on every
//! `select` call and never cached across snapshots. The snapshot is always
//! an explicit argument; a `Selection` holds no graph reference.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::graph::EntityGraph;
use crate::id::{EdgeId, EntityId};

/// Focus state over a graph snapshot, owned by the consuming controller.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    focus: Option<EntityId>,
    highlighted_entities: HashSet<EntityId>,
    highlighted_edges: HashSet<EdgeId>,
}

impl Selection {
    /// A fresh idle selection with empty highlight sets.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Returns `true` when nothing is focused.
    pub fn is_idle(&self) -> bool {
        self.focus.is_none()
    }

    /// Currently focused entity id, if any.
    pub fn focus(&self) -> Option<&EntityId> {
        self.focus.as_ref()
    }

    /// The focused entity and its neighbors. Empty when idle.
    pub fn highlighted_entities(&self) -> &HashSet<EntityId> {
        &self.highlighted_entities
    }

    /// Edges incident to the focused entity. Empty when idle.
    pub fn highlighted_edges(&self) -> &HashSet<EdgeId> {
        &self.highlighted_edges
    }

    /// Focuses `id`, recomputing both highlight sets from `graph`.
    ///
    /// Fails with [`CoreError::EntityNotFound`] and leaves the state
    /// unchanged when `id` is not in the snapshot -- callers must ignore
    /// references to stale or removed entities. Re-selecting the same id is
    /// idempotent but still recomputes from the passed snapshot.
    pub fn select(&mut self, graph: &EntityGraph, id: &EntityId) -> Result<(), CoreError> {
        let entity = graph
            .entity(id)
            .ok_or_else(|| CoreError::EntityNotFound { id: id.clone() })?;

        let mut entities = HashSet::with_capacity(entity.degree() + 1);
        entities.insert(id.clone());
        entities.extend(entity.neighbors().iter().cloned());

        self.highlighted_entities = entities;
        self.highlighted_edges = entity.incident_edges().iter().copied().collect();
        self.focus = Some(id.clone());
        Ok(())
    }

    /// Returns to idle and empties both highlight sets. Also the implicit
    /// transition on graph replacement: selection never survives a refresh.
    pub fn clear(&mut self) {
        self.focus = None;
        self.highlighted_entities.clear();
        self.highlighted_edges.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{RawLink, RawNode};

    fn node(id: &str) -> RawNode {
        RawNode {
            id: EntityId::from(id),
            group: 1,
            status: Default::default(),
            risk: 0.0,
            value: 0.0,
        }
    }

    fn link(source: &str, target: &str) -> RawLink {
        RawLink {
            source: EntityId::from(source),
            target: EntityId::from(target),
            kind: "transfer".to_string(),
            value: 1.0,
            time: None,
        }
    }

    /// Worked scenario: nodes [A, B, C], raw edges [(A,B), (B,D)] with D
    /// absent. select(B) highlights {A, B} and the single kept edge.
    #[test]
    fn select_highlights_focus_neighbors_and_incident_edges() {
        let graph = EntityGraph::build(
            vec![node("A"), node("B"), node("C")],
            vec![link("A", "B"), link("B", "D")],
        );
        let mut selection = Selection::idle();

        selection.select(&graph, &EntityId::from("B")).unwrap();

        assert_eq!(selection.focus(), Some(&EntityId::from("B")));
        let expected: HashSet<EntityId> =
            [EntityId::from("A"), EntityId::from("B")].into_iter().collect();
        assert_eq!(selection.highlighted_entities(), &expected);
        let edges: HashSet<EdgeId> = [EdgeId(0)].into_iter().collect();
        assert_eq!(selection.highlighted_edges(), &edges);
    }

    #[test]
    fn reselect_is_idempotent() {
        let graph = EntityGraph::build(
            vec![node("A"), node("B"), node("C")],
            vec![link("A", "B"), link("A", "C")],
        );
        let mut selection = Selection::idle();

        selection.select(&graph, &EntityId::from("A")).unwrap();
        let entities_first = selection.highlighted_entities().clone();
        let edges_first = selection.highlighted_edges().clone();

        selection.select(&graph, &EntityId::from("A")).unwrap();
        assert_eq!(selection.highlighted_entities(), &entities_first);
        assert_eq!(selection.highlighted_edges(), &edges_first);
    }

    #[test]
    fn select_missing_id_fails_and_leaves_state_unchanged() {
        let graph = EntityGraph::build(vec![node("A"), node("B")], vec![link("A", "B")]);
        let mut selection = Selection::idle();
        selection.select(&graph, &EntityId::from("A")).unwrap();

        let err = selection.select(&graph, &EntityId::from("ghost")).unwrap_err();
        assert!(matches!(err, CoreError::EntityNotFound { .. }));

        // Previous focus and highlights intact.
        assert_eq!(selection.focus(), Some(&EntityId::from("A")));
        assert!(selection
            .highlighted_entities()
            .contains(&EntityId::from("B")));
    }

    #[test]
    fn clear_empties_both_sets() {
        let graph = EntityGraph::build(vec![node("A"), node("B")], vec![link("A", "B")]);
        let mut selection = Selection::idle();
        selection.select(&graph, &EntityId::from("A")).unwrap();

        selection.clear();
        assert!(selection.is_idle());
        assert!(selection.highlighted_entities().is_empty());
        assert!(selection.highlighted_edges().is_empty());
    }

    #[test]
    fn select_on_empty_graph_fails() {
        let graph = EntityGraph::empty();
        let mut selection = Selection::idle();
        assert!(selection.select(&graph, &EntityId::from("A")).is_err());
        assert!(selection.is_idle());
    }
}
