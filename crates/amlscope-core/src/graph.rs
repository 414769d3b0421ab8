//! EntityGraph: immutable-per-snapshot aggregate of entities and valid edges.
//!
//! [`EntityGraph::build`] is the ingestion boundary: it accepts the raw,
//! possibly-inconsistent node/link payload from `GET /analytics/graph` and
//! produces a snapshot where every edge references two entities present in
//! the same snapshot and adjacency is symmetric. Malformed input is handled
//! by the drop-and-count policy, never by an error -- an empty payload is a
//! valid empty graph.
//!
//! Entities live in an id-indexed, insertion-ordered table; adjacency is
//! stored as id lists resolved against the snapshot at read time. The only
//! state a collaborator may write is the per-entity display position, via
//! the narrow [`Layout`] view.

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::edge::Relationship;
use crate::entity::{Entity, Position, RiskStatus};
use crate::id::{EdgeId, EntityId};

/// Raw node record as delivered by the backend. Only the id is required;
/// missing metadata defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNode {
    pub id: EntityId,
    #[serde(default)]
    pub group: u32,
    #[serde(default)]
    pub status: RiskStatus,
    #[serde(default)]
    pub risk: f64,
    #[serde(default)]
    pub value: f64,
}

/// Raw link record as delivered by the backend. Endpoints are unvalidated
/// ids; the builder drops links whose endpoints are not in the node set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLink {
    pub source: EntityId,
    pub target: EntityId,
    #[serde(rename = "type", default = "default_link_kind")]
    pub kind: String,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub time: Option<String>,
}

fn default_link_kind() -> String {
    "transfer".to_string()
}

/// One snapshot of the entity-relationship graph.
///
/// Invariants, established by [`build`](Self::build) and never mutated
/// afterwards (positions excepted):
/// - every edge's endpoints exist in `entities`;
/// - adjacency is symmetric: B in neighbors(A) iff A in neighbors(B).
#[derive(Debug, Clone, Default)]
pub struct EntityGraph {
    entities: IndexMap<EntityId, Entity>,
    edges: Vec<Relationship>,
    dropped_edges: usize,
}

impl EntityGraph {
    /// Builds a snapshot from the raw payload.
    ///
    /// Nodes are deduplicated by id, first occurrence wins (later duplicates
    /// are dropped, not merged). Links with a missing endpoint are dropped
    /// and counted in [`dropped_edges`](Self::dropped_edges). Runs in
    /// O(nodes + links) via the id-indexed entity table.
    pub fn build(nodes: Vec<RawNode>, links: Vec<RawLink>) -> Self {
        let mut entities: IndexMap<EntityId, Entity> = IndexMap::with_capacity(nodes.len());

        for raw in nodes {
            match entities.entry(raw.id.clone()) {
                // First occurrence wins; duplicates carry no extra topology.
                Entry::Occupied(_) => {}
                Entry::Vacant(slot) => {
                    slot.insert(Entity {
                        id: raw.id,
                        group: raw.group,
                        status: raw.status,
                        risk: raw.risk,
                        value: raw.value,
                        position: Position::default(),
                        neighbors: Default::default(),
                        incident: Default::default(),
                    });
                }
            }
        }

        let mut edges: Vec<Relationship> = Vec::with_capacity(links.len());
        let mut dropped_edges = 0;

        for raw in links {
            if !entities.contains_key(&raw.source) || !entities.contains_key(&raw.target) {
                dropped_edges += 1;
                continue;
            }

            let edge_id = EdgeId(edges.len() as u32);
            if let Some(source) = entities.get_mut(&raw.source) {
                source.neighbors.push(raw.target.clone());
                source.incident.push(edge_id);
            }
            if let Some(target) = entities.get_mut(&raw.target) {
                target.neighbors.push(raw.source.clone());
                target.incident.push(edge_id);
            }
            edges.push(Relationship {
                source: raw.source,
                target: raw.target,
                kind: raw.kind,
                value: raw.value,
                time: raw.time,
            });
        }

        EntityGraph {
            entities,
            edges,
            dropped_edges,
        }
    }

    /// An empty snapshot.
    pub fn empty() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    /// Looks up an entity by id.
    pub fn entity(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Returns `true` if the id exists in this snapshot.
    pub fn contains(&self, id: &EntityId) -> bool {
        self.entities.contains_key(id)
    }

    /// Iterates entities in node insertion order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Looks up an edge by snapshot edge id.
    pub fn edge(&self, id: EdgeId) -> Option<&Relationship> {
        self.edges.get(id.0 as usize)
    }

    /// All valid edges, in payload order.
    pub fn edges(&self) -> &[Relationship] {
        &self.edges
    }

    /// Neighbor ids of an entity. `None` if the id is absent.
    pub fn neighbors(&self, id: &EntityId) -> Option<&[EntityId]> {
        self.entities.get(id).map(|e| e.neighbors())
    }

    /// Incident edge ids of an entity. `None` if the id is absent.
    pub fn incident_edges(&self, id: &EntityId) -> Option<&[EdgeId]> {
        self.entities.get(id).map(|e| e.incident_edges())
    }

    /// Number of entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Number of valid edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Count of raw links dropped for referencing a missing endpoint.
    /// Diagnostic only -- dropped links are never an error.
    pub fn dropped_edges(&self) -> usize {
        self.dropped_edges
    }

    /// Opens the position-only view for the external layout engine.
    pub fn layout(&mut self) -> Layout<'_> {
        Layout { graph: self }
    }
}

/// Narrow capability handed to the layout/rendering engine: read topology
/// endpoints and positions, write positions. Topology stays sealed.
pub struct Layout<'g> {
    graph: &'g mut EntityGraph,
}

impl Layout<'_> {
    /// Ids of all nodes, in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = &EntityId> {
        self.graph.entities.keys()
    }

    /// Endpoint id pairs of all valid edges.
    pub fn edge_endpoints(&self) -> impl Iterator<Item = (&EntityId, &EntityId)> {
        self.graph.edges.iter().map(|e| (&e.source, &e.target))
    }

    /// Current position of a node. `None` if the id is absent.
    pub fn position(&self, id: &EntityId) -> Option<Position> {
        self.graph.entities.get(id).map(|e| e.position)
    }

    /// Writes a node's position. Returns `false` if the id is absent.
    pub fn set_position(&mut self, id: &EntityId, x: f64, y: f64) -> bool {
        match self.graph.entities.get_mut(id) {
            Some(entity) => {
                entity.position = Position { x, y };
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> RawNode {
        RawNode {
            id: EntityId::from(id),
            group: 1,
            status: RiskStatus::Normal,
            risk: 0.0,
            value: 0.0,
        }
    }

    fn link(source: &str, target: &str) -> RawLink {
        RawLink {
            source: EntityId::from(source),
            target: EntityId::from(target),
            kind: "transfer".to_string(),
            value: 100.0,
            time: None,
        }
    }

    #[test]
    fn empty_input_produces_valid_empty_graph() {
        let graph = EntityGraph::build(vec![], vec![]);
        assert_eq!(graph.entity_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.dropped_edges(), 0);
    }

    #[test]
    fn duplicate_nodes_first_occurrence_wins() {
        let mut first = node("A");
        first.risk = 10.0;
        let mut dup = node("A");
        dup.risk = 99.0;

        let graph = EntityGraph::build(vec![first, dup, node("B")], vec![]);
        assert_eq!(graph.entity_count(), 2);
        assert_eq!(graph.entity(&EntityId::from("A")).unwrap().risk, 10.0);
    }

    #[test]
    fn dangling_links_are_dropped_and_counted() {
        let graph = EntityGraph::build(
            vec![node("A"), node("B"), node("C")],
            vec![link("A", "B"), link("B", "D")],
        );
        assert_eq!(graph.entity_count(), 3);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.dropped_edges(), 1);

        let kept = &graph.edges()[0];
        assert_eq!(kept.source, EntityId::from("A"));
        assert_eq!(kept.target, EntityId::from("B"));
    }

    #[test]
    fn adjacency_is_symmetric() {
        let graph = EntityGraph::build(
            vec![node("A"), node("B"), node("C")],
            vec![link("A", "B"), link("B", "C")],
        );

        let a = EntityId::from("A");
        let b = EntityId::from("B");
        let c = EntityId::from("C");

        assert_eq!(graph.neighbors(&a).unwrap(), &[b.clone()]);
        assert_eq!(graph.neighbors(&b).unwrap(), &[a.clone(), c.clone()]);
        assert_eq!(graph.neighbors(&c).unwrap(), &[b.clone()]);

        assert_eq!(graph.incident_edges(&b).unwrap(), &[EdgeId(0), EdgeId(1)]);
    }

    #[test]
    fn edge_ids_resolve_against_snapshot() {
        let graph = EntityGraph::build(vec![node("A"), node("B")], vec![link("A", "B")]);
        let edge = graph.edge(EdgeId(0)).unwrap();
        assert!(graph.contains(&edge.source));
        assert!(graph.contains(&edge.target));
        assert!(graph.edge(EdgeId(1)).is_none());
    }

    #[test]
    fn entities_iterate_in_insertion_order() {
        let graph = EntityGraph::build(vec![node("C"), node("A"), node("B")], vec![]);
        let order: Vec<&str> = graph.entities().map(|e| e.id.as_str()).collect();
        assert_eq!(order, vec!["C", "A", "B"]);
    }

    #[test]
    fn layout_writes_positions_only() {
        let mut graph = EntityGraph::build(vec![node("A"), node("B")], vec![link("A", "B")]);

        let mut layout = graph.layout();
        assert_eq!(layout.node_ids().count(), 2);
        assert_eq!(layout.edge_endpoints().count(), 1);
        assert!(layout.set_position(&EntityId::from("A"), 3.5, -1.0));
        assert!(!layout.set_position(&EntityId::from("Z"), 0.0, 0.0));

        let pos = graph.entity(&EntityId::from("A")).unwrap().position();
        assert_eq!(pos, Position { x: 3.5, y: -1.0 });
        // Topology untouched.
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbors(&EntityId::from("A")).unwrap().len(), 1);
    }

    #[test]
    fn raw_payload_deserializes_with_defaults() {
        let raw: RawNode = serde_json::from_str(r#"{"id": "ACC-1"}"#).unwrap();
        assert_eq!(raw.group, 0);
        assert_eq!(raw.status, RiskStatus::Normal);

        let raw: RawLink =
            serde_json::from_str(r#"{"source": "ACC-1", "target": "ACC-2"}"#).unwrap();
        assert_eq!(raw.kind, "transfer");
        assert!(raw.time.is_none());
    }
}
