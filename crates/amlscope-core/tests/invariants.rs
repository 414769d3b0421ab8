//! Property tests for the graph and buffer invariants.
//!
//! These hold for arbitrary raw payloads, including duplicate node ids,
//! dangling edges, and self-loops.

use proptest::prelude::*;

use amlscope_core::{EntityGraph, EntityId, LiveBuffer, RawLink, RawNode, Selection};
use amlscope_core::{TransactionRecord, LIVE_BUFFER_CAP};

fn raw_node(id: String) -> RawNode {
    RawNode {
        id: EntityId(id),
        group: 1,
        status: Default::default(),
        risk: 0.0,
        value: 0.0,
    }
}

fn raw_link((source, target): (String, String)) -> RawLink {
    RawLink {
        source: EntityId(source),
        target: EntityId(target),
        kind: "transfer".to_string(),
        value: 1.0,
        time: None,
    }
}

fn txn(n: usize) -> TransactionRecord {
    TransactionRecord {
        txn_id: format!("TXN-{n}"),
        account_id: "ACC".to_string(),
        counterparty_id: "CPT".to_string(),
        amount: 1.0,
        currency: "USD".to_string(),
        txn_type: None,
        channel: None,
        country_code: None,
        is_international: false,
        timestamp: None,
    }
}

// A small id alphabet so duplicates and dangling endpoints occur often.
// Links draw from a wider alphabet than nodes, so some endpoints are
// guaranteed-missing ids.
fn node_ids() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[A-F]", 0..24)
}

fn link_pairs() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[A-H]", "[A-H]"), 0..48)
}

proptest! {
    #[test]
    fn retained_edges_have_both_endpoints(ids in node_ids(), pairs in link_pairs()) {
        let graph = EntityGraph::build(
            ids.into_iter().map(raw_node).collect(),
            pairs.iter().cloned().map(raw_link).collect(),
        );

        for edge in graph.edges() {
            prop_assert!(graph.contains(&edge.source));
            prop_assert!(graph.contains(&edge.target));
        }
        prop_assert_eq!(graph.edge_count() + graph.dropped_edges(), pairs.len());
    }

    #[test]
    fn adjacency_is_symmetric(ids in node_ids(), pairs in link_pairs()) {
        let graph = EntityGraph::build(
            ids.into_iter().map(raw_node).collect(),
            pairs.into_iter().map(raw_link).collect(),
        );

        for entity in graph.entities() {
            for neighbor in entity.neighbors() {
                let back = graph
                    .neighbors(neighbor)
                    .expect("neighbor id must resolve in the same snapshot");
                prop_assert!(back.contains(&entity.id));
            }
        }
    }

    #[test]
    fn dedupe_is_first_wins(ids in node_ids()) {
        let nodes: Vec<RawNode> = ids
            .iter()
            .enumerate()
            .map(|(n, id)| {
                let mut raw = raw_node(id.clone());
                raw.risk = n as f64;
                raw
            })
            .collect();
        let graph = EntityGraph::build(nodes, vec![]);

        for id in &ids {
            let first_pos = ids.iter().position(|other| other == id).unwrap();
            let entity = graph.entity(&EntityId(id.clone())).unwrap();
            prop_assert_eq!(entity.risk, first_pos as f64);
        }
    }

    #[test]
    fn reselect_recomputes_identical_sets(ids in node_ids(), pairs in link_pairs()) {
        let graph = EntityGraph::build(
            ids.iter().cloned().map(raw_node).collect(),
            pairs.into_iter().map(raw_link).collect(),
        );

        let Some(first) = ids.first() else { return Ok(()) };
        let id = EntityId(first.clone());
        let mut selection = Selection::idle();

        selection.select(&graph, &id).unwrap();
        let entities = selection.highlighted_entities().clone();
        let edges = selection.highlighted_edges().clone();

        selection.select(&graph, &id).unwrap();
        prop_assert_eq!(selection.highlighted_entities(), &entities);
        prop_assert_eq!(selection.highlighted_edges(), &edges);
    }

    #[test]
    fn buffer_never_exceeds_cap(count in 0usize..300) {
        let mut buffer = LiveBuffer::new();
        for n in 0..count {
            buffer.push(txn(n));
            prop_assert!(buffer.len() <= LIVE_BUFFER_CAP);
        }
        prop_assert_eq!(buffer.len(), count.min(LIVE_BUFFER_CAP));

        // Newest-first ordering by arrival.
        if count > 0 {
            prop_assert_eq!(buffer.latest().unwrap().txn_id.clone(), format!("TXN-{}", count - 1));
            let expected_oldest = count.saturating_sub(LIVE_BUFFER_CAP);
            prop_assert_eq!(
                buffer.oldest().unwrap().txn_id.clone(),
                format!("TXN-{expected_oldest}")
            );
        }
    }
}
