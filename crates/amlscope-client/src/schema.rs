//! Response shapes for the backend's REST endpoints.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use amlscope_core::{RawLink, RawNode};

/// Body of `GET /analytics/graph?limit=N`. Raw and unvalidated; fed to
/// [`EntityGraph::build`](amlscope_core::EntityGraph::build).
#[derive(Debug, Clone, Deserialize)]
pub struct GraphPayload {
    #[serde(default)]
    pub nodes: Vec<RawNode>,
    #[serde(default)]
    pub links: Vec<RawLink>,
}

/// Body of `GET /alerts/stats/summary`. Always fetched whole -- aggregate
/// counts are recomputed authoritatively by the backend rather than merged
/// locally from alert events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertStats {
    #[serde(default)]
    pub total_transactions: u64,
    #[serde(default)]
    pub total_alerts: u64,
    #[serde(default)]
    pub alerts_by_level: HashMap<String, u64>,
    #[serde(default)]
    pub detection_rate: f64,
    #[serde(default)]
    pub avg_risk_score: f64,
}
