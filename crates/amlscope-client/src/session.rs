//! DashboardSession: the serialized owner of all dashboard state.
//!
//! Every mutation -- graph refresh, selection change, live event -- goes
//! through `&mut self` methods on one session value, so there is never
//! concurrent mutation of the graph, the selection, or the live buffer.
//! Suspension points (REST fetches, live message arrival) all resume into
//! these methods; ordering between a fetch completion and a live event is
//! whatever order they are delivered in.
//!
//! The graph snapshot is replaced wholesale on every refresh and the
//! selection is cleared unconditionally, even when the focused id survives
//! into the new snapshot -- focus never outlives the snapshot it was
//! computed against.

use amlscope_core::{search, AlertRecord, EntityGraph, EntityId, LiveBuffer, Selection};

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::reconciler::{LiveStreamReconciler, Outcome};
use crate::schema::AlertStats;

/// Default `limit` for the transaction/alert feeds.
pub const DEFAULT_FEED_LIMIT: usize = 50;
/// Default `limit` for the graph fetch.
pub const DEFAULT_GRAPH_LIMIT: usize = 1000;

/// All state behind the operator dashboard, mutated only on this session's
/// call path.
pub struct DashboardSession {
    api: ApiClient,
    graph: Option<EntityGraph>,
    selection: Selection,
    reconciler: LiveStreamReconciler,
    alerts: Vec<AlertRecord>,
    stats: Option<AlertStats>,
    connected: bool,
    feed_limit: usize,
    graph_limit: usize,
}

impl DashboardSession {
    /// Creates a session with default feed/graph limits.
    pub fn new(api: ApiClient) -> Self {
        Self::with_limits(api, DEFAULT_FEED_LIMIT, DEFAULT_GRAPH_LIMIT)
    }

    /// Creates a session with explicit fetch limits.
    pub fn with_limits(api: ApiClient, feed_limit: usize, graph_limit: usize) -> Self {
        DashboardSession {
            api,
            graph: None,
            selection: Selection::idle(),
            reconciler: LiveStreamReconciler::new(),
            alerts: Vec::new(),
            stats: None,
            connected: false,
            feed_limit,
            graph_limit,
        }
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    /// Current graph snapshot, if one has been fetched.
    pub fn graph(&self) -> Option<&EntityGraph> {
        self.graph.as_ref()
    }

    /// Current selection state.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The bounded live transaction buffer.
    pub fn live_buffer(&self) -> &LiveBuffer {
        self.reconciler.buffer()
    }

    /// Most recently fetched alert list.
    pub fn alerts(&self) -> &[AlertRecord] {
        &self.alerts
    }

    /// Most recently fetched stats summary.
    pub fn stats(&self) -> Option<&AlertStats> {
        self.stats.as_ref()
    }

    /// Live channel connectivity, as reported by the transport.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Records live channel connectivity (transport-owned signal).
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    // -----------------------------------------------------------------------
    // Fetch paths
    // -----------------------------------------------------------------------

    /// Initial load: seeds the live buffer, fetches alerts and stats, then
    /// fetches and installs the first graph snapshot.
    pub async fn load_initial(&mut self) -> Result<(), ClientError> {
        let (transactions, alerts, stats) = tokio::join!(
            self.api.fetch_transactions(self.feed_limit),
            self.api.fetch_alerts(self.feed_limit),
            self.api.fetch_stats(),
        );
        self.reconciler.seed(transactions?);
        self.alerts = alerts?;
        self.stats = Some(stats?);
        self.refresh_graph().await
    }

    /// Fetches a fresh graph payload and replaces the snapshot wholesale.
    /// On transport failure the previous snapshot (and selection) stay as
    /// they were -- degraded state, not a crash.
    pub async fn refresh_graph(&mut self) -> Result<(), ClientError> {
        let payload = self.api.fetch_graph(self.graph_limit).await?;
        self.install_graph(EntityGraph::build(payload.nodes, payload.links));
        Ok(())
    }

    /// Installs a new snapshot, forcing a deselect even when the focused id
    /// still exists in the new graph.
    pub fn install_graph(&mut self, graph: EntityGraph) {
        self.selection.clear();
        self.graph = Some(graph);
    }

    // -----------------------------------------------------------------------
    // Selection and search
    // -----------------------------------------------------------------------

    /// Focuses an entity in the current snapshot.
    pub fn select_entity(&mut self, id: &EntityId) -> Result<(), ClientError> {
        match self.graph.as_ref() {
            Some(graph) => Ok(self.selection.select(graph, id)?),
            None => Err(amlscope_core::CoreError::EntityNotFound { id: id.clone() }.into()),
        }
    }

    /// Clears the selection (background click / panel close).
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Resolves a free-text query and focuses the matched entity.
    pub fn focus_search(&mut self, query: &str) -> Result<EntityId, ClientError> {
        let graph = self.graph.as_ref().ok_or_else(|| {
            ClientError::from(amlscope_core::CoreError::NoMatch {
                query: query.to_string(),
            })
        })?;
        let id = search::resolve(graph, query)?;
        self.selection.select(graph, &id)?;
        Ok(id)
    }

    // -----------------------------------------------------------------------
    // Live event path
    // -----------------------------------------------------------------------

    /// Consumes one raw live message body in arrival order.
    ///
    /// Transactions land in the buffer; an alert triggers the two
    /// independent re-fetches. Malformed bodies are dropped with a
    /// diagnostic (`None`). Resync transport failures are logged and
    /// absorbed -- the stream is never interrupted by them.
    pub async fn handle_live_message(&mut self, text: &str) -> Option<Outcome> {
        let outcome = self.reconciler.handle_raw(text)?;
        if outcome == Outcome::ResyncAlerts {
            self.resync_alerts().await;
        }
        Some(outcome)
    }

    /// Re-fetches the alert list and the stats summary. The two fetches are
    /// independent: one failing does not stop the other from landing.
    async fn resync_alerts(&mut self) {
        let (alerts, stats) = tokio::join!(
            self.api.fetch_alerts(self.feed_limit),
            self.api.fetch_stats(),
        );
        match alerts {
            Ok(alerts) => self.alerts = alerts,
            Err(err) => tracing::warn!(%err, "alert resync failed"),
        }
        match stats {
            Ok(stats) => self.stats = Some(stats),
            Err(err) => tracing::warn!(%err, "stats resync failed"),
        }
    }
}
