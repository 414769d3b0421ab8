//! LiveStreamReconciler: merges push-based events into local state.
//!
//! Two event kinds, two policies. Transactions are incremental: prepend to
//! the bounded buffer, evict the oldest past capacity. Alerts are not merged
//! locally at all -- an alert event only signals that the alert list and the
//! aggregate stats must be re-fetched whole, which keeps local and remote
//! views from diverging over alert aggregates.
//!
//! The reconciler itself is synchronous and never blocks the transport; the
//! re-fetches it signals run on the session's serialized path.

use amlscope_core::{LiveBuffer, LiveEvent, TransactionRecord};

use crate::error::ClientError;

/// What a consumed event asks of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The event was absorbed into the live buffer; nothing to fetch.
    Buffered,
    /// An alert arrived: re-fetch the alert list and the stats summary,
    /// each independently.
    ResyncAlerts,
}

/// Owner and sole mutator of the [`LiveBuffer`].
#[derive(Debug, Default)]
pub struct LiveStreamReconciler {
    buffer: LiveBuffer,
}

impl LiveStreamReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the transaction buffer.
    pub fn buffer(&self) -> &LiveBuffer {
        &self.buffer
    }

    /// Seeds the buffer from the initial `GET /transactions` fetch
    /// (newest-first, truncated to capacity).
    pub fn seed(&mut self, recent: Vec<TransactionRecord>) {
        self.buffer.replace(recent);
    }

    /// Applies one decoded event in arrival order. No reordering, no
    /// deduplication.
    pub fn apply(&mut self, event: LiveEvent) -> Outcome {
        match event {
            LiveEvent::Transaction(txn) => {
                self.buffer.push(txn);
                Outcome::Buffered
            }
            LiveEvent::Alert(alert) => {
                tracing::debug!(alert_id = %alert.alert_id, "alert event; scheduling resync");
                Outcome::ResyncAlerts
            }
        }
    }

    /// Decodes and applies one raw message body.
    ///
    /// Malformed payloads are dropped with a diagnostic and yield `None`;
    /// the stream continues uninterrupted.
    pub fn handle_raw(&mut self, text: &str) -> Option<Outcome> {
        match serde_json::from_str::<LiveEvent>(text) {
            Ok(event) => Some(self.apply(event)),
            Err(err) => {
                let err = ClientError::MalformedMessage {
                    reason: err.to_string(),
                };
                tracing::warn!(%err, "dropping live message");
                None
            }
        }
    }
}
