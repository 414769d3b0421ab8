//! Live event types and the bounded transaction buffer.
//!
//! The live channel delivers JSON envelopes of shape
//! `{"type": "transaction"|"alert", "data": {...}}` in arrival order.
//! [`LiveEvent`] decodes that envelope directly via serde's adjacent
//! tagging; anything that fails to decode is a malformed message handled at
//! the transport boundary, never here.
//!
//! [`LiveBuffer`] keeps the 100 most recent transactions, newest first,
//! evicting the oldest on overflow. Eviction is FIFO by arrival, not by the
//! embedded timestamp.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Maximum number of transactions retained in a [`LiveBuffer`].
pub const LIVE_BUFFER_CAP: usize = 100;

/// A transaction as broadcast on the live channel (and returned by
/// `GET /transactions`). Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub txn_id: String,
    pub account_id: String,
    pub counterparty_id: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub txn_type: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub is_international: bool,
    /// ISO-8601 timestamp, pass-through only. Buffer order is arrival
    /// order, never timestamp order.
    #[serde(default)]
    pub timestamp: Option<String>,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// An alert as broadcast on the live channel and returned by `GET /alerts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub alert_id: String,
    pub account_id: String,
    #[serde(default)]
    pub txn_id: Option<String>,
    #[serde(default)]
    pub risk_score: f64,
    #[serde(default)]
    pub alert_level: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// One decoded message from the live channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum LiveEvent {
    /// A new transaction to prepend to the live buffer.
    Transaction(TransactionRecord),
    /// A new alert. Carries its payload, but consumers re-fetch the alert
    /// list and stats authoritatively instead of merging it locally.
    Alert(AlertRecord),
}

/// Bounded, newest-first sequence of recent transactions.
#[derive(Debug, Clone, Default)]
pub struct LiveBuffer {
    entries: VecDeque<TransactionRecord>,
}

impl LiveBuffer {
    /// An empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepends a transaction; evicts the oldest entry past
    /// [`LIVE_BUFFER_CAP`].
    pub fn push(&mut self, txn: TransactionRecord) {
        self.entries.push_front(txn);
        if self.entries.len() > LIVE_BUFFER_CAP {
            self.entries.pop_back();
        }
    }

    /// Replaces the contents with an already-newest-first batch (the
    /// initial `GET /transactions` fetch), truncated to capacity.
    pub fn replace(&mut self, recent: Vec<TransactionRecord>) {
        self.entries = recent.into_iter().take(LIVE_BUFFER_CAP).collect();
    }

    /// Number of buffered transactions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no transactions are buffered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates newest first.
    pub fn iter(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.entries.iter()
    }

    /// Most recent transaction, if any.
    pub fn latest(&self) -> Option<&TransactionRecord> {
        self.entries.front()
    }

    /// Oldest retained transaction, if any.
    pub fn oldest(&self) -> Option<&TransactionRecord> {
        self.entries.back()
    }
}
