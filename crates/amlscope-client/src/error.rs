//! Unified error type for the collaboration layer.
//!
//! Transport failures are degraded-state signals, not crashes: callers keep
//! their current snapshot and report "offline"/"no graph data". Malformed
//! live messages never reach this type's callers at all -- the reconciler
//! drops them with a diagnostic and the stream continues.

use thiserror::Error;

use amlscope_core::CoreError;

/// Failures crossing the collaboration layer's public contract.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A REST fetch failed (connection, HTTP status, or body decode).
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The live WebSocket channel failed.
    #[error("live stream failure: {0}")]
    Stream(#[from] tokio_tungstenite::tungstenite::Error),

    /// A live message body could not be decoded.
    #[error("malformed live message: {reason}")]
    MalformedMessage { reason: String },

    /// A recoverable core failure (selection/search target not found).
    #[error(transparent)]
    Core(#[from] CoreError),
}
