//! Live WebSocket feed and its supervision loop.
//!
//! [`LiveFeed`] is the raw channel: connect, read text frames, close.
//! [`supervise`] owns a feed's whole lifecycle against a session: it
//! reconnects with exponential backoff (1s doubling to a 30s cap, reset on
//! a successful connect) and guarantees the socket is closed when the
//! shutdown signal fires, on every path.

use std::time::Duration;

use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::error::ClientError;
use crate::session::DashboardSession;

const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// One live WebSocket connection to the backend's `/ws/live` channel.
pub struct LiveFeed {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl LiveFeed {
    /// Opens the channel.
    pub async fn connect(url: &str) -> Result<Self, ClientError> {
        let (ws, _response) = connect_async(url).await?;
        Ok(LiveFeed { ws })
    }

    /// Next text frame, skipping control frames. `None` on a clean close.
    pub async fn next_text(&mut self) -> Result<Option<String>, ClientError> {
        while let Some(message) = self.ws.next().await {
            match message? {
                Message::Text(text) => return Ok(Some(text.to_string())),
                Message::Close(_) => return Ok(None),
                // Pings are answered by tungstenite; binary frames are not
                // part of the live protocol.
                Message::Ping(_) | Message::Pong(_) | Message::Binary(_) | Message::Frame(_) => {}
            }
        }
        Ok(None)
    }

    /// Sends a close frame and flushes the socket.
    pub async fn close(&mut self) -> Result<(), ClientError> {
        self.ws.close(None).await?;
        Ok(())
    }
}

/// Runs the live feed against a session until shutdown.
///
/// Every message is handed to
/// [`DashboardSession::handle_live_message`] on the session's serialized
/// path. Connect failures and mid-stream errors trigger a backed-off
/// reconnect; the shutdown signal wins over everything and closes the
/// socket before returning.
pub async fn supervise(
    url: &str,
    session: &mut DashboardSession,
    mut shutdown: tokio::sync::watch::Receiver<bool>,
) -> Result<(), ClientError> {
    let mut backoff = INITIAL_BACKOFF;

    loop {
        if *shutdown.borrow() {
            return Ok(());
        }

        match LiveFeed::connect(url).await {
            Ok(mut feed) => {
                tracing::info!(url, "live feed connected");
                session.set_connected(true);
                backoff = INITIAL_BACKOFF;

                loop {
                    tokio::select! {
                        changed = shutdown.changed() => {
                            if changed.is_err() || *shutdown.borrow() {
                                let _ = feed.close().await;
                                session.set_connected(false);
                                return Ok(());
                            }
                        }
                        message = feed.next_text() => match message {
                            Ok(Some(text)) => {
                                session.handle_live_message(&text).await;
                            }
                            Ok(None) => {
                                tracing::info!("live feed closed by server");
                                break;
                            }
                            Err(err) => {
                                tracing::warn!(%err, "live feed error");
                                break;
                            }
                        }
                    }
                }
                session.set_connected(false);
            }
            Err(err) => {
                tracing::warn!(%err, url, "live feed connect failed");
            }
        }

        tracing::debug!(?backoff, "reconnecting after backoff");
        tokio::select! {
            _ = tokio::time::sleep(backoff) => {}
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    return Ok(());
                }
            }
        }
        backoff = (backoff * 2).min(MAX_BACKOFF);
    }
}
