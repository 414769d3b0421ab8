//! REST client for the monitoring backend.
//!
//! Shapes only -- the backend's risk scoring and persistence are
//! collaborators. Every failure maps to [`ClientError::Transport`]; there is
//! no automatic retry on the fetch path.

use amlscope_core::{AlertRecord, TransactionRecord};

use crate::error::ClientError;
use crate::schema::{AlertStats, GraphPayload};

/// Thin typed wrapper over the backend's REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client against `base_url` (e.g. `http://localhost:8000/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        ApiClient {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// `GET /analytics/graph?limit=N` -- the raw node/link payload.
    pub async fn fetch_graph(&self, limit: usize) -> Result<GraphPayload, ClientError> {
        self.get_json(&format!("analytics/graph?limit={limit}")).await
    }

    /// `GET /alerts?limit=N` -- recent alerts, newest first.
    pub async fn fetch_alerts(&self, limit: usize) -> Result<Vec<AlertRecord>, ClientError> {
        self.get_json(&format!("alerts?limit={limit}")).await
    }

    /// `GET /transactions?limit=N` -- recent transactions, newest first.
    pub async fn fetch_transactions(
        &self,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, ClientError> {
        self.get_json(&format!("transactions?limit={limit}")).await
    }

    /// `GET /alerts/stats/summary` -- aggregate alert statistics.
    pub async fn fetch_stats(&self) -> Result<AlertStats, ClientError> {
        self.get_json("alerts/stats/summary").await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, ClientError> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self.http.get(&url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:8000/api/");
        assert_eq!(client.base_url, "http://localhost:8000/api");
    }
}
