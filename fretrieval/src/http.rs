//! JSON-over-HTTP client for a local vector store query service.
//!
//! The service answers `POST {base_url}/query` with parallel arrays:
//! `{"documents": [..], "metadatas": [..], "distances": [..], "ids": [..]}`. Identifiers are
//! opaque and not used.

use std::time::Duration;

use fcommon::BoxFuture;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{RetrievalBackend, RetrievalError, RetrievedPassage, rank_passages};

pub const DEFAULT_RETRIEVAL_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_RETRIEVAL_TIMEOUT: Duration = Duration::from_secs(10);

/// Metadata key carrying the passage's source label.
const SOURCE_LABEL_KEY: &str = "filename";

#[derive(Debug, Clone)]
pub struct HttpRetrievalBackend {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpRetrievalBackend {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_RETRIEVAL_BASE_URL.to_string(),
            timeout: DEFAULT_RETRIEVAL_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/query", self.base_url.trim_end_matches('/'))
    }

    async fn send(&self, query: &str, top_k: usize) -> Result<QueryResponse, RetrievalError> {
        let body = QueryRequest {
            query,
            n_results: top_k,
        };

        let response = self
            .client
            .post(self.endpoint())
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    RetrievalError::timeout(err.to_string())
                } else {
                    RetrievalError::transport(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RetrievalError::status(status.as_u16()));
        }

        let raw = response
            .text()
            .await
            .map_err(|err| RetrievalError::transport(err.to_string()))?;

        serde_json::from_str(&raw)
            .map_err(|err| RetrievalError::malformed(format!("invalid query response: {err}")))
    }
}

impl RetrievalBackend for HttpRetrievalBackend {
    fn query<'a>(
        &'a self,
        query: &'a str,
        top_k: usize,
    ) -> BoxFuture<'a, Result<Vec<RetrievedPassage>, RetrievalError>> {
        Box::pin(async move {
            let response = self.send(query, top_k).await?;
            Ok(response.into_passages())
        })
    }
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
    n_results: usize,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    documents: Vec<String>,
    /// Optional on the wire; `null` and a missing key both mean "none".
    #[serde(default)]
    metadatas: Option<Vec<Option<Map<String, Value>>>>,
    #[serde(default)]
    distances: Option<Vec<f64>>,
}

impl QueryResponse {
    fn into_passages(self) -> Vec<RetrievedPassage> {
        let QueryResponse {
            documents,
            metadatas,
            distances,
        } = self;
        let metadatas = metadatas.unwrap_or_default();
        let distances = distances.unwrap_or_default();

        let mut passages = documents
            .into_iter()
            .enumerate()
            .map(|(index, text)| {
                let source_label = metadatas
                    .get(index)
                    .and_then(Option::as_ref)
                    .and_then(|metadata| metadata.get(SOURCE_LABEL_KEY))
                    .and_then(Value::as_str)
                    .map(ToString::to_string);
                let distance = distances.get(index).copied().unwrap_or(0.0);
                RetrievedPassage::from_distance(text, source_label, distance)
            })
            .collect::<Vec<_>>();

        rank_passages(&mut passages);
        passages
    }
}
