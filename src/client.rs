//! The graph client seam.
//!
//! [`GraphClient`] is the sole external boundary of the crate: a
//! node/edge fetcher plus an FQL runner. [`HttpGraphClient`] is the stock
//! reqwest-backed implementation. Anything beyond plain transport
//! (authentication refresh, pagination past the requested cap, rate
//! limiting, retries) is the implementation's own concern and absent
//! here.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::error::GraphError;
use crate::query::FqlQuery;
use crate::record::DataEnvelope;

/// Default graph API endpoint root.
pub const DEFAULT_API_BASE: &str = "https://graph.facebook.com";

#[async_trait]
pub trait GraphClient: Send + Sync {
    /// Fetch a node or edge listing, optionally capped at `limit` entries.
    /// Returns a single record for nodes, an array of records for edges.
    async fn get_object(&self, path: &str, limit: Option<u64>) -> Result<Value, GraphError>;

    /// Run an FQL query and return the matching rows.
    async fn fql(&self, query: &FqlQuery) -> Result<Vec<Value>, GraphError>;
}

/// Stock [`GraphClient`] over HTTP.
pub struct HttpGraphClient {
    http: reqwest::Client,
    api_base: String,
    access_token: String,
}

impl HttpGraphClient {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            access_token: access_token.into(),
        }
    }

    /// Point the client at a non-default endpoint root.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn object_url(&self, path: &str, limit: Option<u64>) -> String {
        let mut url = format!(
            "{}/{}?access_token={}",
            self.api_base,
            path.trim_start_matches('/'),
            urlencoding::encode(&self.access_token)
        );
        if let Some(limit) = limit {
            url.push_str(&format!("&limit={limit}"));
        }
        url
    }

    fn fql_url(&self, query: &FqlQuery) -> String {
        format!(
            "{}/fql?q={}&access_token={}",
            self.api_base,
            urlencoding::encode(&query.render()),
            urlencoding::encode(&self.access_token)
        )
    }
}

#[async_trait]
impl GraphClient for HttpGraphClient {
    async fn get_object(&self, path: &str, limit: Option<u64>) -> Result<Value, GraphError> {
        let url = self.object_url(path, limit);
        debug!("GET {path}");
        let response = self.http.get(&url).send().await?;
        let mut body: Value = response.json().await?;

        // Edge listings arrive wrapped in a `data` envelope; node records
        // come back bare.
        if let Some(data) = body.get_mut("data") {
            if data.is_array() {
                return Ok(data.take());
            }
        }
        Ok(body)
    }

    async fn fql(&self, query: &FqlQuery) -> Result<Vec<Value>, GraphError> {
        let url = self.fql_url(query);
        debug!("FQL {query}");
        let response = self.http.get(&url).send().await?;
        let body: Value = response.json().await?;

        if let Value::Array(rows) = body {
            return Ok(rows);
        }
        let envelope: DataEnvelope = serde_json::from_value(body)?;
        Ok(envelope.data)
    }
}
