//! Knowledge vault search API client.

pub mod error;
pub mod request;
pub mod response;

pub use error::SearchError;
pub use request::{DEFAULT_TOP_K, SearchQuery, SearchRequestBody, SearchRequestBuilder};
pub use response::{SearchHit, SearchResult};

use std::time::Duration;

use reqwest::header::ACCEPT;
use secrecy::ExposeSecret;
use url::Url;

use crate::auth::Credential;
use crate::config::Settings;
use crate::{Error, Result};

/// Path of the search endpoint, appended to the base URL.
pub const SEARCH_PATH: &str = "/v1/knowledge/search_knowledge_vault";
/// Upper bound on one search call.
pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("fondu-vault-mcp/", env!("CARGO_PKG_VERSION"));

/// Issues search requests. Cheap to clone; clones share one connection pool.
#[derive(Clone, Debug)]
pub struct KnowledgeClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl KnowledgeClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        Self::builder().base_url(settings.base_url.clone()).build()
    }

    pub fn with_http(http: reqwest::Client, base_url: &Url) -> Result<Self> {
        Ok(Self {
            http,
            endpoint: search_endpoint(base_url)?,
        })
    }

    pub fn builder() -> KnowledgeClientBuilder {
        KnowledgeClientBuilder::default()
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Run one search. Exactly one request is made; no retries.
    pub async fn search(
        &self,
        credential: &Credential,
        query: &SearchQuery,
    ) -> std::result::Result<SearchResult, SearchError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            top_k = query.top_k(),
            has_keywords = query.keywords().is_some(),
            credential_source = credential.provenance().kind(),
            "Sending search request"
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(credential.token().expose_secret())
            .header(ACCEPT, "application/json")
            .json(&query.body())
            .send()
            .await
            .map_err(|e| SearchError::from_transport(&e))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Received search response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = SearchError::from_status(status.as_u16(), &body);
            tracing::warn!(status = status.as_u16(), kind = err.kind(), "Search request failed");
            return Err(err);
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                SearchError::from_transport(&e)
            } else {
                SearchError::InvalidResponse(format!("failed to read response body: {}", e))
            }
        })?;

        let result = SearchResult::from_slice(&body).map_err(SearchError::InvalidResponse)?;

        if let Some(count) = result.count
            && count != result.len() as u64
        {
            tracing::debug!(count, returned = result.len(), "Reported count differs from results returned");
        }

        Ok(result)
    }
}

/// Builder for [`KnowledgeClient`].
#[derive(Clone, Debug)]
pub struct KnowledgeClientBuilder {
    base_url: Url,
    timeout: Duration,
}

impl Default for KnowledgeClientBuilder {
    fn default() -> Self {
        Self {
            base_url: Settings::default().base_url,
            timeout: SEARCH_TIMEOUT,
        }
    }
}

impl KnowledgeClientBuilder {
    pub fn base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Override the request timeout. Production callers keep the default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<KnowledgeClient> {
        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(Error::Network)?;

        KnowledgeClient::with_http(http, &self.base_url)
    }
}

/// Append [`SEARCH_PATH`] to the base URL, keeping any path prefix.
fn search_endpoint(base_url: &Url) -> Result<Url> {
    let joined = format!("{}{}", base_url.as_str().trim_end_matches('/'), SEARCH_PATH);
    Url::parse(&joined).map_err(|e| Error::Config(format!("invalid search endpoint '{}': {}", joined, e)))
}
