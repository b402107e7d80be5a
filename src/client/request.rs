//! Search query validation and request payload.

use serde::Serialize;

use crate::{Error, Result};

/// Result count used when the caller does not pass one.
pub const DEFAULT_TOP_K: u32 = 10;

/// A validated search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    query: String,
    keywords: Option<String>,
    top_k: u32,
}

impl SearchQuery {
    /// Query with default options.
    pub fn new(query: impl Into<String>) -> Result<Self> {
        SearchRequestBuilder::new(query).build()
    }

    pub fn builder(query: impl Into<String>) -> SearchRequestBuilder {
        SearchRequestBuilder::new(query)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn keywords(&self) -> Option<&str> {
        self.keywords.as_deref()
    }

    pub fn top_k(&self) -> u32 {
        self.top_k
    }

    /// JSON body sent to the search endpoint.
    pub fn body(&self) -> SearchRequestBody<'_> {
        SearchRequestBody {
            query: &self.query,
            keywords: self.keywords.as_deref(),
            top_k: self.top_k,
        }
    }
}

/// Wire shape of the search request.
#[derive(Debug, Serialize)]
pub struct SearchRequestBody<'a> {
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<&'a str>,
    pub top_k: u32,
}

/// Collects raw tool arguments and validates them into a [`SearchQuery`].
#[derive(Debug, Clone, Default)]
pub struct SearchRequestBuilder {
    query: String,
    keywords: Option<String>,
    top_k: Option<i64>,
}

impl SearchRequestBuilder {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Keyword hints. Blank values count as absent.
    pub fn keywords(mut self, keywords: Option<impl Into<String>>) -> Self {
        self.keywords = keywords.map(Into::into);
        self
    }

    /// Result count; signed so that negative input can be rejected rather
    /// than wrapped.
    pub fn top_k(mut self, top_k: Option<i64>) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn build(self) -> Result<SearchQuery> {
        let query = self.query.trim();
        if query.is_empty() {
            return Err(Error::InvalidRequest("query must not be empty".into()));
        }

        let top_k = match self.top_k {
            None => DEFAULT_TOP_K,
            Some(k) if k < 1 => {
                return Err(Error::InvalidRequest(format!(
                    "top_k must be at least 1 (got {})",
                    k
                )));
            }
            Some(k) => u32::try_from(k).map_err(|_| {
                Error::InvalidRequest(format!("top_k must be at most {} (got {})", u32::MAX, k))
            })?,
        };

        let keywords = self
            .keywords
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Ok(SearchQuery {
            query: query.to_string(),
            keywords,
            top_k,
        })
    }
}
