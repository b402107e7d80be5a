//! Search response types.

use serde::Deserialize;
use serde_json::Value;

/// One search hit, in the service's relevance order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchHit {
    pub content: String,
    pub source: Option<String>,
    pub metadata: Option<Value>,
}

impl SearchHit {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Ordered search hits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    pub hits: Vec<SearchHit>,
    /// Total reported by the service, if it sent one.
    pub count: Option<u64>,
}

impl SearchResult {
    pub fn new(hits: Vec<SearchHit>) -> Self {
        Self { hits, count: None }
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Parse a success body. The error string describes what was wrong.
    pub fn from_slice(body: &[u8]) -> Result<Self, String> {
        let wire: WireResponse =
            serde_json::from_slice(body).map_err(|e| format!("malformed search response: {}", e))?;

        Ok(Self {
            hits: wire.results.into_iter().map(SearchHit::from).collect(),
            count: wire.count,
        })
    }
}

#[derive(Deserialize)]
struct WireResponse {
    results: Vec<WireHit>,
    #[serde(default)]
    count: Option<u64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireHit {
    Text(String),
    Entry(WireEntry),
}

#[derive(Deserialize)]
struct WireEntry {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    metadata: Option<Value>,
}

impl From<WireHit> for SearchHit {
    fn from(hit: WireHit) -> Self {
        match hit {
            WireHit::Text(content) => SearchHit::new(content),
            WireHit::Entry(entry) => SearchHit {
                content: entry.content.or(entry.text).unwrap_or_default(),
                source: entry.source.filter(|s| !s.trim().is_empty()),
                metadata: entry.metadata.filter(|m| !is_empty_value(m)),
            },
        }
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.trim().is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
