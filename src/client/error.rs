//! Search client error types.

use thiserror::Error;

const MAX_MESSAGE_CHARS: usize = 500;

/// Failures of a single search call.
///
/// "No token found" is not here: that is a resolution outcome, decided
/// before any request is made.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The API refused the token (401/403).
    #[error("authentication rejected (HTTP {status})")]
    AuthRejected { status: u16 },

    /// Any other 4xx.
    #[error("bad request (HTTP {status}){}", message.as_deref().map(|m| format!(": {}", m)).unwrap_or_default())]
    BadRequest {
        status: u16,
        /// Upstream explanation, if the body carried one
        message: Option<String>,
    },

    /// 5xx from the API.
    #[error("upstream unavailable (HTTP {status})")]
    UpstreamUnavailable { status: u16 },

    /// Timeout or connection failure.
    #[error("unreachable: {0}")]
    Unreachable(String),

    /// Success status with a body that is not a valid result list, or a
    /// status outside the mapped ranges.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl SearchError {
    /// Map a non-success status and its body.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => SearchError::AuthRejected { status },
            400..=499 => SearchError::BadRequest {
                status,
                message: upstream_message(body),
            },
            500..=599 => SearchError::UpstreamUnavailable { status },
            _ => SearchError::InvalidResponse(format!("unexpected HTTP status {}", status)),
        }
    }

    /// Map a transport-level failure.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            SearchError::Unreachable(format!("request timed out ({})", error_chain(err)))
        } else {
            SearchError::Unreachable(error_chain(err))
        }
    }

    /// Stable label for this kind of failure.
    pub fn kind(&self) -> &'static str {
        match self {
            SearchError::AuthRejected { .. } => "auth_rejected",
            SearchError::BadRequest { .. } => "bad_request",
            SearchError::UpstreamUnavailable { .. } => "upstream_unavailable",
            SearchError::Unreachable(_) => "unreachable",
            SearchError::InvalidResponse(_) => "invalid_response",
        }
    }

    /// Whether a later attempt could succeed unchanged.
    ///
    /// The client never retries; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SearchError::UpstreamUnavailable { .. } | SearchError::Unreachable(_)
        )
    }
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"detail": ...}`, `{"message": ...}` and `{"error": ...}`;
/// falls back to the raw text.
fn upstream_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    let message = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => ["detail", "message", "error"]
            .iter()
            .find_map(|key| json.get(key))
            .map(|v| match v {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_else(|| body.to_string()),
        Err(_) => body.to_string(),
    };

    Some(truncate(&message, MAX_MESSAGE_CHARS))
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            SearchError::from_status(401, ""),
            SearchError::AuthRejected { status: 401 }
        );
        assert_eq!(
            SearchError::from_status(403, "{\"detail\":\"expired\"}"),
            SearchError::AuthRejected { status: 403 }
        );
        assert_eq!(
            SearchError::from_status(422, r#"{"detail": "top_k must be <= 50"}"#),
            SearchError::BadRequest {
                status: 422,
                message: Some("top_k must be <= 50".into())
            }
        );
        assert_eq!(
            SearchError::from_status(404, ""),
            SearchError::BadRequest {
                status: 404,
                message: None
            }
        );
        assert_eq!(
            SearchError::from_status(503, "maintenance"),
            SearchError::UpstreamUnavailable { status: 503 }
        );
        assert!(matches!(
            SearchError::from_status(304, ""),
            SearchError::InvalidResponse(_)
        ));
    }

    #[test]
    fn test_upstream_message_shapes() {
        assert_eq!(
            upstream_message(r#"{"message": "query too long"}"#).as_deref(),
            Some("query too long")
        );
        assert_eq!(
            upstream_message(r#"{"detail": [{"loc": ["body", "query"]}]}"#).as_deref(),
            Some(r#"[{"loc":["body","query"]}]"#)
        );
        assert_eq!(upstream_message("plain text\n").as_deref(), Some("plain text"));
        assert_eq!(upstream_message("   "), None);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let long = "é".repeat(MAX_MESSAGE_CHARS + 10);
        let out = truncate(&long, MAX_MESSAGE_CHARS);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), MAX_MESSAGE_CHARS + 3);
    }

    #[test]
    fn test_display_and_kind() {
        let err = SearchError::BadRequest {
            status: 400,
            message: Some("bad".into()),
        };
        assert_eq!(err.to_string(), "bad request (HTTP 400): bad");
        assert_eq!(err.kind(), "bad_request");
        assert!(!err.is_retryable());
        assert!(SearchError::UpstreamUnavailable { status: 502 }.is_retryable());
    }
}
