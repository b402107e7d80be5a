//! Credential source trait and per-source diagnostics.

use std::fmt;

use async_trait::async_trait;

use super::{Credential, Provenance};

/// Why a source did not yield a credential.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    NotSet,
    FileMissing,
    EmptyAfterTrim,
    /// File exists but is not a valid document.
    ParseError(String),
    /// File exists but could not be read.
    ReadError(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotSet => write!(f, "not set"),
            SkipReason::FileMissing => write!(f, "file missing"),
            SkipReason::EmptyAfterTrim => write!(f, "empty after trim"),
            SkipReason::ParseError(msg) => write!(f, "parse error: {}", msg),
            SkipReason::ReadError(msg) => write!(f, "read error: {}", msg),
        }
    }
}

/// One source that was consulted without success.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceAttempt {
    pub origin: Provenance,
    pub reason: SkipReason,
}

impl fmt::Display for SourceAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.origin, self.reason)
    }
}

/// A single step of the precedence chain.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Which source this is, for diagnostics.
    fn origin(&self) -> Provenance;

    /// Look for a credential. Only this source's own location is read.
    async fn probe(&self) -> Result<Credential, SkipReason>;
}

/// Turn a raw value into a credential, rejecting blank values.
pub(crate) fn non_blank(raw: &str, origin: Provenance) -> Result<Credential, SkipReason> {
    if raw.trim().is_empty() {
        Err(SkipReason::EmptyAfterTrim)
    } else {
        Ok(Credential::new(raw, origin))
    }
}
