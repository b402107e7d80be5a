//! Bare token file credential source.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::source::non_blank;
use crate::auth::{Credential, CredentialSource, Provenance, SkipReason};
use crate::config::FileSystem;

/// Reads a file whose whole content, trimmed, is the token.
pub struct TokenFileSource {
    path: PathBuf,
    fs: Arc<dyn FileSystem>,
}

impl TokenFileSource {
    pub fn new(path: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            path: path.into(),
            fs,
        }
    }
}

#[async_trait]
impl CredentialSource for TokenFileSource {
    fn origin(&self) -> Provenance {
        Provenance::TokenFile(self.path.clone())
    }

    async fn probe(&self) -> Result<Credential, SkipReason> {
        match self.fs.read_to_string(&self.path).await {
            Ok(Some(content)) => non_blank(&content, self.origin()),
            Ok(None) => Err(SkipReason::FileMissing),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Token file unreadable");
                Err(SkipReason::ReadError(e.to_string()))
            }
        }
    }
}
