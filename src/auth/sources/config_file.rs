//! Config file credential source.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;

use crate::auth::source::non_blank;
use crate::auth::{Credential, CredentialSource, Provenance, SkipReason};
use crate::config::{ConfigError, ConfigFileLoader};

/// Reads a nested token field from a structured config file.
pub struct ConfigFileSource {
    path: PathBuf,
    key: String,
    loader: ConfigFileLoader,
}

impl ConfigFileSource {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>, loader: ConfigFileLoader) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
            loader,
        }
    }
}

#[async_trait]
impl CredentialSource for ConfigFileSource {
    fn origin(&self) -> Provenance {
        Provenance::ConfigFile(self.path.clone())
    }

    async fn probe(&self) -> Result<Credential, SkipReason> {
        let doc = match self.loader.load(&self.path).await {
            Ok(doc) => doc,
            Err(ConfigError::Parse { message, .. }) => {
                tracing::warn!(path = %self.path.display(), error = %message, "Config file is malformed, skipping");
                return Err(SkipReason::ParseError(message));
            }
            Err(ConfigError::Io { source, .. }) => {
                tracing::warn!(path = %self.path.display(), error = %source, "Config file unreadable, skipping");
                return Err(SkipReason::ReadError(source.to_string()));
            }
        };

        if !doc.is_present() {
            return Err(SkipReason::FileMissing);
        }

        match doc.get(&self.key) {
            None | Some(Value::Null) => Err(SkipReason::NotSet),
            Some(Value::String(token)) => non_blank(token, self.origin()),
            Some(_) => Err(SkipReason::ParseError(format!(
                "`{}` must be a string",
                self.key
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryFileSystem;
    use secrecy::ExposeSecret;
    use std::sync::Arc;

    fn source(fs: MemoryFileSystem, path: &str) -> ConfigFileSource {
        ConfigFileSource::new(
            path,
            "fondu.auth_token",
            ConfigFileLoader::new(Arc::new(fs)),
        )
    }

    #[tokio::test]
    async fn test_config_file_token() {
        let fs = MemoryFileSystem::new().file("/c.yaml", "fondu:\n  auth_token: \" cfg-token \"\n");
        let cred = source(fs, "/c.yaml").probe().await.unwrap();
        assert_eq!(cred.token().expose_secret(), "cfg-token");
        assert_eq!(cred.provenance(), &Provenance::ConfigFile("/c.yaml".into()));
    }

    #[tokio::test]
    async fn test_config_file_reasons() {
        let fs = MemoryFileSystem::new()
            .file("/no-key.yaml", "fondu:\n  base_url: https://x.example\n")
            .file("/null.yaml", "fondu:\n  auth_token:\n")
            .file("/blank.yaml", "fondu:\n  auth_token: \"  \"\n")
            .file("/number.yaml", "fondu:\n  auth_token: 12345\n")
            .file("/broken.yaml", "fondu: [oops");

        let reason = |path: &'static str| {
            let fs = fs.clone();
            async move { source(fs, path).probe().await.unwrap_err() }
        };

        assert_eq!(reason("/missing.yaml").await, SkipReason::FileMissing);
        assert_eq!(reason("/no-key.yaml").await, SkipReason::NotSet);
        assert_eq!(reason("/null.yaml").await, SkipReason::NotSet);
        assert_eq!(reason("/blank.yaml").await, SkipReason::EmptyAfterTrim);
        assert!(matches!(reason("/number.yaml").await, SkipReason::ParseError(m) if m.contains("must be a string")));
        assert!(matches!(reason("/broken.yaml").await, SkipReason::ParseError(_)));
    }
}
