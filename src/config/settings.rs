//! Runtime settings for the search client.

use std::path::PathBuf;

use url::{Host, Url};

use super::env::Environment;
use super::loader::ConfigFileLoader;
use crate::{Error, Result};

/// Production search API host.
pub const DEFAULT_BASE_URL: &str = "https://api.youfondu.com";
/// Environment override for the API host.
pub const BASE_URL_ENV: &str = "FONDU_API_BASE_URL";
/// Config file key for the API host.
pub const BASE_URL_KEY: &str = "fondu.base_url";

/// Settings resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: Url,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
        }
    }
}

impl Settings {
    /// Settings pointing at an explicit API host.
    pub fn with_base_url(raw: &str) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(raw)?,
        })
    }

    /// Resolve settings: environment first, then the first present config
    /// file that sets `fondu.base_url`, then the default.
    ///
    /// Config files that fail to load are skipped here; credential resolution
    /// reports them with full detail.
    pub async fn load(
        env: &dyn Environment,
        loader: &ConfigFileLoader,
        config_files: &[PathBuf],
    ) -> Result<Self> {
        if let Some(raw) = env.var(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            tracing::debug!(source = BASE_URL_ENV, "Using base URL from environment");
            return Self::with_base_url(raw.trim());
        }

        for path in config_files {
            let doc = match loader.load(path).await {
                Ok(doc) => doc,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping config file while loading settings");
                    continue;
                }
            };
            if let Some(raw) = doc.get_str(BASE_URL_KEY).filter(|v| !v.trim().is_empty()) {
                tracing::debug!(path = %path.display(), "Using base URL from config file");
                return Self::with_base_url(raw.trim());
            }
        }

        Ok(Self::default())
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| Error::Config(format!("invalid base URL '{}': {}", raw, e)))?;

    match url.scheme() {
        "https" => {}
        "http" => {
            if !is_loopback(&url) {
                tracing::warn!(base_url = %url, "Base URL uses plain HTTP; the token will be sent unencrypted");
            }
        }
        other => {
            return Err(Error::Config(format!(
                "invalid base URL '{}': unsupported scheme '{}'",
                raw, other
            )));
        }
    }

    if url.host().is_none() {
        return Err(Error::Config(format!("invalid base URL '{}': missing host", raw)));
    }

    Ok(url)
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MemoryEnvironment, MemoryFileSystem};
    use std::sync::Arc;

    fn loader(fs: MemoryFileSystem) -> ConfigFileLoader {
        ConfigFileLoader::new(Arc::new(fs))
    }

    #[test]
    fn test_default_base_url() {
        assert_eq!(Settings::default().base_url.as_str(), "https://api.youfondu.com/");
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(Settings::with_base_url("not a url").is_err());
        assert!(Settings::with_base_url("ftp://example.com").is_err());
        assert!(Settings::with_base_url("http://127.0.0.1:5000").is_ok());
    }

    #[tokio::test]
    async fn test_env_overrides_config() {
        let env = MemoryEnvironment::new().with_var(BASE_URL_ENV, "http://localhost:9000");
        let fs = MemoryFileSystem::new().file("/c.yaml", "fondu:\n  base_url: https://cfg.example.com\n");

        let settings = Settings::load(&env, &loader(fs), &[PathBuf::from("/c.yaml")])
            .await
            .unwrap();
        assert_eq!(settings.base_url.as_str(), "http://localhost:9000/");
    }

    #[tokio::test]
    async fn test_first_config_with_base_url_wins() {
        let fs = MemoryFileSystem::new()
            .file("/a.yaml", "fondu: [broken")
            .file("/b.yaml", "fondu:\n  auth_token: x\n")
            .file("/c.yaml", "fondu:\n  base_url: https://cfg.example.com\n");
        let paths = [
            PathBuf::from("/a.yaml"),
            PathBuf::from("/b.yaml"),
            PathBuf::from("/c.yaml"),
        ];

        let settings = Settings::load(&MemoryEnvironment::new(), &loader(fs), &paths)
            .await
            .unwrap();
        assert_eq!(settings.base_url.as_str(), "https://cfg.example.com/");
    }

    #[tokio::test]
    async fn test_falls_back_to_default() {
        let settings = Settings::load(
            &MemoryEnvironment::new(),
            &loader(MemoryFileSystem::new()),
            &[PathBuf::from("/missing.yaml")],
        )
        .await
        .unwrap();
        assert_eq!(settings, Settings::default());
    }
}
