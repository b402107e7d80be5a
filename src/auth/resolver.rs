//! Credential precedence chain.

use std::sync::Arc;

use super::paths::CredentialPaths;
use super::sources::{ConfigFileSource, EnvironmentSource, ExplicitSource, TokenFileSource};
use super::{Credential, CredentialSource, Provenance, SourceAttempt};
use crate::config::{ConfigFileLoader, Environment, FileSystem};

/// Primary token environment variable.
pub const AUTH_TOKEN_ENV: &str = "FONDU_AUTH_TOKEN";
/// Alias checked after [`AUTH_TOKEN_ENV`].
pub const AUTH_TOKEN_ENV_ALIAS: &str = "FONDU_API_TOKEN";
/// Nested config key holding the token.
pub const AUTH_TOKEN_KEY: &str = "fondu.auth_token";

/// Result of running the chain.
#[derive(Clone, Debug)]
pub enum ResolutionOutcome {
    /// A source produced a token; `skipped` lists the sources before it.
    Resolved {
        credential: Credential,
        skipped: Vec<SourceAttempt>,
    },
    /// No source produced a token; `attempts` lists every source in check order.
    Unresolved { attempts: Vec<SourceAttempt> },
}

impl ResolutionOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolutionOutcome::Resolved { .. })
    }

    pub fn credential(&self) -> Option<&Credential> {
        match self {
            ResolutionOutcome::Resolved { credential, .. } => Some(credential),
            ResolutionOutcome::Unresolved { .. } => None,
        }
    }

    /// Sources consulted without success, in check order.
    pub fn attempts(&self) -> &[SourceAttempt] {
        match self {
            ResolutionOutcome::Resolved { skipped, .. } => skipped,
            ResolutionOutcome::Unresolved { attempts } => attempts,
        }
    }
}

/// Tries the explicit parameter, then each configured source in order,
/// stopping at the first that yields a token.
///
/// Holds no mutable state; one resolver can serve concurrent calls.
pub struct CredentialResolver {
    sources: Vec<Box<dyn CredentialSource>>,
}

impl CredentialResolver {
    /// Create with specified sources (checked after the explicit parameter).
    pub fn new(sources: Vec<Box<dyn CredentialSource>>) -> Self {
        Self { sources }
    }

    /// Append a source to the chain.
    pub fn with<S: CredentialSource + 'static>(mut self, source: S) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// The standard chain: environment variables, config files, token files.
    pub fn standard(
        env: Arc<dyn Environment>,
        fs: Arc<dyn FileSystem>,
        paths: &CredentialPaths,
    ) -> Self {
        let loader = ConfigFileLoader::new(fs.clone());

        let env_sources = [AUTH_TOKEN_ENV, AUTH_TOKEN_ENV_ALIAS]
            .into_iter()
            .map(|var| Box::new(EnvironmentSource::new(var, env.clone())) as Box<dyn CredentialSource>);
        let config_sources = paths.config_files.iter().map(|path| {
            Box::new(ConfigFileSource::new(path.clone(), AUTH_TOKEN_KEY, loader.clone()))
                as Box<dyn CredentialSource>
        });
        let token_sources = paths.token_files.iter().map(|path| {
            Box::new(TokenFileSource::new(path.clone(), fs.clone())) as Box<dyn CredentialSource>
        });

        Self::new(env_sources.chain(config_sources).chain(token_sources).collect())
    }

    /// Every source in check order, starting with the explicit parameter.
    pub fn origins(&self) -> Vec<Provenance> {
        std::iter::once(Provenance::ExplicitParameter)
            .chain(self.sources.iter().map(|s| s.origin()))
            .collect()
    }

    /// Run the chain.
    pub async fn resolve(&self, explicit_token: Option<&str>) -> ResolutionOutcome {
        let explicit = ExplicitSource::new(explicit_token);
        let mut chain: Vec<&dyn CredentialSource> = Vec::with_capacity(self.sources.len() + 1);
        chain.push(&explicit);
        for source in &self.sources {
            chain.push(source.as_ref());
        }

        let mut attempts = Vec::new();
        for source in chain {
            match source.probe().await {
                Ok(credential) => {
                    tracing::debug!(
                        source = %credential.provenance(),
                        skipped = attempts.len(),
                        "Credential resolved"
                    );
                    return ResolutionOutcome::Resolved {
                        credential,
                        skipped: attempts,
                    };
                }
                Err(reason) => {
                    let origin = source.origin();
                    tracing::debug!(source = %origin, reason = %reason, "Credential source skipped");
                    attempts.push(SourceAttempt { origin, reason });
                }
            }
        }

        ResolutionOutcome::Unresolved { attempts }
    }
}

impl std::fmt::Debug for CredentialResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialResolver")
            .field("sources", &self.origins())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SkipReason;
    use crate::config::{MemoryEnvironment, MemoryFileSystem};
    use secrecy::ExposeSecret;
    use std::path::{Path, PathBuf};

    fn paths() -> CredentialPaths {
        CredentialPaths::from_dirs([
            PathBuf::from("/home/u/.fondu"),
            PathBuf::from("/home/u/.config/fondu"),
            PathBuf::from("/work/.fondu"),
        ])
    }

    fn resolver(env: MemoryEnvironment, fs: MemoryFileSystem) -> CredentialResolver {
        CredentialResolver::standard(Arc::new(env), Arc::new(fs), &paths())
    }

    #[tokio::test]
    async fn test_explicit_wins_over_everything() {
        let env = MemoryEnvironment::new()
            .with_var(AUTH_TOKEN_ENV, "env")
            .with_var(AUTH_TOKEN_ENV_ALIAS, "alias");
        let fs = MemoryFileSystem::new()
            .file("/home/u/.fondu/config.yaml", "fondu:\n  auth_token: cfg\n")
            .file("/home/u/.fondu/token", "file");
        let observer = fs.clone();

        let outcome = resolver(env, fs).resolve(Some("  explicit ")).await;
        let cred = outcome.credential().unwrap();
        assert_eq!(cred.token().expose_secret(), "explicit");
        assert_eq!(cred.provenance(), &Provenance::ExplicitParameter);
        assert!(outcome.attempts().is_empty());
        assert!(observer.reads().is_empty());
    }

    #[tokio::test]
    async fn test_env_short_circuits_files() {
        let env = MemoryEnvironment::new().with_var(AUTH_TOKEN_ENV, "env-token");
        let fs = MemoryFileSystem::new().file("/home/u/.fondu/token", "file");
        let observer = fs.clone();

        let outcome = resolver(env, fs).resolve(None).await;
        assert_eq!(
            outcome.credential().unwrap().provenance(),
            &Provenance::EnvironmentVariable(AUTH_TOKEN_ENV.into())
        );
        assert!(observer.reads().is_empty(), "files must not be read");
    }

    #[tokio::test]
    async fn test_alias_after_blank_primary() {
        let env = MemoryEnvironment::new()
            .with_var(AUTH_TOKEN_ENV, "   ")
            .with_var(AUTH_TOKEN_ENV_ALIAS, "alias-token");

        let outcome = resolver(env, MemoryFileSystem::new()).resolve(Some("")).await;
        let cred = outcome.credential().unwrap();
        assert_eq!(cred.token().expose_secret(), "alias-token");
        assert_eq!(
            outcome.attempts(),
            &[
                SourceAttempt {
                    origin: Provenance::ExplicitParameter,
                    reason: SkipReason::EmptyAfterTrim,
                },
                SourceAttempt {
                    origin: Provenance::EnvironmentVariable(AUTH_TOKEN_ENV.into()),
                    reason: SkipReason::EmptyAfterTrim,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_config_file_stops_before_token_files() {
        let fs = MemoryFileSystem::new()
            .file("/home/u/.config/fondu/config.yaml", "fondu:\n  auth_token: xdg\n")
            .file("/home/u/.fondu/token", "file");
        let observer = fs.clone();

        let outcome = resolver(MemoryEnvironment::new(), fs).resolve(None).await;
        assert_eq!(
            outcome.credential().unwrap().provenance(),
            &Provenance::ConfigFile("/home/u/.config/fondu/config.yaml".into())
        );
        assert_eq!(
            observer.reads(),
            vec![
                PathBuf::from("/home/u/.fondu/config.yaml"),
                PathBuf::from("/home/u/.config/fondu/config.yaml"),
            ]
        );
        assert!(!observer.was_read("/work/.fondu/config.yaml"));
        assert!(!observer.was_read("/home/u/.fondu/token"));
    }

    #[tokio::test]
    async fn test_nothing_found_lists_every_source_in_order() {
        let outcome = resolver(MemoryEnvironment::new(), MemoryFileSystem::new())
            .resolve(None)
            .await;

        assert!(!outcome.is_resolved());
        let attempts: Vec<(Provenance, SkipReason)> = outcome
            .attempts()
            .iter()
            .map(|a| (a.origin.clone(), a.reason.clone()))
            .collect();
        assert_eq!(
            attempts,
            vec![
                (Provenance::ExplicitParameter, SkipReason::NotSet),
                (Provenance::EnvironmentVariable(AUTH_TOKEN_ENV.into()), SkipReason::NotSet),
                (Provenance::EnvironmentVariable(AUTH_TOKEN_ENV_ALIAS.into()), SkipReason::NotSet),
                (Provenance::ConfigFile("/home/u/.fondu/config.yaml".into()), SkipReason::FileMissing),
                (Provenance::ConfigFile("/home/u/.config/fondu/config.yaml".into()), SkipReason::FileMissing),
                (Provenance::ConfigFile("/work/.fondu/config.yaml".into()), SkipReason::FileMissing),
                (Provenance::TokenFile("/home/u/.fondu/token".into()), SkipReason::FileMissing),
                (Provenance::TokenFile("/home/u/.config/fondu/token".into()), SkipReason::FileMissing),
                (Provenance::TokenFile("/work/.fondu/token".into()), SkipReason::FileMissing),
            ]
        );
    }

    #[tokio::test]
    async fn test_malformed_config_falls_through_to_token_file() {
        let fs = MemoryFileSystem::new()
            .file("/home/u/.fondu/config.yaml", "fondu: [not yaml")
            .file("/work/.fondu/token", "abc123\n");

        let outcome = resolver(MemoryEnvironment::new(), fs).resolve(None).await;
        let cred = outcome.credential().unwrap();
        assert_eq!(cred.token().expose_secret(), "abc123");
        assert_eq!(cred.provenance(), &Provenance::TokenFile("/work/.fondu/token".into()));

        let first_config = outcome
            .attempts()
            .iter()
            .find(|a| a.origin == Provenance::ConfigFile(Path::new("/home/u/.fondu/config.yaml").into()))
            .unwrap();
        assert!(matches!(first_config.reason, SkipReason::ParseError(_)));
    }

    #[tokio::test]
    async fn test_outcome_is_stable_across_calls() {
        let resolver = resolver(MemoryEnvironment::new(), MemoryFileSystem::new());
        let first = resolver.resolve(None).await;
        let second = resolver.resolve(None).await;
        assert_eq!(first.attempts(), second.attempts());
    }

    #[test]
    fn test_origins_order() {
        let resolver = resolver(MemoryEnvironment::new(), MemoryFileSystem::new());
        let origins = resolver.origins();
        assert_eq!(origins.len(), 9);
        assert_eq!(origins[0], Provenance::ExplicitParameter);
        assert_eq!(origins[8], Provenance::TokenFile("/work/.fondu/token".into()));
    }
}
