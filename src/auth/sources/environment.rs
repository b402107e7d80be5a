//! Environment variable credential source.

use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::source::non_blank;
use crate::auth::{Credential, CredentialSource, Provenance, SkipReason};
use crate::config::Environment;

/// Reads the token from one environment variable.
pub struct EnvironmentSource {
    var: String,
    env: Arc<dyn Environment>,
}

impl EnvironmentSource {
    pub fn new(var: impl Into<String>, env: Arc<dyn Environment>) -> Self {
        Self {
            var: var.into(),
            env,
        }
    }
}

#[async_trait]
impl CredentialSource for EnvironmentSource {
    fn origin(&self) -> Provenance {
        Provenance::EnvironmentVariable(self.var.clone())
    }

    async fn probe(&self) -> Result<Credential, SkipReason> {
        match self.env.var(&self.var) {
            Some(value) => non_blank(&value, self.origin()),
            None => Err(SkipReason::NotSet),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryEnvironment;
    use secrecy::ExposeSecret;

    #[tokio::test]
    async fn test_environment_source_set() {
        let env = Arc::new(MemoryEnvironment::new().with_var("FONDU_AUTH_TOKEN", "env-token\n"));
        let cred = EnvironmentSource::new("FONDU_AUTH_TOKEN", env)
            .probe()
            .await
            .unwrap();
        assert_eq!(cred.token().expose_secret(), "env-token");
        assert_eq!(
            cred.provenance(),
            &Provenance::EnvironmentVariable("FONDU_AUTH_TOKEN".into())
        );
    }

    #[tokio::test]
    async fn test_environment_source_missing_and_blank() {
        let env = Arc::new(MemoryEnvironment::new().with_var("BLANK", "  "));
        assert_eq!(
            EnvironmentSource::new("UNSET", env.clone())
                .probe()
                .await
                .unwrap_err(),
            SkipReason::NotSet
        );
        assert_eq!(
            EnvironmentSource::new("BLANK", env).probe().await.unwrap_err(),
            SkipReason::EmptyAfterTrim
        );
    }
}
