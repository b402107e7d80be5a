//! Explicit credential source.

use async_trait::async_trait;

use crate::auth::source::non_blank;
use crate::auth::{Credential, CredentialSource, Provenance, SkipReason};

/// The token passed with the tool call, if any.
pub struct ExplicitSource {
    token: Option<String>,
}

impl ExplicitSource {
    pub fn new(token: Option<&str>) -> Self {
        Self {
            token: token.map(str::to_string),
        }
    }
}

#[async_trait]
impl CredentialSource for ExplicitSource {
    fn origin(&self) -> Provenance {
        Provenance::ExplicitParameter
    }

    async fn probe(&self) -> Result<Credential, SkipReason> {
        match self.token.as_deref() {
            Some(token) => non_blank(token, self.origin()),
            None => Err(SkipReason::NotSet),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[tokio::test]
    async fn test_explicit_token() {
        let cred = ExplicitSource::new(Some(" tok ")).probe().await.unwrap();
        assert_eq!(cred.token().expose_secret(), "tok");
        assert_eq!(cred.provenance(), &Provenance::ExplicitParameter);
    }

    #[tokio::test]
    async fn test_explicit_absent_or_blank() {
        assert_eq!(
            ExplicitSource::new(None).probe().await.unwrap_err(),
            SkipReason::NotSet
        );
        assert_eq!(
            ExplicitSource::new(Some("   ")).probe().await.unwrap_err(),
            SkipReason::EmptyAfterTrim
        );
    }
}
