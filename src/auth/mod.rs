//! Credential resolution for the knowledge vault API.
//!
//! Sources are consulted in a fixed order, stopping at the first that yields
//! a non-blank token:
//! - **Explicit**: the `auth_token` tool parameter
//! - **Environment**: `FONDU_AUTH_TOKEN`, then `FONDU_API_TOKEN`
//! - **Config files**: `fondu.auth_token` in user, XDG and project config
//! - **Token files**: bare `token` files in the same directories

mod credential;
mod paths;
mod resolver;
mod source;
mod sources;

pub use credential::{Credential, Provenance};
pub use paths::CredentialPaths;
pub use resolver::{
    AUTH_TOKEN_ENV, AUTH_TOKEN_ENV_ALIAS, AUTH_TOKEN_KEY, CredentialResolver, ResolutionOutcome,
};
pub use source::{CredentialSource, SkipReason, SourceAttempt};
pub use sources::{ConfigFileSource, EnvironmentSource, ExplicitSource, TokenFileSource};
