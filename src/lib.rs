//! # fondu-vault-mcp
//!
//! MCP server exposing `gather_relevant_user_knowledge`, a search over a
//! personal knowledge vault hosted by the Fondu API.
//!
//! The interesting part is credential resolution: an API token is looked up
//! from the call itself, the environment, config files and token files, in
//! that order, and every miss is recorded so failures can say exactly where
//! the tool looked.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fondu_vault_mcp::{GatherKnowledgeInput, KnowledgeSearchTool};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), fondu_vault_mcp::Error> {
//!     let tool = KnowledgeSearchTool::from_system(None).await?;
//!     let text = tool
//!         .gather_relevant_user_knowledge(GatherKnowledgeInput::new("quantum computing"))
//!         .await;
//!     println!("{}", text);
//!     Ok(())
//! }
//! ```
//!
//! ## Custom Resolution
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fondu_vault_mcp::auth::{CredentialPaths, CredentialResolver};
//! use fondu_vault_mcp::config::{LocalFileSystem, SystemEnvironment};
//!
//! # async fn example() {
//! let env = Arc::new(SystemEnvironment);
//! let paths = CredentialPaths::discover(env.as_ref());
//! let resolver = CredentialResolver::standard(env, Arc::new(LocalFileSystem), &paths);
//!
//! let outcome = resolver.resolve(None).await;
//! for attempt in outcome.attempts() {
//!     println!("skipped {}", attempt);
//! }
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod auth;
pub mod client;
pub mod config;
pub mod format;
#[cfg(feature = "mcp")]
#[cfg_attr(docsrs, doc(cfg(feature = "mcp")))]
pub mod mcp;
pub mod tools;

pub use auth::{
    Credential, CredentialPaths, CredentialResolver, CredentialSource, Provenance,
    ResolutionOutcome, SkipReason, SourceAttempt,
};
pub use client::{KnowledgeClient, SearchError, SearchHit, SearchQuery, SearchResult};
pub use config::{ConfigError, ConfigFileLoader, Settings};
pub use format::{NO_RESULTS_MESSAGE, format_results};
pub use tools::{GatherKnowledgeInput, KnowledgeSearchTool, SchemaTool, ToolEndpoint};

#[cfg(feature = "mcp")]
pub use mcp::VaultMcpServer;

/// Error type for fondu-vault-mcp operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A config file could not be read or parsed.
    #[error(transparent)]
    ConfigFile(#[from] ConfigError),

    /// The search service call failed.
    #[error("Search failed: {0}")]
    Search(#[from] SearchError),

    /// Request parameters are invalid.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// HTTP client could not be constructed.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// File system operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or deserialization failed.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The MCP transport failed to start or stopped with an error.
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Error category for unified error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Credential refused by the service (401, 403)
    Authorization,
    /// Configuration, parsing, or request errors
    Configuration,
    /// Network or upstream errors that may succeed on retry
    Transient,
    /// Internal errors (IO, JSON, transport)
    Internal,
}

impl Error {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Search(SearchError::AuthRejected { .. }) => ErrorCategory::Authorization,

            Error::Config(_) | Error::ConfigFile(_) | Error::InvalidRequest(_) => {
                ErrorCategory::Configuration
            }
            Error::Search(SearchError::BadRequest { .. }) => ErrorCategory::Configuration,

            Error::Search(e) if e.is_retryable() => ErrorCategory::Transient,

            Error::Search(_)
            | Error::Network(_)
            | Error::Io(_)
            | Error::Json(_)
            | Error::Transport(_) => ErrorCategory::Internal,
        }
    }

    pub fn is_authorization_error(&self) -> bool {
        self.category() == ErrorCategory::Authorization
    }

    pub fn is_retryable(&self) -> bool {
        self.category() == ErrorCategory::Transient
    }
}

pub type Result<T> = std::result::Result<T, Error>;
