//! `gather_relevant_user_knowledge`: the knowledge vault search tool.

use std::sync::Arc;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::SchemaTool;
use crate::auth::{
    AUTH_TOKEN_ENV, AUTH_TOKEN_KEY, CredentialPaths, CredentialResolver, Provenance,
    ResolutionOutcome, SourceAttempt,
};
use crate::client::{KnowledgeClient, SearchError, SearchQuery, SearchResult};
use crate::config::{ConfigFileLoader, LocalFileSystem, Settings, SystemEnvironment};
use crate::format::format_results;
use crate::{Error, Result};

pub const TOOL_NAME: &str = "gather_relevant_user_knowledge";

pub const TOOL_DESCRIPTION: &str = "Search your knowledge vault using hybrid semantic and keyword matching. \
Candidates are generated from both semantic similarity and keyword relevance, then reranked; \
the most relevant results are returned in rank order.";

/// Arguments of `gather_relevant_user_knowledge`.
#[derive(Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct GatherKnowledgeInput {
    /// Natural language query for semantic search and reranking
    pub query: String,
    /// Specific terms to prioritize in keyword matching (optional)
    #[serde(default)]
    pub keywords: Option<String>,
    /// Number of results to return (default: 10)
    #[serde(default)]
    #[schemars(range(min = 1), extend("default" = 10))]
    pub top_k: Option<i64>,
    /// API token for this call; overrides environment and file configuration (optional)
    #[serde(default)]
    pub auth_token: Option<String>,
}

impl std::fmt::Debug for GatherKnowledgeInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatherKnowledgeInput")
            .field("query", &self.query)
            .field("keywords", &self.keywords)
            .field("top_k", &self.top_k)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

impl GatherKnowledgeInput {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }
}

/// Why a call did not produce results.
#[derive(Debug)]
enum Failure {
    InvalidRequest(String),
    Unresolved(Vec<SourceAttempt>),
    Search {
        error: SearchError,
        provenance: Provenance,
    },
}

/// Resolves a credential, runs the search and renders the outcome as text.
#[derive(Clone, Debug)]
pub struct KnowledgeSearchTool {
    resolver: Arc<CredentialResolver>,
    client: KnowledgeClient,
}

impl KnowledgeSearchTool {
    pub fn new(resolver: Arc<CredentialResolver>, client: KnowledgeClient) -> Self {
        Self { resolver, client }
    }

    /// Tool wired to the host: process environment, local files, standard
    /// credential paths. `base_url` overrides the configured API host.
    pub async fn from_system(base_url: Option<&str>) -> Result<Self> {
        let env = Arc::new(SystemEnvironment);
        let fs = Arc::new(LocalFileSystem);
        let paths = CredentialPaths::discover(env.as_ref());

        let settings = match base_url {
            Some(url) => Settings::with_base_url(url)?,
            None => {
                let loader = ConfigFileLoader::new(fs.clone());
                Settings::load(env.as_ref(), &loader, &paths.config_files).await?
            }
        };
        tracing::info!(base_url = %settings.base_url, "Knowledge vault API configured");

        let resolver = CredentialResolver::standard(env, fs, &paths);
        Ok(Self::new(Arc::new(resolver), KnowledgeClient::new(&settings)?))
    }

    pub fn resolver(&self) -> &CredentialResolver {
        &self.resolver
    }

    pub fn client(&self) -> &KnowledgeClient {
        &self.client
    }

    /// Run the tool. Always returns text; failures are rendered, not raised.
    pub async fn gather_relevant_user_knowledge(&self, input: GatherKnowledgeInput) -> String {
        match self.run(input).await {
            Ok(result) => format_results(&result),
            Err(failure) => self.render_failure(&failure),
        }
    }

    async fn run(&self, input: GatherKnowledgeInput) -> std::result::Result<SearchResult, Failure> {
        let query = SearchQuery::builder(input.query)
            .keywords(input.keywords)
            .top_k(input.top_k)
            .build()
            .map_err(|e| match e {
                Error::InvalidRequest(msg) => Failure::InvalidRequest(msg),
                other => Failure::InvalidRequest(other.to_string()),
            })?;

        let credential = match self.resolver.resolve(input.auth_token.as_deref()).await {
            ResolutionOutcome::Resolved { credential, .. } => credential,
            ResolutionOutcome::Unresolved { attempts } => {
                tracing::warn!(sources = attempts.len(), "No credential found");
                return Err(Failure::Unresolved(attempts));
            }
        };

        match self.client.search(&credential, &query).await {
            Ok(result) => {
                tracing::info!(results = result.len(), "Knowledge vault search completed");
                Ok(result)
            }
            Err(error) => Err(Failure::Search {
                error,
                provenance: credential.provenance().clone(),
            }),
        }
    }

    fn render_failure(&self, failure: &Failure) -> String {
        match failure {
            Failure::InvalidRequest(msg) => format!("Error: invalid request: {}", msg),
            Failure::Unresolved(attempts) => self.render_unresolved(attempts),
            Failure::Search { error, provenance } => render_search_error(error, provenance),
        }
    }

    fn render_unresolved(&self, attempts: &[SourceAttempt]) -> String {
        let mut out = String::from(
            "Error: no authentication token found for the knowledge vault.\n\nSources checked, in order:\n",
        );
        for (i, attempt) in attempts.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, attempt));
        }

        out.push_str("\nTo fix this, do one of the following:\n");
        out.push_str("  - pass the `auth_token` parameter with this call\n");
        out.push_str(&format!(
            "  - set the {} environment variable for the server process\n",
            AUTH_TOKEN_ENV
        ));

        let origins = self.resolver.origins();
        if let Some(path) = origins.iter().find_map(|o| match o {
            Provenance::ConfigFile(path) => Some(path),
            _ => None,
        }) {
            let (section, field) = AUTH_TOKEN_KEY.split_once('.').unwrap_or(("fondu", AUTH_TOKEN_KEY));
            out.push_str(&format!(
                "  - add `{}` under the `{}:` section of {}\n",
                field,
                section,
                path.display()
            ));
        }
        if let Some(path) = origins.iter().find_map(|o| match o {
            Provenance::TokenFile(path) => Some(path),
            _ => None,
        }) {
            out.push_str(&format!(
                "  - write the token on a single line to {}\n",
                path.display()
            ));
        }

        out.truncate(out.trim_end().len());
        out
    }
}

fn render_search_error(error: &SearchError, provenance: &Provenance) -> String {
    match error {
        SearchError::AuthRejected { status } => format!(
            "Error: authentication rejected by the knowledge vault API (HTTP {}).\n\
             A token was found ({}) and sent, but the service refused it. \
             Check that the token is valid and has not expired or been revoked.",
            status, provenance
        ),
        SearchError::BadRequest { status, message } => match message {
            Some(msg) => format!(
                "Error: the knowledge vault API rejected the request (HTTP {}): {}",
                status, msg
            ),
            None => format!(
                "Error: the knowledge vault API rejected the request (HTTP {}).",
                status
            ),
        },
        SearchError::UpstreamUnavailable { status } => format!(
            "Error: the knowledge vault API is unavailable (HTTP {}). Try again later.",
            status
        ),
        SearchError::Unreachable(detail) => {
            format!("Error: could not reach the knowledge vault API: {}", detail)
        }
        SearchError::InvalidResponse(detail) => format!(
            "Error: the knowledge vault API returned an invalid response: {}",
            detail
        ),
    }
}

#[async_trait]
impl SchemaTool for KnowledgeSearchTool {
    type Input = GatherKnowledgeInput;
    const NAME: &'static str = TOOL_NAME;
    const DESCRIPTION: &'static str = TOOL_DESCRIPTION;

    async fn handle(&self, input: Self::Input) -> String {
        self.gather_relevant_user_knowledge(input).await
    }
}
