//! MCP stdio adapter for the knowledge search tool.
//!
//! Protocol concerns stay here; everything the tool does lives in
//! [`KnowledgeSearchTool`].

use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    transport::stdio,
};

use crate::tools::{GatherKnowledgeInput, KnowledgeSearchTool};
use crate::Error;

/// Name advertised during the MCP handshake.
pub const SERVER_NAME: &str = "knowledge_vault";

const INSTRUCTIONS: &str = "Knowledge vault search. Call gather_relevant_user_knowledge with a \
natural language query, and optional keywords to weight exact terms, to retrieve notes and \
documents from the user's personal knowledge vault. If no API token is configured for the \
server, pass one in the auth_token argument.";

/// MCP server exposing `gather_relevant_user_knowledge`.
#[derive(Debug, Clone)]
pub struct VaultMcpServer {
    tool: KnowledgeSearchTool,
    tool_router: ToolRouter<Self>,
}

impl VaultMcpServer {
    pub fn new(tool: KnowledgeSearchTool) -> Self {
        Self {
            tool,
            tool_router: Self::tool_router(),
        }
    }

    /// Serve over stdin/stdout until the client disconnects.
    pub async fn serve_stdio(self) -> crate::Result<()> {
        tracing::info!(server = SERVER_NAME, "Starting MCP server on stdio");
        let running = self
            .serve(stdio())
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        let reason = running
            .waiting()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        tracing::info!(reason = ?reason, "MCP server stopped");
        Ok(())
    }
}

#[tool_router]
impl VaultMcpServer {
    /// Search the user's knowledge vault.
    #[tool(
        description = "Search your knowledge vault using hybrid semantic and keyword matching. \
                       Candidates from semantic similarity and keyword relevance are reranked, \
                       and the most relevant results are returned in rank order."
    )]
    async fn gather_relevant_user_knowledge(
        &self,
        Parameters(input): Parameters<GatherKnowledgeInput>,
    ) -> String {
        self.tool.gather_relevant_user_knowledge(input).await
    }
}

#[tool_handler]
impl ServerHandler for VaultMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }
}
