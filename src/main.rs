//! fondu-vault-mcp: knowledge vault search over MCP stdio.
//!
//! Commands: serve (default), search, auth

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fondu_vault_mcp::mcp::VaultMcpServer;
use fondu_vault_mcp::{GatherKnowledgeInput, KnowledgeSearchTool, ResolutionOutcome};

#[derive(Parser)]
#[command(name = "fondu-vault-mcp")]
#[command(version)]
#[command(about = "Search your personal knowledge vault from MCP clients")]
struct Cli {
    /// API base URL (overrides FONDU_API_BASE_URL and config files)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run the MCP server on stdin/stdout
    Serve,
    /// Run one search and print the result
    #[command(alias = "s")]
    Search {
        /// Natural language query
        query: String,
        /// Terms to prioritize in keyword matching
        #[arg(long)]
        keywords: Option<String>,
        /// Number of results to return
        #[arg(long, allow_negative_numbers = true)]
        top_k: Option<i64>,
        /// API token for this call
        #[arg(long)]
        auth_token: Option<String>,
    },
    /// Show where the API token would be taken from
    Auth {
        /// Token to test precedence with
        #[arg(long)]
        auth_token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // stdout carries the MCP protocol; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "fondu-vault-mcp failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> fondu_vault_mcp::Result<ExitCode> {
    let tool = KnowledgeSearchTool::from_system(cli.base_url.as_deref()).await?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            VaultMcpServer::new(tool).serve_stdio().await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Search {
            query,
            keywords,
            top_k,
            auth_token,
        } => {
            let input = GatherKnowledgeInput {
                query,
                keywords,
                top_k,
                auth_token,
            };
            let text = tool.gather_relevant_user_knowledge(input).await;
            println!("{}", text);
            Ok(if text.starts_with("Error:") {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Commands::Auth { auth_token } => {
            match tool.resolver().resolve(auth_token.as_deref()).await {
                ResolutionOutcome::Resolved {
                    credential,
                    skipped,
                } => {
                    for attempt in &skipped {
                        println!("  skipped  {}", attempt);
                    }
                    println!("  using    {}", credential.provenance());
                    Ok(ExitCode::SUCCESS)
                }
                ResolutionOutcome::Unresolved { attempts } => {
                    for attempt in &attempts {
                        println!("  skipped  {}", attempt);
                    }
                    println!("no API token found");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}
