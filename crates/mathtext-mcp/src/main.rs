//! mathtext MCP server: entry point.

use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use mathtext_mcp::config;
use mathtext_mcp::protocol::ProtocolHandler;
use mathtext_mcp::tools::default_registry;
use mathtext_mcp::transport::StdioTransport;
use mathtext_mcp::types::Implementation;

#[derive(Parser)]
#[command(
    name = "mathtext-mcp",
    about = "MCP server for mathtext: arithmetic and text tools over JSON-RPC",
    version
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the JSON-RPC endpoint and the health service over HTTP (default).
    #[cfg(feature = "http")]
    ServeHttp {
        /// JSON-RPC listen address (host:port).
        /// Also reads from MCP_SERVER_ENDPOINT env var.
        #[arg(long)]
        addr: Option<String>,

        /// Health service listen address (host:port).
        /// Also reads from MCP_HEALTH_ENDPOINT env var.
        #[arg(long)]
        health_addr: Option<String>,

        /// Allow cross-origin requests on both listeners.
        #[arg(long)]
        cors: bool,
    },

    /// Start the MCP server over stdio.
    Serve,

    /// Print server identity and tools as JSON.
    Info,

    /// Print the OpenAPI document for the JSON-RPC endpoint.
    Openapi {
        /// JSON-RPC address advertised in the document.
        #[arg(long)]
        addr: Option<String>,
    },

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   mathtext-mcp completions bash > ~/.local/share/bash-completion/completions/mathtext-mcp
    ///   mathtext-mcp completions zsh > ~/.zfunc/_mathtext-mcp
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },

    /// Launch interactive REPL mode.
    Repl,
}

#[cfg(feature = "http")]
fn default_command() -> Commands {
    Commands::ServeHttp {
        addr: None,
        health_addr: None,
        cors: false,
    }
}

#[cfg(not(feature = "http"))]
fn default_command() -> Commands {
    Commands::Serve
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let registry = Arc::new(default_registry()?);

    match cli.command.unwrap_or_else(default_command) {
        #[cfg(feature = "http")]
        Commands::ServeHttp {
            addr,
            health_addr,
            cors,
        } => {
            use mathtext_mcp::transport::{HealthService, HttpTransport};

            let rpc_addr = config::resolve_rpc_addr(addr.as_deref());
            let health_addr = config::resolve_health_addr(health_addr.as_deref());

            tracing::info!("mathtext MCP server v{}", env!("CARGO_PKG_VERSION"));
            for tool in registry.list_tools() {
                tracing::info!("  - {}: {}", tool.name(), tool.description());
            }
            if cors {
                tracing::info!("CORS: permissive");
            }

            let rpc = HttpTransport::new(ProtocolHandler::new(registry.clone())).with_cors(cors);
            let health =
                HealthService::new(&registry, &config::public_url(&rpc_addr)).with_cors(cors);

            tokio::try_join!(rpc.run(&rpc_addr), health.run(&health_addr))?;
        }

        Commands::Serve => {
            let transport = StdioTransport::new(ProtocolHandler::new(registry));
            transport.run().await?;
        }

        Commands::Info => {
            let info = serde_json::json!({
                "server": Implementation::current(),
                "tools": registry.list_tools().iter().map(|t| t.name()).collect::<Vec<_>>(),
                "tool_count": registry.len(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Openapi { addr } => {
            let rpc_addr = config::resolve_rpc_addr(addr.as_deref());
            let document = mathtext_mcp::openapi::document(&registry, &config::public_url(&rpc_addr));
            println!("{}", serde_json::to_string_pretty(&document)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "mathtext-mcp", &mut std::io::stdout());
        }

        Commands::Repl => {
            mathtext_mcp::repl::run(ProtocolHandler::new(registry))?;
        }
    }

    Ok(())
}
