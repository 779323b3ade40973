//! Tiffin MCP Server
//!
//! Run with: tiffin-server [--mode stdio|http]

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tiffin::error::Result;
use tiffin::mcp::{Dispatcher, HttpServer, McpServer};
use tiffin::prompts::register_builtin_prompts;
use tiffin::resources::register_builtin_resources;
use tiffin::tools::data::WeatherTable;
use tiffin::tools::register_builtin_tools;
use tiffin::{PromptRegistry, ResourceRegistry, ToolRegistry};

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum Mode {
    /// Line-delimited JSON over stdin/stdout
    Stdio,
    /// JSON-RPC over POST /mcp
    Http,
}

#[derive(Parser, Debug)]
#[command(name = "tiffin-server")]
#[command(about = "Tiffin MCP server: weather and food tools over JSON-RPC")]
#[command(version)]
struct Args {
    /// Transport to serve on
    #[arg(long, env = "TIFFIN_MODE", value_enum, default_value = "stdio")]
    mode: Mode,

    /// Bind address for the HTTP transport
    #[arg(long, env = "TIFFIN_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Bind port for the HTTP transport
    #[arg(long, env = "TIFFIN_PORT", default_value = "8000")]
    port: u16,

    /// Per-call tool execution budget in seconds
    #[arg(long, env = "TIFFIN_TOOL_TIMEOUT_SECS", default_value = "30")]
    tool_timeout_secs: u64,
}

fn build_dispatcher(tool_timeout: Duration) -> Result<Dispatcher> {
    let table = Arc::new(WeatherTable::demo());

    let mut tools = ToolRegistry::new();
    register_builtin_tools(&mut tools, table.clone())?;

    let mut prompts = PromptRegistry::new();
    register_builtin_prompts(&mut prompts)?;

    let mut resources = ResourceRegistry::new();
    register_builtin_resources(&mut resources, &table)?;

    Ok(Dispatcher::new(tools, prompts, resources).with_tool_timeout(tool_timeout))
}

fn main() -> Result<()> {
    // Initialize logging to stderr (stdout is for MCP protocol)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let dispatcher = build_dispatcher(Duration::from_secs(args.tool_timeout_secs))?;

    match args.mode {
        Mode::Stdio => {
            tracing::info!("stdio transport ready");
            let server = McpServer::new(dispatcher);
            server.run()
        }
        Mode::Http => {
            let addr = format!("{}:{}", args.host, args.port);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(HttpServer::new(Arc::new(dispatcher), addr).start())
        }
    }
}
