use std::path::PathBuf;

use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use monday_api::MondayClient;
use monday_mcp_server::errors::ServerError;
use monday_mcp_server::server::Server;
use runtime::Config;
use tracing::{info, warn};

mod runtime;

/// Clap styling
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// Arguments to the MCP server
#[derive(Debug, clap::Parser)]
#[command(
    version,
    styles = STYLES,
    about = "monday.com MCP Server - work with boards, items, docs and sprints from an AI agent",
)]
struct Args {
    /// Path to the config file
    config: Option<PathBuf>,

    /// Hide tools that change the account, whatever the config says
    #[arg(long)]
    read_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config: Config = match &args.config {
        Some(path) => runtime::read_config(path)?,
        None => runtime::read_config_from_env()?,
    };
    config.read_only |= args.read_only;

    let _guard = runtime::setup_logging(&config)?;

    info!(
        "monday.com MCP Server v{} // Licensed under MIT",
        std::env!("CARGO_PKG_VERSION")
    );
    if args.config.is_none() {
        info!("No config file given, reading configuration from the environment");
    }
    if config.read_only {
        warn!("Read-only mode: write tools are hidden and mutations are refused");
    }

    let token = config.api.token.ok_or(ServerError::MissingToken)?;
    let client = MondayClient::builder()
        .token(token)
        .maybe_endpoint(config.api.endpoint)
        .api_version(config.api.version)
        .timeout(config.api.timeout)
        .build()
        .map_err(ServerError::from)?;

    Ok(Server::builder()
        .client(client)
        .transport(config.transport)
        .read_only(config.read_only)
        .include(config.tools.include)
        .exclude(config.tools.exclude)
        .build()
        .start()
        .await?)
}
