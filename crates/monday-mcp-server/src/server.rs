//! The MCP server and its transports

mod handler;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use bon::bon;
use monday_api::MondayClient;
use rmcp::ServiceExt as _;
use rmcp::transport::stdio;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::StreamableHttpService;
use schemars::JsonSchema;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

pub use handler::MondayMcpServerHandler;

use crate::errors::ServerError;
use crate::tools::{MondayTool, ToolAccess, all_tools};

/// How the server talks to MCP clients
#[derive(Debug, Clone, Default, Deserialize, JsonSchema, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transport {
    /// Exchange messages over stdin and stdout
    #[default]
    Stdio,

    /// Serve the streamable HTTP transport at `/mcp`
    StreamableHttp {
        /// The IP address to bind to
        #[serde(default = "defaults::address")]
        address: IpAddr,

        /// The port to bind to
        #[serde(default = "defaults::port")]
        port: u16,
    },
}

mod defaults {
    use super::*;

    pub(super) const fn address() -> IpAddr {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    }

    pub(super) const fn port() -> u16 {
        5000
    }
}

/// A monday.com MCP server
pub struct Server {
    client: MondayClient,
    transport: Transport,
    read_only: bool,
    include: Vec<String>,
    exclude: Vec<String>,
}

#[bon]
impl Server {
    #[builder]
    pub fn new(
        client: MondayClient,
        #[builder(default)] transport: Transport,
        #[builder(default)] read_only: bool,
        #[builder(default)] include: Vec<String>,
        #[builder(default)] exclude: Vec<String>,
    ) -> Self {
        Self {
            client,
            transport,
            read_only,
            include,
            exclude,
        }
    }
}

impl Server {
    pub async fn start(self) -> Result<(), ServerError> {
        let tools = select_tools(
            all_tools(self.read_only),
            self.read_only,
            &self.include,
            &self.exclude,
        );
        info!(
            read_only = self.read_only,
            tools = ?tools.iter().map(|tool| tool.name()).collect::<Vec<_>>(),
            "Enabled tools"
        );
        let handler = MondayMcpServerHandler::new(Arc::new(self.client), tools);

        match self.transport {
            Transport::StreamableHttp { address, port } => {
                info!(port = ?port, address = ?address, "Starting MCP server in Streamable HTTP mode");
                let service = StreamableHttpService::new(
                    move || Ok(handler.clone()),
                    LocalSessionManager::default().into(),
                    Default::default(),
                );
                let router = axum::Router::new().nest_service("/mcp", service);
                let listener =
                    tokio::net::TcpListener::bind(SocketAddr::new(address, port)).await?;

                let cancellation_token = CancellationToken::new();
                tokio::spawn({
                    let cancellation_token = cancellation_token.clone();
                    async move {
                        shutdown_signal().await;
                        info!("Shutting down MCP server");
                        cancellation_token.cancel();
                    }
                });

                axum::serve(listener, router)
                    .with_graceful_shutdown(cancellation_token.cancelled_owned())
                    .await?;
            }
            Transport::Stdio => {
                info!("Starting MCP server in stdio mode");
                let service = handler
                    .serve(stdio())
                    .await
                    .inspect_err(|e| {
                        error!("serving error: {:?}", e);
                    })
                    .map_err(|e| ServerError::Transport(e.to_string()))?;
                service.waiting().await.map_err(ServerError::StartupError)?;
            }
        }

        Ok(())
    }
}

/// Apply read-only mode and the configured allow and deny lists
pub fn select_tools(
    tools: Vec<Arc<dyn MondayTool>>,
    read_only: bool,
    include: &[String],
    exclude: &[String],
) -> Vec<Arc<dyn MondayTool>> {
    for name in include.iter().chain(exclude) {
        if !tools.iter().any(|tool| tool.name() == name) {
            warn!(tool = %name, "Ignoring unknown tool in tool filter");
        }
    }

    tools
        .into_iter()
        .filter(|tool| !(read_only && tool.access() == ToolAccess::Write))
        .filter(|tool| include.is_empty() || include.iter().any(|name| name == tool.name()))
        .filter(|tool| !exclude.iter().any(|name| name == tool.name()))
        .collect()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            error!(%error, "Failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                error!(%error, "Failed to install SIGTERM signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
