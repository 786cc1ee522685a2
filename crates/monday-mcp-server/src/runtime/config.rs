use std::time::Duration;

use monday_api::DEFAULT_API_VERSION;
use monday_mcp_server::server::Transport;
use schemars::JsonSchema;
use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

use super::logging::Logging;

/// Configuration for the MCP server
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Access to the monday.com API
    pub api: ApiConfig,

    /// Hide tools that change the account and refuse mutations in `all_monday_api`
    pub read_only: bool,

    /// Which tools to expose
    pub tools: ToolsConfig,

    /// The type of server transport to use
    pub transport: Transport,

    /// Logging configuration
    pub logging: Logging,
}

/// Options for the monday.com API client
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ApiConfig {
    /// The API token. Also read from MONDAY_TOKEN or MONDAY_API_TOKEN.
    #[schemars(with = "Option<String>")]
    pub token: Option<SecretString>,

    /// The API version requested by default
    pub version: String,

    /// The GraphQL endpoint [default: https://api.monday.com/v2]
    #[schemars(with = "Option<String>")]
    pub endpoint: Option<Url>,

    /// The timeout of each API request, such as `30s` or `1m`
    #[serde(with = "humantime_serde")]
    #[schemars(with = "String")]
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            token: None,
            version: DEFAULT_API_VERSION.to_string(),
            endpoint: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Tool filters, applied after read-only mode
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ToolsConfig {
    /// Only expose these tools. Every tool is exposed when empty.
    pub include: Vec<String>,

    /// Never expose these tools
    pub exclude: Vec<String>,
}
