use rmcp::model::ErrorCode;
use tokio::task::JoinError;

/// An error in server initialization
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Could not create the monday.com API client: {0}")]
    Client(#[from] monday_api::Error),

    #[error("No API token was supplied. Set MONDAY_TOKEN or api.token in the config file")]
    MissingToken,

    #[error("Could not bind listener: {0}")]
    Io(#[from] std::io::Error),

    #[error("MCP transport failed: {0}")]
    Transport(String),

    #[error("Failed to start server")]
    StartupError(#[from] JoinError),
}

/// A failure while running a tool that the agent cannot recover from by reading the output
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("{context}: {source}")]
    Api {
        context: String,
        #[source]
        source: monday_api::Error,
    },

    #[error("Invalid JSON in '{field}': {source}")]
    InvalidJson {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("'{field}' must be a JSON object")]
    NotAnObject { field: &'static str },

    #[error("Failed to serialize tool output: {0}")]
    Output(#[from] serde_json::Error),
}

impl ToolError {
    pub fn api(context: impl Into<String>, source: monday_api::Error) -> Self {
        ToolError::Api {
            context: context.into(),
            source,
        }
    }
}

impl From<ToolError> for McpError {
    fn from(error: ToolError) -> Self {
        let code = match error {
            ToolError::InvalidJson { .. } | ToolError::NotAnObject { .. } => {
                ErrorCode::INVALID_PARAMS
            }
            ToolError::Api { .. } | ToolError::Output(_) => ErrorCode::INTERNAL_ERROR,
        };
        McpError::new(code, error.to_string(), None)
    }
}

/// Attach context to a failed API call
pub(crate) trait ApiResultExt<T> {
    fn context(self, context: &str) -> Result<T, ToolError>;
}

impl<T> ApiResultExt<T> for Result<T, monday_api::Error> {
    fn context(self, context: &str) -> Result<T, ToolError> {
        self.map_err(|source| ToolError::api(context, source))
    }
}

/// An MCP tool error
pub type McpError = rmcp::model::ErrorData;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_keep_joined_graphql_messages() {
        let error: Result<(), _> = Err(monday_api::Error::GraphQL {
            messages: vec!["Invalid board".to_string(), "Group not found".to_string()],
        });

        let error = error.context("Failed to create item").unwrap_err();

        assert_eq!(
            error.to_string(),
            "Failed to create item: Invalid board, Group not found"
        );
        let mcp_error = McpError::from(error);
        assert_eq!(mcp_error.code, ErrorCode::INTERNAL_ERROR);
    }

    #[test]
    fn invalid_json_is_invalid_params() {
        let source = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        let error = McpError::from(ToolError::InvalidJson {
            field: "filtersStringified",
            source,
        });

        assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
        assert!(error.message.starts_with("Invalid JSON in 'filtersStringified'"));
    }
}
