//! The MCP tools exposed to agents
//!
//! Each tool owns its input type (which doubles as its JSON Schema), the GraphQL calls it
//! makes and the shaping of the response. Expected failures such as a missing board are
//! returned as prefixed text so the agent can read them; transport and API failures are
//! returned as MCP errors.

pub mod board_insights;
pub mod board_items_page;
pub mod boards;
pub mod docs;
pub mod execute;
pub mod filters;
pub mod items;
pub mod search;
pub mod sprints;
pub mod users;
pub mod workspaces;

use std::sync::Arc;

use async_trait::async_trait;
use monday_api::MondayClient;
use rmcp::model::{CallToolResult, Content, ErrorCode, Tool};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{McpError, ToolError};

/// Whether a tool only reads from the account or changes it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolAccess {
    Read,
    Write,
}

/// A tool that can be listed and called through MCP
#[async_trait]
pub trait MondayTool: Send + Sync {
    /// The name agents call the tool by
    fn name(&self) -> &'static str;

    /// The MCP description of the tool, including its input schema
    fn tool(&self) -> Tool;

    fn access(&self) -> ToolAccess;

    /// Run the tool with the raw arguments from the MCP request
    async fn call(&self, client: &MondayClient, arguments: Value)
    -> Result<CallToolResult, McpError>;
}

/// Every tool the server can expose
///
/// In read-only mode the generic GraphQL tool refuses mutations. Filtering out write tools
/// is left to the caller.
pub fn all_tools(read_only: bool) -> Vec<Arc<dyn MondayTool>> {
    vec![
        Arc::new(board_items_page::GetBoardItemsPage),
        Arc::new(board_insights::BoardInsights),
        Arc::new(boards::GetBoardInfo),
        Arc::new(boards::CreateGroup),
        Arc::new(boards::CreateColumn),
        Arc::new(items::CreateItem),
        Arc::new(items::CreateUpdate),
        Arc::new(items::ChangeItemColumnValues),
        Arc::new(items::DeleteItem),
        Arc::new(items::MoveItemToGroup),
        Arc::new(docs::CreateDoc),
        Arc::new(users::ListUsersAndTeams),
        Arc::new(workspaces::WorkspaceInfo),
        Arc::new(workspaces::ListWorkspaces),
        Arc::new(search::Search),
        Arc::new(sprints::GetSprintsBoards),
        Arc::new(sprints::GetSprintsMetadata),
        Arc::new(sprints::GetSprintSummary),
        Arc::new(execute::AllMondayApi::new(read_only)),
    ]
}

pub(crate) fn convert_arguments<T: DeserializeOwned>(arguments: Value) -> Result<T, McpError> {
    serde_json::from_value(arguments).map_err(|error| {
        McpError::new(
            ErrorCode::INVALID_PARAMS,
            format!("Invalid input: {error}"),
            None,
        )
    })
}

pub(crate) fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

pub(crate) fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value).map_err(ToolError::from)?;
    Ok(text_result(text))
}

/// Resolve a field that some clients can only send as a JSON-encoded string
///
/// The structured value wins when both are present.
pub(crate) fn decode_stringified<T: DeserializeOwned>(
    structured: Option<T>,
    stringified: Option<&str>,
    field: &'static str,
) -> Result<Option<T>, ToolError> {
    match (structured, stringified) {
        (Some(value), _) => Ok(Some(value)),
        (None, Some(raw)) => serde_json::from_str(raw)
            .map(Some)
            .map_err(|source| ToolError::InvalidJson { field, source }),
        (None, None) => Ok(None),
    }
}

/// Encode a JSON object argument the way the API's `JSON` scalar expects it
pub(crate) fn encode_json_object(value: Value, field: &'static str) -> Result<String, ToolError> {
    match value {
        Value::Object(_) => Ok(value.to_string()),
        Value::String(raw) => match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(_)) => Ok(raw),
            Ok(_) => Err(ToolError::NotAnObject { field }),
            Err(source) => Err(ToolError::InvalidJson { field, source }),
        },
        _ => Err(ToolError::NotAnObject { field }),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::ops::Deref;

    use monday_api::{MondayClient, SecretString};
    use rmcp::model::{CallToolResult, RawContent};
    use url::Url;

    pub(crate) fn client_for(server: &mockito::ServerGuard) -> MondayClient {
        MondayClient::builder()
            .token(SecretString::from("test-token"))
            .endpoint(Url::parse(&server.url()).unwrap())
            .build()
            .unwrap()
    }

    pub(crate) fn content_text(result: CallToolResult) -> String {
        result
            .content
            .into_iter()
            .filter_map(|c| match c.deref() {
                RawContent::Text(text) => Some(text.text.clone()),
                _ => None,
            })
            .collect::<Vec<String>>()
            .join("\n")
    }

    /// Match a request by its GraphQL operation name
    pub(crate) fn operation(name: &str) -> mockito::Matcher {
        mockito::Matcher::PartialJson(serde_json::json!({ "operationName": name }))
    }

    /// A `{ "data": ... }` response body
    pub(crate) fn data(data: serde_json::Value) -> String {
        serde_json::json!({ "data": data }).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn structured_value_wins_over_stringified() {
        let decoded = decode_stringified(Some(vec![1]), Some("[2]"), "numbers").unwrap();

        assert_eq!(decoded, Some(vec![1]));
    }

    #[test]
    fn stringified_value_is_decoded() {
        let decoded: Option<Vec<u32>> = decode_stringified(None, Some("[2, 3]"), "numbers").unwrap();

        assert_eq!(decoded, Some(vec![2, 3]));
    }

    #[test]
    fn broken_stringified_value_is_an_error() {
        let decoded: Result<Option<Vec<u32>>, _> = decode_stringified(None, Some("[2,"), "numbers");

        assert!(matches!(
            decoded,
            Err(ToolError::InvalidJson {
                field: "numbers",
                ..
            })
        ));
    }

    #[rstest]
    #[case(json!({ "status": { "label": "Done" } }), Some(r#"{"status":{"label":"Done"}}"#))]
    #[case(json!(r#"{"text":"hello"}"#), Some(r#"{"text":"hello"}"#))]
    #[case(json!("[1, 2]"), None)]
    #[case(json!(42), None)]
    fn json_objects_are_encoded(#[case] input: Value, #[case] expected: Option<&str>) {
        assert_eq!(
            encode_json_object(input, "columnValues").ok().as_deref(),
            expected
        );
    }

    #[test]
    fn tool_names_are_unique() {
        let tools = all_tools(false);
        let mut names: Vec<_> = tools.iter().map(|tool| tool.name()).collect();
        names.sort_unstable();
        names.dedup();

        assert_eq!(names.len(), tools.len());
        for tool in &tools {
            assert_eq!(tool.tool().name, tool.name());
        }
    }
}
