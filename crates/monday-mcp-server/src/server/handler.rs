use std::sync::Arc;

use monday_api::MondayClient;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, ErrorCode, JsonObject, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use serde_json::Value;
use tracing::debug;

use crate::errors::McpError;
use crate::tools::MondayTool;

const INSTRUCTIONS: &str = "Tools for reading and changing monday.com boards, items, docs, sprints, users and workspaces. Ids are numeric strings taken from earlier tool results.";

/// Serves the enabled tools to a single MCP session
#[derive(Clone)]
pub struct MondayMcpServerHandler {
    client: Arc<MondayClient>,
    tools: Arc<Vec<Arc<dyn MondayTool>>>,
}

impl MondayMcpServerHandler {
    pub fn new(client: Arc<MondayClient>, tools: Vec<Arc<dyn MondayTool>>) -> Self {
        Self {
            client,
            tools: Arc::new(tools),
        }
    }

    pub fn tools(&self) -> Vec<Tool> {
        self.tools.iter().map(|tool| tool.tool()).collect()
    }

    /// Call an enabled tool by name
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        let tool = self
            .tools
            .iter()
            .find(|tool| tool.name() == name)
            .ok_or_else(|| tool_not_found(name))?;

        debug!(tool = name, "Calling tool");
        tool.call(&self.client, Value::Object(arguments.unwrap_or_default()))
            .await
    }
}

impl ServerHandler for MondayMcpServerHandler {
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.call(&request.name, request.arguments).await
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            next_cursor: None,
            tools: self.tools(),
        })
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }
}

fn tool_not_found(name: &str) -> McpError {
    McpError::new(
        ErrorCode::METHOD_NOT_FOUND,
        format!("Tool {name} not found"),
        None,
    )
}
