//! Board structure: reading a board's schema and adding groups or columns to it

use async_trait::async_trait;
use monday_api::documents::boards::{CREATE_COLUMN, CREATE_GROUP, GET_BOARD_INFO};
use monday_api::types::{Column, Group, NamedRef};
use monday_api::{MondayClient, Request};
use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{MondayTool, ToolAccess, convert_arguments, encode_json_object, json_result, text_result};
use crate::constants::prefix::BOARD_NOT_FOUND;
use crate::errors::{ApiResultExt, McpError};
use crate::schema_from_type;

pub const GET_BOARD_INFO_TOOL_NAME: &str = "get_board_info";
pub const CREATE_GROUP_TOOL_NAME: &str = "create_group";
pub const CREATE_COLUMN_TOOL_NAME: &str = "create_column";

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoardInfoInput {
    /// The id of the board
    pub board_id: u64,
}

#[derive(Debug, Deserialize, Serialize)]
struct BoardInfo {
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    board_kind: Option<String>,
    #[serde(default)]
    items_count: Option<u64>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    workspace: Option<NamedRef>,
    #[serde(default)]
    owners: Vec<NamedRef>,
    #[serde(default)]
    columns: Vec<Column>,
    #[serde(default)]
    groups: Vec<Group>,
}

#[derive(Debug, Deserialize)]
struct Boards {
    #[serde(default)]
    boards: Vec<BoardInfo>,
}

pub struct GetBoardInfo;

#[async_trait]
impl MondayTool for GetBoardInfo {
    fn name(&self) -> &'static str {
        GET_BOARD_INFO_TOOL_NAME
    }

    fn tool(&self) -> Tool {
        Tool::new(
            GET_BOARD_INFO_TOOL_NAME,
            "Get a board's metadata together with its columns (ids, titles, types and settings) and groups. Use this before filtering, aggregating or writing column values.",
            schema_from_type!(BoardInfoInput),
        )
    }

    fn access(&self) -> ToolAccess {
        ToolAccess::Read
    }

    async fn call(
        &self,
        client: &MondayClient,
        arguments: Value,
    ) -> Result<CallToolResult, McpError> {
        let input: BoardInfoInput = convert_arguments(arguments)?;
        let data: Boards = client
            .request(
                Request::from(&GET_BOARD_INFO)
                    .variables(json!({ "boardId": input.board_id.to_string() })),
            )
            .await
            .context("Failed to get board info")?;

        match data.boards.into_iter().next() {
            Some(board) => json_result(&board),
            None => Ok(text_result(format!(
                "{BOARD_NOT_FOUND} Board with id {} was not found",
                input.board_id
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PositionRelativeMethod {
    BeforeAt,
    AfterAt,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupInput {
    /// The board to add the group to
    pub board_id: u64,

    pub group_name: String,

    /// A color name or hex code, e.g. "#ff642e"
    #[serde(default)]
    pub group_color: Option<String>,

    /// The id of the group to position the new group next to
    #[serde(default)]
    pub relative_to: Option<String>,

    /// Whether to place the new group before or after `relativeTo`
    #[serde(default)]
    pub position_relative_method: Option<PositionRelativeMethod>,
}

#[derive(Debug, Deserialize)]
struct CreatedGroup {
    create_group: Option<Group>,
}

pub struct CreateGroup;

#[async_trait]
impl MondayTool for CreateGroup {
    fn name(&self) -> &'static str {
        CREATE_GROUP_TOOL_NAME
    }

    fn tool(&self) -> Tool {
        Tool::new(
            CREATE_GROUP_TOOL_NAME,
            "Create a new group on a board, optionally positioned before or after an existing group.",
            schema_from_type!(CreateGroupInput),
        )
    }

    fn access(&self) -> ToolAccess {
        ToolAccess::Write
    }

    async fn call(
        &self,
        client: &MondayClient,
        arguments: Value,
    ) -> Result<CallToolResult, McpError> {
        let input: CreateGroupInput = convert_arguments(arguments)?;
        let data: CreatedGroup = client
            .request(Request::from(&CREATE_GROUP).variables(json!({
                "boardId": input.board_id.to_string(),
                "groupName": input.group_name,
                "groupColor": input.group_color,
                "relativeTo": input.relative_to,
                "positionRelativeMethod": input.position_relative_method,
            })))
            .await
            .context("Failed to create group")?;

        Ok(text_result(match data.create_group {
            Some(group) => format!(
                "Group \"{}\" (id: {}) successfully created on board {}",
                group.title, group.id, input.board_id
            ),
            None => format!("Group \"{}\" was not created", input.group_name),
        }))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateColumnInput {
    /// The board to add the column to
    pub board_id: u64,

    /// The column type, e.g. "text", "status", "date", "numbers", "people" or "dropdown"
    pub column_type: String,

    pub column_title: String,

    #[serde(default)]
    pub column_description: Option<String>,

    /// Column settings as a JSON object or JSON string, e.g. the labels of a status column
    #[serde(default)]
    pub column_settings: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct CreatedColumn {
    create_column: Option<Column>,
}

pub struct CreateColumn;

#[async_trait]
impl MondayTool for CreateColumn {
    fn name(&self) -> &'static str {
        CREATE_COLUMN_TOOL_NAME
    }

    fn tool(&self) -> Tool {
        Tool::new(
            CREATE_COLUMN_TOOL_NAME,
            "Create a new column on a board.",
            schema_from_type!(CreateColumnInput),
        )
    }

    fn access(&self) -> ToolAccess {
        ToolAccess::Write
    }

    async fn call(
        &self,
        client: &MondayClient,
        arguments: Value,
    ) -> Result<CallToolResult, McpError> {
        let input: CreateColumnInput = convert_arguments(arguments)?;
        let settings = input
            .column_settings
            .map(|settings| encode_json_object(settings, "columnSettings"))
            .transpose()?;

        let data: CreatedColumn = client
            .request(Request::from(&CREATE_COLUMN).variables(json!({
                "boardId": input.board_id.to_string(),
                "columnType": input.column_type,
                "columnTitle": input.column_title,
                "columnDescription": input.column_description,
                "columnSettings": settings,
            })))
            .await
            .context("Failed to create column")?;

        Ok(text_result(match data.create_column {
            Some(column) => format!(
                "Column \"{}\" (id: {}, type: {}) successfully created on board {}",
                column.title, column.id, column.column_type, input.board_id
            ),
            None => format!("Column \"{}\" was not created", input.column_title),
        }))
    }
}
