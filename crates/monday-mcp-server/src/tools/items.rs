//! Item mutations

use async_trait::async_trait;
use monday_api::documents::items::{
    CHANGE_ITEM_COLUMN_VALUES, CREATE_ITEM, CREATE_SUBITEM, CREATE_UPDATE, DELETE_ITEM,
    MOVE_ITEM_TO_GROUP,
};
use monday_api::{MondayClient, Request};
use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{MondayTool, ToolAccess, convert_arguments, encode_json_object, text_result};
use crate::errors::{ApiResultExt, McpError};
use crate::schema_from_type;

pub const CREATE_ITEM_TOOL_NAME: &str = "create_item";
pub const CREATE_UPDATE_TOOL_NAME: &str = "create_update";
pub const CHANGE_ITEM_COLUMN_VALUES_TOOL_NAME: &str = "change_item_column_values";
pub const DELETE_ITEM_TOOL_NAME: &str = "delete_item";
pub const MOVE_ITEM_TO_GROUP_TOOL_NAME: &str = "move_item_to_group";

const COLUMN_VALUES_DESCRIPTION: &str = "Column values are a JSON object keyed by column id, e.g. {\"status\": {\"label\": \"Done\"}, \"date\": {\"date\": \"2025-01-31\"}, \"text\": \"hello\"}.";

#[derive(Debug, Deserialize)]
struct CreatedEntity {
    id: String,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemInput {
    /// The board to create the item on
    pub board_id: u64,

    /// The name of the new item
    pub name: String,

    /// The group to create the item in. Defaults to the board's top group.
    #[serde(default)]
    pub group_id: Option<String>,

    /// Initial column values, as a JSON object or JSON string keyed by column id
    #[serde(default)]
    pub column_values: Option<Value>,

    /// Create a sub-item of this item instead of a top-level item
    #[serde(default)]
    pub parent_item_id: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct CreatedItem {
    #[serde(alias = "create_subitem")]
    create_item: Option<CreatedEntity>,
}

pub struct CreateItem;

#[async_trait]
impl MondayTool for CreateItem {
    fn name(&self) -> &'static str {
        CREATE_ITEM_TOOL_NAME
    }

    fn tool(&self) -> Tool {
        Tool::new(
            CREATE_ITEM_TOOL_NAME,
            format!(
                "Create a new item on a board, or a sub-item when parentItemId is given. {COLUMN_VALUES_DESCRIPTION}"
            ),
            schema_from_type!(CreateItemInput),
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
        let input: CreateItemInput = convert_arguments(arguments)?;
        let column_values = input
            .column_values
            .map(|values| encode_json_object(values, "columnValues"))
            .transpose()?;

        let request = match input.parent_item_id {
            Some(parent_item_id) => Request::from(&CREATE_SUBITEM).variables(json!({
                "parentItemId": parent_item_id.to_string(),
                "itemName": input.name,
                "columnValues": column_values,
            })),
            None => Request::from(&CREATE_ITEM).variables(json!({
                "boardId": input.board_id.to_string(),
                "itemName": input.name,
                "groupId": input.group_id,
                "columnValues": column_values,
            })),
        };
        let data: CreatedItem = client
            .request(request)
            .await
            .context("Failed to create item")?;

        Ok(text_result(match data.create_item {
            Some(CreatedEntity { id, url: Some(url) }) => format!(
                "Item \"{}\" (id: {id}) successfully created. URL: {url}",
                input.name
            ),
            Some(CreatedEntity { id, url: None }) => {
                format!("Item \"{}\" (id: {id}) successfully created", input.name)
            }
            None => format!("Item \"{}\" was not created", input.name),
        }))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUpdateInput {
    /// The item to post the update on
    pub item_id: u64,

    /// The update text. HTML is supported.
    pub body: String,
}

#[derive(Debug, Deserialize)]
struct CreatedUpdate {
    create_update: Option<CreatedEntity>,
}

pub struct CreateUpdate;

#[async_trait]
impl MondayTool for CreateUpdate {
    fn name(&self) -> &'static str {
        CREATE_UPDATE_TOOL_NAME
    }

    fn tool(&self) -> Tool {
        Tool::new(
            CREATE_UPDATE_TOOL_NAME,
            "Post an update (comment) on an item.",
            schema_from_type!(CreateUpdateInput),
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
        let input: CreateUpdateInput = convert_arguments(arguments)?;
        let data: CreatedUpdate = client
            .request(Request::from(&CREATE_UPDATE).variables(json!({
                "itemId": input.item_id.to_string(),
                "body": input.body,
            })))
            .await
            .context("Failed to create update")?;

        Ok(text_result(match data.create_update {
            Some(update) => format!(
                "Update (id: {}) successfully posted on item {}",
                update.id, input.item_id
            ),
            None => format!("No update was posted on item {}", input.item_id),
        }))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeItemColumnValuesInput {
    /// The board the item belongs to
    pub board_id: u64,

    pub item_id: u64,

    /// The new column values, as a JSON object or JSON string keyed by column id
    pub column_values: Value,
}

#[derive(Debug, Deserialize)]
struct ChangedItem {
    change_multiple_column_values: Option<CreatedEntity>,
}

pub struct ChangeItemColumnValues;

#[async_trait]
impl MondayTool for ChangeItemColumnValues {
    fn name(&self) -> &'static str {
        CHANGE_ITEM_COLUMN_VALUES_TOOL_NAME
    }

    fn tool(&self) -> Tool {
        Tool::new(
            CHANGE_ITEM_COLUMN_VALUES_TOOL_NAME,
            format!("Change the column values of an item. {COLUMN_VALUES_DESCRIPTION}"),
            schema_from_type!(ChangeItemColumnValuesInput),
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
        let input: ChangeItemColumnValuesInput = convert_arguments(arguments)?;
        let column_values = encode_json_object(input.column_values, "columnValues")?;

        let data: ChangedItem = client
            .request(Request::from(&CHANGE_ITEM_COLUMN_VALUES).variables(json!({
                "boardId": input.board_id.to_string(),
                "itemId": input.item_id.to_string(),
                "columnValues": column_values,
            })))
            .await
            .context("Failed to change item column values")?;

        let id = data
            .change_multiple_column_values
            .map_or_else(|| input.item_id.to_string(), |item| item.id);
        Ok(text_result(format!(
            "Item {id} successfully updated with the new column values"
        )))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteItemInput {
    pub item_id: u64,
}

pub struct DeleteItem;

#[async_trait]
impl MondayTool for DeleteItem {
    fn name(&self) -> &'static str {
        DELETE_ITEM_TOOL_NAME
    }

    fn tool(&self) -> Tool {
        Tool::new(
            DELETE_ITEM_TOOL_NAME,
            "Delete an item. This cannot be undone from this server.",
            schema_from_type!(DeleteItemInput),
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
        let input: DeleteItemInput = convert_arguments(arguments)?;
        client
            .execute(
                Request::from(&DELETE_ITEM)
                    .variables(json!({ "itemId": input.item_id.to_string() })),
            )
            .await
            .context("Failed to delete item")?;

        Ok(text_result(format!(
            "Item {} successfully deleted",
            input.item_id
        )))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoveItemToGroupInput {
    pub item_id: u64,

    /// The group to move the item to
    pub group_id: String,
}

pub struct MoveItemToGroup;

#[async_trait]
impl MondayTool for MoveItemToGroup {
    fn name(&self) -> &'static str {
        MOVE_ITEM_TO_GROUP_TOOL_NAME
    }

    fn tool(&self) -> Tool {
        Tool::new(
            MOVE_ITEM_TO_GROUP_TOOL_NAME,
            "Move an item to another group on the same board.",
            schema_from_type!(MoveItemToGroupInput),
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
        let input: MoveItemToGroupInput = convert_arguments(arguments)?;
        client
            .execute(Request::from(&MOVE_ITEM_TO_GROUP).variables(json!({
                "itemId": input.item_id.to_string(),
                "groupId": input.group_id,
            })))
            .await
            .context("Failed to move item to group")?;

        Ok(text_result(format!(
            "Item {} successfully moved to group {}",
            input.item_id, input.group_id
        )))
    }
}
