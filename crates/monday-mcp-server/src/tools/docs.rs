//! Document creation in a workspace or inside an item's doc column

use async_trait::async_trait;
use monday_api::documents::boards::CREATE_COLUMN;
use monday_api::documents::docs::{ADD_CONTENT_TO_DOC_FROM_MARKDOWN, CREATE_DOC, UPDATE_DOC_NAME};
use monday_api::documents::items::GET_ITEM_BOARD_COLUMNS;
use monday_api::types::{Column, ColumnKind};
use monday_api::{MondayClient, Request};
use rmcp::model::{CallToolResult, ErrorCode, Tool};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::{MondayTool, ToolAccess, convert_arguments, text_result};
use crate::constants::prefix::VALIDATION_ERROR;
use crate::errors::{ApiResultExt, McpError};
use crate::schema_from_type;

pub const CREATE_DOC_TOOL_NAME: &str = "create_doc";

const DOC_COLUMN_TYPE: &str = "doc";
const DOC_COLUMN_TITLE: &str = "Doc";

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DocKind {
    #[default]
    Public,
    Private,
    Share,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceLocation {
    /// The workspace to create the document in
    pub workspace_id: u64,

    /// The folder to place the document in
    #[serde(default)]
    pub folder_id: Option<u64>,

    #[serde(default)]
    pub doc_kind: DocKind,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemLocation {
    /// The item to attach the document to
    pub item_id: u64,

    /// The doc column to use. Defaults to the board's first doc column, which is created when
    /// the board has none.
    #[serde(default)]
    pub column_id: Option<String>,
}

/// Where the document is created
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocLocation {
    Workspace(WorkspaceLocation),
    Item(ItemLocation),
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocInput {
    pub location: DocLocation,

    /// The name of the new document
    pub doc_name: String,

    /// The initial content of the document, as Markdown
    pub markdown: String,
}

#[derive(Debug, Deserialize)]
struct CreatedDoc {
    id: String,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreateDocData {
    create_doc: Option<CreatedDoc>,
}

#[derive(Debug, Deserialize)]
struct ItemBoard {
    id: String,
    #[serde(default)]
    columns: Vec<Column>,
}

#[derive(Debug, Deserialize)]
struct ItemWithBoard {
    #[serde(default)]
    board: Option<ItemBoard>,
}

#[derive(Debug, Deserialize)]
struct ItemsWithBoard {
    #[serde(default)]
    items: Vec<ItemWithBoard>,
}

#[derive(Debug, Deserialize)]
struct CreatedColumn {
    create_column: Option<Column>,
}

#[derive(Debug, Deserialize)]
struct MarkdownResult {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AddContentData {
    add_content_to_doc_from_markdown: Option<MarkdownResult>,
}

/// The doc column to create the document in, adding one to the board when needed
async fn resolve_doc_column(
    client: &MondayClient,
    board: &ItemBoard,
    requested: Option<String>,
) -> Result<String, McpError> {
    if let Some(column_id) = requested {
        return Ok(column_id);
    }
    if let Some(column) = board
        .columns
        .iter()
        .find(|column| column.kind() == ColumnKind::Doc)
    {
        return Ok(column.id.clone());
    }

    debug!(board_id = %board.id, "Board has no doc column, creating one");
    let created: CreatedColumn = client
        .request(Request::from(&CREATE_COLUMN).variables(json!({
            "boardId": board.id,
            "columnType": DOC_COLUMN_TYPE,
            "columnTitle": DOC_COLUMN_TITLE,
        })))
        .await
        .context("Failed to create doc column")?;
    created.create_column.map(|column| column.id).ok_or_else(|| {
        McpError::new(
            ErrorCode::INTERNAL_ERROR,
            "Failed to create doc column: no column was returned".to_string(),
            None,
        )
    })
}

pub struct CreateDoc;

#[async_trait]
impl MondayTool for CreateDoc {
    fn name(&self) -> &'static str {
        CREATE_DOC_TOOL_NAME
    }

    fn tool(&self) -> Tool {
        Tool::new(
            CREATE_DOC_TOOL_NAME,
            "Create a document from Markdown, either in a workspace (optionally inside a folder) or attached to an item through a doc column.",
            schema_from_type!(CreateDocInput),
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
        let input: CreateDocInput = convert_arguments(arguments)?;

        let (location, rename) = match input.location {
            DocLocation::Workspace(workspace) => (
                json!({
                    "workspace": {
                        "workspace_id": workspace.workspace_id.to_string(),
                        "name": input.doc_name,
                        "kind": workspace.doc_kind,
                        "folder_id": workspace.folder_id.map(|id| id.to_string()),
                    }
                }),
                false,
            ),
            DocLocation::Item(item) => {
                let data: ItemsWithBoard = client
                    .request(
                        Request::from(&GET_ITEM_BOARD_COLUMNS)
                            .variables(json!({ "itemId": item.item_id.to_string() })),
                    )
                    .await
                    .context("Failed to get item")?;
                let Some(board) = data.items.into_iter().next().and_then(|item| item.board)
                else {
                    return Ok(text_result(format!(
                        "{VALIDATION_ERROR} Item with id {} was not found",
                        item.item_id
                    )));
                };
                let column_id = resolve_doc_column(client, &board, item.column_id).await?;
                (
                    json!({
                        "board": {
                            "item_id": item.item_id.to_string(),
                            "column_id": column_id,
                        }
                    }),
                    true,
                )
            }
        };

        let created: CreateDocData = client
            .request(Request::from(&CREATE_DOC).variables(json!({ "location": location })))
            .await
            .context("Failed to create document")?;
        let Some(doc) = created.create_doc else {
            return Ok(text_result("Failed to create document: no document was returned"));
        };

        if rename
            && let Err(error) = client
                .execute(Request::from(&UPDATE_DOC_NAME).variables(json!({
                    "docId": doc.id,
                    "name": input.doc_name,
                })))
                .await
        {
            warn!(doc_id = %doc.id, %error, "Failed to rename document");
        }

        let content = client
            .request::<AddContentData>(Request::from(&ADD_CONTENT_TO_DOC_FROM_MARKDOWN).variables(
                json!({
                    "docId": doc.id,
                    "markdown": input.markdown,
                }),
            ))
            .await;

        let mut report = format!("Document successfully created (id: {})", doc.id);
        if let Some(url) = &doc.url {
            report.push_str(&format!(". URL: {url}"));
        }
        let failure = match content {
            Ok(AddContentData {
                add_content_to_doc_from_markdown: Some(MarkdownResult { success: true, .. }),
            }) => None,
            Ok(AddContentData {
                add_content_to_doc_from_markdown: Some(MarkdownResult { error, .. }),
            }) => Some(error.unwrap_or_else(|| "unknown error".to_string())),
            Ok(AddContentData {
                add_content_to_doc_from_markdown: None,
            }) => Some("no result".to_string()),
            Err(error) => Some(error.to_string()),
        };
        if let Some(failure) = failure {
            warn!(doc_id = %doc.id, error = %failure, "Failed to add content to document");
            report.push_str(&format!(". Adding the content failed: {failure}"));
        }
        Ok(text_result(report))
    }
}
