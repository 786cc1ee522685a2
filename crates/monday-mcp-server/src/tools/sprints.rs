//! monday dev sprint tools
//!
//! Sprint boards are recognised purely by their fixed column ids, see
//! [`crate::constants::sprint_columns`]. The values of those columns are read with the small
//! readers below rather than through the generic item mapper because their JSON shapes are
//! known.

use async_trait::async_trait;
use monday_api::documents::boards::LIST_BOARDS_WITH_COLUMNS;
use monday_api::documents::docs::{EXPORT_MARKDOWN_FROM_DOC, GET_DOC_BY_OBJECT_ID};
use monday_api::documents::sprints::{GET_SPRINT_ITEM, GET_SPRINTS_BOARD_ITEMS};
use monday_api::types::{Column, ColumnValue, Item, ItemsPage, NamedRef};
use monday_api::{MondayClient, Request};
use rmcp::model::{CallToolResult, ErrorCode, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{MondayTool, ToolAccess, convert_arguments, text_result};
use crate::constants::prefix::{
    BOARD_NOT_FOUND, DOCUMENT_NOT_FOUND, SPRINT_NOT_FOUND, VALIDATION_ERROR,
};
use crate::constants::sprint_columns::{
    REQUIRED_SPRINT_COLUMNS, REQUIRED_TASK_COLUMNS, SPRINT_ACTIVATION, SPRINT_COMPLETION,
    SPRINT_END_DATE, SPRINT_START_DATE, SPRINT_SUMMARY, SPRINT_TASKS, SPRINT_TIMELINE,
};
use crate::errors::{ApiResultExt, McpError};
use crate::schema_from_type;

pub const GET_SPRINTS_BOARDS_TOOL_NAME: &str = "get_monday_dev_sprints_boards";
pub const GET_SPRINTS_METADATA_TOOL_NAME: &str = "get_sprints_metadata";
pub const GET_SPRINT_SUMMARY_TOOL_NAME: &str = "get_sprint_summary";

const BOARD_SCAN_LIMIT: u32 = 100;
const DEFAULT_SPRINTS_LIMIT: u32 = 25;
const MAX_SPRINTS_LIMIT: u32 = 100;
const NOT_AVAILABLE: &str = "N/A";

fn column_value<'a>(item: &'a Item, column_id: &str) -> Option<&'a ColumnValue> {
    item.column_values
        .as_deref()?
        .iter()
        .find(|value| value.id == column_id)
}

/// `{"checked": true}`, with the flag sometimes sent as a string
fn read_checkbox(value: Option<&ColumnValue>) -> bool {
    value
        .and_then(ColumnValue::parsed_value)
        .and_then(|parsed| parsed.get("checked").cloned())
        .is_some_and(|checked| checked == Value::Bool(true) || checked.as_str() == Some("true"))
}

/// `{"date": "2025-01-31"}`
fn read_date(value: Option<&ColumnValue>) -> Option<String> {
    value
        .and_then(ColumnValue::parsed_value)?
        .get("date")?
        .as_str()
        .map(str::to_string)
}

/// `{"from": "2025-01-01", "to": "2025-01-14"}`
fn read_timeline(value: Option<&ColumnValue>) -> Option<(String, String)> {
    let parsed = value.and_then(ColumnValue::parsed_value)?;
    let from = parsed.get("from")?.as_str()?;
    let to = parsed.get("to")?.as_str()?;
    Some((from.to_string(), to.to_string()))
}

/// The object id of the first document attached to a doc column
fn read_doc_object_id(value: Option<&ColumnValue>) -> Option<String> {
    let parsed = value.and_then(ColumnValue::parsed_value)?;
    match parsed.get("files")?.as_array()?.first()?.get("objectId")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SprintStatus {
    Planned,
    Active,
    Completed,
}

impl SprintStatus {
    fn of(item: &Item) -> Self {
        if read_checkbox(column_value(item, SPRINT_COMPLETION)) {
            SprintStatus::Completed
        } else if read_checkbox(column_value(item, SPRINT_ACTIVATION)) {
            SprintStatus::Active
        } else {
            SprintStatus::Planned
        }
    }
}

impl std::fmt::Display for SprintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SprintStatus::Planned => "Planned",
            SprintStatus::Active => "Active",
            SprintStatus::Completed => "Completed",
        })
    }
}

fn missing_columns<'a>(required: &[&'a str], present: &[&str]) -> Vec<&'a str> {
    required
        .iter()
        .filter(|column| !present.contains(column))
        .copied()
        .collect()
}

#[derive(Debug, Deserialize)]
struct BoardWithColumns {
    id: String,
    name: String,
    #[serde(default)]
    workspace_id: Option<String>,
    #[serde(default)]
    columns: Vec<Column>,
}

impl BoardWithColumns {
    fn column_ids(&self) -> Vec<&str> {
        self.columns.iter().map(|column| column.id.as_str()).collect()
    }

    /// The boards the `sprint_tasks` relation column is connected to
    fn linked_task_board_ids(&self) -> Vec<String> {
        self.columns
            .iter()
            .find(|column| column.id == SPRINT_TASKS)
            .and_then(|column| column.settings_str.as_deref())
            .and_then(|settings| serde_json::from_str::<Value>(settings).ok())
            .and_then(|settings| settings.get("boardIds").and_then(Value::as_array).cloned())
            .unwrap_or_default()
            .into_iter()
            .filter_map(|id| match id {
                Value::String(id) => Some(id),
                Value::Number(id) => Some(id.to_string()),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct BoardsWithColumns {
    #[serde(default)]
    boards: Vec<BoardWithColumns>,
}

struct SprintBoardPair<'a> {
    sprints: &'a BoardWithColumns,
    tasks: &'a BoardWithColumns,
}

fn find_sprint_board_pairs(boards: &[BoardWithColumns]) -> Vec<SprintBoardPair<'_>> {
    boards
        .iter()
        .filter(|board| missing_columns(&REQUIRED_SPRINT_COLUMNS, &board.column_ids()).is_empty())
        .filter_map(|sprints| {
            let task_board_ids = sprints.linked_task_board_ids();
            boards
                .iter()
                .find(|board| {
                    task_board_ids.contains(&board.id)
                        && missing_columns(&REQUIRED_TASK_COLUMNS, &board.column_ids()).is_empty()
                })
                .map(|tasks| SprintBoardPair { sprints, tasks })
        })
        .collect()
}

fn format_sprint_board_pairs(pairs: &[SprintBoardPair<'_>]) -> String {
    let mut report = String::from("# monday dev Sprint Boards\n\n");
    report.push_str(&format!(
        "Found {} sprints/tasks board pair(s).\n",
        pairs.len()
    ));
    for (index, pair) in pairs.iter().enumerate() {
        report.push_str(&format!("\n## Pair {}\n", index + 1));
        report.push_str(&format!(
            "- **Sprints board:** {} (id: {})\n",
            pair.sprints.name, pair.sprints.id
        ));
        report.push_str(&format!(
            "- **Tasks board:** {} (id: {})\n",
            pair.tasks.name, pair.tasks.id
        ));
        if let Some(workspace_id) = &pair.sprints.workspace_id {
            report.push_str(&format!("- **Workspace id:** {workspace_id}\n"));
        }
    }
    report
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SprintsBoardsInput {
    /// Only look for sprint boards in this workspace
    #[serde(default)]
    pub workspace_id: Option<u64>,
}

pub struct GetSprintsBoards;

#[async_trait]
impl MondayTool for GetSprintsBoards {
    fn name(&self) -> &'static str {
        GET_SPRINTS_BOARDS_TOOL_NAME
    }

    fn tool(&self) -> Tool {
        Tool::new(
            GET_SPRINTS_BOARDS_TOOL_NAME,
            "Find the monday dev sprints boards and the tasks boards they plan. Use the sprints board id with get_sprints_metadata.",
            schema_from_type!(SprintsBoardsInput),
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
        let input: SprintsBoardsInput = convert_arguments(arguments)?;
        let data: BoardsWithColumns = client
            .request(Request::from(&LIST_BOARDS_WITH_COLUMNS).variables(json!({
                "limit": BOARD_SCAN_LIMIT,
                "workspaceIds": input.workspace_id.map(|id| vec![id.to_string()]),
            })))
            .await
            .context("Failed to list boards")?;

        let pairs = find_sprint_board_pairs(&data.boards);
        if pairs.is_empty() {
            return Ok(text_result(format!(
                "No monday dev sprints boards were found. A sprints board has the columns {} and a {} column linked to a tasks board with the {} column.",
                REQUIRED_SPRINT_COLUMNS.join(", "),
                SPRINT_TASKS,
                REQUIRED_TASK_COLUMNS.join(", ")
            )));
        }
        Ok(text_result(format_sprint_board_pairs(&pairs)))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SprintsMetadataInput {
    /// The id of the monday dev sprints board
    pub sprints_board_id: u64,

    /// The number of sprints to return, up to 100. Defaults to 25.
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct SprintsBoard {
    id: String,
    name: String,
    #[serde(default)]
    columns: Vec<Column>,
    #[serde(default)]
    items_page: Option<ItemsPage>,
}

#[derive(Debug, Deserialize)]
struct SprintsBoards {
    #[serde(default)]
    boards: Vec<SprintsBoard>,
}

fn format_sprints_table(board: &NamedRef, sprints: &[Item]) -> String {
    let mut report = format!("# Sprints of {} (board id: {})\n\n", board.name, board.id);
    report.push_str(&format!("**Total sprints:** {}\n\n", sprints.len()));
    report.push_str("| Sprint Name | Sprint ID | Status | Timeline (Planned) | Start Date (Actual) | End Date (Actual) | Summary Document ObjectID |\n");
    report.push_str("|---|---|---|---|---|---|---|\n");
    for sprint in sprints {
        let timeline = read_timeline(column_value(sprint, SPRINT_TIMELINE))
            .map_or_else(|| NOT_AVAILABLE.to_string(), |(from, to)| format!("{from} to {to}"));
        let start = read_date(column_value(sprint, SPRINT_START_DATE));
        let end = read_date(column_value(sprint, SPRINT_END_DATE));
        let document = read_doc_object_id(column_value(sprint, SPRINT_SUMMARY));
        report.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} |\n",
            sprint.name,
            sprint.id,
            SprintStatus::of(sprint),
            timeline,
            start.as_deref().unwrap_or(NOT_AVAILABLE),
            end.as_deref().unwrap_or(NOT_AVAILABLE),
            document.as_deref().unwrap_or(NOT_AVAILABLE)
        ));
    }
    report
}

pub struct GetSprintsMetadata;

#[async_trait]
impl MondayTool for GetSprintsMetadata {
    fn name(&self) -> &'static str {
        GET_SPRINTS_METADATA_TOOL_NAME
    }

    fn tool(&self) -> Tool {
        Tool::new(
            GET_SPRINTS_METADATA_TOOL_NAME,
            "List the sprints of a monday dev sprints board with their status, planned timeline, actual start and end dates and summary document. Use get_monday_dev_sprints_boards to find the board.",
            schema_from_type!(SprintsMetadataInput),
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
        let input: SprintsMetadataInput = convert_arguments(arguments)?;
        let limit = input.limit.unwrap_or(DEFAULT_SPRINTS_LIMIT);
        if !(1..=MAX_SPRINTS_LIMIT).contains(&limit) {
            return Ok(text_result(format!(
                "{VALIDATION_ERROR} limit must be between 1 and {MAX_SPRINTS_LIMIT}"
            )));
        }

        let data: SprintsBoards = client
            .request(Request::from(&GET_SPRINTS_BOARD_ITEMS).variables(json!({
                "boardId": input.sprints_board_id.to_string(),
                "limit": limit,
                "columnIds": REQUIRED_SPRINT_COLUMNS,
            })))
            .await
            .context("Failed to get sprints")?;

        let Some(board) = data.boards.into_iter().next() else {
            return Ok(text_result(format!(
                "{BOARD_NOT_FOUND} Board with id {} was not found",
                input.sprints_board_id
            )));
        };

        let column_ids: Vec<&str> = board.columns.iter().map(|c| c.id.as_str()).collect();
        let missing = missing_columns(&REQUIRED_SPRINT_COLUMNS, &column_ids);
        if !missing.is_empty() {
            return Ok(text_result(format!(
                "{VALIDATION_ERROR} Board {} is not a monday dev sprints board. Missing required columns: {}",
                board.id,
                missing.join(", ")
            )));
        }

        let sprints = board.items_page.map(|page| page.items).unwrap_or_default();
        Ok(text_result(format_sprints_table(
            &NamedRef {
                id: board.id,
                name: board.name,
            },
            &sprints,
        )))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SprintSummaryInput {
    /// The id of the sprint, as listed by get_sprints_metadata
    pub sprint_id: u64,
}

#[derive(Debug, Deserialize)]
struct SprintItems {
    #[serde(default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct DocRef {
    id: String,
}

#[derive(Debug, Deserialize)]
struct Docs {
    #[serde(default)]
    docs: Vec<DocRef>,
}

#[derive(Debug, Deserialize)]
struct MarkdownExport {
    success: bool,
    #[serde(default)]
    markdown: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExportedMarkdown {
    export_markdown_from_doc: Option<MarkdownExport>,
}

pub struct GetSprintSummary;

#[async_trait]
impl MondayTool for GetSprintSummary {
    fn name(&self) -> &'static str {
        GET_SPRINT_SUMMARY_TOOL_NAME
    }

    fn tool(&self) -> Tool {
        Tool::new(
            GET_SPRINT_SUMMARY_TOOL_NAME,
            "Get the summary document of a completed monday dev sprint as Markdown.",
            schema_from_type!(SprintSummaryInput),
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
        let input: SprintSummaryInput = convert_arguments(arguments)?;
        let data: SprintItems = client
            .request(
                Request::from(&GET_SPRINT_ITEM)
                    .variables(json!({ "itemId": input.sprint_id.to_string() })),
            )
            .await
            .context("Failed to get sprint")?;

        let Some(sprint) = data.items.into_iter().next() else {
            return Ok(text_result(format!(
                "{SPRINT_NOT_FOUND} Sprint with id {} was not found",
                input.sprint_id
            )));
        };

        let present: Vec<&str> = sprint
            .column_values
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|value| value.id.as_str())
            .collect();
        if !present.contains(&SPRINT_SUMMARY) {
            return Ok(text_result(format!(
                "{VALIDATION_ERROR} Sprint {} is missing required columns: {}. It may not belong to a monday dev sprints board.",
                sprint.id,
                missing_columns(&REQUIRED_SPRINT_COLUMNS, &present).join(", ")
            )));
        }

        let Some(object_id) = read_doc_object_id(column_value(&sprint, SPRINT_SUMMARY)) else {
            return Ok(text_result(format!(
                "{DOCUMENT_NOT_FOUND} Sprint \"{}\" (id: {}) has no summary document",
                sprint.name, sprint.id
            )));
        };

        let docs: Docs = client
            .request(
                Request::from(&GET_DOC_BY_OBJECT_ID).variables(json!({ "objectId": object_id })),
            )
            .await
            .context("Failed to get sprint summary document")?;
        let Some(doc) = docs.docs.into_iter().next() else {
            return Ok(text_result(format!(
                "{DOCUMENT_NOT_FOUND} Summary document {object_id} of sprint {} was not found",
                sprint.id
            )));
        };

        let exported: ExportedMarkdown = client
            .request(Request::from(&EXPORT_MARKDOWN_FROM_DOC).variables(json!({ "docId": doc.id })))
            .await
            .context("Failed to export sprint summary document")?;
        let markdown = match exported.export_markdown_from_doc {
            Some(MarkdownExport {
                success: true,
                markdown: Some(markdown),
                ..
            }) => markdown,
            Some(MarkdownExport { error, .. }) => {
                return Err(McpError::new(
                    ErrorCode::INTERNAL_ERROR,
                    format!(
                        "Failed to export sprint summary document: {}",
                        error.as_deref().unwrap_or("unknown error")
                    ),
                    None,
                ));
            }
            None => {
                return Err(McpError::new(
                    ErrorCode::INTERNAL_ERROR,
                    "Failed to export sprint summary document: no result".to_string(),
                    None,
                ));
            }
        };

        Ok(text_result(format!(
            "# Sprint Summary: {}\n\n**Sprint ID:** {}\n**Summary document ID:** {}\n\n{}",
            sprint.name, sprint.id, doc.id, markdown
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{client_for, content_text, data, operation};
    use rstest::rstest;

    fn sprint(id: &str, name: &str, values: Value) -> Value {
        json!({ "id": id, "name": name, "column_values": values })
    }

    fn value(id: &str, column_type: &str, raw: Value) -> Value {
        json!({ "id": id, "type": column_type, "text": "", "value": raw.to_string() })
    }

    fn columns(ids: &[&str]) -> Value {
        Value::Array(
            ids.iter()
                .map(|id| json!({ "id": id, "title": id, "type": "text" }))
                .collect(),
        )
    }

    #[rstest]
    #[case(json!({ "checked": true }), true)]
    #[case(json!({ "checked": "true" }), true)]
    #[case(json!({ "checked": "false" }), false)]
    #[case(json!({ "checked": false }), false)]
    #[case(json!({}), false)]
    fn checkbox_accepts_bool_or_string(#[case] raw: Value, #[case] checked: bool) {
        let column: ColumnValue =
            serde_json::from_value(value(SPRINT_ACTIVATION, "checkbox", raw)).unwrap();

        assert_eq!(read_checkbox(Some(&column)), checked);
    }

    #[test]
    fn doc_column_yields_first_object_id() {
        let column: ColumnValue = serde_json::from_value(value(
            SPRINT_SUMMARY,
            "doc",
            json!({ "files": [{ "objectId": 555, "name": "Summary" }, { "objectId": 666 }] }),
        ))
        .unwrap();

        assert_eq!(read_doc_object_id(Some(&column)), Some("555".to_string()));
    }

    #[test]
    fn sprint_and_task_boards_are_paired() {
        let mut sprint_columns = columns(&REQUIRED_SPRINT_COLUMNS);
        sprint_columns[0]["settings_str"] = json!("{\"boardIds\":[2]}");
        let boards: BoardsWithColumns = serde_json::from_value(json!({
            "boards": [
                { "id": "1", "name": "Sprints", "workspace_id": "9", "columns": sprint_columns },
                { "id": "2", "name": "Tasks", "columns": columns(&["name", "task_sprint"]) },
                { "id": "3", "name": "Other", "columns": columns(&["name"]) }
            ]
        }))
        .unwrap();

        let pairs = find_sprint_board_pairs(&boards.boards);

        insta::assert_snapshot!(format_sprint_board_pairs(&pairs), @r"
        # monday dev Sprint Boards

        Found 1 sprints/tasks board pair(s).

        ## Pair 1
        - **Sprints board:** Sprints (id: 1)
        - **Tasks board:** Tasks (id: 2)
        - **Workspace id:** 9
        ");
    }

    #[test]
    fn boards_without_linked_task_board_are_skipped() {
        let boards: BoardsWithColumns = serde_json::from_value(json!({
            "boards": [
                { "id": "1", "name": "Sprints", "columns": columns(&REQUIRED_SPRINT_COLUMNS) },
                { "id": "2", "name": "Tasks", "columns": columns(&["task_sprint"]) }
            ]
        }))
        .unwrap();

        assert!(find_sprint_board_pairs(&boards.boards).is_empty());
    }

    #[tokio::test]
    async fn sprints_are_listed_as_table() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .match_body(operation("GetSprintsBoardItems"))
            .with_body(data(json!({
                "boards": [{
                    "id": "1",
                    "name": "Sprints",
                    "columns": columns(&REQUIRED_SPRINT_COLUMNS),
                    "items_page": {
                        "items": [
                            sprint("10", "Sprint 1", json!([
                                value(SPRINT_COMPLETION, "checkbox", json!({ "checked": "true" })),
                                value(SPRINT_ACTIVATION, "checkbox", json!({ "checked": "true" })),
                                value(SPRINT_TIMELINE, "timeline", json!({ "from": "2025-01-01", "to": "2025-01-14" })),
                                value(SPRINT_START_DATE, "date", json!({ "date": "2025-01-02" })),
                                value(SPRINT_END_DATE, "date", json!({ "date": "2025-01-15" })),
                                value(SPRINT_SUMMARY, "doc", json!({ "files": [{ "objectId": "77" }] }))
                            ])),
                            sprint("11", "Sprint 2", json!([
                                value(SPRINT_ACTIVATION, "checkbox", json!({ "checked": true })),
                                value(SPRINT_TIMELINE, "timeline", json!({ "from": "2025-01-15", "to": "2025-01-28" }))
                            ])),
                            sprint("12", "Sprint 3", json!([]))
                        ]
                    }
                }]
            })))
            .create_async()
            .await;

        let result = GetSprintsMetadata
            .call(&client_for(&server), json!({ "sprintsBoardId": 1 }))
            .await
            .unwrap();

        insta::assert_snapshot!(content_text(result), @r"
        # Sprints of Sprints (board id: 1)

        **Total sprints:** 3

        | Sprint Name | Sprint ID | Status | Timeline (Planned) | Start Date (Actual) | End Date (Actual) | Summary Document ObjectID |
        |---|---|---|---|---|---|---|
        | Sprint 1 | 10 | Completed | 2025-01-01 to 2025-01-14 | 2025-01-02 | 2025-01-15 | 77 |
        | Sprint 2 | 11 | Active | 2025-01-15 to 2025-01-28 | N/A | N/A | N/A |
        | Sprint 3 | 12 | Planned | N/A | N/A | N/A | N/A |
        ");
    }

    #[tokio::test]
    async fn missing_board_is_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_body(data(json!({ "boards": [] })))
            .create_async()
            .await;

        let result = GetSprintsMetadata
            .call(&client_for(&server), json!({ "sprintsBoardId": 5 }))
            .await
            .unwrap();

        assert_eq!(
            content_text(result),
            "BOARD_NOT_FOUND: Board with id 5 was not found"
        );
    }

    #[tokio::test]
    async fn board_without_sprint_columns_is_a_validation_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_body(data(json!({
                "boards": [{
                    "id": "5",
                    "name": "Tasks",
                    "columns": columns(&[SPRINT_TASKS, SPRINT_TIMELINE, SPRINT_COMPLETION, SPRINT_START_DATE, SPRINT_END_DATE]),
                    "items_page": { "items": [] }
                }]
            })))
            .create_async()
            .await;

        let result = GetSprintsMetadata
            .call(&client_for(&server), json!({ "sprintsBoardId": 5 }))
            .await
            .unwrap();

        assert_eq!(
            content_text(result),
            "VALIDATION_ERROR: Board 5 is not a monday dev sprints board. Missing required columns: sprint_activation, sprint_summary"
        );
    }

    #[tokio::test]
    async fn sprint_without_summary_column_is_a_validation_error() {
        let mut server = mockito::Server::new_async().await;
        let export = server
            .mock("POST", "/")
            .match_body(operation("ExportMarkdownFromDoc"))
            .expect(0)
            .create_async()
            .await;
        server
            .mock("POST", "/")
            .match_body(operation("GetSprintItem"))
            .with_body(data(json!({
                "items": [sprint("10", "Sprint 1", json!([
                    value(SPRINT_TASKS, "board_relation", json!({})),
                    value(SPRINT_TIMELINE, "timeline", json!({})),
                    value(SPRINT_COMPLETION, "checkbox", json!({})),
                    value(SPRINT_START_DATE, "date", json!({})),
                    value(SPRINT_END_DATE, "date", json!({}))
                ]))]
            })))
            .create_async()
            .await;

        let result = GetSprintSummary
            .call(&client_for(&server), json!({ "sprintId": 10 }))
            .await
            .unwrap();

        export.assert_async().await;
        let text = content_text(result);
        assert!(text.starts_with(VALIDATION_ERROR));
        assert!(text.contains("sprint_activation, sprint_summary"));
    }

    #[tokio::test]
    async fn missing_sprint_is_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_body(data(json!({ "items": [] })))
            .create_async()
            .await;

        let result = GetSprintSummary
            .call(&client_for(&server), json!({ "sprintId": 10 }))
            .await
            .unwrap();

        assert_eq!(
            content_text(result),
            "SPRINT_NOT_FOUND: Sprint with id 10 was not found"
        );
    }

    #[tokio::test]
    async fn sprint_without_document_is_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_body(data(json!({
                "items": [sprint("10", "Sprint 1", json!([
                    { "id": SPRINT_SUMMARY, "type": "doc", "text": "", "value": null }
                ]))]
            })))
            .create_async()
            .await;

        let result = GetSprintSummary
            .call(&client_for(&server), json!({ "sprintId": 10 }))
            .await
            .unwrap();

        assert_eq!(
            content_text(result),
            "DOCUMENT_NOT_FOUND: Sprint \"Sprint 1\" (id: 10) has no summary document"
        );
    }

    #[tokio::test]
    async fn summary_document_is_exported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .match_body(operation("GetSprintItem"))
            .with_body(data(json!({
                "items": [sprint("10", "Sprint 1", json!([
                    value(SPRINT_SUMMARY, "doc", json!({ "files": [{ "objectId": "77" }] }))
                ]))]
            })))
            .create_async()
            .await;
        server
            .mock("POST", "/")
            .match_body(mockito::Matcher::PartialJson(json!({
                "operationName": "GetDocByObjectId",
                "variables": { "objectId": "77" }
            })))
            .with_body(data(json!({ "docs": [{ "id": "3001", "object_id": "77", "name": "Summary" }] })))
            .create_async()
            .await;
        server
            .mock("POST", "/")
            .match_body(mockito::Matcher::PartialJson(json!({
                "operationName": "ExportMarkdownFromDoc",
                "variables": { "docId": "3001" }
            })))
            .with_body(data(json!({
                "export_markdown_from_doc": { "success": true, "markdown": "## Done\n- Shipped search", "error": null }
            })))
            .create_async()
            .await;

        let result = GetSprintSummary
            .call(&client_for(&server), json!({ "sprintId": 10 }))
            .await
            .unwrap();

        assert_eq!(
            content_text(result),
            "# Sprint Summary: Sprint 1\n\n**Sprint ID:** 10\n**Summary document ID:** 3001\n\n## Done\n- Shipped search"
        );
    }
}
