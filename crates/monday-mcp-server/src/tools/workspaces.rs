//! Workspace listing and contents

use async_trait::async_trait;
use monday_api::documents::workspaces::{GET_WORKSPACE_INFO, LIST_WORKSPACES};
use monday_api::types::{NamedRef, Workspace};
use monday_api::{MondayClient, Request};
use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{MondayTool, ToolAccess, convert_arguments, text_result};
use crate::constants::prefix::{VALIDATION_ERROR, WORKSPACE_NOT_FOUND};
use crate::errors::{ApiResultExt, McpError};
use crate::schema_from_type;

pub const WORKSPACE_INFO_TOOL_NAME: &str = "workspace_info";
pub const LIST_WORKSPACES_TOOL_NAME: &str = "list_workspaces";

const DEFAULT_WORKSPACES_LIMIT: u32 = 25;
const MAX_WORKSPACES_LIMIT: u32 = 100;

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceInfoInput {
    /// The id of the workspace
    pub workspace_id: u64,
}

#[derive(Debug, Deserialize)]
struct FolderBoard {
    id: String,
    name: String,
    #[serde(default)]
    board_folder_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FolderDoc {
    id: String,
    name: String,
    #[serde(default)]
    doc_folder_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WorkspaceContents {
    #[serde(default)]
    workspaces: Vec<Workspace>,
    #[serde(default)]
    boards: Vec<FolderBoard>,
    #[serde(default)]
    docs: Vec<FolderDoc>,
    #[serde(default)]
    folders: Vec<NamedRef>,
}

/// List the boards and docs in `folder`, or those outside any folder when it is `None`
fn format_folder_contents(report: &mut String, contents: &WorkspaceContents, folder: Option<&str>) {
    let boards = contents
        .boards
        .iter()
        .filter(|board| board.board_folder_id.as_deref() == folder);
    let docs = contents
        .docs
        .iter()
        .filter(|doc| doc.doc_folder_id.as_deref() == folder);

    let mut empty = true;
    for board in boards {
        report.push_str(&format!("- Board: {} (id: {})\n", board.name, board.id));
        empty = false;
    }
    for doc in docs {
        report.push_str(&format!("- Doc: {} (id: {})\n", doc.name, doc.id));
        empty = false;
    }
    if empty {
        report.push_str("- (empty)\n");
    }
}

fn format_workspace(contents: &WorkspaceContents, workspace: &Workspace) -> String {
    let mut report = format!("# Workspace: {} (id: {})\n\n", workspace.name, workspace.id);
    for (label, value) in [
        ("Description", &workspace.description),
        ("Kind", &workspace.kind),
        ("State", &workspace.state),
        ("Created", &workspace.created_at),
    ] {
        if let Some(value) = value.as_deref().filter(|value| !value.is_empty()) {
            report.push_str(&format!("**{label}:** {value}\n"));
        }
    }

    for folder in &contents.folders {
        report.push_str(&format!("\n## Folder: {} (id: {})\n", folder.name, folder.id));
        format_folder_contents(&mut report, contents, Some(folder.id.as_str()));
    }
    report.push_str("\n## Not in a folder\n");
    format_folder_contents(&mut report, contents, None);
    report
}

pub struct WorkspaceInfo;

#[async_trait]
impl MondayTool for WorkspaceInfo {
    fn name(&self) -> &'static str {
        WORKSPACE_INFO_TOOL_NAME
    }

    fn tool(&self) -> Tool {
        Tool::new(
            WORKSPACE_INFO_TOOL_NAME,
            "Get a workspace's details together with its boards, docs and folders, grouped by folder.",
            schema_from_type!(WorkspaceInfoInput),
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
        let input: WorkspaceInfoInput = convert_arguments(arguments)?;
        let contents: WorkspaceContents = client
            .request(
                Request::from(&GET_WORKSPACE_INFO)
                    .variables(json!({ "workspaceId": input.workspace_id.to_string() })),
            )
            .await
            .context("Failed to get workspace info")?;

        match contents.workspaces.first() {
            Some(workspace) => Ok(text_result(format_workspace(&contents, workspace))),
            None => Ok(text_result(format!(
                "{WORKSPACE_NOT_FOUND} Workspace with id {} was not found",
                input.workspace_id
            ))),
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListWorkspacesInput {
    /// The number of workspaces per page, up to 100. Defaults to 25.
    #[serde(default)]
    pub limit: Option<u32>,

    /// The page to return, starting at 1
    #[serde(default)]
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct Workspaces {
    #[serde(default)]
    workspaces: Vec<Workspace>,
}

pub struct ListWorkspaces;

#[async_trait]
impl MondayTool for ListWorkspaces {
    fn name(&self) -> &'static str {
        LIST_WORKSPACES_TOOL_NAME
    }

    fn tool(&self) -> Tool {
        Tool::new(
            LIST_WORKSPACES_TOOL_NAME,
            "List the account's active workspaces, a page at a time.",
            schema_from_type!(ListWorkspacesInput),
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
        let input: ListWorkspacesInput = convert_arguments(arguments)?;
        let limit = input.limit.unwrap_or(DEFAULT_WORKSPACES_LIMIT);
        let page = input.page.unwrap_or(1);
        if !(1..=MAX_WORKSPACES_LIMIT).contains(&limit) || page == 0 {
            return Ok(text_result(format!(
                "{VALIDATION_ERROR} limit must be between 1 and {MAX_WORKSPACES_LIMIT} and page must be at least 1"
            )));
        }

        let data: Workspaces = client
            .request(
                Request::from(&LIST_WORKSPACES)
                    .variables(json!({ "limit": limit, "page": page })),
            )
            .await
            .context("Failed to list workspaces")?;

        if data.workspaces.is_empty() {
            return Ok(text_result(format!("No workspaces found on page {page}")));
        }

        let mut report = format!("# Workspaces (page {page})\n\n");
        for workspace in &data.workspaces {
            report.push_str(&format!("- **{}** (id: {})", workspace.name, workspace.id));
            if let Some(kind) = &workspace.kind {
                report.push_str(&format!(", {kind}"));
            }
            if let Some(description) = workspace
                .description
                .as_deref()
                .filter(|description| !description.is_empty())
            {
                report.push_str(&format!(": {description}"));
            }
            report.push('\n');
        }
        if data.workspaces.len() == limit as usize {
            report.push_str(&format!(
                "\nMore workspaces may be available on page {}.\n",
                page + 1
            ));
        }
        Ok(text_result(report))
    }
}
