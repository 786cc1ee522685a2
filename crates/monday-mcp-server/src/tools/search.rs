//! Name search over boards, documents and folders
//!
//! The API has no name filter for these entities, so a page is fetched and matched here.

use async_trait::async_trait;
use monday_api::documents::boards::SEARCH_BOARDS;
use monday_api::documents::docs::SEARCH_DOCS;
use monday_api::documents::workspaces::SEARCH_FOLDERS;
use monday_api::types::NamedRef;
use monday_api::{MondayClient, Request};
use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{MondayTool, ToolAccess, convert_arguments, json_result, text_result};
use crate::constants::prefix::VALIDATION_ERROR;
use crate::errors::{ApiResultExt, McpError};
use crate::schema_from_type;

pub const SEARCH_TOOL_NAME: &str = "search";

const DEFAULT_SEARCH_LIMIT: u32 = 100;
const MAX_SEARCH_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchType {
    Board,
    Documents,
    Folders,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    /// What to search for
    pub search_type: SearchType,

    /// Text the name must contain, ignoring case. Omit to list everything on the page.
    #[serde(default)]
    pub search_term: Option<String>,

    /// Only search in these workspaces
    #[serde(default)]
    pub workspace_ids: Option<Vec<u64>>,

    /// The number of entities fetched per page, up to 100. Defaults to 100.
    #[serde(default)]
    pub limit: Option<u32>,

    /// The page to fetch, starting at 1
    #[serde(default)]
    pub page: Option<u32>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct SearchResult {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchedBoard {
    id: String,
    name: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    workspace: Option<NamedRef>,
}

#[derive(Debug, Deserialize)]
struct SearchedDoc {
    id: String,
    name: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    workspace_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchedFolder {
    id: String,
    name: String,
    #[serde(default)]
    workspace: Option<NamedRef>,
}

#[derive(Debug, Deserialize)]
struct Boards {
    #[serde(default)]
    boards: Vec<SearchedBoard>,
}

#[derive(Debug, Deserialize)]
struct Docs {
    #[serde(default)]
    docs: Vec<SearchedDoc>,
}

#[derive(Debug, Deserialize)]
struct Folders {
    #[serde(default)]
    folders: Vec<SearchedFolder>,
}

fn matches_term(name: &str, term: Option<&str>) -> bool {
    term.is_none_or(|term| name.to_lowercase().contains(&term.to_lowercase()))
}

async fn fetch(
    client: &MondayClient,
    search_type: SearchType,
    variables: Value,
) -> Result<Vec<SearchResult>, McpError> {
    Ok(match search_type {
        SearchType::Board => {
            let data: Boards = client
                .request(Request::from(&SEARCH_BOARDS).variables(variables))
                .await
                .context("Failed to search boards")?;
            data.boards
                .into_iter()
                .map(|board| SearchResult {
                    id: board.id,
                    name: board.name,
                    url: board.url,
                    workspace_id: board.workspace.map(|workspace| workspace.id),
                })
                .collect()
        }
        SearchType::Documents => {
            let data: Docs = client
                .request(Request::from(&SEARCH_DOCS).variables(variables))
                .await
                .context("Failed to search documents")?;
            data.docs
                .into_iter()
                .map(|doc| SearchResult {
                    id: doc.id,
                    name: doc.name,
                    url: doc.url,
                    workspace_id: doc.workspace_id,
                })
                .collect()
        }
        SearchType::Folders => {
            let data: Folders = client
                .request(Request::from(&SEARCH_FOLDERS).variables(variables))
                .await
                .context("Failed to search folders")?;
            data.folders
                .into_iter()
                .map(|folder| SearchResult {
                    id: folder.id,
                    name: folder.name,
                    url: None,
                    workspace_id: folder.workspace.map(|workspace| workspace.id),
                })
                .collect()
        }
    })
}

pub struct Search;

#[async_trait]
impl MondayTool for Search {
    fn name(&self) -> &'static str {
        SEARCH_TOOL_NAME
    }

    fn tool(&self) -> Tool {
        Tool::new(
            SEARCH_TOOL_NAME,
            "Search boards, documents or folders by name. Each call matches one page of entities, so request the next page when nothing matches and the page was full.",
            schema_from_type!(Input),
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
        let input: Input = convert_arguments(arguments)?;
        let limit = input.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
        let page = input.page.unwrap_or(1);
        if !(1..=MAX_SEARCH_LIMIT).contains(&limit) || page == 0 {
            return Ok(text_result(format!(
                "{VALIDATION_ERROR} limit must be between 1 and {MAX_SEARCH_LIMIT} and page must be at least 1"
            )));
        }

        let variables = json!({
            "limit": limit,
            "page": page,
            "workspaceIds": input
                .workspace_ids
                .as_ref()
                .map(|ids| ids.iter().map(u64::to_string).collect::<Vec<_>>()),
        });
        let fetched = fetch(client, input.search_type, variables).await?;
        let page_was_full = fetched.len() == limit as usize;

        let term = input
            .search_term
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty());
        let results: Vec<SearchResult> = fetched
            .into_iter()
            .filter(|result| matches_term(&result.name, term))
            .collect();

        json_result(&json!({
            "results": results,
            "count": results.len(),
            "page": page,
            "has_more": page_was_full,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{client_for, content_text, data, operation};
    use mockito::Matcher;
    use rstest::rstest;

    #[rstest]
    #[case("Product Roadmap", Some("roadmap"), true)]
    #[case("Product Roadmap", Some("ROAD"), true)]
    #[case("Product Roadmap", Some("bugs"), false)]
    #[case("Product Roadmap", None, true)]
    fn names_match_case_insensitively(
        #[case] name: &str,
        #[case] term: Option<&str>,
        #[case] matched: bool,
    ) {
        assert_eq!(matches_term(name, term), matched);
    }

    #[tokio::test]
    async fn boards_are_filtered_by_name() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({
                "operationName": "SearchBoards",
                "variables": { "limit": 100, "page": 1, "workspaceIds": ["7"] }
            })))
            .with_body(data(json!({
                "boards": [
                    { "id": "1", "name": "Roadmap", "url": "https://example.monday.com/boards/1", "workspace": { "id": "7", "name": "Product" } },
                    { "id": "2", "name": "Bugs", "workspace": { "id": "7", "name": "Product" } }
                ]
            })))
            .create_async()
            .await;

        let result = Search
            .call(
                &client_for(&server),
                json!({ "searchType": "BOARD", "searchTerm": "road", "workspaceIds": [7] }),
            )
            .await
            .unwrap();

        let output: Value = serde_json::from_str(&content_text(result)).unwrap();
        assert_eq!(
            output,
            json!({
                "results": [{
                    "id": "1",
                    "name": "Roadmap",
                    "url": "https://example.monday.com/boards/1",
                    "workspace_id": "7"
                }],
                "count": 1,
                "page": 1,
                "has_more": false
            })
        );
    }

    #[tokio::test]
    async fn folders_are_searched_with_their_own_query() {
        let mut server = mockito::Server::new_async().await;
        let folders = server
            .mock("POST", "/")
            .match_body(operation("SearchFolders"))
            .with_body(data(json!({
                "folders": [{ "id": "30", "name": "Planning", "workspace": { "id": "7", "name": "Product" } }]
            })))
            .create_async()
            .await;

        let result = Search
            .call(
                &client_for(&server),
                json!({ "searchType": "FOLDERS", "limit": 1 }),
            )
            .await
            .unwrap();

        folders.assert_async().await;
        let output: Value = serde_json::from_str(&content_text(result)).unwrap();
        assert_eq!(output["count"], json!(1));
        assert_eq!(output["has_more"], json!(true));
    }
}
