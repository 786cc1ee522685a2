//! Paged item listing with optional smart search and column value normalization

use async_trait::async_trait;
use monday_api::documents::items::{GET_BOARD_ITEMS_PAGE, SMART_SEARCH_BOARD_ITEM_IDS};
use monday_api::types::{ColumnKind, ColumnValue, Item, ItemsPage, NamedRef};
use monday_api::{DEV_API_VERSION, MondayClient, Request};
use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use super::filters::{
    FilterRule, FiltersOperator, OrderBy, QueryOrderBy, QueryRule, RuleOperator,
    query_order_by, query_rules,
};
use super::{
    MondayTool, ToolAccess, convert_arguments, decode_stringified, json_result, text_result,
};
use crate::constants::items_page::{
    DEFAULT_LIMIT, DEFAULT_SUBITEM_LIMIT, MAX_LIMIT, MAX_SUBITEM_LIMIT, NO_ITEMS_FOUND,
    SMART_SEARCH_SIZE, SMART_SEARCH_TIMEOUT, UNSUPPORTED_COLUMN_VALUE,
};
use crate::constants::prefix::VALIDATION_ERROR;
use crate::errors::{ApiResultExt, McpError, ToolError};
use crate::schema_from_type;

pub const GET_BOARD_ITEMS_PAGE_TOOL_NAME: &str = "get_board_items_page";

const NAME_COLUMN: &str = "name";

/// Input for the board items page tool
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    /// The id of the board to get items from
    pub board_id: u64,

    /// The number of items to return, between 1 and 500. Defaults to 25.
    #[serde(default)]
    pub limit: Option<u32>,

    /// The cursor returned by a previous call. Filters, ordering and search are ignored when set
    /// because the cursor already carries them.
    #[serde(default)]
    pub cursor: Option<String>,

    /// Free text to search items by
    #[serde(default)]
    pub search_term: Option<String>,

    /// Only return these items
    #[serde(default)]
    pub item_ids: Option<Vec<u64>>,

    #[serde(default)]
    pub filters: Option<Vec<FilterRule>>,

    /// `filters` as a JSON string, for clients that cannot send arrays of objects
    #[serde(default)]
    pub filters_stringified: Option<String>,

    #[serde(default)]
    pub filters_operator: FiltersOperator,

    #[serde(default)]
    pub order_by: Option<Vec<OrderBy>>,

    /// Include the items' column values
    #[serde(default)]
    pub include_columns: bool,

    /// Restrict the returned column values to these columns
    #[serde(default)]
    pub column_ids: Option<Vec<String>>,

    #[serde(default)]
    pub include_sub_items: bool,

    /// The number of sub-items to return per item, between 1 and 100. Defaults to 25.
    #[serde(default)]
    pub sub_item_limit: Option<u32>,
}

/// The `ItemsQuery` argument of `items_page`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,
    pub operator: FiltersOperator,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<QueryRule>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<QueryOrderBy>,
}

impl ItemsQuery {
    fn is_empty(&self) -> bool {
        self.ids.is_none() && self.rules.is_empty() && self.order_by.is_empty()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageVariables<'a> {
    board_id: String,
    limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    cursor: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    query_params: Option<ItemsQuery>,
    include_columns: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    column_ids: Option<&'a [String]>,
    include_sub_items: bool,
}

/// Variables for the page query. A cursor already encodes the query, so `queryParams` is only
/// sent without one.
pub fn page_variables<'a>(
    input: &'a Input,
    limit: u32,
    query_params: Option<ItemsQuery>,
) -> PageVariables<'a> {
    let cursor = input.cursor.as_deref();
    PageVariables {
        board_id: input.board_id.to_string(),
        limit,
        cursor,
        query_params: query_params.filter(|query| cursor.is_none() && !query.is_empty()),
        include_columns: input.include_columns,
        column_ids: input.column_ids.as_deref(),
        include_sub_items: input.include_sub_items,
    }
}

/// Render a column value the way agents can use it
pub fn normalize_column_value(column_value: &ColumnValue) -> Value {
    match column_value.kind() {
        ColumnKind::BoardRelation => {
            json!(column_value.linked_items.as_deref().unwrap_or_default())
        }
        ColumnKind::Formula => column_value
            .display_value
            .clone()
            .map_or(Value::Null, Value::String),
        ColumnKind::Mirror => Value::String(UNSUPPORTED_COLUMN_VALUE.to_string()),
        ColumnKind::Doc | ColumnKind::Other => match column_value.text.as_deref() {
            Some(text) if !text.is_empty() => Value::String(text.to_string()),
            _ => match column_value.value.as_deref() {
                Some(raw) => serde_json::from_str(raw)
                    .unwrap_or_else(|_| Value::String(raw.to_string())),
                None => Value::Null,
            },
        },
    }
}

#[derive(Debug, Serialize)]
pub struct MappedItem {
    pub id: String,
    pub name: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_values: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subitems: Option<Vec<MappedItem>>,
}

fn map_item(item: Item, sub_item_limit: usize) -> MappedItem {
    MappedItem {
        id: item.id,
        name: item.name,
        created_at: item.created_at,
        updated_at: item.updated_at,
        column_values: item.column_values.map(|values| {
            values
                .iter()
                .map(|value| (value.id.clone(), normalize_column_value(value)))
                .collect()
        }),
        subitems: item.subitems.map(|subitems| {
            subitems
                .into_iter()
                .take(sub_item_limit)
                .map(|subitem| map_item(subitem, sub_item_limit))
                .collect()
        }),
    }
}

#[derive(Debug, Deserialize)]
struct PageData {
    #[serde(default)]
    boards: Option<Vec<PageBoard>>,
}

#[derive(Debug, Deserialize)]
struct PageBoard {
    id: String,
    name: String,
    #[serde(default)]
    items_page: Option<ItemsPage>,
}

#[derive(Debug, Deserialize)]
struct SmartSearchData {
    search_items: Option<SmartSearchResults>,
}

#[derive(Debug, Deserialize)]
struct SmartSearchResults {
    #[serde(default)]
    results: Vec<SmartSearchResult>,
}

#[derive(Debug, Deserialize)]
struct SmartSearchResult {
    data: Option<SmartSearchItem>,
}

#[derive(Debug, Deserialize)]
struct SmartSearchItem {
    id: Value,
}

/// Ids of the board's items that smart search matched for the term
async fn smart_search(
    client: &MondayClient,
    board_id: u64,
    term: &str,
) -> Result<Vec<String>, monday_api::Error> {
    let data: SmartSearchData = client
        .request(
            Request::from(&SMART_SEARCH_BOARD_ITEM_IDS)
                .variables(json!({
                    "searchTerm": term,
                    "boardIds": [board_id.to_string()],
                    "size": SMART_SEARCH_SIZE,
                }))
                .api_version(DEV_API_VERSION)
                .timeout(SMART_SEARCH_TIMEOUT),
        )
        .await?;

    Ok(data
        .search_items
        .map(|search| search.results)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|result| match result.data?.id {
            Value::String(id) => Some(id),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        })
        .collect())
}

/// Replace any rule on the item name with a `contains_text` rule for the term
fn name_contains(rules: &mut Vec<QueryRule>, term: &str) {
    rules.retain(|rule| rule.column_id != NAME_COLUMN);
    rules.push(QueryRule {
        column_id: NAME_COLUMN.to_string(),
        compare_value: Value::String(term.to_string()),
        operator: RuleOperator::ContainsText,
        compare_attribute: None,
    });
}

enum QueryParams {
    Query(ItemsQuery),
    NoMatches,
}

async fn resolve_query_params(
    client: &MondayClient,
    input: &Input,
    filters: &[FilterRule],
) -> Result<QueryParams, ToolError> {
    let mut query = ItemsQuery {
        ids: input
            .item_ids
            .as_ref()
            .map(|ids| ids.iter().map(u64::to_string).collect()),
        operator: input.filters_operator,
        rules: query_rules(filters),
        order_by: query_order_by(input.order_by.as_deref().unwrap_or_default()),
    };

    let Some(term) = input
        .search_term
        .as_deref()
        .map(str::trim)
        .filter(|term| !term.is_empty())
    else {
        return Ok(QueryParams::Query(query));
    };

    match smart_search(client, input.board_id, term).await {
        Ok(found) => {
            let matched: Vec<String> = match &query.ids {
                Some(requested) => found
                    .into_iter()
                    .filter(|id| requested.contains(id))
                    .collect(),
                None => found,
            };
            if matched.is_empty() {
                return Ok(QueryParams::NoMatches);
            }
            query.ids = Some(matched);
        }
        Err(error) if error.is_timeout() => {
            return Err(ToolError::api("Smart search timed out", error));
        }
        Err(error) => {
            warn!(%error, "Smart search failed, filtering by item name instead");
            name_contains(&mut query.rules, term);
        }
    }

    Ok(QueryParams::Query(query))
}

fn validate(input: &Input) -> Result<(u32, usize), String> {
    let limit = input.limit.unwrap_or(DEFAULT_LIMIT);
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(format!(
            "{VALIDATION_ERROR} limit must be between 1 and {MAX_LIMIT}"
        ));
    }
    let sub_item_limit = input.sub_item_limit.unwrap_or(DEFAULT_SUBITEM_LIMIT);
    if !(1..=MAX_SUBITEM_LIMIT).contains(&sub_item_limit) {
        return Err(format!(
            "{VALIDATION_ERROR} subItemLimit must be between 1 and {MAX_SUBITEM_LIMIT}"
        ));
    }
    Ok((limit, sub_item_limit as usize))
}

#[derive(Debug, Serialize)]
struct Pagination {
    has_more: bool,
    #[serde(rename = "nextCursor")]
    next_cursor: Option<String>,
    count: usize,
}

#[derive(Debug, Serialize)]
struct PageOutput {
    board: Option<NamedRef>,
    items: Vec<MappedItem>,
    pagination: Pagination,
}

pub struct GetBoardItemsPage;

#[async_trait]
impl MondayTool for GetBoardItemsPage {
    fn name(&self) -> &'static str {
        GET_BOARD_ITEMS_PAGE_TOOL_NAME
    }

    fn tool(&self) -> Tool {
        Tool::new(
            GET_BOARD_ITEMS_PAGE_TOOL_NAME,
            "Get a page of items from a board, optionally filtered, ordered or searched by text. Pass the returned nextCursor to get the next page. Use get_board_info first to find column ids for filters.",
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
        let (limit, sub_item_limit) = match validate(&input) {
            Ok(limits) => limits,
            Err(message) => return Ok(text_result(message)),
        };
        let filters = decode_stringified(
            input.filters.clone(),
            input.filters_stringified.as_deref(),
            "filtersStringified",
        )?
        .unwrap_or_default();

        let query_params = if input.cursor.is_some() {
            None
        } else {
            match resolve_query_params(client, &input, &filters).await? {
                QueryParams::Query(query) => Some(query),
                QueryParams::NoMatches => return Ok(text_result(NO_ITEMS_FOUND)),
            }
        };

        let variables = page_variables(&input, limit, query_params);
        debug!(board_id = input.board_id, ?variables, "Fetching board items page");
        let data: PageData = client
            .request(
                Request::from(&GET_BOARD_ITEMS_PAGE)
                    .variables(serde_json::to_value(&variables).map_err(ToolError::from)?),
            )
            .await
            .context("Failed to get board items")?;

        let board = data.boards.and_then(|boards| boards.into_iter().next());
        let (board, page) = match board {
            Some(board) => (
                Some(NamedRef {
                    id: board.id,
                    name: board.name,
                }),
                board.items_page,
            ),
            None => (None, None),
        };
        let (items, next_cursor) = page.map_or((Vec::new(), None), |page| (page.items, page.cursor));
        let items: Vec<MappedItem> = items
            .into_iter()
            .map(|item| map_item(item, sub_item_limit))
            .collect();

        json_result(&PageOutput {
            board,
            pagination: Pagination {
                has_more: next_cursor.is_some(),
                next_cursor,
                count: items.len(),
            },
            items,
        })
    }
}
