//! Aggregated insights over a board's items
//!
//! The agent describes what it wants as a flat list of `{columnId, function?}` pairs plus
//! optional grouping, filters and ordering. [`build_aggregation_query`] turns that into the
//! `select`/`group_by`/`query` tree the aggregation API expects, and the response entries are
//! flattened back into one JSON object per row.

use std::collections::HashMap;

use async_trait::async_trait;
use monday_api::documents::insights::BOARD_INSIGHTS;
use monday_api::{MondayClient, Request};
use rmcp::model::{CallToolResult, Tool};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::debug;

use super::filters::{
    FilterRule, FiltersOperator, OrderBy, QueryOrderBy, QueryRule, query_order_by, query_rules,
};
use super::{
    MondayTool, ToolAccess, convert_arguments, decode_stringified, json_result, text_result,
};
use crate::constants::board_insights::{DEFAULT_LIMIT, MAX_LIMIT, NO_RESULTS};
use crate::constants::prefix::VALIDATION_ERROR;
use crate::errors::{ApiResultExt, McpError};
use crate::schema_from_type;

pub const BOARD_INSIGHTS_TOOL_NAME: &str = "board_insights";

const MISSING_AGGREGATIONS: &str = "Input must contain either the 'aggregations' field or the 'aggregationsStringified' field.";

/// Functions accepted by the aggregation API
///
/// Transformative functions map each row's value and must therefore be grouped on. The rest
/// reduce many rows to one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AggregationFunction {
    Count,
    CountDistinct,
    CountSubitems,
    CountItems,
    Sum,
    Average,
    Median,
    Min,
    Max,
    MinMax,
    Label,
    Color,
    Person,
    Upper,
    Lower,
    Trim,
    Left,
    Length,
    Flatten,
    StartDate,
    EndDate,
    Hour,
    PhoneCountryShortName,
    DateTruncDay,
    DateTruncWeek,
    DateTruncMonth,
    DateTruncQuarter,
    DateTruncYear,
    IsDone,
}

impl AggregationFunction {
    pub fn is_transformative(self) -> bool {
        use AggregationFunction::*;
        match self {
            Count | CountDistinct | CountSubitems | CountItems | Sum | Average | Median | Min
            | Max | MinMax => false,
            Label | Color | Person | Upper | Lower | Trim | Left | Length | Flatten
            | StartDate | EndDate | Hour | PhoneCountryShortName | DateTruncDay
            | DateTruncWeek | DateTruncMonth | DateTruncQuarter | DateTruncYear | IsDone => true,
        }
    }

    pub fn as_str(self) -> &'static str {
        use AggregationFunction::*;
        match self {
            Count => "COUNT",
            CountDistinct => "COUNT_DISTINCT",
            CountSubitems => "COUNT_SUBITEMS",
            CountItems => "COUNT_ITEMS",
            Sum => "SUM",
            Average => "AVERAGE",
            Median => "MEDIAN",
            Min => "MIN",
            Max => "MAX",
            MinMax => "MIN_MAX",
            Label => "LABEL",
            Color => "COLOR",
            Person => "PERSON",
            Upper => "UPPER",
            Lower => "LOWER",
            Trim => "TRIM",
            Left => "LEFT",
            Length => "LENGTH",
            Flatten => "FLATTEN",
            StartDate => "START_DATE",
            EndDate => "END_DATE",
            Hour => "HOUR",
            PhoneCountryShortName => "PHONE_COUNTRY_SHORT_NAME",
            DateTruncDay => "DATE_TRUNC_DAY",
            DateTruncWeek => "DATE_TRUNC_WEEK",
            DateTruncMonth => "DATE_TRUNC_MONTH",
            DateTruncQuarter => "DATE_TRUNC_QUARTER",
            DateTruncYear => "DATE_TRUNC_YEAR",
            IsDone => "IS_DONE",
        }
    }
}

/// One column to select, optionally through a function
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AggregationRequest {
    pub column_id: String,

    /// Omit to select the plain column value, which also groups by it
    #[serde(default)]
    pub function: Option<AggregationFunction>,
}

/// Input for the board insights tool
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    /// The id of the board to get insights for
    pub board_id: u64,

    /// The columns to select. Plain columns are grouped on. Functions such as SUM or COUNT_ITEMS
    /// aggregate, functions such as LABEL or DATE_TRUNC_MONTH transform and are grouped on.
    #[serde(default)]
    pub aggregations: Option<Vec<AggregationRequest>>,

    /// `aggregations` as a JSON string, for clients that cannot send arrays of objects
    #[serde(default)]
    pub aggregations_stringified: Option<String>,

    /// Column ids to group by. Each should also be requested as a plain aggregation.
    #[serde(default)]
    pub group_by: Option<Vec<String>>,

    #[serde(default)]
    pub group_by_stringified: Option<String>,

    /// Rules restricting which items are aggregated
    #[serde(default)]
    pub filters: Option<Vec<FilterRule>>,

    #[serde(default)]
    pub filters_stringified: Option<String>,

    /// How the filter rules are combined
    #[serde(default)]
    pub filters_operator: FiltersOperator,

    #[serde(default)]
    pub order_by: Option<Vec<OrderBy>>,

    #[serde(default)]
    pub order_by_stringified: Option<String>,

    /// The maximum number of rows to return
    #[serde(default)]
    pub limit: Option<u32>,
}

/// The decoded and validated request the query is built from
#[derive(Debug, Clone, PartialEq)]
pub struct InsightsRequest {
    pub board_id: u64,
    pub aggregations: Vec<AggregationRequest>,
    pub group_by: Vec<String>,
    pub filters: Option<Vec<FilterRule>>,
    pub filters_operator: FiltersOperator,
    pub order_by: Option<Vec<OrderBy>>,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnRef {
    pub column_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionSelect {
    pub function: AggregationFunction,
    pub params: Vec<SelectElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectElement {
    Column {
        column: ColumnRef,
        #[serde(rename = "as")]
        alias: String,
    },
    Function {
        function: FunctionSelect,
        #[serde(rename = "as")]
        alias: String,
    },
}

impl SelectElement {
    fn column(column_id: &str) -> Self {
        SelectElement::Column {
            column: ColumnRef {
                column_id: column_id.to_string(),
            },
            alias: column_id.to_string(),
        }
    }

    pub fn alias(&self) -> &str {
        match self {
            SelectElement::Column { alias, .. } | SelectElement::Function { alias, .. } => alias,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupByElement {
    pub column_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationSource {
    pub id: String,
    #[serde(rename = "type")]
    pub source_type: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationFilter {
    pub rules: Vec<QueryRule>,
    pub operator: FiltersOperator,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<QueryOrderBy>,
}

/// The `AggregateQueryInput` sent to the API
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationQuery {
    pub select: Vec<SelectElement>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub group_by: Vec<GroupByElement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<AggregationFilter>,
    pub from: AggregationSource,
    pub limit: u32,
}

fn push_group_by(group_by: &mut Vec<GroupByElement>, column_id: &str) {
    if !group_by.iter().any(|entry| entry.column_id == column_id) {
        group_by.push(GroupByElement {
            column_id: column_id.to_string(),
        });
    }
}

/// Build the aggregation query input for a validated request
pub fn build_aggregation_query(request: &InsightsRequest) -> AggregationQuery {
    let mut aggregations = request.aggregations.clone();
    for column_id in &request.group_by {
        let has_label = aggregations.iter().any(|aggregation| {
            aggregation.function == Some(AggregationFunction::Label)
                && &aggregation.column_id == column_id
        });
        if !has_label {
            aggregations.push(AggregationRequest {
                column_id: column_id.clone(),
                function: Some(AggregationFunction::Label),
            });
        }
    }

    let mut group_by = Vec::new();
    for column_id in &request.group_by {
        push_group_by(&mut group_by, column_id);
    }

    let mut occurrences: HashMap<(AggregationFunction, &str), usize> = HashMap::new();
    let mut select: Vec<SelectElement> = Vec::new();
    for aggregation in &aggregations {
        let column_id = aggregation.column_id.as_str();
        match aggregation.function {
            Some(function) => {
                let occurrence = occurrences.entry((function, column_id)).or_insert(0);
                let alias = format!("{}_{}_{}", function.as_str(), column_id, occurrence);
                *occurrence += 1;

                let params = if function == AggregationFunction::CountItems {
                    Vec::new()
                } else {
                    vec![SelectElement::column(column_id)]
                };
                if function.is_transformative() {
                    push_group_by(&mut group_by, &alias);
                }
                select.push(SelectElement::Function {
                    function: FunctionSelect { function, params },
                    alias,
                });
            }
            None => {
                push_group_by(&mut group_by, column_id);
                if !select.iter().any(|element| element.alias() == column_id) {
                    select.push(SelectElement::column(column_id));
                }
            }
        }
    }

    for entry in &group_by {
        if !select.iter().any(|element| element.alias() == entry.column_id) {
            select.push(SelectElement::column(&entry.column_id));
        }
    }

    let query = (request.filters.is_some() || request.order_by.is_some()).then(|| {
        AggregationFilter {
            rules: query_rules(request.filters.as_deref().unwrap_or_default()),
            operator: request.filters_operator,
            order_by: query_order_by(request.order_by.as_deref().unwrap_or_default()),
        }
    });

    AggregationQuery {
        select,
        group_by,
        query,
        from: AggregationSource {
            id: request.board_id.to_string(),
            source_type: "TABLE",
        },
        limit: request.limit,
    }
}

#[derive(Debug, Deserialize)]
struct AggregateData {
    aggregate: Option<AggregateResults>,
}

#[derive(Debug, Deserialize)]
struct AggregateResults {
    #[serde(default)]
    results: Option<Vec<ResultRow>>,
}

#[derive(Debug, Deserialize)]
struct ResultRow {
    #[serde(default)]
    entries: Vec<ResultEntry>,
}

#[derive(Debug, Deserialize)]
struct ResultEntry {
    #[serde(default)]
    alias: Option<String>,
    #[serde(default)]
    value: Option<Map<String, Value>>,
}

fn flatten_row(row: ResultRow) -> Map<String, Value> {
    row.entries
        .into_iter()
        .filter_map(|entry| {
            let alias = entry.alias.filter(|alias| !alias.is_empty())?;
            let value = entry
                .value
                .and_then(|mut value| value.remove("result").or_else(|| value.remove("value")))
                .unwrap_or(Value::Null);
            Some((alias, value))
        })
        .collect()
}

/// Decode the stringified fallbacks and apply the limits shared by every input path
fn resolve(input: Input) -> Result<Result<InsightsRequest, String>, McpError> {
    let Some(aggregations) = decode_stringified(
        input.aggregations,
        input.aggregations_stringified.as_deref(),
        "aggregationsStringified",
    )?
    else {
        return Ok(Err(MISSING_AGGREGATIONS.to_string()));
    };
    let group_by = decode_stringified(
        input.group_by,
        input.group_by_stringified.as_deref(),
        "groupByStringified",
    )?;
    let filters = decode_stringified(
        input.filters,
        input.filters_stringified.as_deref(),
        "filtersStringified",
    )?;
    let order_by = decode_stringified(
        input.order_by,
        input.order_by_stringified.as_deref(),
        "orderByStringified",
    )?;

    if aggregations.is_empty() {
        return Ok(Err(format!(
            "{VALIDATION_ERROR} At least one aggregation is required"
        )));
    }
    let limit = input.limit.unwrap_or(DEFAULT_LIMIT);
    if limit == 0 {
        return Ok(Err(format!(
            "{VALIDATION_ERROR} limit must be a positive number"
        )));
    }

    Ok(Ok(InsightsRequest {
        board_id: input.board_id,
        aggregations,
        group_by: group_by.unwrap_or_default(),
        filters,
        filters_operator: input.filters_operator,
        order_by,
        limit: limit.min(MAX_LIMIT),
    }))
}

pub struct BoardInsights;

#[async_trait]
impl MondayTool for BoardInsights {
    fn name(&self) -> &'static str {
        BOARD_INSIGHTS_TOOL_NAME
    }

    fn tool(&self) -> Tool {
        Tool::new(
            BOARD_INSIGHTS_TOOL_NAME,
            "Calculate insights about a board's items: counts, sums, averages and other aggregations, optionally grouped by columns and restricted by filters. Use get_board_info first to find the column ids. Every column in groupBy must also be requested as an aggregation without a function.",
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
        let request = match resolve(input)? {
            Ok(request) => request,
            Err(message) => return Ok(text_result(message)),
        };

        let query = build_aggregation_query(&request);
        debug!(board_id = request.board_id, ?query, "Running board insights query");
        let data: AggregateData = client
            .request(Request::from(&BOARD_INSIGHTS).variables(json!({ "query": query })))
            .await
            .context("Failed to get board insights")?;

        let rows: Vec<Map<String, Value>> = data
            .aggregate
            .and_then(|aggregate| aggregate.results)
            .unwrap_or_default()
            .into_iter()
            .map(flatten_row)
            .collect();
        if rows.is_empty() {
            return Ok(text_result(NO_RESULTS));
        }

        json_result(&json!({ "count": rows.len(), "rows": rows }))
    }
}
