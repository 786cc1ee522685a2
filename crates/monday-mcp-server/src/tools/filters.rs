//! Filter and ordering inputs shared by the item and insight tools, and their wire shape

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How filter rules are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FiltersOperator {
    #[default]
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RuleOperator {
    AnyOf,
    NotAnyOf,
    IsEmpty,
    IsNotEmpty,
    GreaterThan,
    GreaterThanOrEquals,
    LowerThan,
    LowerThanOrEqual,
    Between,
    ContainsText,
    NotContainsText,
    ContainsTerms,
    StartsWith,
    EndsWith,
    WithinTheNext,
    WithinTheLast,
}

fn default_rule_operator() -> RuleOperator {
    RuleOperator::AnyOf
}

/// A single filter rule as supplied by the agent
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterRule {
    /// The column to filter on. Use "name" for the item name.
    pub column_id: String,

    /// The value to compare with. For status or dropdown columns use label indexes or ids.
    pub compare_value: Value,

    /// The comparison to apply. Defaults to any_of.
    #[serde(default = "default_rule_operator")]
    pub operator: RuleOperator,

    /// The attribute of the column value to compare, for columns with several (e.g. "assignee")
    #[serde(default)]
    pub compare_attribute: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderBy {
    pub column_id: String,

    #[serde(default)]
    pub direction: SortDirection,
}

/// A filter rule in the API's shape
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRule {
    pub column_id: String,
    pub compare_value: Value,
    pub operator: RuleOperator,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_attribute: Option<String>,
}

impl From<&FilterRule> for QueryRule {
    fn from(rule: &FilterRule) -> Self {
        Self {
            column_id: rule.column_id.clone(),
            compare_value: rule.compare_value.clone(),
            operator: rule.operator,
            compare_attribute: rule.compare_attribute.clone(),
        }
    }
}

/// An ordering in the API's shape
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryOrderBy {
    pub column_id: String,
    pub direction: SortDirection,
}

impl From<&OrderBy> for QueryOrderBy {
    fn from(order_by: &OrderBy) -> Self {
        Self {
            column_id: order_by.column_id.clone(),
            direction: order_by.direction,
        }
    }
}

pub(crate) fn query_rules(filters: &[FilterRule]) -> Vec<QueryRule> {
    filters.iter().map(QueryRule::from).collect()
}

pub(crate) fn query_order_by(order_by: &[OrderBy]) -> Vec<QueryOrderBy> {
    order_by.iter().map(QueryOrderBy::from).collect()
}
