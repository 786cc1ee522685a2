use super::Document;

pub const BOARD_INSIGHTS: Document = Document {
    operation_name: "BoardInsights",
    query: r#"query BoardInsights($query: AggregateQueryInput!) {
  aggregate(query: $query) {
    results {
      entries {
        alias
        value {
          ... on AggregateBasicAggregationResult {
            result
          }
          ... on AggregateGroupByResult {
            value
          }
        }
      }
    }
  }
}"#,
};
