use super::Document;

pub const GET_SPRINTS_BOARD_ITEMS: Document = Document {
    operation_name: "GetSprintsBoardItems",
    query: r#"query GetSprintsBoardItems($boardId: ID!, $limit: Int!, $columnIds: [String!]) {
  boards(ids: [$boardId]) {
    id
    name
    columns {
      id
      title
      type
    }
    items_page(limit: $limit) {
      items {
        id
        name
        column_values(ids: $columnIds) {
          id
          type
          text
          value
        }
      }
    }
  }
}"#,
};

pub const GET_SPRINT_ITEM: Document = Document {
    operation_name: "GetSprintItem",
    query: r#"query GetSprintItem($itemId: ID!) {
  items(ids: [$itemId]) {
    id
    name
    board {
      id
      name
      columns {
        id
        title
        type
      }
    }
    column_values {
      id
      type
      text
      value
    }
  }
}"#,
};
