use super::Document;

/// One page of a board's items. Column values and sub-items are only selected when asked for.
pub const GET_BOARD_ITEMS_PAGE: Document = Document {
    operation_name: "GetBoardItemsPage",
    query: r#"query GetBoardItemsPage($boardId: ID!, $limit: Int, $cursor: String, $queryParams: ItemsQuery, $includeColumns: Boolean!, $columnIds: [String!], $includeSubItems: Boolean!) {
  boards(ids: [$boardId]) {
    id
    name
    items_page(limit: $limit, cursor: $cursor, query_params: $queryParams) {
      cursor
      items {
        id
        name
        created_at
        updated_at
        column_values(ids: $columnIds) @include(if: $includeColumns) {
          ...ColumnValueFields
        }
        subitems @include(if: $includeSubItems) {
          id
          name
          created_at
          updated_at
          column_values(ids: $columnIds) @include(if: $includeColumns) {
            ...ColumnValueFields
          }
        }
      }
    }
  }
}

fragment ColumnValueFields on ColumnValue {
  id
  type
  text
  value
  ... on BoardRelationValue {
    linked_items {
      id
      name
      board {
        id
        name
      }
    }
  }
  ... on FormulaValue {
    display_value
  }
}"#,
};

/// Fuzzy item lookup, only available on the dev API version
pub const SMART_SEARCH_BOARD_ITEM_IDS: Document = Document {
    operation_name: "SmartSearchBoardItemIds",
    query: r#"query SmartSearchBoardItemIds($searchTerm: String!, $boardIds: [ID!], $size: Int) {
  search_items(query: $searchTerm, board_ids: $boardIds, size: $size) {
    results {
      data {
        id
      }
    }
  }
}"#,
};

pub const GET_ITEM_BOARD_COLUMNS: Document = Document {
    operation_name: "GetItemBoardColumns",
    query: r#"query GetItemBoardColumns($itemId: ID!) {
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
  }
}"#,
};

pub const CREATE_ITEM: Document = Document {
    operation_name: "CreateItem",
    query: r#"mutation CreateItem($boardId: ID!, $itemName: String!, $groupId: String, $columnValues: JSON) {
  create_item(board_id: $boardId, item_name: $itemName, group_id: $groupId, column_values: $columnValues) {
    id
    name
    url
  }
}"#,
};

pub const CREATE_SUBITEM: Document = Document {
    operation_name: "CreateSubitem",
    query: r#"mutation CreateSubitem($parentItemId: ID!, $itemName: String!, $columnValues: JSON) {
  create_subitem(parent_item_id: $parentItemId, item_name: $itemName, column_values: $columnValues) {
    id
    name
    url
  }
}"#,
};

pub const CHANGE_ITEM_COLUMN_VALUES: Document = Document {
    operation_name: "ChangeItemColumnValues",
    query: r#"mutation ChangeItemColumnValues($boardId: ID!, $itemId: ID!, $columnValues: JSON!) {
  change_multiple_column_values(board_id: $boardId, item_id: $itemId, column_values: $columnValues) {
    id
    name
  }
}"#,
};

pub const DELETE_ITEM: Document = Document {
    operation_name: "DeleteItem",
    query: r#"mutation DeleteItem($itemId: ID!) {
  delete_item(item_id: $itemId) {
    id
  }
}"#,
};

pub const MOVE_ITEM_TO_GROUP: Document = Document {
    operation_name: "MoveItemToGroup",
    query: r#"mutation MoveItemToGroup($itemId: ID!, $groupId: String!) {
  move_item_to_group(item_id: $itemId, group_id: $groupId) {
    id
  }
}"#,
};

pub const CREATE_UPDATE: Document = Document {
    operation_name: "CreateUpdate",
    query: r#"mutation CreateUpdate($itemId: ID!, $body: String!) {
  create_update(item_id: $itemId, body: $body) {
    id
  }
}"#,
};
