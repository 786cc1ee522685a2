use super::Document;

pub const GET_BOARD_INFO: Document = Document {
    operation_name: "GetBoardInfo",
    query: r#"query GetBoardInfo($boardId: ID!) {
  boards(ids: [$boardId]) {
    id
    name
    description
    state
    board_kind
    items_count
    url
    workspace {
      id
      name
    }
    owners {
      id
      name
    }
    columns {
      id
      title
      type
      description
      settings_str
    }
    groups {
      id
      title
      color
      position
    }
  }
}"#,
};

pub const LIST_BOARDS_WITH_COLUMNS: Document = Document {
    operation_name: "ListBoardsWithColumns",
    query: r#"query ListBoardsWithColumns($limit: Int!, $workspaceIds: [ID]) {
  boards(limit: $limit, workspace_ids: $workspaceIds, order_by: used_at, state: active) {
    id
    name
    workspace_id
    columns {
      id
      title
      type
      settings_str
    }
  }
}"#,
};

pub const SEARCH_BOARDS: Document = Document {
    operation_name: "SearchBoards",
    query: r#"query SearchBoards($limit: Int!, $page: Int!, $workspaceIds: [ID]) {
  boards(limit: $limit, page: $page, workspace_ids: $workspaceIds, state: active) {
    id
    name
    url
    workspace {
      id
      name
    }
  }
}"#,
};

pub const CREATE_GROUP: Document = Document {
    operation_name: "CreateGroup",
    query: r#"mutation CreateGroup($boardId: ID!, $groupName: String!, $groupColor: String, $relativeTo: String, $positionRelativeMethod: PositionRelative) {
  create_group(board_id: $boardId, group_name: $groupName, group_color: $groupColor, relative_to: $relativeTo, position_relative_method: $positionRelativeMethod) {
    id
    title
  }
}"#,
};

pub const CREATE_COLUMN: Document = Document {
    operation_name: "CreateColumn",
    query: r#"mutation CreateColumn($boardId: ID!, $columnType: ColumnType!, $columnTitle: String!, $columnDescription: String, $columnSettings: JSON) {
  create_column(board_id: $boardId, column_type: $columnType, title: $columnTitle, description: $columnDescription, defaults: $columnSettings) {
    id
    title
    type
  }
}"#,
};
