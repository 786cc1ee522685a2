use super::Document;

pub const GET_WORKSPACE_INFO: Document = Document {
    operation_name: "GetWorkspaceInfo",
    query: r#"query GetWorkspaceInfo($workspaceId: ID!) {
  workspaces(ids: [$workspaceId]) {
    id
    name
    description
    kind
    created_at
    state
  }
  boards(workspace_ids: [$workspaceId], limit: 100, state: active) {
    id
    name
    board_folder_id
  }
  docs(workspace_ids: [$workspaceId], limit: 100) {
    id
    name
    doc_folder_id
  }
  folders(workspace_ids: [$workspaceId]) {
    id
    name
  }
}"#,
};

pub const LIST_WORKSPACES: Document = Document {
    operation_name: "ListWorkspaces",
    query: r#"query ListWorkspaces($limit: Int!, $page: Int!) {
  workspaces(limit: $limit, page: $page, state: active) {
    id
    name
    description
    kind
  }
}"#,
};

pub const SEARCH_FOLDERS: Document = Document {
    operation_name: "SearchFolders",
    query: r#"query SearchFolders($limit: Int!, $page: Int!, $workspaceIds: [ID]) {
  folders(limit: $limit, page: $page, workspace_ids: $workspaceIds) {
    id
    name
    workspace {
      id
      name
    }
  }
}"#,
};
