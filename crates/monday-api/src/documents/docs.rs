use super::Document;

pub const CREATE_DOC: Document = Document {
    operation_name: "CreateDoc",
    query: r#"mutation CreateDoc($location: CreateDocInput!) {
  create_doc(location: $location) {
    id
    object_id
    url
  }
}"#,
};

pub const UPDATE_DOC_NAME: Document = Document {
    operation_name: "UpdateDocName",
    query: r#"mutation UpdateDocName($docId: ID!, $name: String!) {
  update_doc_name(docId: $docId, name: $name)
}"#,
};

pub const ADD_CONTENT_TO_DOC_FROM_MARKDOWN: Document = Document {
    operation_name: "AddContentToDocFromMarkdown",
    query: r#"mutation AddContentToDocFromMarkdown($docId: ID!, $markdown: String!) {
  add_content_to_doc_from_markdown(docId: $docId, markdown: $markdown) {
    success
    block_ids
    error
  }
}"#,
};

pub const GET_DOC_BY_OBJECT_ID: Document = Document {
    operation_name: "GetDocByObjectId",
    query: r#"query GetDocByObjectId($objectId: ID!) {
  docs(object_ids: [$objectId]) {
    id
    object_id
    name
    url
  }
}"#,
};

pub const EXPORT_MARKDOWN_FROM_DOC: Document = Document {
    operation_name: "ExportMarkdownFromDoc",
    query: r#"query ExportMarkdownFromDoc($docId: ID!) {
  export_markdown_from_doc(docId: $docId) {
    success
    markdown
    error
  }
}"#,
};

pub const SEARCH_DOCS: Document = Document {
    operation_name: "SearchDocs",
    query: r#"query SearchDocs($limit: Int!, $page: Int!, $workspaceIds: [ID]) {
  docs(limit: $limit, page: $page, workspace_ids: $workspaceIds) {
    id
    object_id
    name
    url
    workspace_id
  }
}"#,
};
