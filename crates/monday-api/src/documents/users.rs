use super::Document;

pub const GET_ME: Document = Document {
    operation_name: "GetMe",
    query: r#"query GetMe {
  me {
    id
    name
    email
    title
    enabled
    is_admin
    is_guest
    teams {
      id
      name
    }
  }
}"#,
};

pub const LIST_USERS: Document = Document {
    operation_name: "ListUsers",
    query: r#"query ListUsers($userIds: [ID!], $name: String, $limit: Int) {
  users(ids: $userIds, name: $name, limit: $limit) {
    id
    name
    email
    title
    enabled
    is_admin
    is_guest
  }
}"#,
};

pub const LIST_TEAMS: Document = Document {
    operation_name: "ListTeams",
    query: r#"query ListTeams($teamIds: [ID!], $includeMembers: Boolean!) {
  teams(ids: $teamIds) {
    id
    name
    owners {
      id
      name
    }
    users @include(if: $includeMembers) {
      id
      name
      email
      title
    }
  }
}"#,
};
