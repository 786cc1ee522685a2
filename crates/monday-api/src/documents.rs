//! GraphQL operations sent by the MCP tools
//!
//! Every operation is named so the platform's request logs can tell the tools apart.

pub mod boards;
pub mod docs;
pub mod insights;
pub mod items;
pub mod sprints;
pub mod users;
pub mod workspaces;

/// A named GraphQL operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Document {
    pub operation_name: &'static str,
    pub query: &'static str,
}
