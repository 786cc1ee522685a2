//! Run an arbitrary GraphQL operation against the API
//!
//! The operation is parsed before it is sent so that read-only mode can refuse mutations.

use apollo_compiler::ast::{Definition, Document, OperationType};
use apollo_compiler::parser::Parser;
use apollo_compiler::validation::WithErrors;
use async_trait::async_trait;
use monday_api::{MondayClient, Request};
use rmcp::model::{CallToolResult, ErrorCode, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{MondayTool, ToolAccess, convert_arguments, json_result};
use crate::errors::{ApiResultExt, McpError, ToolError};
use crate::schema_from_type;

pub const ALL_MONDAY_API_TOOL_NAME: &str = "all_monday_api";

#[derive(Debug, Deserialize, JsonSchema)]
pub struct Input {
    /// A single GraphQL query or mutation. Fragments may be included.
    pub query: String,

    /// Variables for the operation, as a JSON object or a JSON-encoded object
    #[serde(default)]
    pub variables: Option<Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    #[error("Could not parse GraphQL document: {0}")]
    GraphQLDocument(Box<WithErrors<Document>>),

    #[error("No operations defined")]
    NoOperations,

    #[error("Too many operations. Expected 1 but got {0}")]
    TooManyOperations(usize),

    #[error("Only operations and fragments are allowed")]
    NotExecutable,

    #[error("Mutations are not allowed in read-only mode")]
    MutationNotAllowed,

    #[error("Subscriptions are not supported")]
    Subscription,
}

impl From<OperationError> for McpError {
    fn from(error: OperationError) -> Self {
        McpError::new(ErrorCode::INVALID_PARAMS, error.to_string(), None)
    }
}

/// Check that `source_text` holds exactly one runnable operation and return its name
fn operation_name(
    source_text: &str,
    allow_mutations: bool,
) -> Result<Option<String>, OperationError> {
    let document = Parser::new()
        .parse_ast(source_text, "operation.graphql")
        .map_err(|e| OperationError::GraphQLDocument(Box::new(e)))?;

    let mut operations = Vec::new();
    for definition in &document.definitions {
        match definition {
            Definition::OperationDefinition(operation) => operations.push(operation),
            Definition::FragmentDefinition(_) => {}
            _ => return Err(OperationError::NotExecutable),
        }
    }

    let operation = match operations.as_slice() {
        [] => return Err(OperationError::NoOperations),
        [operation] => operation,
        _ => return Err(OperationError::TooManyOperations(operations.len())),
    };

    match operation.operation_type {
        OperationType::Query => {}
        OperationType::Mutation if allow_mutations => {}
        OperationType::Mutation => return Err(OperationError::MutationNotAllowed),
        OperationType::Subscription => return Err(OperationError::Subscription),
    }

    Ok(operation.name.as_ref().map(|name| name.to_string()))
}

fn variables(variables: Option<Value>) -> Result<Value, ToolError> {
    match variables {
        None | Some(Value::Null) => Ok(Value::Object(Default::default())),
        Some(Value::String(raw)) => match serde_json::from_str::<Value>(&raw) {
            Ok(value @ Value::Object(_)) => Ok(value),
            Ok(_) => Err(ToolError::NotAnObject { field: "variables" }),
            Err(source) => Err(ToolError::InvalidJson {
                field: "variables",
                source,
            }),
        },
        Some(value @ Value::Object(_)) => Ok(value),
        Some(_) => Err(ToolError::NotAnObject { field: "variables" }),
    }
}

pub struct AllMondayApi {
    read_only: bool,
}

impl AllMondayApi {
    pub fn new(read_only: bool) -> Self {
        Self { read_only }
    }
}

#[async_trait]
impl MondayTool for AllMondayApi {
    fn name(&self) -> &'static str {
        ALL_MONDAY_API_TOOL_NAME
    }

    fn tool(&self) -> Tool {
        let description = if self.read_only {
            "Run any GraphQL query against the monday.com API. Mutations are refused. Prefer the dedicated tools when one fits."
        } else {
            "Run any GraphQL query or mutation against the monday.com API. Prefer the dedicated tools when one fits."
        };
        Tool::new(ALL_MONDAY_API_TOOL_NAME, description, schema_from_type!(Input))
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
        let name = operation_name(&input.query, !self.read_only)?;
        let variables = variables(input.variables)?;
        debug!(operation = ?name, "Running ad hoc GraphQL operation");

        let mut request = Request::new(&input.query).variables(variables);
        if let Some(name) = name.as_deref() {
            request = request.operation_name(name);
        }
        let data = client
            .execute(request)
            .await
            .context("Failed to execute GraphQL operation")?;
        json_result(&data)
    }
}
