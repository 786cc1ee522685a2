//! JSON Schema generation for tool inputs

use rmcp::model::JsonObject;
use schemars::JsonSchema;
use schemars::generate::SchemaSettings;
use serde_json::Value;

/// Build the input schema of a tool from its input type
#[macro_export]
macro_rules! schema_from_type {
    ($type:ty) => {{ $crate::json_schema::schema_for::<$type>() }};
}

/// Draft-07 is used because several MCP clients reject newer drafts
pub fn schema_for<T: JsonSchema>() -> JsonObject {
    let schema = SchemaSettings::draft07()
        .into_generator()
        .into_root_schema_for::<T>();
    match serde_json::to_value(schema) {
        Ok(Value::Object(schema)) => schema,
        #[allow(clippy::panic)]
        _ => panic!("Failed to generate schema for {}", std::any::type_name::<T>()),
    }
}
