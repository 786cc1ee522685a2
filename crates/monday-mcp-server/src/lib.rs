pub mod constants;
pub mod errors;
pub mod json_schema;
pub mod server;
pub mod tools;
