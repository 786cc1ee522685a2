//! Client for the monday.com GraphQL API
//!
//! [`MondayClient`] authenticates, picks the API version for each call and turns the
//! GraphQL response envelope into typed data or an [`Error`]. The operations themselves
//! live in [`documents`].

pub mod client;
pub mod documents;
pub mod error;
pub mod types;

pub use client::{DEFAULT_API_URL, DEFAULT_API_VERSION, DEV_API_VERSION, MondayClient, Request};
pub use documents::Document;
pub use error::Error;
pub use secrecy::SecretString;
