//! Execute GraphQL operations against the monday.com API

use std::time::Duration;

use bon::bon;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::documents::Document;
use crate::error::Error;

pub const DEFAULT_API_URL: &str = "https://api.monday.com/v2";

/// The stable API version requested unless a call overrides it
pub const DEFAULT_API_VERSION: &str = "2025-07";

/// Version exposing preview features such as smart search
pub const DEV_API_VERSION: &str = "dev";

const API_VERSION_HEADER: &str = "API-Version";

/// A client for the monday.com GraphQL endpoint
#[derive(Clone, Debug)]
pub struct MondayClient {
    http: reqwest::Client,
    endpoint: Url,
    token: SecretString,
    api_version: String,
}

#[bon]
impl MondayClient {
    #[builder]
    pub fn new(
        token: SecretString,
        endpoint: Option<Url>,
        #[builder(into)] api_version: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, Error> {
        let mut http = reqwest::Client::builder().user_agent(concat!(
            "monday-mcp/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            http = http.timeout(timeout);
        }

        Ok(Self {
            http: http.build()?,
            endpoint: endpoint.unwrap_or_else(default_endpoint),
            token,
            api_version: api_version.unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
        })
    }
}

impl MondayClient {
    /// Execute a request and deserialize its `data` into `T`
    pub async fn request<T: DeserializeOwned>(&self, request: Request<'_>) -> Result<T, Error> {
        let data = self.execute(request).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// Execute a request and return its raw `data` object
    pub async fn execute(&self, request: Request<'_>) -> Result<Value, Error> {
        let mut body = serde_json::json!({
            "query": request.query,
            "variables": request.variables,
        });
        if let (Some(operation_name), Some(obj)) = (request.operation_name, body.as_object_mut()) {
            obj.insert(
                "operationName".to_string(),
                Value::String(operation_name.to_string()),
            );
        }

        let api_version = request.api_version.unwrap_or(&self.api_version);
        debug!(
            operation = request.operation_name.unwrap_or("<anonymous>"),
            api_version, "Sending GraphQL request"
        );

        let mut builder = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(AUTHORIZATION, self.token.expose_secret())
            .header(API_VERSION_HEADER, api_version)
            .body(body.to_string());
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        let envelope = match serde_json::from_str::<Envelope>(&text) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(Error::Status {
                    status: status.as_u16(),
                    body: text,
                });
            }
            Err(error) => return Err(Error::Json(error)),
        };

        let mut messages: Vec<String> = envelope
            .errors
            .unwrap_or_default()
            .into_iter()
            .map(|error| error.message)
            .collect();
        if let Some(message) = envelope.error_message {
            messages.push(message);
        }
        if !messages.is_empty() {
            debug!(?messages, "GraphQL request returned errors");
            return Err(Error::GraphQL { messages });
        }

        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        envelope
            .data
            .filter(|data| !data.is_null())
            .ok_or(Error::MissingData)
    }
}

/// A single GraphQL call
#[derive(Debug, Clone)]
pub struct Request<'a> {
    query: &'a str,
    operation_name: Option<&'a str>,
    variables: Value,
    api_version: Option<&'a str>,
    timeout: Option<Duration>,
}

impl<'a> Request<'a> {
    /// Create a request for an ad hoc operation
    pub fn new(query: &'a str) -> Self {
        Self {
            query,
            operation_name: None,
            variables: Value::Object(Default::default()),
            api_version: None,
            timeout: None,
        }
    }

    pub fn operation_name(mut self, operation_name: &'a str) -> Self {
        self.operation_name = Some(operation_name);
        self
    }

    pub fn variables(mut self, variables: Value) -> Self {
        self.variables = variables;
        self
    }

    /// Override the client's API version for this call only
    pub fn api_version(mut self, api_version: &'a str) -> Self {
        self.api_version = Some(api_version);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl<'a> From<&'a Document> for Request<'a> {
    fn from(document: &'a Document) -> Self {
        Request::new(document.query).operation_name(document.operation_name)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    data: Option<Value>,
    errors: Option<Vec<GraphQLError>>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphQLError {
    message: String,
}

fn default_endpoint() -> Url {
    // SAFETY: The default URL is fixed at compile time
    #[allow(clippy::expect_used)]
    Url::parse(DEFAULT_API_URL).expect("default URL should be valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> MondayClient {
        MondayClient::builder()
            .token(SecretString::from("test-token"))
            .endpoint(Url::parse(&server.uri()).unwrap())
            .build()
            .unwrap()
    }

    const GET_BOARD: Document = Document {
        operation_name: "GetBoard",
        query: "query GetBoard($id: ID!) { boards(ids: [$id]) { id name } }",
    };

    #[derive(Debug, Deserialize, PartialEq)]
    struct Boards {
        boards: Vec<Board>,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Board {
        id: String,
        name: String,
    }

    #[test_log::test(tokio::test)]
    async fn sends_authenticated_versioned_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("Authorization", "test-token"))
            .and(header("API-Version", DEFAULT_API_VERSION))
            .and(body_partial_json(json!({
                "operationName": "GetBoard",
                "variables": { "id": "42" },
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "boards": [{ "id": "42", "name": "Roadmap" }] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let boards: Boards = client_for(&server)
            .request(Request::from(&GET_BOARD).variables(json!({ "id": "42" })))
            .await
            .unwrap();

        assert_eq!(
            boards,
            Boards {
                boards: vec![Board {
                    id: "42".to_string(),
                    name: "Roadmap".to_string(),
                }]
            }
        );
    }

    #[test_log::test(tokio::test)]
    async fn api_version_can_be_overridden_per_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("API-Version", DEV_API_VERSION))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": { "boards": [] } })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let boards: Boards = client_for(&server)
            .request(Request::from(&GET_BOARD).api_version(DEV_API_VERSION))
            .await
            .unwrap();

        assert!(boards.boards.is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn graphql_errors_are_flattened() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [
                    { "message": "Board not found" },
                    { "message": "Permission denied" }
                ]
            })))
            .mount(&server)
            .await;

        let error = client_for(&server)
            .execute(Request::from(&GET_BOARD))
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), "Board not found, Permission denied");
    }

    #[test_log::test(tokio::test)]
    async fn error_message_on_failed_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error_message": "Not Authenticated",
                "status_code": 401
            })))
            .mount(&server)
            .await;

        let error = client_for(&server)
            .execute(Request::from(&GET_BOARD))
            .await
            .unwrap_err();

        assert!(matches!(error, Error::GraphQL { ref messages } if messages == &["Not Authenticated"]));
    }

    #[test_log::test(tokio::test)]
    async fn non_json_failure_keeps_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let error = client_for(&server)
            .execute(Request::from(&GET_BOARD))
            .await
            .unwrap_err();

        assert!(matches!(error, Error::Status { status: 502, .. }));
    }

    #[test_log::test(tokio::test)]
    async fn null_data_is_missing_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": null })))
            .mount(&server)
            .await;

        let error = client_for(&server)
            .execute(Request::from(&GET_BOARD))
            .await
            .unwrap_err();

        assert!(matches!(error, Error::MissingData));
    }

    #[test_log::test(tokio::test)]
    async fn slow_response_is_classified_as_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": { "boards": [] } }))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let error = client_for(&server)
            .execute(Request::from(&GET_BOARD).timeout(Duration::from_millis(50)))
            .await
            .unwrap_err();

        assert!(error.is_timeout());
    }
}
