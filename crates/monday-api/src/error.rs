/// Errors returned while talking to the monday.com API
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("http error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("request to the monday.com API timed out")]
    Timeout,

    /// The API answered with a GraphQL `errors` array. The messages are joined so the
    /// whole failure survives being rendered as a single line.
    #[error("{}", .messages.join(", "))]
    GraphQL { messages: Vec<String> },

    #[error("unexpected response status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response did not contain any data")]
    MissingData,

    #[error("invalid response body: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the request failed because it ran past its timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout)
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Error::Timeout
        } else {
            Error::Http(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn graphql_messages_are_comma_joined() {
        let error = Error::GraphQL {
            messages: vec![
                "Column not found".to_string(),
                "Invalid board id".to_string(),
            ],
        };

        assert_eq!(error.to_string(), "Column not found, Invalid board id");
        assert!(!error.is_timeout());
    }

    #[test]
    fn timeout_is_classified() {
        assert!(Error::Timeout.is_timeout());
        assert!(!Error::MissingData.is_timeout());
    }
}
