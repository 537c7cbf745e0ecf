//! Errors raised while talking to a chat backend.

use thiserror::Error;

/// Failure of a single backend round trip.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Connection, TLS or body transfer failed.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status.
    #[error("server responded with status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        body: String,
    },

    /// Response body was not valid JSON.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Response JSON lacked the expected string field.
    #[error("response is missing field `{0}`")]
    MissingField(&'static str),

    /// Backend base URL could not be joined with the endpoint.
    #[error("invalid backend url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// In-process backend rejected the question.
    #[error("{0}")]
    Local(String),
}
