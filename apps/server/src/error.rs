//! Error types and HTTP response mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the update pipeline, in the order the pipeline can hit them.
///
/// Every variant is terminal for the request: it is logged once and mapped to
/// a response. The caller-facing message is always generic; upstream detail
/// stays in the logs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Inbound body did not parse as a JSON object.
    #[error("invalid JSON payload: {0}")]
    InvalidPayload(String),

    /// Inbound body parsed but lacks a required key.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// Failed to serialize the outbound query envelope.
    #[error("failed to encode query envelope: {0}")]
    Encoding(serde_json::Error),

    /// Could not reach the query service (connect failure or timeout).
    #[error("failed to reach query service: {0}")]
    UpstreamUnreachable(reqwest::Error),

    /// The query service accepted the connection but the response stream
    /// could not be read to completion.
    #[error("failed to read query service response: {0}")]
    UpstreamRead(reqwest::Error),

    /// The query service returned 200 with a body that is not a JSON object.
    #[error("query service returned a malformed response: {0}")]
    UpstreamMalformedResponse(serde_json::Error),

    /// The query service reported a failure; its status code is relayed
    /// verbatim to the caller.
    #[error("query service returned status {0}")]
    UpstreamStatus(StatusCode),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::InvalidPayload(_) | Error::MissingField(_) => StatusCode::BAD_REQUEST,
            Error::UpstreamStatus(status) => *status,
            Error::Encoding(_)
            | Error::UpstreamUnreachable(_)
            | Error::UpstreamRead(_)
            | Error::UpstreamMalformedResponse(_)
            | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Generic client-facing message. Never carries upstream error detail.
    fn public_message(&self) -> String {
        match self {
            Error::InvalidPayload(_) => "invalid JSON payload".to_string(),
            Error::MissingField(field) => format!("missing required field `{field}`"),
            Error::Encoding(_) => "failed to prepare query".to_string(),
            Error::UpstreamUnreachable(_) => "failed to reach query service".to_string(),
            Error::UpstreamRead(_) => "failed to read query service response".to_string(),
            Error::UpstreamMalformedResponse(_) => {
                "invalid response from query service".to_string()
            }
            Error::UpstreamStatus(_) => "failed to update patient record".to_string(),
            Error::Internal(_) => "internal server error".to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, status = %status, "request failed");
        } else {
            tracing::warn!(error = %self, status = %status, "request rejected");
        }
        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}
