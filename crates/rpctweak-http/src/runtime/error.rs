//! Structured error responses for the host's own failures.
//!
//! These are the errors the simulated host produces in its normal course of
//! business (endpoint disabled, bad credentials, malformed request body).
//! The deliberate mode-3 bare 401 is NOT one of these: it intentionally
//! bypasses the structured body and is emitted directly by the endpoint
//! handler.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// Machine-readable error body returned by the host's JSON surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable error code
    pub error: String,
    /// Human-readable error message
    pub message: String,
}

/// Errors the simulated host reports to clients.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// The RPC endpoint is unavailable, via either disable path.
    #[error("RPC services are disabled on this server")]
    EndpointDisabled,

    /// Normal auth failure: the host's ordinary rejection of bad credentials.
    #[error("incorrect username or password")]
    IncorrectCredentials,

    /// The request body was not valid JSON of the expected shape.
    #[error("invalid JSON in request body: {reason}")]
    InvalidJson { reason: String },
}

impl SimError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SimError::EndpointDisabled => StatusCode::FORBIDDEN,
            SimError::IncorrectCredentials => StatusCode::FORBIDDEN,
            SimError::InvalidJson { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            SimError::EndpointDisabled => "endpoint_disabled",
            SimError::IncorrectCredentials => "incorrect_credentials",
            SimError::InvalidJson { .. } => "invalid_json",
        }
    }
}

impl IntoResponse for SimError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::debug!(
            error_code = self.error_code(),
            status = %status,
            "responding with host error"
        );
        let body = ErrorBody {
            error: self.error_code().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_mapping() {
        assert_eq!(
            SimError::EndpointDisabled.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            SimError::IncorrectCredentials.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            SimError::InvalidJson {
                reason: "eof".to_string()
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(SimError::EndpointDisabled.error_code(), "endpoint_disabled");
        assert_eq!(
            SimError::IncorrectCredentials.error_code(),
            "incorrect_credentials"
        );
    }
}
