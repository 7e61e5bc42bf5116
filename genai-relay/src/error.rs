use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Every way a relay call can end other than success. Converting into a
/// response is the only place failures leave the service.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("upstream credential is not configured")]
    Configuration,

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("{provider} API returned {status}")]
    Upstream {
        status: StatusCode,
        provider: &'static str,
        details: Value,
    },

    #[error("internal error: {0:#}")]
    Internal(#[from] anyhow::Error),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::Configuration | RelayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            RelayError::InvalidEndpoint(_) => StatusCode::BAD_REQUEST,
            RelayError::Upstream { status, .. } => *status,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            details: Option<Value>,
        }

        let status = self.status();
        let (error, details) = match self {
            RelayError::MethodNotAllowed => {
                return (status, Json(json!({ "message": "Method Not Allowed" })))
                    .into_response();
            }
            RelayError::Configuration => {
                tracing::error!("Upstream credential is missing or empty");
                ("API key not configured.".to_string(), None)
            }
            RelayError::InvalidEndpoint(endpoint) => {
                tracing::warn!(endpoint = %endpoint, "Rejected unknown endpoint");
                ("Invalid endpoint specified.".to_string(), None)
            }
            RelayError::Upstream {
                status,
                provider,
                details,
            } => {
                tracing::error!(
                    status = %status,
                    provider,
                    details = %details,
                    "Upstream API error"
                );
                (format!("Error from {} API", provider), Some(details))
            }
            RelayError::Internal(err) => {
                tracing::error!(error = ?err, "Relay failed");
                ("Internal Server Error".to_string(), None)
            }
        };

        (status, Json(ErrorResponse { error, details })).into_response()
    }
}
