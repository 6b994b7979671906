//! API error responses.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

/// JSON error body: `{"error": ..., "details": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// JSON confirmation body: `{"message": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageBody {
    pub message: String,
}

/// Errors returned by handlers.
///
/// Messages are static per endpoint; the underlying cause goes to the log
/// (and, for create, into `details`).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{message}")]
    Internal {
        message: &'static str,
        details: Option<String>,
    },
}

impl ApiError {
    pub fn internal(message: &'static str) -> Self {
        ApiError::Internal {
            message,
            details: None,
        }
    }

    pub fn internal_with_details(message: &'static str, details: impl Into<String>) -> Self {
        ApiError::Internal {
            message,
            details: Some(details.into()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let body = match self {
            ApiError::NotFound(message) => ErrorBody {
                error: message.to_string(),
                details: None,
            },
            ApiError::Internal { message, details } => ErrorBody {
                error: message.to_string(),
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::NotFound("Note not found").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::internal("Failed to update note").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_body_omits_missing_details() {
        let body = ErrorBody {
            error: "Failed to fetch notes".to_string(),
            details: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Failed to fetch notes" }));
    }

    #[test]
    fn test_into_response_status() {
        let response =
            ApiError::internal_with_details("Failed to create note", "db down").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
