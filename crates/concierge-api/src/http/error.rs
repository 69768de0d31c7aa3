//! Application error type mapping to HTTP status codes.
//!
//! Every error body is `{ "success": false, "error": "..." }`. Store
//! failures are logged in full and answered with a generic message; a
//! failed chat turn also carries the visitor-facing apology in `message`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use concierge_types::error::{ChatError, FaqError, RepositoryError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed input (400).
    Validation(String),
    /// Unknown resource (404).
    NotFound(String),
    /// Wrong HTTP method for an existing route (405).
    MethodNotAllowed,
    /// Upstream store failure (500).
    Store(RepositoryError),
    /// Any other server-side failure (500); the detail is only logged.
    Internal(String),
    /// A chat turn failed; `apology` is shown to the visitor (500).
    ChatTurnFailed { detail: String, apology: String },
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        AppError::Store(e)
    }
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::Validation(msg) => AppError::Validation(msg),
            ChatError::SessionNotFound(id) => AppError::NotFound(format!("Session {id} not found")),
            ChatError::Store(e) => AppError::Store(e),
            ChatError::Reply(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<FaqError> for AppError {
    fn from(e: FaqError) -> Self {
        match e {
            FaqError::Validation(msg) => AppError::Validation(msg),
            FaqError::NotFound(id) => AppError::NotFound(format!("FAQ entry {id} not found")),
            FaqError::Store(e) => AppError::Store(e),
        }
    }
}

impl AppError {
    /// Map a chat-turn error, attaching the apology to server-side failures.
    pub fn from_chat_turn(e: ChatError, apology: &str) -> Self {
        match e {
            ChatError::Store(_) | ChatError::Reply(_) => AppError::ChatTurnFailed {
                detail: e.to_string(),
                apology: apology.to_string(),
            },
            other => other.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Store(_) | AppError::Internal(_) | AppError::ChatTurnFailed { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Validation(msg) | AppError::NotFound(msg) => {
                json!({ "success": false, "error": msg })
            }
            AppError::MethodNotAllowed => {
                json!({ "success": false, "error": "Method not allowed" })
            }
            AppError::Store(e) => {
                tracing::error!(error = %e, "Store request failed");
                json!({ "success": false, "error": "Internal server error" })
            }
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                json!({ "success": false, "error": "Internal server error" })
            }
            AppError::ChatTurnFailed { detail, apology } => {
                tracing::error!(error = %detail, "Chat turn failed");
                json!({
                    "success": false,
                    "error": "Failed to process message",
                    "message": apology,
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Fallback for routes hit with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_types::error::ReplyError;

    #[test]
    fn test_chat_turn_store_error_gets_apology() {
        let err = AppError::from_chat_turn(
            ChatError::Store(RepositoryError::Connection),
            "Sorry!",
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(err, AppError::ChatTurnFailed { ref apology, .. } if apology == "Sorry!"));
    }

    #[test]
    fn test_chat_turn_reply_error_gets_apology() {
        let err = AppError::from_chat_turn(
            ChatError::Reply(ReplyError::Provider {
                provider: "fixed".to_string(),
                message: "boom".to_string(),
            }),
            "Sorry!",
        );
        assert!(matches!(err, AppError::ChatTurnFailed { .. }));
    }

    #[test]
    fn test_chat_turn_validation_is_client_error() {
        let err = AppError::from_chat_turn(ChatError::Validation("Message is required".into()), "x");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_reply_error_outside_chat_turn_is_internal() {
        let err: AppError = ChatError::Reply(ReplyError::Provider {
            provider: "fixed".to_string(),
            message: "no reply configured".to_string(),
        })
        .into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(
            matches!(err, AppError::Internal(ref detail) if detail.contains("no reply configured"))
        );
    }

    #[test]
    fn test_not_found_mapping() {
        let err: AppError = ChatError::SessionNotFound(3).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        let err: AppError = FaqError::NotFound(3).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
