//! Admin panel session handlers.
//!
//! Endpoints:
//! - GET  /api/admin/sessions               - List sessions, newest first
//! - GET  /api/admin/sessions/{id}          - Get one session
//! - GET  /api/admin/sessions/{id}/messages - Replay a session, oldest first
//! - POST /api/admin/sessions/{id}/reply    - Post an operator reply
//! - POST /api/admin/sessions/{id}/close    - Close a session
//! - GET  /api/admin/stats                  - Session and message counts
//!
//! Access control is left to the hosting platform in front of this service.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use concierge_types::chat::{ChatMessage, ChatSession, ChatStats, SessionId, SessionStatus};

use crate::http::error::AppError;
use crate::http::extractors::params::{ApiPath, ApiQuery};
use crate::http::extractors::query::SessionListQuery;
use crate::http::response::ApiResponse;
use crate::state::AppState;

const MAX_SESSION_PAGE: i64 = 500;

/// GET /api/admin/sessions - List sessions.
pub async fn list_sessions(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SessionListQuery>,
) -> Result<ApiResponse<Vec<ChatSession>>, AppError> {
    let status = query
        .status
        .as_deref()
        .map(str::parse::<SessionStatus>)
        .transpose()
        .map_err(AppError::Validation)?;
    let limit = query.limit.clamp(1, MAX_SESSION_PAGE);

    let sessions = state.chat_service.list_sessions(status, limit).await?;
    Ok(ApiResponse::success(sessions))
}

/// GET /api/admin/sessions/{id} - Get a session by id.
pub async fn get_session(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<ApiResponse<ChatSession>, AppError> {
    let session = state.chat_service.get_session(SessionId(id)).await?;
    Ok(ApiResponse::success(session))
}

/// GET /api/admin/sessions/{id}/messages - All messages of a session.
pub async fn get_session_messages(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<ApiResponse<Vec<ChatMessage>>, AppError> {
    let messages = state.chat_service.session_messages(SessionId(id)).await?;
    Ok(ApiResponse::success(messages))
}

/// Body of POST /api/admin/sessions/{id}/reply.
#[derive(Debug, Deserialize)]
pub struct AdminReplyRequest {
    #[serde(alias = "message")]
    pub content: Option<String>,
}

/// POST /api/admin/sessions/{id}/reply - Post an operator reply.
pub async fn post_reply(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    payload: Result<Json<AdminReplyRequest>, JsonRejection>,
) -> Result<ApiResponse<ChatMessage>, AppError> {
    let Json(request) =
        payload.map_err(|_| AppError::Validation("Invalid request body".to_string()))?;
    let content = request.content.unwrap_or_default();

    let message = state
        .chat_service
        .admin_reply(SessionId(id), &content)
        .await?;
    Ok(ApiResponse::success(message))
}

/// POST /api/admin/sessions/{id}/close - Close a session.
pub async fn close_session(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    state.chat_service.close_session(SessionId(id)).await?;
    Ok(ApiResponse::success(
        serde_json::json!({ "session_id": id, "status": SessionStatus::Closed }),
    ))
}

/// GET /api/admin/stats - Aggregate counts for the dashboard.
pub async fn get_stats(State(state): State<AppState>) -> Result<ApiResponse<ChatStats>, AppError> {
    let stats = state.chat_service.stats().await?;
    Ok(ApiResponse::success(stats))
}
