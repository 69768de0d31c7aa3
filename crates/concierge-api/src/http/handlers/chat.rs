//! Chat widget HTTP handlers.
//!
//! Endpoints:
//! - POST /api/chat/message - Run one chat turn
//! - GET  /api/chat/history - Recent messages for a visitor, newest first

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use concierge_types::chat::ChatMessage;

use crate::http::error::AppError;
use crate::http::extractors::params::ApiQuery;
use crate::http::extractors::query::HistoryQuery;
use crate::http::response::{ApiResponse, ChatMessageResponse};
use crate::state::AppState;

/// Body of POST /api/chat/message.
#[derive(Debug, Deserialize)]
pub struct ChatMessageRequest {
    pub message: Option<String>,
    pub visitor_id: Option<String>,
}

/// POST /api/chat/message - Accept a visitor message and return the bot reply.
pub async fn post_message(
    State(state): State<AppState>,
    payload: Result<Json<ChatMessageRequest>, JsonRejection>,
) -> Result<Json<ChatMessageResponse>, AppError> {
    let Json(request) = payload.map_err(|e| {
        tracing::debug!(error = %e, "Rejected chat request body");
        AppError::Validation("Invalid request body".to_string())
    })?;

    let reply = state
        .chat_service
        .handle_message(request.message.as_deref(), request.visitor_id.as_deref())
        .await
        .map_err(|e| AppError::from_chat_turn(e, &state.config.chat.apology_message))?;

    Ok(Json(reply.into()))
}

/// GET /api/chat/history - Most recent messages for a visitor.
pub async fn get_history(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<HistoryQuery>,
) -> Result<ApiResponse<Vec<ChatMessage>>, AppError> {
    let visitor_id = query
        .visitor_id
        .ok_or_else(|| AppError::Validation("visitor_id is required".to_string()))?;
    let limit = state.config.history.resolve_limit(query.limit);

    let messages = state.chat_service.history(&visitor_id, limit).await?;

    Ok(ApiResponse::success(messages))
}
