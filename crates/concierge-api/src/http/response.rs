//! Success response bodies.
//!
//! Read and admin endpoints wrap their payload as
//! `{ "success": true, "data": ... }`. The chat endpoint answers with the
//! flat shape the widget expects (see [`ChatMessageResponse`]).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use concierge_types::chat::{ChatReply, SessionId};
use concierge_types::visitor::VisitorId;

/// Envelope for successful responses.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Body returned for a completed chat turn.
#[derive(Debug, Serialize)]
pub struct ChatMessageResponse {
    pub success: bool,
    pub message: String,
    pub session_id: SessionId,
    pub visitor_id: VisitorId,
    /// RFC 3339 timestamp of the reply.
    pub response_time: String,
}

impl From<ChatReply> for ChatMessageResponse {
    fn from(reply: ChatReply) -> Self {
        Self {
            success: true,
            message: reply.reply,
            session_id: reply.session_id,
            visitor_id: reply.visitor_id,
            response_time: reply.responded_at.to_rfc3339(),
        }
    }
}
