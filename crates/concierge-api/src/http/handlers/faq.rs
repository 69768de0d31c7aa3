//! FAQ HTTP handlers.
//!
//! Endpoints:
//! - GET  /api/faq                    - Active entries by priority
//! - POST /api/admin/faqs             - Create an entry
//! - POST /api/admin/faqs/{id}/active - Show or hide an entry

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use concierge_types::faq::{FaqEntry, NewFaqEntry};

use crate::http::error::AppError;
use crate::http::extractors::params::{ApiPath, ApiQuery};
use crate::http::extractors::query::FaqQuery;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// GET /api/faq - Active FAQ entries, optionally for one category.
pub async fn list_faqs(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<FaqQuery>,
) -> Result<ApiResponse<Vec<FaqEntry>>, AppError> {
    let entries = state.faq_service.list(query.category.as_deref()).await?;
    Ok(ApiResponse::success(entries))
}

/// POST /api/admin/faqs - Create an FAQ entry.
pub async fn create_faq(
    State(state): State<AppState>,
    payload: Result<Json<NewFaqEntry>, JsonRejection>,
) -> Result<ApiResponse<FaqEntry>, AppError> {
    let Json(entry) =
        payload.map_err(|_| AppError::Validation("Invalid request body".to_string()))?;
    let created = state.faq_service.create(entry).await?;
    Ok(ApiResponse::success(created))
}

/// Body of POST /api/admin/faqs/{id}/active.
#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub active: bool,
}

/// POST /api/admin/faqs/{id}/active - Show or hide an FAQ entry.
pub async fn set_faq_active(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    payload: Result<Json<SetActiveRequest>, JsonRejection>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let Json(request) =
        payload.map_err(|_| AppError::Validation("Invalid request body".to_string()))?;
    state.faq_service.set_active(id, request.active).await?;
    Ok(ApiResponse::success(
        serde_json::json!({ "id": id, "active": request.active }),
    ))
}
