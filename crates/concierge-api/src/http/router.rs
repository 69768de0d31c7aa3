//! Axum router configuration with middleware.
//!
//! Widget routes live under `/api/chat` and `/api/faq`, operator routes
//! under `/api/admin`. Every route answers an unsupported method with a
//! JSON 405. Middleware: CORS, request tracing.

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::http::error::method_not_allowed;
use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %Uuid::now_v7(),
        )
    });

    let api_routes = Router::new()
        // Chat widget
        .route(
            "/chat/message",
            post(handlers::chat::post_message).fallback(method_not_allowed),
        )
        .route(
            "/chat/history",
            get(handlers::chat::get_history).fallback(method_not_allowed),
        )
        .route(
            "/faq",
            get(handlers::faq::list_faqs).fallback(method_not_allowed),
        )
        // Admin: sessions
        .route(
            "/admin/sessions",
            get(handlers::admin::list_sessions).fallback(method_not_allowed),
        )
        .route(
            "/admin/sessions/{id}",
            get(handlers::admin::get_session).fallback(method_not_allowed),
        )
        .route(
            "/admin/sessions/{id}/messages",
            get(handlers::admin::get_session_messages).fallback(method_not_allowed),
        )
        .route(
            "/admin/sessions/{id}/reply",
            post(handlers::admin::post_reply).fallback(method_not_allowed),
        )
        .route(
            "/admin/sessions/{id}/close",
            post(handlers::admin::close_session).fallback(method_not_allowed),
        )
        // Admin: FAQ
        .route(
            "/admin/faqs",
            post(handlers::faq::create_faq).fallback(method_not_allowed),
        )
        .route(
            "/admin/faqs/{id}/active",
            post(handlers::faq::set_faq_active).fallback(method_not_allowed),
        )
        // Dashboard stats
        .route(
            "/admin/stats",
            get(handlers::admin::get_stats).fallback(method_not_allowed),
        );

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check).fallback(method_not_allowed))
        .layer(cors)
        .layer(trace)
        .with_state(state)
}

/// GET /health - Liveness plus a store round-trip.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let store_ok = sqlx::query("SELECT 1")
        .execute(&state.db_pool.reader)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "Health check store ping failed"))
        .is_ok();

    let status = if store_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(serde_json::json!({
            "status": if store_ok { "ok" } else { "degraded" },
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}
