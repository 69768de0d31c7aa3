//! HTTP/REST API layer for Concierge.
//!
//! Axum-based JSON API: the chat endpoint used by the website widget, the
//! FAQ and history read endpoints, and the admin panel endpoints.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
