//! Query parameter extractors for list endpoints.

use serde::Deserialize;

/// Query parameters for the visitor history endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct HistoryQuery {
    /// Visitor whose messages to return (required).
    pub visitor_id: Option<String>,
    /// Maximum messages; defaults to `history.default_limit`.
    pub limit: Option<i64>,
}

/// Query parameters for the FAQ listing endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct FaqQuery {
    /// Restrict to one category (e.g. "pricing").
    pub category: Option<String>,
}

/// Query parameters for the admin session listing.
#[derive(Debug, Deserialize)]
pub struct SessionListQuery {
    /// Filter by status (active, closed).
    pub status: Option<String>,
    #[serde(default = "default_session_limit")]
    pub limit: i64,
}

fn default_session_limit() -> i64 {
    50
}
