//! FAQ entries shown by the chat widget.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A question/answer pair. Lower `priority` is listed first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
    pub priority: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an FAQ entry.
#[derive(Debug, Clone, Deserialize)]
pub struct NewFaqEntry {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: i32,
}
