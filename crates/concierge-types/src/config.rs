//! Service configuration types for Concierge.
//!
//! `ServiceConfig` represents the top-level `config.toml` that selects the
//! reply provider, the history limits, and the default listen address.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from `~/.concierge/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

/// Which reply provider answers visitor messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyProviderKind {
    /// Random pick from the built-in canned replies.
    #[default]
    Canned,
    /// Always answer with `chat.fixed_reply`.
    Fixed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub reply_provider: ReplyProviderKind,

    /// Reply text for the `fixed` provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_reply: Option<String>,

    /// Shown to the visitor when a chat turn fails.
    #[serde(default = "default_apology_message")]
    pub apology_message: String,
}

fn default_apology_message() -> String {
    "Sorry, I'm having trouble responding right now. Please try again in a moment.".to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_provider: ReplyProviderKind::default(),
            fixed_reply: None,
            apology_message: default_apology_message(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Messages returned when the caller gives no limit.
    #[serde(default = "default_history_limit")]
    pub default_limit: i64,

    /// Upper bound on any requested limit.
    #[serde(default = "default_history_max")]
    pub max_limit: i64,
}

fn default_history_limit() -> i64 {
    50
}

fn default_history_max() -> i64 {
    200
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            default_limit: default_history_limit(),
            max_limit: default_history_max(),
        }
    }
}

impl HistoryConfig {
    /// Apply the default and clamp into `[1, max_limit]`.
    pub fn resolve_limit(&self, requested: Option<i64>) -> i64 {
        let max = self.max_limit.max(1);
        requested.unwrap_or(self.default_limit).clamp(1, max)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}
