//! Pluggable reply selection for the chat flow.

pub mod box_provider;
pub mod canned;
pub mod fixed;
pub mod provider;

use concierge_types::config::{ChatConfig, ReplyProviderKind};
use tracing::warn;

use box_provider::BoxReplyProvider;
use canned::CannedReplyProvider;
use fixed::FixedReplyProvider;

/// Build the reply provider selected by configuration.
///
/// `fixed` without a non-empty `fixed_reply` falls back to `canned`.
pub fn build_reply_provider(config: &ChatConfig) -> BoxReplyProvider {
    match config.reply_provider {
        ReplyProviderKind::Canned => BoxReplyProvider::new(CannedReplyProvider::new()),
        ReplyProviderKind::Fixed => {
            match config.fixed_reply.as_deref().map(str::trim) {
                Some(reply) if !reply.is_empty() => {
                    BoxReplyProvider::new(FixedReplyProvider::new(reply))
                }
                _ => {
                    warn!("reply_provider = \"fixed\" without fixed_reply, using canned replies");
                    BoxReplyProvider::new(CannedReplyProvider::new())
                }
            }
        }
    }
}
