//! ReplyProvider trait definition.
//!
//! A reply provider turns a visitor message into the bot's answer. The chat
//! flow does not depend on how the answer is produced.

use concierge_types::error::ReplyError;

/// Produces the bot's reply to a visitor message.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). Wrap in
/// [`BoxReplyProvider`](super::box_provider::BoxReplyProvider) for runtime
/// selection.
pub trait ReplyProvider: Send + Sync {
    /// Short identifier used in logs and configuration (e.g. "canned").
    fn name(&self) -> &str;

    /// Reply to `message`.
    fn reply(
        &self,
        message: &str,
    ) -> impl std::future::Future<Output = Result<String, ReplyError>> + Send;
}
