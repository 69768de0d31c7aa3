//! Fixed reply: answers every message with one configured string.

use concierge_types::error::ReplyError;

use super::provider::ReplyProvider;

#[derive(Debug, Clone)]
pub struct FixedReplyProvider {
    reply: String,
}

impl FixedReplyProvider {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

impl ReplyProvider for FixedReplyProvider {
    fn name(&self) -> &str {
        "fixed"
    }

    fn reply(
        &self,
        _message: &str,
    ) -> impl std::future::Future<Output = Result<String, ReplyError>> + Send {
        std::future::ready(Ok(self.reply.clone()))
    }
}
