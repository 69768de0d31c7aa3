//! Canned replies: a content-independent placeholder for real answers.

use concierge_types::error::ReplyError;
use rand::seq::SliceRandom;

use super::provider::ReplyProvider;

/// The fixed rotation the canned provider draws from.
pub const CANNED_REPLIES: [&str; 5] = [
    "Thanks for reaching out! We design and build websites, web apps, and brand identities for small businesses.",
    "Our team usually replies to project inquiries within one business day. Feel free to leave your email and we'll follow up.",
    "You can browse recent client work in the Portfolio section, including case studies with timelines and results.",
    "Pricing depends on scope. Most projects start with a free consultation where we put together a tailored quote.",
    "We offer ongoing maintenance and support plans once your site is live. Ask us about hosting, updates, and analytics.",
];

/// Picks one of [`CANNED_REPLIES`] uniformly at random, ignoring the message.
#[derive(Debug, Default, Clone, Copy)]
pub struct CannedReplyProvider;

impl CannedReplyProvider {
    pub fn new() -> Self {
        Self
    }

    fn pick(&self) -> &'static str {
        CANNED_REPLIES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(CANNED_REPLIES[0])
    }
}

impl ReplyProvider for CannedReplyProvider {
    fn name(&self) -> &str {
        "canned"
    }

    fn reply(
        &self,
        _message: &str,
    ) -> impl std::future::Future<Output = Result<String, ReplyError>> + Send {
        let reply = self.pick().to_string();
        std::future::ready(Ok(reply))
    }
}
