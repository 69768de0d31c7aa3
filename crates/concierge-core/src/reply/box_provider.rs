//! BoxReplyProvider -- object-safe dynamic dispatch wrapper for ReplyProvider.
//!
//! 1. Define an object-safe `ReplyProviderDyn` trait with boxed futures
//! 2. Blanket-impl `ReplyProviderDyn` for all `T: ReplyProvider`
//! 3. `BoxReplyProvider` wraps `Box<dyn ReplyProviderDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use concierge_types::error::ReplyError;

use super::provider::ReplyProvider;

/// Object-safe version of [`ReplyProvider`] with boxed futures.
pub trait ReplyProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn reply_boxed<'a>(
        &'a self,
        message: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, ReplyError>> + Send + 'a>>;
}

impl<T: ReplyProvider> ReplyProviderDyn for T {
    fn name(&self) -> &str {
        ReplyProvider::name(self)
    }

    fn reply_boxed<'a>(
        &'a self,
        message: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, ReplyError>> + Send + 'a>> {
        Box::pin(self.reply(message))
    }
}

/// Type-erased reply provider chosen at start-up from configuration.
pub struct BoxReplyProvider {
    inner: Box<dyn ReplyProviderDyn>,
}

impl BoxReplyProvider {
    pub fn new<T: ReplyProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub async fn reply(&self, message: &str) -> Result<String, ReplyError> {
        self.inner.reply_boxed(message).await
    }
}

impl std::fmt::Debug for BoxReplyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxReplyProvider")
            .field("name", &self.name())
            .finish()
    }
}
