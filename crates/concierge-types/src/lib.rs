//! Shared domain types for Concierge.
//!
//! Visitors, chat sessions and messages, FAQ entries, configuration, and
//! the error enums shared by the core and infrastructure layers.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod faq;
pub mod visitor;
