//! Business logic and repository trait definitions for Concierge.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements, the pluggable reply providers, and the chat and FAQ
//! services. It depends only on `concierge-types` -- never on
//! `concierge-infra` or any database/IO crate.

pub mod chat;
pub mod faq;
pub mod reply;
