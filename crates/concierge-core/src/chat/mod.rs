//! Chat session and message handling for Concierge.
//!
//! `ChatRepository` is the persistence port; `ChatService` runs the
//! message ingestion flow and the read/admin paths on top of it.

pub mod repository;
pub mod service;
pub mod visitor;

#[cfg(test)]
pub(crate) mod testing;
