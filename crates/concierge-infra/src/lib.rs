//! Infrastructure layer for Concierge.
//!
//! Contains implementations of the repository traits defined in
//! `concierge-core` (SQLite storage), the `config.toml` loader, and data
//! directory resolution.

pub mod config;
pub mod sqlite;
