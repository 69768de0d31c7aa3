//! FAQ listing and management.

pub mod repository;
pub mod service;
