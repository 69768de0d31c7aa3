//! Request extractors.

pub mod params;
pub mod query;
