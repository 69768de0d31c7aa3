//! Visitor identity.
//!
//! A visitor is an unauthenticated user of the chat widget. It has no stored
//! record of its own; the identifier is referenced by sessions and messages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix of identifiers minted by the service for anonymous visitors.
pub const GENERATED_PREFIX: &str = "VIS_";

/// Longest caller-supplied visitor identifier accepted.
pub const MAX_VISITOR_ID_LEN: usize = 128;

/// Opaque visitor identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitorId(pub String);

impl VisitorId {
    /// Normalize a caller-supplied identifier.
    ///
    /// Surrounding whitespace is trimmed. Empty input means "no identifier"
    /// and yields `Ok(None)` so the caller can mint one.
    pub fn from_supplied(raw: Option<&str>) -> Result<Option<Self>, String> {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(None);
        };
        if raw.chars().count() > MAX_VISITOR_ID_LEN {
            return Err(format!(
                "visitor_id must be at most {MAX_VISITOR_ID_LEN} characters"
            ));
        }
        Ok(Some(Self(raw.to_string())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this identifier has the `VIS_<YYYYMMDD>_<8 base36>` shape.
    pub fn is_generated(&self) -> bool {
        let Some(rest) = self.0.strip_prefix(GENERATED_PREFIX) else {
            return false;
        };
        let Some((date, suffix)) = rest.split_once('_') else {
            return false;
        };
        date.len() == 8
            && date.chars().all(|c| c.is_ascii_digit())
            && suffix.len() == 8
            && suffix
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
    }
}

impl fmt::Display for VisitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VisitorId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
