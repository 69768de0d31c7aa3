//! Visitor identifier minting.

use chrono::{DateTime, Utc};
use concierge_types::visitor::{GENERATED_PREFIX, VisitorId};
use rand::Rng;

const SUFFIX_LEN: usize = 8;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Mint `VIS_<YYYYMMDD>_<8 base36 chars>` for an anonymous visitor.
///
/// Uniqueness is not checked against the store.
pub fn generate_visitor_id(now: DateTime<Utc>) -> VisitorId {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    VisitorId(format!(
        "{GENERATED_PREFIX}{}_{suffix}",
        now.format("%Y%m%d")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_generated_id_shape() {
        let now = Utc.with_ymd_and_hms(2024, 3, 7, 23, 59, 0).unwrap();
        for _ in 0..100 {
            let id = generate_visitor_id(now);
            assert!(id.is_generated(), "unexpected shape: {id}");
            assert!(id.as_str().starts_with("VIS_20240307_"));
        }
    }

    #[test]
    fn test_generated_ids_differ() {
        let now = Utc::now();
        let a = generate_visitor_id(now);
        let b = generate_visitor_id(now);
        assert_ne!(a, b);
    }
}
