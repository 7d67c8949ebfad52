//! Nonce and timestamp helpers for request builders.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Fixed bias the gateway expects on QR-link timestamps (UTC+8).
pub const CHINA_TIMEZONE_OFFSET_SECS: i64 = 8 * 60 * 60;

/// Returns a fresh 32-character lowercase hex token.
///
/// The digest covers the wall clock in nanoseconds and a random v4 UUID, so
/// two calls within the same clock tick still differ.
pub fn new_nonce() -> String {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let seed = format!("{}{}", nanos, Uuid::new_v4().simple());
    format!("{:x}", md5::compute(seed.as_bytes()))
}

/// Current gateway-local timestamp as a decimal string.
pub fn new_timestamp() -> String {
    timestamp_at(Utc::now())
}

/// Gateway-local timestamp for a given instant. The offset is applied once.
pub fn timestamp_at(instant: DateTime<Utc>) -> String {
    (instant.timestamp() + CHINA_TIMEZONE_OFFSET_SECS).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn nonce_is_32_lowercase_hex_chars() {
        let nonce = new_nonce();
        assert_eq!(nonce.len(), 32);
        assert!(nonce
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn nonces_do_not_repeat() {
        let nonces: HashSet<_> = (0..1000).map(|_| new_nonce()).collect();
        assert_eq!(nonces.len(), 1000);
    }

    #[test]
    fn timestamp_applies_offset_once() {
        let epoch = DateTime::<Utc>::from_timestamp(0, 0).unwrap();
        assert_eq!(timestamp_at(epoch), "28800");

        let instant = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(timestamp_at(instant), "1700028800");
    }

    #[test]
    fn current_timestamp_is_ahead_of_utc() {
        let before = Utc::now().timestamp();
        let stamp: i64 = new_timestamp().parse().unwrap();
        let after = Utc::now().timestamp();

        assert!(stamp >= before + CHINA_TIMEZONE_OFFSET_SECS);
        assert!(stamp <= after + CHINA_TIMEZONE_OFFSET_SECS);
    }
}
