//! Task identifier generation.
//!
//! Identifiers are a base-36 millisecond timestamp followed by a base-36
//! random suffix. They only need to be unique within one local store.

#[cfg(test)]
#[path = "id_test.rs"]
mod id_test;

use rand::Rng;
use time::OffsetDateTime;

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Lowercase base-36 rendering of `value`.
#[must_use]
pub fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_owned();
    }
    let mut buf = Vec::with_capacity(13);
    while value > 0 {
        #[allow(clippy::cast_possible_truncation)]
        buf.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    buf.reverse();
    buf.into_iter().map(char::from).collect()
}

/// Generate a fresh task identifier.
#[must_use]
pub fn new_id() -> String {
    let millis = u64::try_from(OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000).unwrap_or(0);
    let suffix: u64 = rand::rng().random();
    let mut id = to_base36(millis);
    id.push_str(&to_base36(suffix));
    id
}
