use super::*;
use std::collections::HashSet;

// =============================================================================
// to_base36
// =============================================================================

#[test]
fn base36_zero() {
    assert_eq!(to_base36(0), "0");
}

#[test]
fn base36_single_digits() {
    assert_eq!(to_base36(9), "9");
    assert_eq!(to_base36(10), "a");
    assert_eq!(to_base36(35), "z");
}

#[test]
fn base36_carries() {
    assert_eq!(to_base36(36), "10");
    assert_eq!(to_base36(1295), "zz");
}

#[test]
fn base36_max() {
    assert_eq!(to_base36(u64::MAX), "3w5e11264sgsf");
}

// =============================================================================
// new_id
// =============================================================================

#[test]
fn new_id_is_lowercase_alphanumeric() {
    let id = new_id();
    assert!(!id.is_empty());
    assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
}

#[test]
fn new_id_starts_with_timestamp_prefix() {
    // Current epoch millis are 8 base-36 digits until the year 2059.
    let id = new_id();
    assert!(id.len() > 8);
}

#[test]
fn new_id_two_calls_differ() {
    assert_ne!(new_id(), new_id());
}

#[test]
fn new_id_many_calls_are_distinct() {
    let ids: HashSet<String> = (0..1000).map(|_| new_id()).collect();
    assert_eq!(ids.len(), 1000);
}

#[test]
fn new_id_prefix_is_current_unix_millis() {
    let before = time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    let id = new_id();
    let after = time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;

    let prefix = i128::from(u64::from_str_radix(&id[..8], 36).unwrap());
    assert!((before..=after).contains(&prefix));
}
