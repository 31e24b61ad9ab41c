//! Stable identifier hashing

/// Rolling 31-multiplier hash over the UTF-16 code units of `id`.
///
/// Wraps on overflow and returns the 32-bit signed result, so the value matches
/// the `h = h * 31 + c` convention used by the dashboard front end.
pub fn hash_id(id: &str) -> i32 {
    id.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}

/// Non-negative seed derived from [`hash_id`]
pub fn seed_of(id: &str) -> u64 {
    hash_id(id).unsigned_abs() as u64
}
