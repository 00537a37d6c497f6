//! Short human-shareable room codes.

use crate::domain::rng::RandomSource;

/// Random code of `len` characters drawn uniformly from `alphabet`.
pub fn generate_room_code(rng: &dyn RandomSource, alphabet: &[u8], len: usize) -> String {
    (0..len)
        .map(|_| alphabet[rng.below(alphabet.len())] as char)
        .collect()
}

/// Canonical form of a user-typed code: trimmed and upper-cased.
pub fn normalize_room_code(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}
