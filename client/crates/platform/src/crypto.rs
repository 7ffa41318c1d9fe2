//! Random token generation

use rand::Rng;

/// Base-36 alphabet: digits then lowercase ASCII letters
pub const TOKEN_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a random base-36 token of `len` characters
pub fn random_token(len: usize) -> String {
    random_token_with(&mut rand::rng(), len)
}

/// Generate a token from a caller-supplied RNG (seeded in tests)
pub fn random_token_with<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(TOKEN_ALPHABET[rng.random_range(0..TOKEN_ALPHABET.len())]))
        .collect()
}

/// Whether `c` belongs to [`TOKEN_ALPHABET`]
pub fn is_token_char(c: char) -> bool {
    c.is_ascii_digit() || c.is_ascii_lowercase()
}
