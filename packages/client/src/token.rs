//! Tracking tokens for the message-send endpoint.
//!
//! The endpoint expects 16 random bytes carried in a JSON string where byte
//! `b` is the code point `U+00b` (the Latin-1 identity mapping). It is neither
//! base64 nor hex. When the payload is serialized, bytes below `0x20` come
//! out as `\u00XX` escapes and bytes from `0x80` up as two-byte UTF-8
//! sequences; both are plain consequences of JSON string encoding.

use rand::rngs::OsRng;
use rand::RngCore;

/// Length of a tracking token in bytes (and in chars).
pub const TOKEN_LEN: usize = 16;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The random source failed. No token is produced in that case; callers
    /// omit the field instead of sending a degenerate value.
    #[error("tracking token: random source failed: {0}")]
    Random(#[source] rand::Error),

    /// A char outside `U+0000..=U+00FF` was found while decoding.
    #[error("tracking token: char U+{0:04X} at index {1} is not a byte")]
    NotAByte(u32, usize),
}

/// A fresh token from the operating system's random source.
pub fn generate_tracking_token() -> Result<String, TokenError> {
    generate_with(&mut OsRng)
}

/// A fresh token drawn from `rng`.
pub fn generate_with<R: RngCore + ?Sized>(rng: &mut R) -> Result<String, TokenError> {
    let mut bytes = [0u8; TOKEN_LEN];
    rng.try_fill_bytes(&mut bytes).map_err(TokenError::Random)?;
    Ok(encode_bytes(&bytes))
}

/// Map each byte to the char with the same code point.
pub fn encode_bytes(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

/// Reverse [`encode_bytes`].
pub fn decode_token(token: &str) -> Result<Vec<u8>, TokenError> {
    token
        .chars()
        .enumerate()
        .map(|(i, c)| u8::try_from(c).map_err(|_| TokenError::NotAByte(u32::from(c), i)))
        .collect()
}

// --- tests -------------------------------------------------------------------
