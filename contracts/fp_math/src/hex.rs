use crate::MathError;
use num_bigint::BigUint;
use num_traits::ToPrimitive;

/// Decode a hex-encoded unsigned integer, with or without a `0x` prefix.
pub fn hex_to_integer(text: &str) -> Result<BigUint, MathError> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(MathError::InvalidHex(text.to_string()));
    }

    BigUint::parse_bytes(digits.as_bytes(), 16).ok_or_else(|| MathError::InvalidHex(text.to_string()))
}

pub fn hex_to_u64(text: &str) -> Result<u64, MathError> {
    hex_to_integer(text)?
        .to_u64()
        .ok_or_else(|| MathError::InvalidHex(text.to_string()))
}
