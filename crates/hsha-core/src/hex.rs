//! # Hex Formatting
//!
//! Renders raw digest bytes as lowercase hexadecimal text and parses
//! caller-supplied hex (keys, expected digests) back into bytes.
//!
//! Every call allocates its own exactly-sized output; nothing is shared
//! between calls.

use crate::error::HashError;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Render bytes as lowercase hex, two characters per byte, no separators.
pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(HEX_DIGITS[usize::from(b >> 4)] as char);
        out.push(HEX_DIGITS[usize::from(b & 0x0f)] as char);
    }
    out
}

/// Parse hex text (either case, surrounding whitespace ignored) into bytes.
pub fn from_hex(hex: &str) -> Result<Vec<u8>, HashError> {
    let hex = hex.trim().as_bytes();
    if hex.len() % 2 != 0 {
        return Err(HashError::InvalidHex(
            "hex string must have even length".to_string(),
        ));
    }
    hex.chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| {
            let hi = nibble(pair[0]);
            let lo = nibble(pair[1]);
            match (hi, lo) {
                (Some(hi), Some(lo)) => Ok((hi << 4) | lo),
                _ => Err(HashError::InvalidHex(format!(
                    "invalid hex digit at position {}",
                    i * 2
                ))),
            }
        })
        .collect()
}

fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}
