//! # Error Types
//!
//! Defines the single error type returned by every fallible operation in the
//! workspace. All variants derive `Display` and `Error` through `thiserror`.
//!
//! ## Design
//!
//! - Every error is raised at the call boundary, before any state mutation.
//!   A rejected call leaves the context exactly as it was.
//! - Errors carry the offending value (bit width, length) so callers can
//!   report it without re-deriving it.

use thiserror::Error;

use crate::limits::MAX_INPUT_LEN;

/// Errors from SHA-2 and HMAC operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    /// The requested bit width is not one of 224, 256, 384 or 512.
    #[error("invalid SHA-2 variant: {0} (expected 224, 256, 384 or 512)")]
    InvalidVariant(u32),

    /// A key longer than the maximum representable size was supplied.
    #[error("key length must be less than or equal to {max}, got {len}", max = MAX_INPUT_LEN)]
    KeyTooLarge {
        /// Length of the rejected key in bytes.
        len: u64,
    },

    /// A single update chunk longer than the maximum representable size.
    #[error("message length must be less than or equal to {max}, got {len}", max = MAX_INPUT_LEN)]
    MessageTooLarge {
        /// Length of the rejected chunk in bytes.
        len: u64,
    },

    /// `update` or `finalize` was called on a state that has already been
    /// finalized and has not been re-initialized since.
    #[error("context is not initialized; call init before update or finalize")]
    UninitializedState,

    /// Caller-supplied hex text could not be decoded.
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_variant_message_names_width() {
        let msg = HashError::InvalidVariant(160).to_string();
        assert!(msg.contains("160"));
    }

    #[test]
    fn test_key_too_large_message_names_limit() {
        let msg = HashError::KeyTooLarge { len: 4_294_967_296 }.to_string();
        assert!(msg.contains("4294967295"));
        assert!(msg.contains("4294967296"));
    }

    #[test]
    fn test_errors_compare_by_value() {
        assert_eq!(
            HashError::MessageTooLarge { len: 7 },
            HashError::MessageTooLarge { len: 7 }
        );
        assert_ne!(HashError::UninitializedState, HashError::InvalidVariant(0));
    }
}
