//! # Input Size Limits
//!
//! Keys and individual update chunks are bounded by the platform unsigned
//! 32-bit maximum. The bound applies per call; the cumulative message length
//! is only bounded by the bit-length counter of the engine.

use crate::error::HashError;

/// Largest accepted key or single update chunk, in bytes.
pub const MAX_INPUT_LEN: u64 = u32::MAX as u64;

/// Reject a key whose length exceeds [`MAX_INPUT_LEN`].
pub fn check_key_len(len: usize) -> Result<(), HashError> {
    let len = widen(len);
    if len > MAX_INPUT_LEN {
        return Err(HashError::KeyTooLarge { len });
    }
    Ok(())
}

/// Reject an update chunk whose length exceeds [`MAX_INPUT_LEN`].
pub fn check_message_len(len: usize) -> Result<(), HashError> {
    let len = widen(len);
    if len > MAX_INPUT_LEN {
        return Err(HashError::MessageTooLarge { len });
    }
    Ok(())
}

// usize is at most 64 bits on every supported target.
fn widen(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_at_limit_accepted() {
        assert!(check_key_len(0).is_ok());
        assert!(check_key_len(MAX_INPUT_LEN as usize).is_ok());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_key_over_limit_rejected() {
        let len = MAX_INPUT_LEN as usize + 1;
        assert_eq!(
            check_key_len(len),
            Err(HashError::KeyTooLarge {
                len: MAX_INPUT_LEN + 1
            })
        );
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_message_over_limit_rejected() {
        let len = usize::MAX;
        assert_eq!(
            check_message_len(len),
            Err(HashError::MessageTooLarge { len: u64::MAX })
        );
    }

    #[test]
    fn test_message_at_limit_accepted() {
        assert!(check_message_len(MAX_INPUT_LEN as usize).is_ok());
    }
}
