//! # Digest Values
//!
//! A [`Digest`] is the fixed-size output of a SHA-2 or HMAC computation,
//! tagged with the variant that produced it. The byte length is always
//! `variant.digest_len()`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::error::HashError;
use crate::hex::{from_hex, to_hex};
use crate::variant::Variant;

/// Largest digest size across all variants (SHA-512).
pub const MAX_DIGEST_LEN: usize = 64;

/// A finished digest with its variant tag.
///
/// Serializes as its lowercase hex string; `Display` renders `sha256:<hex>`.
/// The four digest lengths are distinct, so deserialization recovers the
/// variant from the hex length.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest {
    variant: Variant,
    bytes: [u8; MAX_DIGEST_LEN],
}

impl Digest {
    /// Build a digest from a full-width output buffer, keeping the first
    /// `variant.digest_len()` bytes and zeroing the rest.
    pub fn from_raw(variant: Variant, mut raw: [u8; MAX_DIGEST_LEN]) -> Self {
        raw[variant.digest_len()..].fill(0);
        Self {
            variant,
            bytes: raw,
        }
    }

    /// Parse a digest of the given variant from hex text.
    pub fn from_hex(variant: Variant, hex: &str) -> Result<Self, HashError> {
        let bytes = from_hex(hex)?;
        if bytes.len() != variant.digest_len() {
            return Err(HashError::InvalidHex(format!(
                "{variant} digest must be {} hex chars, got {}",
                variant.digest_len() * 2,
                bytes.len() * 2
            )));
        }
        let mut raw = [0u8; MAX_DIGEST_LEN];
        raw[..bytes.len()].copy_from_slice(&bytes);
        Ok(Self::from_raw(variant, raw))
    }

    /// Parse hex text of any digest length, taking the variant from it.
    pub fn parse_hex(hex: &str) -> Result<Self, HashError> {
        let bytes = from_hex(hex)?;
        let variant = Variant::ALL
            .into_iter()
            .find(|v| v.digest_len() == bytes.len())
            .ok_or_else(|| {
                HashError::InvalidHex(format!(
                    "{} hex chars is not a SHA-2 digest length",
                    bytes.len() * 2
                ))
            })?;
        let mut raw = [0u8; MAX_DIGEST_LEN];
        raw[..bytes.len()].copy_from_slice(&bytes);
        Ok(Self::from_raw(variant, raw))
    }

    /// The variant that produced this digest.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The digest bytes, exactly `variant.digest_len()` long.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.variant.digest_len()]
    }

    /// Render the digest as lowercase hex.
    pub fn to_hex(&self) -> String {
        to_hex(self.as_bytes())
    }

    /// Compare against caller-supplied hex without early exit on the first
    /// differing byte. Malformed hex never matches.
    pub fn verify_hex(&self, expected: &str) -> bool {
        match from_hex(expected) {
            Ok(expected) => self.as_bytes().ct_eq(&expected).into(),
            Err(_) => false,
        }
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.variant, self.to_hex())
    }
}

impl Zeroize for Digest {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::parse_hex(&hex).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(variant: Variant) -> Digest {
        let mut raw = [0u8; MAX_DIGEST_LEN];
        for (i, b) in raw.iter_mut().enumerate() {
            *b = i as u8;
        }
        Digest::from_raw(variant, raw)
    }

    #[test]
    fn test_length_follows_variant() {
        for v in Variant::ALL {
            let d = sample(v);
            assert_eq!(d.as_bytes().len(), v.digest_len());
            assert_eq!(d.to_hex().len(), 2 * v.digest_len());
        }
    }

    #[test]
    fn test_from_raw_zeroes_tail() {
        let a = sample(Variant::Sha224);
        let mut other = [0u8; MAX_DIGEST_LEN];
        other[..28].copy_from_slice(a.as_bytes());
        assert_eq!(a, Digest::from_raw(Variant::Sha224, other));
    }

    #[test]
    fn test_display_carries_algorithm() {
        let s = sample(Variant::Sha256).to_string();
        assert!(s.starts_with("sha256:"));
        assert_eq!(s.len(), 7 + 64);
    }

    #[test]
    fn test_from_hex_checks_length() {
        let d = sample(Variant::Sha384);
        assert_eq!(Digest::from_hex(Variant::Sha384, &d.to_hex()).unwrap(), d);
        assert!(Digest::from_hex(Variant::Sha512, &d.to_hex()).is_err());
    }

    #[test]
    fn test_verify_hex() {
        let d = sample(Variant::Sha256);
        assert!(d.verify_hex(&d.to_hex()));
        assert!(d.verify_hex(&d.to_hex().to_uppercase()));
        assert!(!d.verify_hex(&d.to_hex()[..62]));
        assert!(!d.verify_hex("not hex"));
        let mut tampered = d.to_hex();
        tampered.replace_range(0..2, "ff");
        assert!(!d.verify_hex(&tampered));
    }

    #[test]
    fn test_serde_roundtrip_uses_hex() {
        for v in Variant::ALL {
            let d = sample(v);
            let json = serde_json::to_value(&d).unwrap();
            assert_eq!(json, serde_json::Value::String(d.to_hex()));
            let back: Digest = serde_json::from_value(json).unwrap();
            assert_eq!(back, d);
            assert_eq!(back.variant(), v);
        }
    }

    #[test]
    fn test_deserialize_rejects_wrong_length() {
        assert!(serde_json::from_str::<Digest>("\"00ff\"").is_err());
        assert!(serde_json::from_str::<Digest>("\"zz\"").is_err());
    }

    #[test]
    fn test_parse_hex_infers_variant() {
        let d = sample(Variant::Sha384);
        assert_eq!(Digest::parse_hex(&d.to_hex()).unwrap(), d);
        assert!(matches!(
            Digest::parse_hex(&"ab".repeat(20)),
            Err(HashError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_zeroize_clears_bytes() {
        let mut d = sample(Variant::Sha512);
        d.zeroize();
        assert_eq!(d.as_bytes(), &[0u8; 64][..]);
        assert_eq!(d.variant(), Variant::Sha512);
    }
}
