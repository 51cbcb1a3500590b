//! # SHA-2 Variant Selection
//!
//! The four supported digest widths form a closed set. Each variant fixes
//! the word width, the block size, the digest size and (inside the engine)
//! the initial hash values. SHA-224 and SHA-256 share the 32-bit word
//! family; SHA-384 and SHA-512 share the 64-bit word family.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::HashError;

/// Largest block size across all variants (the 64-bit word family).
pub const MAX_BLOCK_LEN: usize = 128;

/// A member of the SHA-2 family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variant {
    /// SHA-224: 32-bit words, truncated to 28 bytes.
    Sha224,
    /// SHA-256: 32-bit words, 32-byte digest.
    Sha256,
    /// SHA-384: 64-bit words, truncated to 48 bytes.
    Sha384,
    /// SHA-512: 64-bit words, 64-byte digest.
    Sha512,
}

impl Variant {
    /// Every variant, in ascending bit width.
    pub const ALL: [Variant; 4] = [
        Variant::Sha224,
        Variant::Sha256,
        Variant::Sha384,
        Variant::Sha512,
    ];

    /// Nominal bit width of the digest.
    pub fn bits(self) -> u32 {
        match self {
            Self::Sha224 => 224,
            Self::Sha256 => 256,
            Self::Sha384 => 384,
            Self::Sha512 => 512,
        }
    }

    /// Bytes consumed per compression call.
    pub fn block_len(self) -> usize {
        match self {
            Self::Sha224 | Self::Sha256 => 64,
            Self::Sha384 | Self::Sha512 => MAX_BLOCK_LEN,
        }
    }

    /// Bytes in the finished digest.
    pub fn digest_len(self) -> usize {
        self.bits() as usize / 8
    }

    /// Whether this variant runs on 64-bit words.
    pub fn is_wide(self) -> bool {
        matches!(self, Self::Sha384 | Self::Sha512)
    }

    /// Lowercase algorithm name, e.g. `"sha256"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }
}

impl TryFrom<u32> for Variant {
    type Error = HashError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            224 => Ok(Self::Sha224),
            256 => Ok(Self::Sha256),
            384 => Ok(Self::Sha384),
            512 => Ok(Self::Sha512),
            other => Err(HashError::InvalidVariant(other)),
        }
    }
}

impl FromStr for Variant {
    type Err = HashError;

    /// Accepts `"256"`, `"sha256"`, `"SHA-256"` and `"sha-256"` forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let digits = lower
            .strip_prefix("sha-")
            .or_else(|| lower.strip_prefix("sha"))
            .unwrap_or(&lower);
        let bits = digits
            .parse::<u32>()
            .map_err(|_| HashError::InvalidVariant(0))?;
        Self::try_from(bits)
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Variant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Variant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
