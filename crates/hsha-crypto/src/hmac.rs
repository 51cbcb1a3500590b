//! # HMAC Wrapper
//!
//! Nested SHA-2 hashing under a secret key (RFC 2104).
//!
//! ## Key schedule
//!
//! On key assignment the key is normalized to one block: keys longer than
//! the block are replaced by their plain digest under the same variant,
//! then zero-padded. The inner pad is the normalized key XOR `0x36`, the
//! outer pad the normalized key XOR `0x5c`. Both pads are derived once per
//! key and kept, so re-initializing under the same key only replays the
//! inner pad into a fresh [`HashState`].
//!
//! ## Security Invariant
//!
//! The owned key copy and both pads live in `Zeroizing` buffers and are
//! wiped when the schedule is dropped or replaced. The digest of an
//! over-long key is wiped as soon as it has been copied into the pads.
//! `Debug` output never contains key material.

use hsha_core::{check_key_len, Digest, HashError, Variant, MAX_BLOCK_LEN};
use zeroize::Zeroizing;

use crate::sha2::HashState;

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

/// Owned key bytes plus the inner and outer pads derived from them.
pub struct KeySchedule {
    key: Zeroizing<Vec<u8>>,
    inner_pad: Zeroizing<[u8; MAX_BLOCK_LEN]>,
    outer_pad: Zeroizing<[u8; MAX_BLOCK_LEN]>,
    block_len: usize,
}

impl KeySchedule {
    /// Copy `key` and derive both pads for `variant`.
    pub fn derive(variant: Variant, key: &[u8]) -> Result<Self, HashError> {
        check_key_len(key.len())?;
        let block_len = variant.block_len();

        let mut normalized = Zeroizing::new([0u8; MAX_BLOCK_LEN]);
        if key.len() > block_len {
            let hashed = Zeroizing::new(HashState::digest(variant, key));
            normalized[..hashed.as_bytes().len()].copy_from_slice(hashed.as_bytes());
        } else {
            normalized[..key.len()].copy_from_slice(key);
        }

        let mut inner_pad = Zeroizing::new([0u8; MAX_BLOCK_LEN]);
        let mut outer_pad = Zeroizing::new([0u8; MAX_BLOCK_LEN]);
        for i in 0..block_len {
            inner_pad[i] = normalized[i] ^ IPAD;
            outer_pad[i] = normalized[i] ^ OPAD;
        }

        Ok(Self {
            key: Zeroizing::new(key.to_vec()),
            inner_pad,
            outer_pad,
            block_len,
        })
    }

    /// The key as supplied by the caller.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Normalized key XOR `0x36`, one block long.
    pub fn inner_pad(&self) -> &[u8] {
        &self.inner_pad[..self.block_len]
    }

    /// Normalized key XOR `0x5c`, one block long.
    pub fn outer_pad(&self) -> &[u8] {
        &self.outer_pad[..self.block_len]
    }
}

impl std::fmt::Debug for KeySchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeySchedule")
            .field("key_len", &self.key.len())
            .field("block_len", &self.block_len)
            .finish_non_exhaustive()
    }
}

/// A keyed MAC computation: inner and outer [`HashState`]s sharing one
/// [`KeySchedule`].
#[derive(Debug)]
pub struct Hmac {
    schedule: KeySchedule,
    inner: HashState,
    outer: HashState,
}

impl Hmac {
    /// Derive the key schedule and prime the inner state with the inner pad.
    pub fn new(variant: Variant, key: &[u8]) -> Result<Self, HashError> {
        let schedule = KeySchedule::derive(variant, key)?;
        let mut inner = HashState::new(variant);
        inner.absorb(schedule.inner_pad())?;
        Ok(Self {
            schedule,
            inner,
            outer: HashState::new(variant),
        })
    }

    /// One-shot MAC of `data` under `key`.
    pub fn mac(variant: Variant, key: &[u8], data: &[u8]) -> Result<Digest, HashError> {
        let mut hmac = Self::new(variant, key)?;
        hmac.update(data)?;
        hmac.finalize()
    }

    /// Start a fresh MAC under the current key without re-deriving pads.
    pub fn reinit(&mut self) -> Result<(), HashError> {
        self.inner.reset();
        self.inner.absorb(self.schedule.inner_pad())
    }

    /// Feed message bytes into the inner hash.
    pub fn update(&mut self, data: &[u8]) -> Result<(), HashError> {
        self.inner.absorb(data)
    }

    /// `H(outer_pad || H(inner_pad || message))`.
    pub fn finalize(&mut self) -> Result<Digest, HashError> {
        let inner_digest = self.inner.finalize()?;
        self.outer.reset();
        self.outer.absorb(self.schedule.outer_pad())?;
        self.outer.absorb(inner_digest.as_bytes())?;
        self.outer.finalize()
    }

    /// The variant both nested states compute.
    pub fn variant(&self) -> Variant {
        self.inner.variant()
    }

    /// Length of the caller-supplied key.
    pub fn key_len(&self) -> usize {
        self.schedule.key().len()
    }

    /// Whether the inner state has been finalized since the last reinit.
    pub fn is_finalized(&self) -> bool {
        self.inner.is_finalized()
    }
}
