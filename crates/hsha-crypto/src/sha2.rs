//! # SHA-2 Core
//!
//! [`HashState`] is one running SHA-2 computation for a chosen [`Variant`]:
//! eight running words, a [`BlockBuffer`] for the sub-block remainder and
//! the length counter, and a finalized flag.
//!
//! The compression function is generic over [`Family`], so SHA-224/256 and
//! SHA-384/512 share one implementation; the variant only selects the
//! family, the initial hash values and the output truncation.
//!
//! ## Lifecycle
//!
//! `new`/`reset` load the initial values. `absorb` may be called any number
//! of times with arbitrarily sized slices. `finalize` pads, emits the digest
//! and marks the state finalized; further `absorb`/`finalize` calls fail
//! with [`HashError::UninitializedState`] until `reset`.

use std::marker::PhantomData;

use hsha_core::{Digest, HashError, Variant, MAX_DIGEST_LEN};

use crate::buffer::BlockBuffer;
use crate::family::{
    Family, Narrow, Wide, MAX_ROUNDS, SHA224_IV, SHA256_IV, SHA384_IV, SHA512_IV,
};
use crate::word::{big_sigma, choice, majority, small_sigma, Word};

/// Mix one block into the running words.
fn compress<F: Family>(state: &mut [F::Word; 8], block: &[u8]) {
    debug_assert_eq!(block.len(), F::BLOCK_LEN);

    let mut w = [F::Word::default(); MAX_ROUNDS];
    for (slot, bytes) in w.iter_mut().zip(block.chunks_exact(F::Word::BYTES)) {
        *slot = F::Word::read_be(bytes);
    }
    for t in 16..F::ROUNDS {
        w[t] = small_sigma(w[t - 2], F::SMALL_SIGMA1)
            .wrapping_add(w[t - 7])
            .wrapping_add(small_sigma(w[t - 15], F::SMALL_SIGMA0))
            .wrapping_add(w[t - 16]);
    }

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for t in 0..F::ROUNDS {
        let t1 = h
            .wrapping_add(big_sigma(e, F::BIG_SIGMA1))
            .wrapping_add(choice(e, f, g))
            .wrapping_add(F::K[t])
            .wrapping_add(w[t]);
        let t2 = big_sigma(a, F::BIG_SIGMA0).wrapping_add(majority(a, b, c));
        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(t1);
        d = c;
        c = b;
        b = a;
        a = t1.wrapping_add(t2);
    }

    for (word, mixed) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
        *word = word.wrapping_add(mixed);
    }
}

/// Running state for one word family.
#[derive(Clone)]
struct Compressor<F: Family> {
    iv: [F::Word; 8],
    words: [F::Word; 8],
    buffer: BlockBuffer,
    _family: PhantomData<F>,
}

impl<F: Family> Compressor<F> {
    fn new(iv: [F::Word; 8]) -> Self {
        Self {
            iv,
            words: iv,
            buffer: BlockBuffer::new(F::BLOCK_LEN),
            _family: PhantomData,
        }
    }

    fn reset(&mut self) {
        self.words = self.iv;
        self.buffer.reset();
    }

    fn absorb(&mut self, data: &[u8]) {
        let words = &mut self.words;
        self.buffer.absorb(data, |block| compress::<F>(words, block));
    }

    /// Pad, then serialize all eight words big-endian into `out`.
    fn finish(&mut self, out: &mut [u8; MAX_DIGEST_LEN]) {
        let words = &mut self.words;
        self.buffer
            .pad(F::LEN_FIELD, |block| compress::<F>(words, block));
        for (word, dst) in self.words.iter().zip(out.chunks_exact_mut(F::Word::BYTES)) {
            word.write_be(dst);
        }
    }

    fn total_bits(&self) -> u128 {
        self.buffer.total_bits()
    }

    fn buffered(&self) -> usize {
        self.buffer.buffered()
    }
}

#[derive(Clone)]
enum Engine {
    Narrow(Compressor<Narrow>),
    Wide(Compressor<Wide>),
}

/// One SHA-2 computation in progress.
#[derive(Clone)]
pub struct HashState {
    variant: Variant,
    engine: Engine,
    finalized: bool,
}

impl HashState {
    /// Start a computation from the variant's initial hash values.
    pub fn new(variant: Variant) -> Self {
        let engine = match variant {
            Variant::Sha224 => Engine::Narrow(Compressor::new(SHA224_IV)),
            Variant::Sha256 => Engine::Narrow(Compressor::new(SHA256_IV)),
            Variant::Sha384 => Engine::Wide(Compressor::new(SHA384_IV)),
            Variant::Sha512 => Engine::Wide(Compressor::new(SHA512_IV)),
        };
        Self {
            variant,
            engine,
            finalized: false,
        }
    }

    /// One-shot digest of `data`.
    pub fn digest(variant: Variant, data: &[u8]) -> Digest {
        let mut state = Self::new(variant);
        state.absorb_unchecked(data);
        state.finish()
    }

    /// Return to the initial hash values with an empty buffer.
    pub fn reset(&mut self) {
        match &mut self.engine {
            Engine::Narrow(c) => c.reset(),
            Engine::Wide(c) => c.reset(),
        }
        self.finalized = false;
    }

    /// Append message bytes.
    pub fn absorb(&mut self, data: &[u8]) -> Result<(), HashError> {
        if self.finalized {
            return Err(HashError::UninitializedState);
        }
        self.absorb_unchecked(data);
        Ok(())
    }

    /// Pad, compress the final block(s) and return the truncated digest.
    pub fn finalize(&mut self) -> Result<Digest, HashError> {
        if self.finalized {
            return Err(HashError::UninitializedState);
        }
        Ok(self.finish())
    }

    /// The variant this state computes.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Whether `finalize` has run since the last reset.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Message bits absorbed since the last reset.
    pub fn total_bits(&self) -> u128 {
        match &self.engine {
            Engine::Narrow(c) => c.total_bits(),
            Engine::Wide(c) => c.total_bits(),
        }
    }

    fn absorb_unchecked(&mut self, data: &[u8]) {
        match &mut self.engine {
            Engine::Narrow(c) => c.absorb(data),
            Engine::Wide(c) => c.absorb(data),
        }
    }

    fn finish(&mut self) -> Digest {
        let mut raw = [0u8; MAX_DIGEST_LEN];
        match &mut self.engine {
            Engine::Narrow(c) => c.finish(&mut raw),
            Engine::Wide(c) => c.finish(&mut raw),
        }
        self.finalized = true;
        Digest::from_raw(self.variant, raw)
    }
}

impl std::fmt::Debug for HashState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let buffered = match &self.engine {
            Engine::Narrow(c) => c.buffered(),
            Engine::Wide(c) => c.buffered(),
        };
        f.debug_struct("HashState")
            .field("variant", &self.variant)
            .field("total_bits", &self.total_bits())
            .field("buffered", &buffered)
            .field("finalized", &self.finalized)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_of(variant: Variant, data: &[u8]) -> String {
        HashState::digest(variant, data).to_hex()
    }

    #[test]
    fn test_sha256_abc() {
        assert_eq!(
            hex_of(Variant::Sha256, b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sha224_abc_truncates() {
        let hex = hex_of(Variant::Sha224, b"abc");
        assert_eq!(hex, "23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7");
        assert_eq!(hex.len(), 56);
    }

    #[test]
    fn test_sha384_abc() {
        assert_eq!(
            hex_of(Variant::Sha384, b"abc"),
            "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed\
             8086072ba1e7cc2358baeca134c825a7"
        );
    }

    #[test]
    fn test_sha512_abc() {
        assert_eq!(
            hex_of(Variant::Sha512, b"abc"),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }

    #[test]
    fn test_two_block_padding() {
        assert_eq!(
            hex_of(
                Variant::Sha256,
                b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq"
            ),
            "248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1"
        );
    }

    #[test]
    fn test_absorb_after_finalize_rejected() {
        let mut state = HashState::new(Variant::Sha256);
        state.absorb(b"abc").unwrap();
        state.finalize().unwrap();
        assert!(state.is_finalized());
        assert_eq!(state.absorb(b"x"), Err(HashError::UninitializedState));
        assert_eq!(state.finalize(), Err(HashError::UninitializedState));
    }

    #[test]
    fn test_reset_restarts_computation() {
        let mut state = HashState::new(Variant::Sha512);
        state.absorb(&[0xaa; 300]).unwrap();
        state.finalize().unwrap();
        state.reset();
        assert_eq!(state.total_bits(), 0);
        state.absorb(b"abc").unwrap();
        assert_eq!(
            state.finalize().unwrap(),
            HashState::digest(Variant::Sha512, b"abc")
        );
    }

    #[test]
    fn test_split_input_matches_one_shot() {
        let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        for variant in Variant::ALL {
            let mut state = HashState::new(variant);
            for chunk in data.chunks(37) {
                state.absorb(chunk).unwrap();
            }
            assert_eq!(state.finalize().unwrap(), HashState::digest(variant, &data));
        }
    }

    #[test]
    fn test_counter_counts_bits() {
        let mut state = HashState::new(Variant::Sha384);
        state.absorb(&[0u8; 129]).unwrap();
        state.absorb(&[0u8; 3]).unwrap();
        assert_eq!(state.total_bits(), 132 * 8);
    }

    #[test]
    fn test_debug_omits_running_words() {
        let state = HashState::new(Variant::Sha256);
        let s = format!("{state:?}");
        assert!(s.contains("Sha256"));
        assert!(!s.contains("6a09e667"));
    }
}
