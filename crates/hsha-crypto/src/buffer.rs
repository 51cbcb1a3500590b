//! # Streaming Block Buffer
//!
//! Accumulates message bytes across `update` calls and hands the
//! compression function one full block at a time. Whole blocks found in the
//! caller's slice are compressed in place without copying; only the trailing
//! sub-block remainder is retained.
//!
//! The buffer also owns the bit-length counter and the final padding, since
//! both depend only on how many bytes went through it. The counter is 128
//! bits wide; the 32-bit family encodes its low 64 bits.
//!
//! ## Invariant
//!
//! `filled < block_len` between calls. A full block is never left sitting
//! in the buffer, so padding always has room for at least the `0x80` byte.

use hsha_core::MAX_BLOCK_LEN;

/// Partial-block scratch space plus the running message length.
#[derive(Clone)]
pub struct BlockBuffer {
    block: [u8; MAX_BLOCK_LEN],
    block_len: usize,
    filled: usize,
    total_bits: u128,
}

impl BlockBuffer {
    /// Create an empty buffer for the given block size.
    pub fn new(block_len: usize) -> Self {
        debug_assert!(block_len <= MAX_BLOCK_LEN);
        Self {
            block: [0u8; MAX_BLOCK_LEN],
            block_len,
            filled: 0,
            total_bits: 0,
        }
    }

    /// Discard buffered bytes and zero the length counter.
    pub fn reset(&mut self) {
        self.block.fill(0);
        self.filled = 0;
        self.total_bits = 0;
    }

    /// Number of bytes waiting for a full block.
    pub fn buffered(&self) -> usize {
        self.filled
    }

    /// Total message length absorbed so far, in bits.
    pub fn total_bits(&self) -> u128 {
        self.total_bits
    }

    /// Append `data`, calling `compress` once per completed block in order.
    pub fn absorb(&mut self, mut data: &[u8], mut compress: impl FnMut(&[u8])) {
        let bits = (data.len() as u128).wrapping_mul(8);
        self.total_bits = self.total_bits.wrapping_add(bits);

        if self.filled > 0 {
            let take = (self.block_len - self.filled).min(data.len());
            self.block[self.filled..self.filled + take].copy_from_slice(&data[..take]);
            self.filled += take;
            data = &data[take..];
            if self.filled < self.block_len {
                return;
            }
            compress(&self.block[..self.block_len]);
            self.filled = 0;
        }

        let mut blocks = data.chunks_exact(self.block_len);
        for block in &mut blocks {
            compress(block);
        }
        let rest = blocks.remainder();
        self.block[..rest.len()].copy_from_slice(rest);
        self.filled = rest.len();
    }

    /// Apply SHA-2 padding: a `0x80` byte, zeros, then the bit length
    /// big-endian in the last `len_field` bytes of the final block. Spills
    /// into a second block when the remainder leaves no room for the length.
    pub fn pad(&mut self, len_field: usize, mut compress: impl FnMut(&[u8])) {
        let block_len = self.block_len;
        let length_at = block_len - len_field;

        self.block[self.filled] = 0x80;
        self.filled += 1;

        if self.filled > length_at {
            self.block[self.filled..block_len].fill(0);
            compress(&self.block[..block_len]);
            self.filled = 0;
        }

        self.block[self.filled..length_at].fill(0);
        let length = self.total_bits.to_be_bytes();
        self.block[length_at..block_len].copy_from_slice(&length[length.len() - len_field..]);
        compress(&self.block[..block_len]);
        self.filled = 0;
    }
}
