//! # Word-Size Primitives
//!
//! The SHA-2 round functions are identical for both families apart from the
//! word width and the rotation amounts. [`Word`] abstracts the handful of
//! operations the compression function needs so that a single generic
//! implementation serves both `u32` (SHA-224/256) and `u64` (SHA-384/512).
//!
//! All arithmetic is modulo 2^32 or 2^64; rotations are circular.

use std::ops::{BitAnd, BitXor, Not};

/// An unsigned machine word usable by the SHA-2 compression function.
pub trait Word:
    Copy
    + Default
    + Eq
    + std::fmt::Debug
    + BitAnd<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
{
    /// Width of the word in bytes.
    const BYTES: usize;

    /// Addition modulo 2^BITS.
    fn wrapping_add(self, rhs: Self) -> Self;

    /// Circular right rotation.
    fn rotate_right(self, n: u32) -> Self;

    /// Logical right shift.
    fn shift_right(self, n: u32) -> Self;

    /// Read one big-endian word from the first `BYTES` bytes of `bytes`.
    fn read_be(bytes: &[u8]) -> Self;

    /// Write the word big-endian into the first `BYTES` bytes of `out`.
    fn write_be(self, out: &mut [u8]);
}

macro_rules! impl_word {
    ($t:ty) => {
        impl Word for $t {
            const BYTES: usize = std::mem::size_of::<$t>();

            #[inline(always)]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$t>::wrapping_add(self, rhs)
            }

            #[inline(always)]
            fn rotate_right(self, n: u32) -> Self {
                <$t>::rotate_right(self, n)
            }

            #[inline(always)]
            fn shift_right(self, n: u32) -> Self {
                self >> n
            }

            #[inline(always)]
            fn read_be(bytes: &[u8]) -> Self {
                let mut buf = [0u8; std::mem::size_of::<$t>()];
                buf.copy_from_slice(&bytes[..Self::BYTES]);
                <$t>::from_be_bytes(buf)
            }

            #[inline(always)]
            fn write_be(self, out: &mut [u8]) {
                out[..Self::BYTES].copy_from_slice(&self.to_be_bytes());
            }
        }
    };
}

impl_word!(u32);
impl_word!(u64);

/// `Ch(x, y, z)`: for each bit, pick `y` where `x` is set, else `z`.
#[inline(always)]
pub fn choice<W: Word>(x: W, y: W, z: W) -> W {
    (x & y) ^ (!x & z)
}

/// `Maj(x, y, z)`: bitwise majority of the three inputs.
#[inline(always)]
pub fn majority<W: Word>(x: W, y: W, z: W) -> W {
    (x & y) ^ (x & z) ^ (y & z)
}

/// Upper-case sigma: XOR of three rotations.
#[inline(always)]
pub fn big_sigma<W: Word>(x: W, r: [u32; 3]) -> W {
    x.rotate_right(r[0]) ^ x.rotate_right(r[1]) ^ x.rotate_right(r[2])
}

/// Lower-case sigma: XOR of two rotations and one shift (used by the
/// message schedule).
#[inline(always)]
pub fn small_sigma<W: Word>(x: W, r: [u32; 3]) -> W {
    x.rotate_right(r[0]) ^ x.rotate_right(r[1]) ^ x.shift_right(r[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapping_add_mod_width() {
        assert_eq!(Word::wrapping_add(u32::MAX, 2u32), 1);
        assert_eq!(Word::wrapping_add(u64::MAX, 1u64), 0);
    }

    #[test]
    fn test_rotation_is_circular() {
        assert_eq!(Word::rotate_right(1u32, 1), 0x8000_0000);
        assert_eq!(Word::rotate_right(1u64, 1), 0x8000_0000_0000_0000);
        assert_eq!(Word::shift_right(1u32, 1), 0);
    }

    #[test]
    fn test_big_endian_io() {
        let bytes = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        assert_eq!(<u32 as Word>::read_be(&bytes), 0x0102_0304);
        assert_eq!(<u64 as Word>::read_be(&bytes), 0x0102_0304_0506_0708);

        let mut out = [0u8; 8];
        Word::write_be(0xa1b2_c3d4u32, &mut out);
        assert_eq!(&out[..4], &[0xa1, 0xb2, 0xc3, 0xd4]);
    }

    #[test]
    fn test_choice_and_majority() {
        assert_eq!(choice(0xffff_0000u32, 0x1234_5678, 0x9abc_def0), 0x1234_def0);
        assert_eq!(majority(0b1100u32, 0b1010, 0b0110), 0b1110);
        assert_eq!(majority(0u64, 0, u64::MAX), 0);
    }

    #[test]
    fn test_sigma_shapes() {
        // SHA-256 sigma0 of the message schedule on a single set bit.
        let x = 0x8000_0000u32;
        let expected = x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3);
        assert_eq!(small_sigma(x, [7, 18, 3]), expected);
        assert_eq!(
            big_sigma(x, [2, 13, 22]),
            x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
        );
    }
}
