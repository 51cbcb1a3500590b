//! # Chunking Invariance
//!
//! The final digest must depend only on the concatenation of all bytes
//! passed to `update`, never on how they were split. Digests are also
//! cross-checked against the RustCrypto `sha2` crate, used here purely as
//! an independent oracle.

use hsha_crypto::{Context, Variant};
use proptest::prelude::*;
use sha2::Digest as _;

fn oracle_hash(variant: Variant, data: &[u8]) -> Vec<u8> {
    match variant {
        Variant::Sha224 => sha2::Sha224::digest(data).to_vec(),
        Variant::Sha256 => sha2::Sha256::digest(data).to_vec(),
        Variant::Sha384 => sha2::Sha384::digest(data).to_vec(),
        Variant::Sha512 => sha2::Sha512::digest(data).to_vec(),
    }
}

/// RFC 2104 written directly against the oracle hash.
fn oracle_hmac(variant: Variant, key: &[u8], data: &[u8]) -> Vec<u8> {
    let block_len = variant.block_len();
    let mut block = if key.len() > block_len {
        oracle_hash(variant, key)
    } else {
        key.to_vec()
    };
    block.resize(block_len, 0);

    let mut inner: Vec<u8> = block.iter().map(|b| b ^ 0x36).collect();
    inner.extend_from_slice(data);
    let inner_digest = oracle_hash(variant, &inner);

    let mut outer: Vec<u8> = block.iter().map(|b| b ^ 0x5c).collect();
    outer.extend_from_slice(&inner_digest);
    oracle_hash(variant, &outer)
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Split `data` at the given cut points (taken modulo `len + 1`).
fn split<'a>(data: &'a [u8], cuts: &[usize]) -> Vec<&'a [u8]> {
    let mut points: Vec<usize> = cuts.iter().map(|c| c % (data.len() + 1)).collect();
    points.push(0);
    points.push(data.len());
    points.sort_unstable();
    points.windows(2).map(|w| &data[w[0]..w[1]]).collect()
}

fn run(variant: Variant, key: Option<&[u8]>, chunks: &[&[u8]]) -> String {
    let mut ctx = Context::new(variant, key).unwrap();
    for chunk in chunks {
        ctx.update(chunk).unwrap();
    }
    ctx.finalize().unwrap()
}

fn any_variant() -> impl Strategy<Value = Variant> {
    prop::sample::select(Variant::ALL.to_vec())
}

#[test]
fn test_one_byte_per_update_across_block_boundaries() {
    // Lengths straddling the padding boundary of both families.
    for variant in Variant::ALL {
        for len in [0usize, 1, 55, 56, 63, 64, 65, 111, 112, 127, 128, 129, 300] {
            let data: Vec<u8> = (0..len).map(|i| (i * 7 + 3) as u8).collect();
            let bytewise: Vec<&[u8]> = data.chunks(1).collect();
            assert_eq!(
                run(variant, None, &bytewise),
                to_hex(&oracle_hash(variant, &data)),
                "{variant} len {len}"
            );
            assert_eq!(
                run(variant, Some(b"k".as_slice()), &bytewise),
                to_hex(&oracle_hmac(variant, b"k", &data)),
                "hmac {variant} len {len}"
            );
        }
    }
}

#[test]
fn test_empty_updates_are_neutral() {
    let with_empties = run(Variant::Sha384, None, &[b"", b"ab", b"", b"c", b""]);
    assert_eq!(with_empties, run(Variant::Sha384, None, &[b"abc"]));
}

proptest! {
    /// Any split of the message yields the single-call digest.
    #[test]
    fn plain_digest_is_split_invariant(
        variant in any_variant(),
        data in prop::collection::vec(any::<u8>(), 0..700),
        cuts in prop::collection::vec(any::<usize>(), 0..12),
    ) {
        let whole = run(variant, None, &[data.as_slice()]);
        let pieces = split(&data, &cuts);
        prop_assert_eq!(&run(variant, None, &pieces), &whole);
        prop_assert_eq!(whole, to_hex(&oracle_hash(variant, &data)));
    }

    /// Same for keyed mode, with keys on both sides of the block size.
    #[test]
    fn hmac_is_split_invariant(
        variant in any_variant(),
        key in prop::collection::vec(any::<u8>(), 0..200),
        data in prop::collection::vec(any::<u8>(), 0..700),
        cuts in prop::collection::vec(any::<usize>(), 0..12),
    ) {
        let whole = run(variant, Some(key.as_slice()), &[data.as_slice()]);
        let pieces = split(&data, &cuts);
        prop_assert_eq!(&run(variant, Some(key.as_slice()), &pieces), &whole);
        prop_assert_eq!(whole, to_hex(&oracle_hmac(variant, &key, &data)));
    }

    /// The hex digest is always twice the variant's digest length.
    #[test]
    fn hex_length_law(
        variant in any_variant(),
        keyed in any::<bool>(),
        data in prop::collection::vec(any::<u8>(), 0..300),
    ) {
        let key = keyed.then_some(&b"length-law"[..]);
        let hex = run(variant, key, &[data.as_slice()]);
        prop_assert_eq!(hex.len(), 2 * variant.digest_len());
        prop_assert!(hex.bytes().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
