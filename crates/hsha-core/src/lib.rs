//! # hsha-core — Foundational Types for SHA-2 Hashing
//!
//! This crate defines the vocabulary shared by every other crate in the
//! workspace. It carries no algorithmic content of its own; the SHA-2
//! compression engine and the HMAC construction live in `hsha-crypto`.
//!
//! ## Key Design Principles
//!
//! 1. **One `Variant` enum.** The four SHA-2 widths (224, 256, 384, 512) are
//!    a closed set. Block size, digest size and word width are derived from
//!    the variant with an exhaustive `match`, never from a loose integer.
//!
//! 2. **Typed digests.** A [`Digest`] carries its variant, so its length is
//!    always `variant.digest_len()` and its hex rendering is always
//!    `2 * digest_len` characters.
//!
//! 3. **Validate at the boundary.** Caller-supplied key and message lengths
//!    are checked against [`MAX_INPUT_LEN`] before anything is mutated.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `hsha-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod digest;
pub mod error;
pub mod hex;
pub mod limits;
pub mod variant;

// Re-export primary types for ergonomic imports.
pub use digest::{Digest, MAX_DIGEST_LEN};
pub use error::HashError;
pub use hex::{from_hex, to_hex};
pub use limits::{check_key_len, check_message_len, MAX_INPUT_LEN};
pub use variant::{Variant, MAX_BLOCK_LEN};
