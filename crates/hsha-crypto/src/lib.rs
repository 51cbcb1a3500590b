//! # hsha-crypto — SHA-2 and HMAC Engine
//!
//! Computes SHA-224, SHA-256, SHA-384 and SHA-512 digests and their HMAC
//! counterparts incrementally over arbitrarily chunked input.
//!
//! - **Word primitives** ([`word`]): rotations, shifts, choice and majority
//!   over a generic [`Word`](word::Word) implemented for `u32` and `u64`.
//! - **Families** ([`family`]): round constants, rotation amounts and
//!   initial hash values as data.
//! - **Block buffer** ([`buffer`]): sub-block remainder, bit counter and
//!   final padding.
//! - **SHA-2 core** ([`sha2`](crate::sha2)): the generic compression function and
//!   [`HashState`].
//! - **HMAC** ([`hmac`](crate::hmac)): key normalization, inner/outer pads and the
//!   nested construction.
//! - **Context** ([`context`]): the create/init/update/finalize surface a
//!   host binding calls into.
//!
//! ## Crate Policy
//!
//! - Depends only on `hsha-core` internally.
//! - The engine is self-contained; the RustCrypto `sha2` crate appears only
//!   as a test oracle.
//! - No `unsafe` code.

pub mod buffer;
pub mod context;
pub mod family;
pub mod hmac;
pub mod sha2;
pub mod word;

pub use crate::context::{digest, hmac, Context, KeyChange};
pub use crate::hmac::{Hmac, KeySchedule};
pub use crate::sha2::HashState;

pub use hsha_core::{Digest, HashError, Variant};
