//! # Hashing Context
//!
//! [`Context`] is the caller-facing entity: a [`Variant`], a mode (plain
//! SHA-2 or keyed HMAC) and the state(s) for that mode. It exposes the four
//! operations a host binding needs: create, init, update and finalize.
//!
//! ## Key changes
//!
//! `init` takes an explicit [`KeyChange`] instead of relying on argument
//! absence:
//!
//! - [`KeyChange::Keep`] restarts the computation under the current key
//!   (or as plain SHA-2 if no key was ever set).
//! - [`KeyChange::Set`] replaces the key. An empty key is a valid
//!   zero-length HMAC key, not a request for plain mode.
//! - [`KeyChange::Clear`] drops the key and returns to plain SHA-2.
//!
//! ## Atomicity
//!
//! Every operation validates its input before touching the context. A
//! rejected call leaves the context exactly as it was.

use hsha_core::{check_message_len, Digest, HashError, Variant};

use crate::hmac::Hmac;
use crate::sha2::HashState;

/// How [`Context::init`] treats the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyChange<'a> {
    /// Restart under the current key, reusing the derived pads.
    Keep,
    /// Replace the key (an empty slice is a valid key).
    Set(&'a [u8]),
    /// Discard the key and hash without one.
    Clear,
}

enum Mode {
    Plain(HashState),
    Keyed(Box<Hmac>),
}

/// A SHA-2 or HMAC-SHA-2 computation that can be re-initialized and reused.
///
/// Not synchronized: a context is meant to be owned by one caller at a time.
pub struct Context {
    variant: Variant,
    mode: Mode,
}

impl Context {
    /// Create a context for `variant`; a key selects HMAC mode.
    pub fn new(variant: Variant, key: Option<&[u8]>) -> Result<Self, HashError> {
        let mode = Self::mode_for(variant, key)?;
        tracing::debug!(
            variant = %variant,
            keyed = key.is_some(),
            key_len = key.map_or(0, <[u8]>::len),
            "created hash context"
        );
        Ok(Self { variant, mode })
    }

    /// Create a context from a bit width (224, 256, 384 or 512).
    pub fn from_bits(bits: u32, key: Option<&[u8]>) -> Result<Self, HashError> {
        Self::new(Variant::try_from(bits)?, key)
    }

    /// SHA-224, or HMAC-SHA-224 when `key` is given.
    pub fn sha224(key: Option<&[u8]>) -> Result<Self, HashError> {
        Self::new(Variant::Sha224, key)
    }

    /// SHA-256, or HMAC-SHA-256 when `key` is given.
    pub fn sha256(key: Option<&[u8]>) -> Result<Self, HashError> {
        Self::new(Variant::Sha256, key)
    }

    /// SHA-384, or HMAC-SHA-384 when `key` is given.
    pub fn sha384(key: Option<&[u8]>) -> Result<Self, HashError> {
        Self::new(Variant::Sha384, key)
    }

    /// SHA-512, or HMAC-SHA-512 when `key` is given.
    pub fn sha512(key: Option<&[u8]>) -> Result<Self, HashError> {
        Self::new(Variant::Sha512, key)
    }

    /// Reset to the starting point of a new computation, applying `change`
    /// to the key first.
    pub fn init(&mut self, change: KeyChange<'_>) -> Result<(), HashError> {
        match change {
            KeyChange::Keep => {
                match &mut self.mode {
                    Mode::Plain(state) => state.reset(),
                    Mode::Keyed(hmac) => hmac.reinit()?,
                }
                tracing::debug!(variant = %self.variant, keyed = self.is_keyed(), "reinitialized hash context");
            }
            KeyChange::Set(key) => {
                self.mode = Self::mode_for(self.variant, Some(key))?;
                tracing::debug!(variant = %self.variant, key_len = key.len(), "rekeyed hash context");
            }
            KeyChange::Clear => {
                self.mode = Mode::Plain(HashState::new(self.variant));
                tracing::debug!(variant = %self.variant, "cleared key from hash context");
            }
        }
        Ok(())
    }

    /// Shorthand for `init(KeyChange::Keep)`.
    pub fn reinit(&mut self) -> Result<(), HashError> {
        self.init(KeyChange::Keep)
    }

    /// Shorthand for `init(KeyChange::Set(key))`.
    pub fn rekey(&mut self, key: &[u8]) -> Result<(), HashError> {
        self.init(KeyChange::Set(key))
    }

    /// Append a message fragment. The bytes are not retained.
    pub fn update(&mut self, message: &[u8]) -> Result<(), HashError> {
        check_message_len(message.len())?;
        tracing::trace!(variant = %self.variant, len = message.len(), "update");
        match &mut self.mode {
            Mode::Plain(state) => state.absorb(message),
            Mode::Keyed(hmac) => hmac.update(message),
        }
    }

    /// Finish the computation and return the digest (or MAC).
    ///
    /// The context stays usable: call [`init`](Self::init) to start over.
    pub fn finalize_digest(&mut self) -> Result<Digest, HashError> {
        let digest = match &mut self.mode {
            Mode::Plain(state) => state.finalize()?,
            Mode::Keyed(hmac) => hmac.finalize()?,
        };
        tracing::debug!(variant = %self.variant, keyed = self.is_keyed(), "finalized hash context");
        Ok(digest)
    }

    /// Finish the computation and return the digest as lowercase hex,
    /// `2 * variant.digest_len()` characters long.
    pub fn finalize(&mut self) -> Result<String, HashError> {
        Ok(self.finalize_digest()?.to_hex())
    }

    /// The SHA-2 variant of this context.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Whether a key is set (HMAC mode).
    pub fn is_keyed(&self) -> bool {
        matches!(self.mode, Mode::Keyed(_))
    }

    /// Whether the current computation has been finalized.
    pub fn is_finalized(&self) -> bool {
        match &self.mode {
            Mode::Plain(state) => state.is_finalized(),
            Mode::Keyed(hmac) => hmac.is_finalized(),
        }
    }

    fn mode_for(variant: Variant, key: Option<&[u8]>) -> Result<Mode, HashError> {
        Ok(match key {
            Some(key) => Mode::Keyed(Box::new(Hmac::new(variant, key)?)),
            None => Mode::Plain(HashState::new(variant)),
        })
    }
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_keyed() {
            write!(f, "hmac.{}", self.variant)
        } else {
            write!(f, "{}", self.variant)
        }
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("Context");
        s.field("variant", &self.variant);
        match &self.mode {
            Mode::Plain(state) => s.field("state", state),
            Mode::Keyed(hmac) => s.field("hmac", hmac),
        };
        s.finish()
    }
}

/// One-shot SHA-2 digest.
pub fn digest(variant: Variant, message: &[u8]) -> Result<Digest, HashError> {
    check_message_len(message.len())?;
    Ok(HashState::digest(variant, message))
}

/// One-shot HMAC.
pub fn hmac(variant: Variant, key: &[u8], message: &[u8]) -> Result<Digest, HashError> {
    check_message_len(message.len())?;
    Hmac::mac(variant, key, message)
}
