//! # hsha-cli — SHA-2 / HMAC Command-Line Interface
//!
//! ## Subcommands
//!
//! - `digest` — hash (or MAC, with a key) files or stdin
//! - `verify` — compare a file's digest against an expected hex value
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers; handlers take parsed
//!   arguments plus a writer so they can be driven from tests.
//! - All hashing is delegated to `hsha-crypto`.
//! - Key bytes are never logged.

pub mod config;
pub mod digest;
pub mod input;
pub mod verify;
