//! # Shared Hashing Flags and Input Streaming
//!
//! Resolves the algorithm, key and chunk size from command-line flags over
//! [`CliConfig`] defaults, and streams readers through a [`Context`].

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Args;
use hsha_core::{from_hex, Digest, Variant};
use hsha_crypto::Context;
use zeroize::Zeroizing;

use crate::config::{check_chunk_size, CliConfig};

/// Flags shared by every hashing subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct HashArgs {
    /// SHA-2 variant: sha224, sha256, sha384 or sha512.
    #[arg(short, long)]
    pub algorithm: Option<Variant>,

    /// HMAC key as hex text.
    #[arg(long, conflicts_with = "key_file")]
    pub key_hex: Option<String>,

    /// Read the HMAC key from a file (raw bytes).
    #[arg(long)]
    pub key_file: Option<PathBuf>,

    /// Bytes read per update call.
    #[arg(long)]
    pub chunk_size: Option<usize>,
}

/// Fully resolved hashing settings.
pub struct Settings {
    /// SHA-2 variant.
    pub variant: Variant,
    /// HMAC key, when one was supplied.
    pub key: Option<Zeroizing<Vec<u8>>>,
    /// Bytes read per update call.
    pub chunk_size: usize,
}

impl Settings {
    /// Merge flags over config values. A key flag on the command line
    /// replaces both key sources from the config.
    pub fn resolve(args: &HashArgs, config: &CliConfig) -> anyhow::Result<Self> {
        let variant = args.algorithm.unwrap_or(config.algorithm);
        let chunk_size = args.chunk_size.unwrap_or(config.chunk_size);
        check_chunk_size(chunk_size).context("invalid --chunk-size")?;

        let (key_hex, key_file) = if args.key_hex.is_some() || args.key_file.is_some() {
            (args.key_hex.as_deref(), args.key_file.as_deref())
        } else {
            (config.key_hex.as_deref(), config.key_file.as_deref())
        };
        let key = match (key_hex, key_file) {
            (Some(hex), _) => Some(Zeroizing::new(
                from_hex(hex).context("decoding --key-hex")?,
            )),
            (None, Some(path)) => Some(Zeroizing::new(
                std::fs::read(path)
                    .with_context(|| format!("reading key file {}", path.display()))?,
            )),
            (None, None) => None,
        };

        tracing::debug!(
            variant = %variant,
            keyed = key.is_some(),
            chunk_size,
            "resolved hashing settings"
        );
        Ok(Self {
            variant,
            key,
            chunk_size,
        })
    }

    /// A fresh context for these settings.
    pub fn context(&self) -> anyhow::Result<Context> {
        let key = self.key.as_ref().map(|k| k.as_slice());
        Ok(Context::new(self.variant, key)?)
    }
}

/// Stream `reader` through `ctx` in `chunk_size` pieces and finalize.
pub fn hash_reader(
    ctx: &mut Context,
    mut reader: impl Read,
    chunk_size: usize,
) -> anyhow::Result<Digest> {
    let mut buf = vec![0u8; chunk_size];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).context("reading input"),
        };
        ctx.update(&buf[..n])?;
        total += n as u64;
    }
    tracing::trace!(bytes = total, "input exhausted");
    Ok(ctx.finalize_digest()?)
}

/// Hash one named input; `-` means stdin.
pub fn hash_path(settings: &Settings, path: &Path) -> anyhow::Result<Digest> {
    let mut ctx = settings.context()?;
    if path == Path::new("-") {
        hash_reader(&mut ctx, std::io::stdin().lock(), settings.chunk_size)
    } else {
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening {}", path.display()))?;
        hash_reader(&mut ctx, file, settings.chunk_size)
    }
}
