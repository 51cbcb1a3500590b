//! # Verify Subcommand
//!
//! Recomputes a file's digest (or MAC) and compares it with an expected hex
//! value. Exit status 0 on match, 1 on mismatch.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use crate::config::CliConfig;
use crate::input::{hash_path, HashArgs, Settings};

/// Arguments for the verify subcommand.
#[derive(Args, Debug, Clone)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub hash: HashArgs,

    /// Expected digest as hex.
    #[arg(long)]
    pub expected: String,

    /// File to check; `-` reads stdin.
    pub file: PathBuf,
}

/// Compare the digest of `args.file` with `args.expected`.
pub fn run_verify(
    args: &VerifyArgs,
    config: &CliConfig,
    out: &mut impl Write,
) -> anyhow::Result<u8> {
    let settings = Settings::resolve(&args.hash, config)?;
    let digest = hash_path(&settings, &args.file)?;
    let name = args.file.display();

    if digest.verify_hex(&args.expected) {
        writeln!(out, "{name}: OK")?;
        Ok(0)
    } else {
        tracing::warn!(file = %name, algorithm = %digest.variant(), "digest mismatch");
        writeln!(out, "{name}: FAILED")?;
        Ok(1)
    }
}
