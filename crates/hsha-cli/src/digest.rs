//! # Digest Subcommand
//!
//! Prints one line per input: `<hex>  <name>` (the layout of `sha256sum`),
//! or one JSON object per line with `--json`.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use hsha_core::{Digest, Variant};
use serde::Serialize;

use crate::config::CliConfig;
use crate::input::{hash_path, HashArgs, Settings};

/// Arguments for the digest subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct DigestArgs {
    #[command(flatten)]
    pub hash: HashArgs,

    /// Emit JSON lines instead of text.
    #[arg(long)]
    pub json: bool,

    /// Files to hash; `-` or nothing reads stdin.
    pub files: Vec<PathBuf>,
}

#[derive(Serialize)]
struct DigestLine<'a> {
    file: &'a str,
    algorithm: Variant,
    keyed: bool,
    digest: &'a Digest,
}

/// Hash every input and write one line per input to `out`.
pub fn run_digest(
    args: &DigestArgs,
    config: &CliConfig,
    out: &mut impl Write,
) -> anyhow::Result<u8> {
    let settings = Settings::resolve(&args.hash, config)?;
    let stdin_only = [PathBuf::from("-")];
    let files = if args.files.is_empty() {
        &stdin_only[..]
    } else {
        &args.files[..]
    };

    for path in files {
        let digest = hash_path(&settings, path)?;
        let name = path.display().to_string();
        if args.json {
            let line = DigestLine {
                file: &name,
                algorithm: digest.variant(),
                keyed: settings.key.is_some(),
                digest: &digest,
            };
            writeln!(out, "{}", serde_json::to_string(&line)?)?;
        } else {
            writeln!(out, "{}  {}", digest.to_hex(), name)?;
        }
        tracing::info!(file = %name, algorithm = %digest.variant(), "hashed input");
    }
    Ok(0)
}
