//! # hsha CLI entry point
//!
//! Parses command-line arguments, sets up logging and dispatches to the
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hsha_cli::config::CliConfig;
use hsha_cli::digest::{run_digest, DigestArgs};
use hsha_cli::verify::{run_verify, VerifyArgs};

/// SHA-2 digests and HMACs of files or stdin.
#[derive(Parser, Debug)]
#[command(name = "hsha", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the digest (or HMAC, with a key) of each input.
    Digest(DigestArgs),

    /// Check an input against an expected digest.
    Verify(VerifyArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => match CliConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("{e:#}");
                return ExitCode::from(1);
            }
        },
        None => CliConfig::default(),
    };

    let mut stdout = std::io::stdout().lock();
    let result = match &cli.command {
        Commands::Digest(args) => run_digest(args, &config, &mut stdout),
        Commands::Verify(args) => run_verify(args, &config, &mut stdout),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
