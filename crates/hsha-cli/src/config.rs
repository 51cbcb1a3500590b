//! # CLI Configuration
//!
//! Optional YAML file supplying defaults for the hashing flags. Flags given
//! on the command line always win over file values.
//!
//! ```yaml
//! algorithm: sha512
//! key_file: /etc/hsha/mac.key
//! chunk_size: 1048576
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _};
use hsha_core::{Variant, MAX_INPUT_LEN};
use serde::{Deserialize, Serialize};

/// Default read size when streaming inputs into a context.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Reject read sizes outside `1..=MAX_INPUT_LEN`; larger chunks could never
/// pass a single `update`.
pub fn check_chunk_size(chunk_size: usize) -> anyhow::Result<()> {
    if chunk_size == 0 {
        bail!("chunk size must be greater than zero");
    }
    if chunk_size as u64 > MAX_INPUT_LEN {
        bail!("chunk size {chunk_size} exceeds the per-update limit of {MAX_INPUT_LEN} bytes");
    }
    Ok(())
}

/// Hashing defaults, loadable from YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// SHA-2 variant used when `--algorithm` is absent.
    pub algorithm: Variant,
    /// HMAC key as hex text.
    pub key_hex: Option<String>,
    /// File whose raw bytes are the HMAC key.
    pub key_file: Option<PathBuf>,
    /// Bytes read per `update` call.
    pub chunk_size: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            algorithm: Variant::Sha256,
            key_hex: None,
            key_file: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl CliConfig {
    /// Read and validate a YAML config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        tracing::debug!(path = %path.display(), algorithm = %config.algorithm, "loaded config");
        Ok(config)
    }

    /// Reject settings no command could run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        check_chunk_size(self.chunk_size).context("invalid chunk_size")?;
        if self.key_hex.is_some() && self.key_file.is_some() {
            bail!("key_hex and key_file are mutually exclusive");
        }
        Ok(())
    }
}
