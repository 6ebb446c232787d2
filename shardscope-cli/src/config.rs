//! Configuration file handling
//!
//! Default location: ~/.shardscope/config.toml (cross-platform)
//!
//! Config file format:
//! ```toml
//! [sweep]
//! total_shards = 6
//! read_quorum = false
//!
//! [output]
//! dir = "./output/"
//! write_artifacts = true
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shardscope_core::{DEFAULT_OUTPUT_DIR, DEFAULT_TOTAL_SHARDS};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Structure of config.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ShardScopeConfig {
    /// Sweep defaults
    #[serde(default)]
    pub sweep: SweepSettings,

    /// Shard artifact settings
    #[serde(default)]
    pub output: OutputSettings,
}

/// Sweep defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SweepSettings {
    /// Data plus parity shards
    #[serde(default = "default_total_shards")]
    pub total_shards: usize,

    /// Show the read quorum column
    #[serde(default)]
    pub read_quorum: bool,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            total_shards: default_total_shards(),
            read_quorum: false,
        }
    }
}

fn default_total_shards() -> usize {
    DEFAULT_TOTAL_SHARDS
}

/// Shard artifact settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputSettings {
    /// Directory for per-shard files
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Write shard files during the sweep
    #[serde(default = "default_write_artifacts")]
    pub write_artifacts: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            write_artifacts: default_write_artifacts(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_write_artifacts() -> bool {
    true
}

/// Default config file path (~/.shardscope/config.toml)
pub fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".shardscope").join("config.toml"))
}

/// Load configuration from `path`, or the default location.
///
/// Falls back to defaults if the file doesn't exist or cannot be parsed.
pub fn load_config(path: Option<&Path>) -> ShardScopeConfig {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Ok(p) => p,
            Err(_) => return ShardScopeConfig::default(),
        },
    };

    if !path.exists() {
        return ShardScopeConfig::default();
    }

    match fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse config file");
                ShardScopeConfig::default()
            }
        },
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read config file");
            ShardScopeConfig::default()
        }
    }
}
