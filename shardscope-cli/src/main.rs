//! ShardScope CLI
//!
//! Sweeps every (data, parity) split of a fixed shard total over a sample
//! payload and prints storage overhead and, optionally, read quorum per
//! split.
//!
//! # Configuration
//! Config file: ~/.shardscope/config.toml (flags and env vars take precedence)
//!
//! # Exit codes
//! - `1` invalid total shard count
//! - `2` any other failure (unreadable payload, codec or I/O error)

use clap::Parser;
use console::{style, Term};
use shardscope_core::{ShardScopeError, DEFAULT_PAYLOAD_FILE};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

mod commands;
mod config;
mod symbols;
mod table;

use commands::sweep::SweepConfig;

#[derive(Parser)]
#[command(name = "shardscope")]
#[command(about = "Explore erasure-coding data/parity splits for a fixed shard total")]
#[command(version)]
struct Cli {
    /// Sum of data and parity shards (even, 4..=256)
    #[arg(short = 't', long, env = "SHARDSCOPE_TOTAL_SHARDS")]
    total_shards: Option<usize>,

    /// Input file to erasure-code
    #[arg(short = 'f', long, env = "SHARDSCOPE_FILE", default_value = DEFAULT_PAYLOAD_FILE)]
    file: PathBuf,

    /// Show read quorum values for all combinations
    #[arg(short = 'r', long)]
    read_quorum: bool,

    /// Directory for per-shard files (overrides config file)
    #[arg(short = 'o', long, env = "SHARDSCOPE_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Do not write shard files to the output directory
    #[arg(long)]
    no_artifacts: bool,

    /// Path to config file
    #[arg(long, env = "SHARDSCOPE_CONFIG")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Merge flags over the config file
    fn sweep_config(self, cfg: config::ShardScopeConfig) -> SweepConfig {
        let write_artifacts = cfg.output.write_artifacts && !self.no_artifacts;
        SweepConfig {
            file: self.file,
            total_shards: self.total_shards.unwrap_or(cfg.sweep.total_shards),
            read_quorum: self.read_quorum || cfg.sweep.read_quorum,
            output_dir: write_artifacts.then(|| self.output_dir.unwrap_or(cfg.output.dir)),
            show_progress: Term::stderr().is_term(),
        }
    }
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(log_level(cli.verbose).into()),
        )
        .init();

    let cfg = config::load_config(cli.config.as_deref());
    let sweep = cli.sweep_config(cfg);

    match commands::sweep(sweep) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} Error: {:#}", style(symbols::CROSS).red(), err);
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Validation failures exit with 1, everything else with 2
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<ShardScopeError>() {
        Some(ShardScopeError::InvalidConfiguration(_)) => 1,
        _ => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from(["shardscope", "-t", "8", "-f", "data.bin", "-r"]).unwrap();
        assert_eq!(cli.total_shards, Some(8));
        assert_eq!(cli.file, PathBuf::from("data.bin"));
        assert!(cli.read_quorum);
    }

    #[test]
    fn test_positional_arguments_rejected() {
        assert!(Cli::try_parse_from(["shardscope", "extra"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from(["shardscope", "-t", "10", "--no-artifacts"]).unwrap();
        let mut cfg = config::ShardScopeConfig::default();
        cfg.sweep.total_shards = 20;
        cfg.sweep.read_quorum = true;

        let sweep = cli.sweep_config(cfg);
        assert_eq!(sweep.total_shards, 10);
        assert!(sweep.read_quorum);
        assert!(sweep.output_dir.is_none());
    }

    #[test]
    fn test_config_supplies_defaults() {
        let cli = Cli::try_parse_from(["shardscope"]).unwrap();
        let mut cfg = config::ShardScopeConfig::default();
        cfg.sweep.total_shards = 12;
        cfg.output.dir = PathBuf::from("/tmp/shards");

        let sweep = cli.sweep_config(cfg);
        assert_eq!(sweep.total_shards, 12);
        assert_eq!(sweep.output_dir, Some(PathBuf::from("/tmp/shards")));
    }

    #[test]
    fn test_exit_codes() {
        let invalid = anyhow::Error::from(ShardScopeError::InvalidConfiguration("odd".into()));
        assert_eq!(exit_code(&invalid), 1);

        let missing = anyhow::Error::from(ShardScopeError::EmptyPayload);
        assert_eq!(exit_code(&missing), 2);

        assert_eq!(exit_code(&anyhow::anyhow!("other")), 2);
    }

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(0), Level::WARN);
        assert_eq!(log_level(2), Level::DEBUG);
        assert_eq!(log_level(9), Level::TRACE);
    }
}
