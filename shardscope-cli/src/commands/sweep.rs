//! Sweep Command
//!
//! Runs the configuration sweep over a payload file and prints the report.

use crate::table;
use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use shardscope_core::{configurations, ShardStore, SweepDriver, SweepOptions, SweepReport};
use std::path::PathBuf;
use tracing::info;

/// Sweep configuration
pub struct SweepConfig {
    pub file: PathBuf,
    pub total_shards: usize,
    pub read_quorum: bool,
    /// Directory for shard artifacts, `None` to skip writing them
    pub output_dir: Option<PathBuf>,
    pub show_progress: bool,
}

/// Run sweep command
pub fn run(config: SweepConfig) -> Result<()> {
    let report = execute(&config)?;

    println!(
        "Input file size: {} bytes, Total shards: {}",
        style(report.payload_len).cyan(),
        style(report.total_shards).cyan()
    );
    println!();
    println!("{}", table::render(&report));

    Ok(())
}

/// Run the sweep and return the report without printing it
pub fn execute(config: &SweepConfig) -> Result<SweepReport> {
    let mut driver = SweepDriver::new(
        SweepOptions::new(config.total_shards, config.read_quorum),
        &config.file,
    );

    if let Some(dir) = &config.output_dir {
        // Validate before touching the filesystem
        shardscope_core::validate_total_shards(config.total_shards)?;
        driver = driver.with_store(ShardStore::open(dir)?);
        info!(dir = %dir.display(), "writing shard artifacts");
    }

    let pb = progress_bar(config)?;
    let result = driver.run_with(|row| {
        pb.set_message(format!("{}+{}", row.data_shards, row.parity_shards));
        pb.inc(1);
    });
    pb.finish_and_clear();

    Ok(result?)
}

fn progress_bar(config: &SweepConfig) -> Result<ProgressBar> {
    if !config.show_progress {
        return Ok(ProgressBar::hidden());
    }

    let steps = configurations(config.total_shards).count() as u64;
    let pb = ProgressBar::with_draw_target(Some(steps), ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} configurations {msg}")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shardscope_core::ShardScopeError;
    use std::fs;
    use tempfile::TempDir;

    fn config(dir: &TempDir, total_shards: usize) -> SweepConfig {
        let file = dir.path().join("testfile.txt");
        fs::write(&file, vec![b'x'; 600]).unwrap();
        SweepConfig {
            file,
            total_shards,
            read_quorum: true,
            output_dir: Some(dir.path().join("output")),
            show_progress: false,
        }
    }

    #[test]
    fn test_execute_scenario() {
        let dir = TempDir::new().unwrap();
        let report = execute(&config(&dir, 6)).unwrap();

        assert_eq!(report.len(), 2);
        assert_eq!(report.rows()[0].read_quorum, Some(3));
        assert!(dir.path().join("output").is_dir());
        assert_eq!(fs::read_dir(dir.path().join("output")).unwrap().count(), 0);
    }

    #[test]
    fn test_invalid_total_creates_nothing() {
        let dir = TempDir::new().unwrap();
        let err = execute(&config(&dir, 5)).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ShardScopeError>(),
            Some(ShardScopeError::InvalidConfiguration(_))
        ));
        assert!(!dir.path().join("output").exists());
    }
}
