//! ShardScope Core Library
//!
//! Explores the (data, parity) design space of Reed-Solomon erasure coding.
//! This crate provides:
//! - Total shard count validation
//! - A codec adapter over `reed-solomon-erasure`
//! - The configuration sweep and read-quorum prober
//! - Per-configuration results and on-disk shard artifacts
//!
//! # Example
//!
//! ```no_run
//! use shardscope_core::{SweepDriver, SweepOptions};
//!
//! let report = SweepDriver::new(SweepOptions::new(6, true), "testfile.txt").run()?;
//! for row in report.rows() {
//!     println!("{} + {} -> {:.2}", row.data_shards, row.parity_shards, row.storage_ratio);
//! }
//! # Ok::<(), shardscope_core::ShardScopeError>(())
//! ```

pub mod codec;
pub mod error;
pub mod quorum;
pub mod report;
pub mod shard;
pub mod store;
pub mod sweep;
pub mod validate;

pub use codec::{ErasureCodec, ReedSolomonCodec};
pub use error::{Result, ShardScopeError};
pub use quorum::QuorumProber;
pub use report::{format_ratio, ConfigurationResult, SweepReport};
pub use shard::{ShardConfiguration, ShardSet};
pub use store::{ShardStore, DEFAULT_OUTPUT_DIR};
pub use sweep::{configurations, SweepDriver, SweepOptions};
pub use validate::{validate_total_shards, MAX_TOTAL_SHARDS, MIN_TOTAL_SHARDS};

/// Default total shard count when none is requested
pub const DEFAULT_TOTAL_SHARDS: usize = 6;

/// Default payload file name
pub const DEFAULT_PAYLOAD_FILE: &str = "testfile.txt";
