//! Configuration sweep
//!
//! Walks every (data, parity) split of a fixed shard total, from the even
//! split toward the least redundant split with two parity shards. Each
//! configuration is encoded from a fresh read of the payload, measured,
//! optionally probed for its read quorum, and cleaned up before the next.

use crate::codec::{ErasureCodec, ReedSolomonCodec};
use crate::error::{Result, ShardScopeError};
use crate::quorum::{QuorumProber, MIN_PROBE_PARITY};
use crate::report::{ConfigurationResult, SweepReport};
use crate::shard::ShardConfiguration;
use crate::store::ShardStore;
use crate::validate::validate_total_shards;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Immutable sweep settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepOptions {
    /// Data plus parity shards, constant across the sweep
    pub total_shards: usize,
    /// Probe each configuration for its read quorum
    pub read_quorum: bool,
}

impl SweepOptions {
    pub fn new(total_shards: usize, read_quorum: bool) -> Self {
        Self {
            total_shards,
            read_quorum,
        }
    }
}

/// Configurations visited for `total_shards`, most redundant first.
///
/// Starts at `(total/2, total/2)` and moves one shard from parity to data
/// per step while parity stays at or above 2.
pub fn configurations(total_shards: usize) -> impl Iterator<Item = ShardConfiguration> {
    let half = total_shards / 2;
    (0..half.saturating_sub(1))
        .map(move |step| ShardConfiguration::new(half + step, half - step))
        .take_while(|config| config.parity_shards >= MIN_PROBE_PARITY)
}

/// Drives encoding and probing across all configurations
pub struct SweepDriver<C: ErasureCodec = ReedSolomonCodec> {
    options: SweepOptions,
    payload_path: PathBuf,
    store: Option<ShardStore>,
    prober: QuorumProber,
    _codec: PhantomData<C>,
}

impl SweepDriver<ReedSolomonCodec> {
    /// Create a driver using the Reed-Solomon codec
    pub fn new(options: SweepOptions, payload_path: impl Into<PathBuf>) -> Self {
        Self::with_codec(options, payload_path)
    }
}

impl<C: ErasureCodec> SweepDriver<C> {
    /// Create a driver for a specific codec
    pub fn with_codec(options: SweepOptions, payload_path: impl Into<PathBuf>) -> Self {
        Self {
            options,
            payload_path: payload_path.into(),
            store: None,
            prober: QuorumProber::new(),
            _codec: PhantomData,
        }
    }

    /// Write shard artifacts to `store` during each iteration
    pub fn with_store(mut self, store: ShardStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn options(&self) -> &SweepOptions {
        &self.options
    }

    pub fn payload_path(&self) -> &Path {
        &self.payload_path
    }

    /// Size of the payload file in bytes
    pub fn payload_len(&self) -> Result<u64> {
        fs::metadata(&self.payload_path)
            .map(|m| m.len())
            .map_err(|source| self.read_error(source))
    }

    /// Run the full sweep
    pub fn run(&self) -> Result<SweepReport> {
        self.run_with(|_| {})
    }

    /// Run the full sweep, calling `on_row` after each configuration.
    ///
    /// The first error aborts the sweep and no report is returned.
    pub fn run_with<F>(&self, mut on_row: F) -> Result<SweepReport>
    where
        F: FnMut(&ConfigurationResult),
    {
        validate_total_shards(self.options.total_shards)?;

        let payload_len = self.payload_len()?;
        if payload_len == 0 {
            return Err(ShardScopeError::EmptyPayload);
        }

        info!(
            payload = %self.payload_path.display(),
            payload_len,
            total_shards = self.options.total_shards,
            read_quorum = self.options.read_quorum,
            "starting sweep"
        );

        let mut report = SweepReport::new(payload_len, self.options.total_shards, self.options.read_quorum);

        for config in configurations(self.options.total_shards) {
            let row = self.evaluate(config)?;
            on_row(&row);
            report.push(row);
        }

        info!(configurations = report.len(), "sweep complete");
        Ok(report)
    }

    /// Encode, measure and probe one configuration, then clean up its
    /// artifacts whether or not it succeeded.
    fn evaluate(&self, config: ShardConfiguration) -> Result<ConfigurationResult> {
        let result = self.encode_and_probe(config);

        match &self.store {
            Some(store) => settle(
                result,
                store.clear(&self.artifact_name(), config.total_shards()),
            ),
            None => result,
        }
    }

    fn encode_and_probe(&self, config: ShardConfiguration) -> Result<ConfigurationResult> {
        let codec = C::construct(config)?;

        let payload = fs::read(&self.payload_path).map_err(|source| self.read_error(source))?;
        let payload_len = payload.len();
        let mut shards = codec.split(&payload)?;
        codec.encode(&mut shards)?;

        if let Some(store) = &self.store {
            store.write_shards(&self.artifact_name(), &shards)?;
        }

        let encoded_bytes = shards.total_bytes();
        let storage_ratio = encoded_bytes as f64 / payload_len as f64;

        let read_quorum = if self.options.read_quorum {
            self.prober.probe(&codec, &mut shards)?
        } else {
            None
        };

        debug!(
            data_shards = config.data_shards,
            parity_shards = config.parity_shards,
            shard_len = shards.shard_len(),
            encoded_bytes,
            storage_ratio,
            ?read_quorum,
            "evaluated configuration"
        );

        Ok(ConfigurationResult {
            data_shards: config.data_shards,
            parity_shards: config.parity_shards,
            shard_len: shards.shard_len(),
            encoded_bytes,
            storage_ratio,
            read_quorum,
        })
    }

    /// File name component used for shard artifacts
    fn artifact_name(&self) -> String {
        self.payload_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "payload".to_string())
    }

    fn read_error(&self, source: std::io::Error) -> ShardScopeError {
        ShardScopeError::PayloadRead {
            path: self.payload_path.clone(),
            source,
        }
    }
}

/// Combine an iteration's outcome with its artifact cleanup.
///
/// The iteration's own error wins over a cleanup error.
fn settle<T>(result: Result<T>, cleared: Result<usize>) -> Result<T> {
    let value = result?;
    let removed = cleared?;
    debug!(removed, "cleared shard artifacts");
    Ok(value)
}
