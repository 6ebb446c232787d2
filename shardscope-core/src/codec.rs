//! Reed-Solomon Erasure Codec Adapter
//!
//! `ErasureCodec` is the seam between the sweep and the coding library.
//! `ReedSolomonCodec` implements it over `reed-solomon-erasure` (GF(2^8)),
//! which caps a configuration at 256 shards in total.

use crate::error::{Result, ShardScopeError};
use crate::shard::{ShardConfiguration, ShardSet};
use reed_solomon_erasure::galois_8::ReedSolomon;
use tracing::trace;

/// Encoding/decoding context for one shard configuration
pub trait ErasureCodec: Sized {
    /// Build a context, failing with `UnsupportedConfiguration` if the
    /// split cannot be realized.
    fn construct(config: ShardConfiguration) -> Result<Self>;

    /// Configuration this context was built for
    fn config(&self) -> ShardConfiguration;

    /// Split a payload into zero-padded data shards followed by zeroed
    /// parity shards of the same length.
    fn split(&self, payload: &[u8]) -> Result<ShardSet>;

    /// Fill the parity shards in place from the data shards
    fn encode(&self, shards: &mut ShardSet) -> Result<()>;

    /// Refill absent slots. Fails with `InsufficientShards` when too few
    /// slots are present.
    fn reconstruct(&self, shards: &mut ShardSet) -> Result<()>;

    /// Check that the parity shards match the data shards
    fn verify(&self, shards: &ShardSet) -> Result<bool>;
}

/// Reed-Solomon codec backed by `reed_solomon_erasure::galois_8`
pub struct ReedSolomonCodec {
    config: ShardConfiguration,
    encoder: ReedSolomon,
}

impl ReedSolomonCodec {
    /// Calculate the size of each shard given the payload size
    fn calculate_shard_size(&self, payload_len: usize) -> usize {
        // Round up to ensure all data fits
        payload_len.div_ceil(self.config.data_shards)
    }

    fn check_layout(&self, shards: &ShardSet) -> Result<()> {
        if shards.config() != self.config {
            return Err(ShardScopeError::ShardSizeMismatch {
                expected: self.config.total_shards(),
                actual: shards.len(),
            });
        }
        Ok(())
    }
}

impl ErasureCodec for ReedSolomonCodec {
    fn construct(config: ShardConfiguration) -> Result<Self> {
        let encoder = ReedSolomon::new(config.data_shards, config.parity_shards).map_err(|e| {
            ShardScopeError::UnsupportedConfiguration {
                data_shards: config.data_shards,
                parity_shards: config.parity_shards,
                reason: e.to_string(),
            }
        })?;
        Ok(Self { config, encoder })
    }

    fn config(&self) -> ShardConfiguration {
        self.config
    }

    fn split(&self, payload: &[u8]) -> Result<ShardSet> {
        if payload.is_empty() {
            return Err(ShardScopeError::EmptyPayload);
        }

        let shard_size = self.calculate_shard_size(payload.len());

        // Pad data to be evenly divisible by data_shards
        let padded_size = shard_size * self.config.data_shards;
        let mut padded = payload.to_vec();
        padded.resize(padded_size, 0);

        let mut slots: Vec<Option<Vec<u8>>> = padded
            .chunks(shard_size)
            .map(|c| Some(c.to_vec()))
            .collect();

        for _ in 0..self.config.parity_shards {
            slots.push(Some(vec![0u8; shard_size]));
        }

        ShardSet::from_slots(self.config.data_shards, slots)
    }

    fn encode(&self, shards: &mut ShardSet) -> Result<()> {
        self.check_layout(shards)?;

        let available = shards.present_count();
        let mut buffers: Vec<&mut [u8]> = shards
            .slots_mut()
            .iter_mut()
            .map(|slot| slot.as_deref_mut())
            .collect::<Option<_>>()
            .ok_or(ShardScopeError::InsufficientShards {
                available,
                required: self.config.total_shards(),
            })?;

        self.encoder.encode(&mut buffers)?;
        Ok(())
    }

    fn reconstruct(&self, shards: &mut ShardSet) -> Result<()> {
        self.check_layout(shards)?;

        let available = shards.present_count();
        trace!(
            available,
            required = self.config.data_shards,
            "reconstructing shard set"
        );

        match self.encoder.reconstruct(shards.slots_mut()) {
            Ok(()) => Ok(()),
            Err(reed_solomon_erasure::Error::TooFewShardsPresent) => {
                Err(ShardScopeError::InsufficientShards {
                    available,
                    required: self.config.data_shards,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    fn verify(&self, shards: &ShardSet) -> Result<bool> {
        if shards.config() != self.config || !shards.is_complete() {
            return Ok(false);
        }

        let refs: Vec<&[u8]> = shards.slots().iter().flatten().map(Vec::as_slice).collect();
        Ok(self.encoder.verify(&refs)?)
    }
}
