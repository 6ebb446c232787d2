//! Read quorum probing
//!
//! Finds how many shards must survive for reconstruction to succeed by
//! dropping shards from the tail of an encoded set and retrying.
//!
//! Shards are always removed from the end of the fixed shard order, never
//! as arbitrary subsets. For a systematic MDS code the position of a lost
//! shard does not matter, so the tail stands in for "any `n` shards". The
//! value reported is therefore tied to this removal order rather than being
//! a search over every subset.

use crate::codec::ErasureCodec;
use crate::error::Result;
use crate::shard::ShardSet;
use tracing::trace;

/// Lowest parity level probed
pub const MIN_PROBE_PARITY: usize = 2;

/// Probes an encoded shard set for its read quorum
#[derive(Debug, Clone, Copy, Default)]
pub struct QuorumProber;

impl QuorumProber {
    pub fn new() -> Self {
        Self
    }

    /// Probe `shards` under `codec`.
    ///
    /// For each level `i` from the parity count down to 2, the last `i + 1`
    /// shards are marked absent and reconstruction is attempted. The first
    /// failure yields `Some(total - i)`. A successful attempt refills the set
    /// before the next, smaller removal. `None` means no level failed.
    ///
    /// Reconstruction failures are the expected signal here. Any other codec
    /// error is returned.
    pub fn probe<C: ErasureCodec>(&self, codec: &C, shards: &mut ShardSet) -> Result<Option<usize>> {
        let config = codec.config();
        let total = config.total_shards();

        for i in (MIN_PROBE_PARITY..=config.parity_shards).rev() {
            shards.mark_tail_absent(i + 1);

            match codec.reconstruct(shards) {
                Ok(()) => {
                    trace!(missing = i + 1, "reconstruction succeeded");
                }
                Err(e) if e.is_reconstruction_failure() => {
                    trace!(missing = i + 1, error = %e, "reconstruction failed");
                    return Ok(Some(total - i));
                }
                Err(e) => return Err(e),
            }
        }

        Ok(None)
    }
}
