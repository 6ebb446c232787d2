//! Total shard count validation
//!
//! Gates a sweep before any payload is read or encoded.

use crate::error::{Result, ShardScopeError};

/// Smallest total that still admits a (2 data, 2 parity) split
pub const MIN_TOTAL_SHARDS: usize = 4;

/// Upper bound on the requested total
pub const MAX_TOTAL_SHARDS: usize = 257;

/// Check that `total` can be swept.
///
/// Rules are checked in order and the first violation is reported:
/// too many shards, too few shards, odd total.
pub fn validate_total_shards(total: usize) -> Result<()> {
    if total > MAX_TOTAL_SHARDS {
        return Err(ShardScopeError::InvalidConfiguration(format!(
            "Too many shards: {} (max: {})",
            total, MAX_TOTAL_SHARDS
        )));
    }

    if total < MIN_TOTAL_SHARDS {
        return Err(ShardScopeError::InvalidConfiguration(format!(
            "Too few shards: {} (min: {})",
            total, MIN_TOTAL_SHARDS
        )));
    }

    if total % 2 != 0 {
        return Err(ShardScopeError::InvalidConfiguration(format!(
            "Total shards should be even, got {}",
            total
        )));
    }

    Ok(())
}
