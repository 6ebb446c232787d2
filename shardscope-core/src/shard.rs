//! Shard configurations and shard sets
//!
//! A `ShardSet` holds one slot per shard. A slot is either present (`Some`)
//! or absent (`None`); absent slots are what reconstruction fills back in.

use crate::error::{Result, ShardScopeError};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A (data, parity) split of a fixed shard total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShardConfiguration {
    /// Number of data shards (k)
    pub data_shards: usize,
    /// Number of parity shards (m)
    pub parity_shards: usize,
}

impl ShardConfiguration {
    /// Create a new configuration
    pub fn new(data_shards: usize, parity_shards: usize) -> Self {
        Self {
            data_shards,
            parity_shards,
        }
    }

    /// Total number of shards
    pub fn total_shards(&self) -> usize {
        self.data_shards + self.parity_shards
    }

    /// Storage overhead ratio (parity/data)
    pub fn overhead_ratio(&self) -> f64 {
        self.parity_shards as f64 / self.data_shards as f64
    }

    /// Maximum number of lost shards the code can tolerate
    pub fn max_failures(&self) -> usize {
        self.parity_shards
    }
}

/// Ordered slots for the data and parity shards of one configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardSet {
    data_shards: usize,
    shard_len: usize,
    slots: Vec<Option<Vec<u8>>>,
}

impl ShardSet {
    /// Build a set from explicit slots.
    ///
    /// Every present slot must have the same length and the first
    /// `data_shards` slots are the data shards.
    pub fn from_slots(data_shards: usize, slots: Vec<Option<Vec<u8>>>) -> Result<Self> {
        if data_shards == 0 || data_shards > slots.len() {
            return Err(ShardScopeError::ShardSizeMismatch {
                expected: data_shards,
                actual: slots.len(),
            });
        }

        let shard_len = slots
            .iter()
            .find_map(|s| s.as_ref().map(Vec::len))
            .unwrap_or(0);

        if let Some(bad) = slots
            .iter()
            .flatten()
            .map(Vec::len)
            .find(|len| *len != shard_len)
        {
            return Err(ShardScopeError::ShardSizeMismatch {
                expected: shard_len,
                actual: bad,
            });
        }

        Ok(Self {
            data_shards,
            shard_len,
            slots,
        })
    }

    /// Configuration this set was laid out for
    pub fn config(&self) -> ShardConfiguration {
        ShardConfiguration::new(self.data_shards, self.slots.len() - self.data_shards)
    }

    /// Number of slots (present or absent)
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Length of each shard buffer in bytes
    pub fn shard_len(&self) -> usize {
        self.shard_len
    }

    /// Bytes occupied by all shards when every slot is present
    pub fn total_bytes(&self) -> usize {
        self.slots.len() * self.shard_len
    }

    pub fn present_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn absent_count(&self) -> usize {
        self.slots.len() - self.present_count()
    }

    /// True when no slot is absent
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Shard at `index`, `None` when absent or out of range
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.slots.get(index).and_then(|s| s.as_deref())
    }

    /// Mark the last `count` slots absent.
    ///
    /// Counts beyond the set length mark every slot absent.
    pub fn mark_tail_absent(&mut self, count: usize) {
        let start = self.slots.len().saturating_sub(count);
        for slot in &mut self.slots[start..] {
            *slot = None;
        }
    }

    /// Mark a single slot absent
    pub fn mark_absent(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = None;
        }
    }

    /// Iterate over `(index, shard)` for present slots
    pub fn present(&self) -> impl Iterator<Item = (usize, &[u8])> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_deref().map(|data| (i, data)))
    }

    /// Concatenate the data shards and trim padding back to `original_len`.
    ///
    /// Fails if any data shard is absent.
    pub fn to_payload(&self, original_len: usize) -> Result<Bytes> {
        let mut result = Vec::with_capacity(self.shard_len * self.data_shards);
        for slot in self.slots.iter().take(self.data_shards) {
            match slot {
                Some(shard) => result.extend_from_slice(shard),
                None => {
                    return Err(ShardScopeError::InsufficientShards {
                        available: self.present_count(),
                        required: self.data_shards,
                    })
                }
            }
        }
        result.truncate(original_len);
        Ok(Bytes::from(result))
    }

    pub(crate) fn slots(&self) -> &[Option<Vec<u8>>] {
        &self.slots
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Option<Vec<u8>>] {
        &mut self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> ShardSet {
        let slots = (0..6u8).map(|i| Some(vec![i; 4])).collect();
        ShardSet::from_slots(3, slots).unwrap()
    }

    #[test]
    fn test_shard_configuration() {
        let config = ShardConfiguration::new(4, 2);
        assert_eq!(config.total_shards(), 6);
        assert_eq!(config.max_failures(), 2);
        assert!((config.overhead_ratio() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_mark_tail_absent() {
        let mut set = sample_set();
        assert!(set.is_complete());

        set.mark_tail_absent(4);
        assert_eq!(set.present_count(), 2);
        assert_eq!(set.absent_count(), 4);
        assert!(set.get(1).is_some());
        assert!(set.get(2).is_none());
        assert!(set.get(5).is_none());
    }

    #[test]
    fn test_mark_tail_absent_saturates() {
        let mut set = sample_set();
        set.mark_tail_absent(100);
        assert_eq!(set.present_count(), 0);
        assert_eq!(set.len(), 6);
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let slots = vec![Some(vec![0u8; 4]), Some(vec![0u8; 3]), None];
        let err = ShardSet::from_slots(2, slots).unwrap_err();
        assert!(matches!(
            err,
            ShardScopeError::ShardSizeMismatch {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_to_payload_trims_padding() {
        let set = sample_set();
        let payload = set.to_payload(10).unwrap();
        assert_eq!(payload.as_ref(), &[0, 0, 0, 0, 1, 1, 1, 1, 2, 2]);
    }

    #[test]
    fn test_to_payload_requires_data_shards() {
        let mut set = sample_set();
        set.mark_absent(0);
        assert!(matches!(
            set.to_payload(12),
            Err(ShardScopeError::InsufficientShards { .. })
        ));
    }

    #[test]
    fn test_config_and_totals() {
        let set = sample_set();
        assert_eq!(set.config(), ShardConfiguration::new(3, 3));
        assert_eq!(set.shard_len(), 4);
        assert_eq!(set.total_bytes(), 24);
        assert_eq!(set.present().count(), 6);
    }
}
