//! Sweep results
//!
//! One row per configuration, kept in the order the sweep visited them.

use crate::shard::ShardConfiguration;
use serde::{Deserialize, Serialize};

/// Outcome of encoding (and optionally probing) one configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationResult {
    pub data_shards: usize,
    pub parity_shards: usize,
    /// Length of each shard in bytes
    pub shard_len: usize,
    /// Bytes across all data and parity shards
    pub encoded_bytes: usize,
    /// `encoded_bytes / payload bytes`
    pub storage_ratio: f64,
    /// Smallest surviving shard count found by probing
    pub read_quorum: Option<usize>,
}

impl ConfigurationResult {
    pub fn config(&self) -> ShardConfiguration {
        ShardConfiguration::new(self.data_shards, self.parity_shards)
    }
}

/// Rows of a completed sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub payload_len: u64,
    pub total_shards: usize,
    pub read_quorum_enabled: bool,
    rows: Vec<ConfigurationResult>,
}

impl SweepReport {
    pub fn new(payload_len: u64, total_shards: usize, read_quorum_enabled: bool) -> Self {
        Self {
            payload_len,
            total_shards,
            read_quorum_enabled,
            rows: Vec::new(),
        }
    }

    /// Append a row
    pub fn push(&mut self, row: ConfigurationResult) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[ConfigurationResult] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column headers for the rendered table
    pub fn headers(&self) -> Vec<&'static str> {
        let mut headers = vec!["Data Shards", "Parity Shards", "Storage Usage Ratio"];
        if self.read_quorum_enabled {
            headers.push("Read Quorum");
        }
        headers
    }

    /// Cell text for every row, matching `headers()`.
    ///
    /// A missing read quorum renders as an empty cell.
    pub fn table_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                let mut cells = vec![
                    row.data_shards.to_string(),
                    row.parity_shards.to_string(),
                    format_ratio(row.storage_ratio),
                ];
                if self.read_quorum_enabled {
                    cells.push(row.read_quorum.map(|q| q.to_string()).unwrap_or_default());
                }
                cells
            })
            .collect()
    }
}

/// Format a storage ratio with two decimals
pub fn format_ratio(ratio: f64) -> String {
    format!("{:.2}", ratio)
}
