//! Configuration for compression planning
//!
//! Mirrors the knobs of the block compressor: how many rows the size estimator
//! looks at, how the row sample is seeded, how many workers score columns and
//! how large an offset-list segment is.

use crate::common::constants::{BITMAP_BLOCK_SZ, DEFAULT_SAMPLING_RATIO};
use crate::common::error::CompressionResult;
use crate::config_err;
use serde::{Deserialize, Serialize};

/// Compression planner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressionConfig {
    /// Fraction of rows the size estimator reads, in (0, 1]
    pub sampling_ratio: f64,
    /// Seed for the row sample (None draws a fresh seed)
    pub seed: Option<u64>,
    /// Number of worker threads used to score columns
    pub threads: usize,
    /// Rows per offset-list segment
    pub block_size: u32,
    /// Treat physical rows of the table as columns
    pub transpose_input: bool,
    /// Draw one row sample per estimator instead of one per column
    pub sample_once: bool,
}

impl CompressionConfig {
    /// Configuration that scans every row
    pub fn exact() -> Self {
        Self {
            sampling_ratio: 1.0,
            ..Default::default()
        }
    }

    /// Configuration that samples the given fraction of rows
    pub fn sampled(sampling_ratio: f64, seed: u64) -> Self {
        Self {
            sampling_ratio,
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Parses a configuration from JSON, filling unspecified fields with defaults
    pub fn from_json(json: &str) -> CompressionResult<Self> {
        let config: CompressionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration for fatal errors
    pub fn validate(&self) -> CompressionResult<()> {
        if !(self.sampling_ratio > 0.0 && self.sampling_ratio <= 1.0) {
            return Err(config_err!(
                "sampling ratio must be in (0, 1], got {}",
                self.sampling_ratio
            ));
        }
        if self.threads < 1 {
            return Err(config_err!("thread count must be at least 1"));
        }
        if self.block_size == 0 {
            return Err(config_err!("block size must be positive"));
        }
        Ok(())
    }

    /// Returns the configured seed or draws a new one
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

impl Default for CompressionConfig {
    fn default() -> Self {
        CompressionConfig {
            sampling_ratio: DEFAULT_SAMPLING_RATIO,
            seed: None,
            threads: num_cpus::get(),
            block_size: BITMAP_BLOCK_SZ,
            transpose_input: false,
            sample_once: true,
        }
    }
}
