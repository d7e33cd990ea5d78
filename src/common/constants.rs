//! Constants used throughout the compression planner

/// Number of consecutive row positions covered by one offset-list segment
pub const BITMAP_BLOCK_SZ: u32 = 65536;

/// Largest dictionary addressable by a 1-byte code
pub const MAX_DICT1_VALUES: u32 = u8::MAX as u32;

/// Largest dictionary addressable by a 2-byte code (one code is reserved)
pub const MAX_DICT2_VALUES: u32 = u16::MAX as u32 - 1;

/// Sparsity below which a sparse block layout is considered
pub const SPARSITY_TURN_POINT: f64 = 0.4;

/// Default fraction of rows used by the sample estimator
pub const DEFAULT_SAMPLING_RATIO: f64 = 1.0;

/// Maximum threads for parallel estimation
pub const MAX_THREADS: usize = 64;
