//! PrismDB compression planning
//!
//! Estimates how large column groups of a numeric table would be under several
//! lightweight encodings, and classifies every column as worth compressing or
//! not, before any encoding work is done.
//!
pub mod common;
pub mod execution;
pub mod storage;

// Re-export common types for convenience
pub use common::{init_test_logging, CompressionConfig, CompressionError, CompressionResult};

// Re-export execution support for convenience
pub use execution::{parallel_map, ParallelContext};

// Re-export storage system for convenience
pub use storage::{
    estimator_from_config, size_estimator, BaselineSizeModel, BitmapExtractor, BitmapSummary,
    ClassificationStatistics, ColGroupFootprint, ColumnClassification, ColumnClassifier,
    ColumnMatrix, CompressedSizeInfo, CompressionSizes, CompressionStats, CompressionType,
    EncodingSizeModel, EstimatorContext, ExactSizeEstimator, MatrixFootprint, SampleSizeEstimator,
    SizeEstimationFactors, SizeEstimator, Table, TableView, ValueBitmapExtractor,
};
