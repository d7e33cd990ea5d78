/// Compression planning module for PrismDB storage
///
/// This module decides, before any data is encoded, which columns of a table
/// are worth compressing. It never encodes data itself; it only predicts sizes.
///
/// ## Candidate Encodings:
///
/// - **DDC1 / DDC2**: dense dictionary with 1 or 2 byte codes
/// - **RLE**: run-length encoded offsets per distinct tuple
/// - **OLE**: offset lists per distinct tuple, segmented by blocks
/// - **Uncompressed**: the baseline every candidate has to beat
///
/// ## Pipeline:
///
/// 1. A `BitmapExtractor` summarizes a column subset into distinct tuples and
///    their row offsets (`BitmapSummary`)
/// 2. A `SizeEstimator` (exact or sample based) turns the summary into
///    `SizeEstimationFactors` and asks an `EncodingSizeModel` for every size
/// 3. The `ColumnClassifier` compares each column's cheapest encoding against
///    a `BaselineSizeModel` and splits the columns
///
/// ## Usage Example:
///
/// ```ignore
/// use prism_compress::storage::compression::*;
///
/// let estimator = estimator_from_config(&table, &CompressionConfig::sampled(0.05, 7))?;
/// let result = ColumnClassifier::new(4)?.classify(estimator.as_ref())?;
/// println!("compress {:?}, keep {:?}", result.compressible, result.not_compressible);
/// ```

pub mod analyze;
pub mod bitmap;
pub mod estim;
pub mod sizes;
pub mod statistics;
pub mod traits;
pub mod types;

pub use analyze::{ColumnClassification, ColumnClassifier};
pub use bitmap::{BitmapSummary, ValueBitmapExtractor};
pub use estim::{
    estimator_from_config, size_estimator, CompressedSizeInfo, EstimatorContext,
    ExactSizeEstimator, SampleSizeEstimator, SizeEstimationFactors, SizeEstimator,
};
pub use sizes::{ColGroupFootprint, MatrixFootprint};
pub use statistics::ClassificationStatistics;
pub use traits::{BaselineSizeModel, BitmapExtractor, CompressionStats, EncodingSizeModel};
pub use types::{CompressionSizes, CompressionType};
