/// Compressed size estimation
///
/// A size estimator binds to a table once and answers, for any column subset,
/// how large that subset would be under every candidate encoding.
///
/// ## Estimators:
///
/// - **Exact**: extracts the bitmap over all rows
/// - **Sample**: extracts the bitmap over a fixed uniform row sample and
///   extrapolates the statistics to the full table
///
/// Use `size_estimator()` or `estimator_from_config()` to pick one; the choice
/// is made once and never switched afterwards.
pub mod exact;
pub mod factors;
pub mod sample;
pub mod size_info;

pub use exact::ExactSizeEstimator;
pub use factors::SizeEstimationFactors;
pub use sample::SampleSizeEstimator;
pub use size_info::CompressedSizeInfo;

use crate::common::config::CompressionConfig;
use crate::common::constants::BITMAP_BLOCK_SZ;
use crate::common::error::CompressionResult;
use crate::config_err;
use crate::storage::compression::bitmap::{BitmapSummary, ValueBitmapExtractor};
use crate::storage::compression::sizes::ColGroupFootprint;
use crate::storage::compression::traits::{BitmapExtractor, EncodingSizeModel};
use crate::storage::table::{Table, TableView};
use std::sync::Arc;
use tracing::debug;

/// Estimates compressed sizes of column subsets
pub trait SizeEstimator: Send + Sync {
    /// Rows of the bound table
    fn num_rows(&self) -> u32;

    /// Columns of the bound table
    fn num_cols(&self) -> u32;

    /// Estimates the sizes of one column subset
    fn estimate(&self, columns: &[u32]) -> CompressionResult<CompressedSizeInfo>;

    /// Estimates the sizes from an already extracted bitmap
    ///
    /// Offsets must be positions within the rows this estimator reads.
    fn estimate_from_bitmap(&self, ubm: &BitmapSummary) -> CompressionResult<CompressedSizeInfo>;

    /// Estimates every column of the table as its own subset
    fn estimate_all(&self) -> CompressionResult<Vec<CompressedSizeInfo>> {
        (0..self.num_cols()).map(|col| self.estimate(&[col])).collect()
    }

    /// Returns the name of this estimator
    fn name(&self) -> &'static str;
}

/// Table and collaborators an estimator binds to
#[derive(Clone)]
pub struct EstimatorContext<'a> {
    pub(crate) table: TableView<'a>,
    pub(crate) extractor: Arc<dyn BitmapExtractor + 'a>,
    pub(crate) model: Arc<dyn EncodingSizeModel + 'a>,
    pub(crate) block_size: u32,
}

impl<'a> EstimatorContext<'a> {
    /// Binds to a table with the default bitmap extractor and footprint model
    pub fn new(table: &'a dyn Table, transpose: bool) -> Self {
        Self {
            table: TableView::new(table, transpose),
            extractor: Arc::new(ValueBitmapExtractor::new()),
            model: Arc::new(ColGroupFootprint::new()),
            block_size: BITMAP_BLOCK_SZ,
        }
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn BitmapExtractor + 'a>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_size_model(mut self, model: Arc<dyn EncodingSizeModel + 'a>) -> Self {
        self.model = model;
        self
    }

    pub fn with_block_size(mut self, block_size: u32) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn table(&self) -> &TableView<'a> {
        &self.table
    }

    pub fn block_size(&self) -> u32 {
        self.block_size
    }

    pub(crate) fn num_rows(&self) -> u32 {
        self.table.num_rows() as u32
    }

    pub(crate) fn num_cols(&self) -> u32 {
        self.table.num_cols() as u32
    }
}

/// Picks the exact estimator for a sampling ratio of 1.0 and a sample
/// estimator over `ceil(num_rows * sampling_ratio)` rows otherwise
pub fn size_estimator<'a>(
    ctx: EstimatorContext<'a>,
    num_rows: u32,
    seed: u64,
    sampling_ratio: f64,
) -> CompressionResult<Box<dyn SizeEstimator + 'a>> {
    if !(sampling_ratio > 0.0 && sampling_ratio <= 1.0) {
        return Err(config_err!(
            "sampling ratio must be in (0, 1], got {}",
            sampling_ratio
        ));
    }
    if ctx.block_size == 0 {
        return Err(config_err!("block size must be positive"));
    }

    if sampling_ratio == 1.0 {
        debug!(rows = num_rows, "using exact size estimator");
        Ok(Box::new(ExactSizeEstimator::new(ctx)))
    } else {
        let sample_size = (num_rows as f64 * sampling_ratio).ceil() as usize;
        debug!(
            rows = num_rows,
            sample_size, seed, "using sample size estimator"
        );
        Ok(Box::new(SampleSizeEstimator::new(ctx, sample_size, seed)))
    }
}

/// Builds the estimator a configuration asks for
pub fn estimator_from_config<'a>(
    table: &'a dyn Table,
    config: &CompressionConfig,
) -> CompressionResult<Box<dyn SizeEstimator + 'a>> {
    config.validate()?;
    let ctx = EstimatorContext::new(table, config.transpose_input).with_block_size(config.block_size);
    let num_rows = ctx.num_rows();
    let seed = config.resolve_seed();

    if config.sampling_ratio == 1.0 || config.sample_once {
        return size_estimator(ctx, num_rows, seed, config.sampling_ratio);
    }
    let sample_size = (num_rows as f64 * config.sampling_ratio).ceil() as usize;
    debug!(
        rows = num_rows,
        sample_size, seed, "using per-column sample size estimator"
    );
    Ok(Box::new(
        SampleSizeEstimator::new(ctx, sample_size, seed).with_per_column_samples(),
    ))
}
