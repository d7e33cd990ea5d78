/// Collaborator contracts of the compression planner
///
/// The planner does not materialize column groups itself. It asks a bitmap
/// extractor for distinct-value offsets, an encoding size model for the
/// footprint of each candidate encoding, and a baseline size model for the
/// footprint of leaving data uncompressed.
use crate::common::error::CompressionResult;
use crate::storage::compression::bitmap::BitmapSummary;
use crate::storage::compression::estim::SizeEstimationFactors;
use crate::storage::compression::types::CompressionType;
use crate::storage::table::TableView;

/// Turns raw column values into distinct-tuple offset lists
pub trait BitmapExtractor: Send + Sync {
    /// Extracts the bitmap summary of a column subset
    ///
    /// # Arguments
    /// * `columns` - Column indices of the subset
    /// * `table` - Oriented table to read
    /// * `rows` - Optional sorted row selection; offsets are then positions within it
    fn extract(
        &self,
        columns: &[u32],
        table: &TableView<'_>,
        rows: Option<&[u32]>,
    ) -> CompressionResult<BitmapSummary>;
}

/// Prices a column group under one encoding
///
/// Implementations must be deterministic. Dictionary sizes grow with the
/// number of distinct tuples and rows, run-length sizes with the number of
/// runs, offset-list sizes with offsets and segments.
pub trait EncodingSizeModel: Send + Sync {
    /// Estimated in-memory bytes, `u64::MAX` when the encoding cannot hold the group
    fn size_of(&self, ct: CompressionType, factors: &SizeEstimationFactors)
        -> CompressionResult<u64>;
}

/// Prices uncompressed dense or sparse storage
pub trait BaselineSizeModel: Send + Sync {
    /// Estimated in-memory bytes of an uncompressed block
    fn uncompressed_size(&self, rows: u32, cols: u32, density: f64) -> u64;

    /// Whether a block with `nnz` non-zeros is better stored sparse
    fn would_prefer_sparse(&self, rows: u32, cols: u32, nnz: u64) -> bool;
}

/// Helper trait for compression statistics
pub trait CompressionStats {
    /// Returns the uncompressed size
    fn uncompressed_size(&self) -> u64;

    /// Returns the compressed size
    fn compressed_size(&self) -> u64;

    /// Returns the compression ratio
    fn compression_ratio(&self) -> f64 {
        if self.compressed_size() > 0 {
            self.uncompressed_size() as f64 / self.compressed_size() as f64
        } else {
            1.0
        }
    }

    /// Returns whether compression pays off (ratio strictly above 1)
    fn is_beneficial(&self) -> bool {
        self.compression_ratio() > 1.0
    }
}
