/// Candidate result of one column-subset estimation
use crate::common::error::CompressionResult;
use crate::storage::compression::estim::SizeEstimationFactors;
use crate::storage::compression::traits::EncodingSizeModel;
use crate::storage::compression::types::{CompressionSizes, CompressionType};

/// Estimated sizes of a column subset under every encoding
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressedSizeInfo {
    est_card: u32,
    est_nnz: u64,
    factors: SizeEstimationFactors,
    sizes: CompressionSizes,
}

impl CompressedSizeInfo {
    /// Prices every encoding once.
    ///
    /// Offset lists only pay off above `2 * block_size` distinct tuples; below
    /// that the entry is `u64::MAX` without consulting the model.
    pub fn new(
        factors: SizeEstimationFactors,
        model: &dyn EncodingSizeModel,
        block_size: u32,
    ) -> CompressionResult<Self> {
        let ole_threshold = 2 * block_size as u64;
        let sizes = CompressionSizes::try_from_fn(|ct| match ct {
            CompressionType::OffsetList if factors.num_vals() as u64 <= ole_threshold => {
                Ok(u64::MAX)
            }
            _ => model.size_of(ct, &factors),
        })?;

        Ok(Self {
            est_card: factors.num_vals(),
            est_nnz: factors.num_offs(),
            factors,
            sizes,
        })
    }

    /// Estimated number of distinct tuples
    pub fn est_cardinality(&self) -> u32 {
        self.est_card
    }

    /// Estimated number of non-default cells
    pub fn est_non_default(&self) -> u64 {
        self.est_nnz
    }

    pub fn factors(&self) -> &SizeEstimationFactors {
        &self.factors
    }

    pub fn size_of(&self, ct: CompressionType) -> u64 {
        self.sizes.get(ct)
    }

    pub fn sizes(&self) -> &CompressionSizes {
        &self.sizes
    }

    /// Smallest size over all encodings
    pub fn min_size(&self) -> u64 {
        self.sizes.min().1
    }

    /// Encoding with the smallest size
    pub fn best_type(&self) -> CompressionType {
        self.sizes.min().0
    }
}
