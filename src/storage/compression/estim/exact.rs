/// Exact compressed size estimator (examines every row)
use crate::common::error::CompressionResult;
use crate::storage::compression::bitmap::BitmapSummary;
use crate::storage::compression::estim::{
    CompressedSizeInfo, EstimatorContext, SizeEstimationFactors, SizeEstimator,
};

pub struct ExactSizeEstimator<'a> {
    ctx: EstimatorContext<'a>,
}

impl<'a> ExactSizeEstimator<'a> {
    pub fn new(ctx: EstimatorContext<'a>) -> Self {
        Self { ctx }
    }
}

impl SizeEstimator for ExactSizeEstimator<'_> {
    fn num_rows(&self) -> u32 {
        self.ctx.num_rows()
    }

    fn num_cols(&self) -> u32 {
        self.ctx.num_cols()
    }

    fn estimate(&self, columns: &[u32]) -> CompressionResult<CompressedSizeInfo> {
        let ubm = self.ctx.extractor.extract(columns, &self.ctx.table, None)?;
        self.estimate_from_bitmap(&ubm)
    }

    fn estimate_from_bitmap(&self, ubm: &BitmapSummary) -> CompressionResult<CompressedSizeInfo> {
        let factors = SizeEstimationFactors::compute(
            ubm,
            true,
            self.num_rows(),
            self.num_cols(),
            self.ctx.block_size,
        );
        CompressedSizeInfo::new(factors, self.ctx.model.as_ref(), self.ctx.block_size)
    }

    fn name(&self) -> &'static str {
        "exact"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::compression::types::CompressionType;
    use crate::storage::table::ColumnMatrix;

    #[test]
    fn test_all_distinct_column() {
        let n = 1000;
        let table = ColumnMatrix::from_columns(vec![(1..=n).map(|v| v as f64).collect()]).unwrap();
        let est = ExactSizeEstimator::new(EstimatorContext::new(&table, false));
        let info = est.estimate(&[0]).unwrap();
        let f = info.factors();

        assert_eq!(f.num_vals(), n);
        assert_eq!(f.num_single(), n);
        assert_eq!(f.num_offs(), n as u64);
        assert_eq!(info.size_of(CompressionType::Dict1), u64::MAX);
    }

    #[test]
    fn test_multi_column_subset() {
        let table = ColumnMatrix::from_columns(vec![
            vec![1.0, 1.0, 2.0, 2.0],
            vec![3.0, 3.0, 3.0, 4.0],
            vec![0.0, 0.0, 0.0, 0.0],
        ])
        .unwrap();
        let est = ExactSizeEstimator::new(EstimatorContext::new(&table, false));
        let info = est.estimate(&[0, 1]).unwrap();

        assert_eq!(info.est_cardinality(), 3);
        assert_eq!(info.factors().group_cols(), 2);
        assert_eq!(info.factors().num_cols(), 3);
        assert_eq!(info.factors().num_runs(), 3);
    }

    #[test]
    fn test_estimate_all_matches_singletons() {
        let table = ColumnMatrix::from_columns(vec![
            vec![1.0, 2.0, 1.0, 2.0],
            vec![5.0, 5.0, 5.0, 5.0],
        ])
        .unwrap();
        let est = ExactSizeEstimator::new(EstimatorContext::new(&table, false));
        let all = est.estimate_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1], est.estimate(&[1]).unwrap());
        assert_eq!(all[1].factors().num_runs(), 1);
    }

    #[test]
    fn test_out_of_range_column_fails() {
        let table = ColumnMatrix::zeros(10, 2).unwrap();
        let est = ExactSizeEstimator::new(EstimatorContext::new(&table, false));
        assert!(est.estimate(&[5]).is_err());
    }
}
