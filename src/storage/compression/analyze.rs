/// Column classification
///
/// Scores every column of a table as its own candidate column group, compares
/// the cheapest encoding against the uncompressed baseline, and splits the
/// columns into compressible and not-compressible sets. A correction pass then
/// re-scores the not-compressible columns against a dense baseline when they
/// would end up stored dense together anyway.
use crate::common::config::CompressionConfig;
use crate::common::error::CompressionResult;
use crate::execution::parallel::{parallel_map, ParallelContext};
use crate::storage::compression::estim::{CompressedSizeInfo, SizeEstimator};
use crate::storage::compression::sizes::MatrixFootprint;
use crate::storage::compression::statistics::ClassificationStatistics;
use crate::storage::compression::traits::{BaselineSizeModel, CompressionStats};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Uncompressed baseline versus best candidate of one column
#[derive(Debug, Clone, Copy)]
struct ColumnScore {
    uncompressed: u64,
    compressed: u64,
}

impl CompressionStats for ColumnScore {
    fn uncompressed_size(&self) -> u64 {
        self.uncompressed
    }

    fn compressed_size(&self) -> u64 {
        self.compressed
    }
}

/// Outcome of classifying all columns of a table
#[derive(Debug, Clone)]
pub struct ColumnClassification {
    /// Columns worth compressing, in classification order
    pub compressible: Vec<u32>,
    /// Columns left uncompressed, in column order
    pub not_compressible: Vec<u32>,
    /// Compression ratio of every compressible column
    pub ratios: BTreeMap<u32, f64>,
    /// Candidate result of every column, indexed by column
    pub size_infos: Vec<CompressedSizeInfo>,
    /// Non-defaults of the not-compressible columns
    pub nnz_uncompressed: u64,
    pub statistics: ClassificationStatistics,
}

impl ColumnClassification {
    pub fn is_compressible(&self, col: u32) -> bool {
        self.ratios.contains_key(&col)
    }

    pub fn ratio(&self, col: u32) -> Option<f64> {
        self.ratios.get(&col).copied()
    }
}

/// Classifies columns by compression ratio
pub struct ColumnClassifier<'m> {
    baseline: Arc<dyn BaselineSizeModel + 'm>,
    parallel_ctx: ParallelContext,
}

impl<'m> ColumnClassifier<'m> {
    /// Creates a classifier scoring columns on `k` workers
    pub fn new(k: usize) -> CompressionResult<Self> {
        Ok(Self {
            baseline: Arc::new(MatrixFootprint::new()),
            parallel_ctx: ParallelContext::new(k)?,
        })
    }

    pub fn from_config(config: &CompressionConfig) -> CompressionResult<Self> {
        config.validate()?;
        Self::new(config.threads)
    }

    pub fn with_baseline_model(mut self, baseline: Arc<dyn BaselineSizeModel + 'm>) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn num_threads(&self) -> usize {
        self.parallel_ctx.num_threads
    }

    /// Classifies every column of the estimator's table.
    ///
    /// Either every column is scored or the call fails; a failure of any
    /// column's estimate aborts the whole classification.
    pub fn classify(&self, estimator: &dyn SizeEstimator) -> CompressionResult<ColumnClassification> {
        let num_rows = estimator.num_rows();
        let num_cols = estimator.num_cols();
        let mut stats = ClassificationStatistics::default();

        // PHASE 1: estimate every column independently
        let time = Instant::now();
        let size_infos = parallel_map(num_cols as usize, &self.parallel_ctx, |col| {
            estimator.estimate(&[col as u32])
        })?;
        stats.time_estimation = elapsed_ms(time);
        debug!(
            estimator = estimator.name(),
            columns = num_cols,
            threads = self.parallel_ctx.num_threads,
            "estimated column sizes in {:.3} ms",
            stats.time_estimation
        );

        // PHASE 2: classify against the uncompressed baseline
        let time = Instant::now();
        let mut compressible = Vec::new();
        let mut not_compressible = Vec::new();
        let mut ratios = BTreeMap::new();
        let mut nnz_uc = 0u64;

        for (col, info) in size_infos.iter().enumerate() {
            let col = col as u32;
            let density = if num_rows == 0 {
                0.0
            } else {
                info.est_non_default() as f64 / num_rows as f64
            };
            let score = ColumnScore {
                uncompressed: self.baseline.uncompressed_size(num_rows, 1, density),
                compressed: info.min_size(),
            };
            let ratio = score.compression_ratio();
            trace!(
                col,
                uncompressed = score.uncompressed,
                compressed = score.compressed,
                "compression ratio {:.4}",
                ratio
            );

            stats.best_type_counts[info.best_type().index()] += 1;
            stats.estimated_size_uncompressed =
                stats.estimated_size_uncompressed.saturating_add(score.uncompressed);
            if score.is_beneficial() {
                compressible.push(col);
                ratios.insert(col, ratio);
                stats.estimated_size_compressed =
                    stats.estimated_size_compressed.saturating_add(score.compressed);
            } else {
                not_compressible.push(col);
                nnz_uc += info.est_non_default();
            }
        }
        stats.nnz_uncompressed_initial = nnz_uc;
        stats.time_classification = elapsed_ms(time);

        // PHASE 3: one correction pass over the initial not-compressible columns
        let time = Instant::now();
        if !not_compressible.is_empty()
            && !self
                .baseline
                .would_prefer_sparse(num_rows, not_compressible.len() as u32, nnz_uc)
        {
            let dense_size = self.baseline.uncompressed_size(num_rows, 1, 1.0);
            let candidates = std::mem::take(&mut not_compressible);
            for col in candidates {
                let info = &size_infos[col as usize];
                let score = ColumnScore {
                    uncompressed: dense_size,
                    compressed: info.min_size(),
                };
                if score.is_beneficial() {
                    compressible.push(col);
                    ratios.insert(col, score.compression_ratio());
                    nnz_uc -= info.est_non_default();
                    stats.estimated_size_compressed =
                        stats.estimated_size_compressed.saturating_add(score.compressed);
                    stats.corrected_columns.push(col);
                } else {
                    not_compressible.push(col);
                }
            }
            debug!(
                corrected = stats.corrected_columns.len(),
                "re-evaluated not-compressible columns as dense"
            );
        }
        stats.nnz_uncompressed = nnz_uc;
        stats.time_correction = elapsed_ms(time);

        trace!("C: {:?}", compressible);
        trace!(
            "-- compression ratios: {:?}",
            compressible.iter().map(|c| ratios[c]).collect::<Vec<_>>()
        );
        trace!("UC: {:?}", not_compressible);
        if compressible.is_empty() && num_cols > 0 {
            warn!("all {} columns are incompressible", num_cols);
        }

        Ok(ColumnClassification {
            compressible,
            not_compressible,
            ratios,
            size_infos,
            nnz_uncompressed: nnz_uc,
            statistics: stats,
        })
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
