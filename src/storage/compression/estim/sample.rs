/// Sample-based compressed size estimator
///
/// Reads a uniform row sample (without replacement, seeded) and scales the
/// observed statistics up to the full table. Distinct counts saturate, so they
/// are extrapolated with the Haas-Stokes Duj1 estimator instead of a linear
/// scale-up, and every estimate stays within the number of rows.
use crate::common::error::{CompressionError, CompressionResult};
use crate::storage::compression::bitmap::BitmapSummary;
use crate::storage::compression::estim::{
    CompressedSizeInfo, EstimatorContext, SizeEstimationFactors, SizeEstimator,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub struct SampleSizeEstimator<'a> {
    ctx: EstimatorContext<'a>,
    sample_size: usize,
    seed: u64,
    /// Sorted row ids shared by every column
    sample: Vec<u32>,
    per_column: bool,
}

impl<'a> SampleSizeEstimator<'a> {
    /// Draws the row sample once; sizes at or above the row count read every row
    pub fn new(ctx: EstimatorContext<'a>, sample_size: usize, seed: u64) -> Self {
        let num_rows = ctx.table.num_rows();
        let sample_size = sample_size.min(num_rows);
        let sample = draw_sample(num_rows, sample_size, seed);
        Self {
            ctx,
            sample_size,
            seed,
            sample,
            per_column: false,
        }
    }

    /// Draws a separate sample for each column subset, seeded by its first column
    pub fn with_per_column_samples(mut self) -> Self {
        self.per_column = true;
        self
    }

    /// Sorted row ids of the shared sample
    pub fn sample_rows(&self) -> &[u32] {
        &self.sample
    }

    fn estimate_with_sample(
        &self,
        ubm: &BitmapSummary,
        sample: &[u32],
    ) -> CompressionResult<CompressedSizeInfo> {
        let out_of_sample = (0..ubm.num_values() as usize)
            .filter_map(|i| ubm.offsets(i).last())
            .find(|&&pos| pos as usize >= sample.len());
        if let Some(&pos) = out_of_sample {
            return Err(CompressionError::Bitmap(format!(
                "offset {} outside the sample of {} rows",
                pos,
                sample.len()
            )));
        }
        let factors = extrapolate_factors(
            ubm,
            sample,
            self.num_rows(),
            self.num_cols(),
            self.ctx.block_size,
        );
        CompressedSizeInfo::new(factors, self.ctx.model.as_ref(), self.ctx.block_size)
    }
}

impl SizeEstimator for SampleSizeEstimator<'_> {
    fn num_rows(&self) -> u32 {
        self.ctx.num_rows()
    }

    fn num_cols(&self) -> u32 {
        self.ctx.num_cols()
    }

    fn estimate(&self, columns: &[u32]) -> CompressionResult<CompressedSizeInfo> {
        match (self.per_column, columns.first()) {
            (true, Some(&first)) => {
                let sample = draw_sample(
                    self.ctx.table.num_rows(),
                    self.sample_size,
                    self.seed.wrapping_add(first as u64),
                );
                let ubm = self
                    .ctx
                    .extractor
                    .extract(columns, &self.ctx.table, Some(&sample))?;
                self.estimate_with_sample(&ubm, &sample)
            }
            _ => {
                let ubm = self
                    .ctx
                    .extractor
                    .extract(columns, &self.ctx.table, Some(&self.sample))?;
                self.estimate_with_sample(&ubm, &self.sample)
            }
        }
    }

    fn estimate_from_bitmap(&self, ubm: &BitmapSummary) -> CompressionResult<CompressedSizeInfo> {
        self.estimate_with_sample(ubm, &self.sample)
    }

    fn name(&self) -> &'static str {
        "sample"
    }
}

/// Draws `size` distinct row ids out of `num_rows`, sorted ascending
pub fn draw_sample(num_rows: usize, size: usize, seed: u64) -> Vec<u32> {
    if size >= num_rows {
        return (0..num_rows as u32).collect();
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows: Vec<u32> = rand::seq::index::sample(&mut rng, num_rows, size)
        .into_iter()
        .map(|r| r as u32)
        .collect();
    rows.sort_unstable();
    rows
}

/// Raw statistics of a bitmap taken over a row sample
#[derive(Debug, Default)]
struct SampleStats {
    distinct: u64,
    singletons: u64,
    offsets: u64,
    /// Segments using the table row id of each tuple's last occurrence
    segments: u64,
    /// Occurrences that do not directly follow the previous one in sample order
    breaks: u64,
    /// Sampled pairs of adjacent table rows whose first row is non-default
    adjacent_pairs: u64,
    /// Adjacent pairs where the second row repeats the first row's tuple
    continuations: u64,
    /// Empty block strides between occurrences, measured in table row ids
    empty_runs: u64,
}

impl SampleStats {
    fn collect(ubm: &BitmapSummary, sample: &[u32], block_size: u32) -> Self {
        let block = block_size.max(1) as i64;
        let mut stats = SampleStats {
            distinct: ubm.num_values() as u64,
            ..Default::default()
        };
        let mut owner: Vec<Option<u32>> = vec![None; sample.len()];

        for i in 0..ubm.num_values() as usize {
            let list = ubm.offsets(i);
            let Some(&last) = list.last() else {
                continue;
            };
            stats.offsets += list.len() as u64;
            if list.len() == 1 {
                stats.singletons += 1;
            }
            stats.segments += (sample[last as usize] as i64 / block + 1) as u64;

            let mut last_pos = -2i64;
            let mut last_row = -2i64;
            for &pos in list {
                let pos = pos as i64;
                let row = sample[pos as usize] as i64;
                owner[pos as usize] = Some(i as u32);
                if pos != last_pos + 1 {
                    if last_pos >= 0 {
                        stats.breaks += 1;
                    }
                    stats.empty_runs += ((row - last_row) / block) as u64;
                }
                last_pos = pos;
                last_row = row;
            }
        }

        for pos in 1..sample.len() {
            if sample[pos] != sample[pos - 1] + 1 {
                continue;
            }
            if let Some(prev) = owner[pos - 1] {
                stats.adjacent_pairs += 1;
                if owner[pos] == Some(prev) {
                    stats.continuations += 1;
                }
            }
        }
        stats
    }
}

/// Scales sample statistics to the full table.
///
/// With `q = s / N`, non-default cells scale linearly to `N'`. Distinct tuples
/// are drawn from the `n'` sampled non-default cells, so Duj1 runs over that
/// population: `d / (1 - (1 - n'/N') * f1 / n')`, clamped to `[d, min(N, N')]`.
/// Singletons scale with the distinct ratio. Unseen tuples add one segment each.
///
/// Runs come from sampled pairs of adjacent table rows: the share of pairs that
/// repeat a tuple estimates how many non-default cells continue a run. Without
/// such pairs the share of run breaks in sample order is used instead, which
/// undercounts runs of interleaved values.
fn extrapolate_factors(
    ubm: &BitmapSummary,
    sample: &[u32],
    num_rows: u32,
    num_cols: u32,
    block_size: u32,
) -> SizeEstimationFactors {
    let s = sample.len() as u64;
    let n = num_rows as u64;
    if s >= n {
        return SizeEstimationFactors::compute(ubm, true, num_rows, num_cols, block_size);
    }

    let group_cols = ubm.num_cols() as u32;
    let stats = SampleStats::collect(ubm, sample, block_size);
    if stats.distinct == 0 || s == 0 {
        return SizeEstimationFactors::new(0, 0, 0, 0, 0, num_rows, num_cols, group_cols);
    }

    let q = s as f64 / n as f64;
    let d = stats.distinct as f64;

    let est_offs = ((stats.offsets as f64 / q).round() as u64).clamp(stats.offsets, n);

    let sampled_offs = stats.offsets as f64;
    let offs_ratio = sampled_offs / est_offs as f64;
    let denom = 1.0 - (1.0 - offs_ratio) * stats.singletons as f64 / sampled_offs;
    let duj1 = if denom > 0.0 { d / denom } else { est_offs as f64 };
    let upper = est_offs.min(n) as f64;
    let est_vals = duj1.round().clamp(d, upper.max(d)) as u64;

    let est_single =
        ((stats.singletons as f64 * est_vals as f64 / d).round() as u64).min(est_vals);

    let est_segs = stats.segments + (est_vals - stats.distinct);

    let base_runs = if stats.adjacent_pairs > 0 {
        let share = stats.continuations as f64 / stats.adjacent_pairs as f64;
        let continued = (share * est_offs as f64).round() as u64;
        est_offs.saturating_sub(continued).max(est_vals)
    } else {
        let max_breaks = stats.offsets - stats.distinct;
        let est_breaks = if max_breaks == 0 {
            0
        } else {
            let share = stats.breaks as f64 / max_breaks as f64;
            (share * est_offs.saturating_sub(est_vals) as f64).round() as u64
        };
        est_vals + est_breaks
    };
    let est_runs = base_runs + stats.empty_runs;

    SizeEstimationFactors::new(
        saturate_u32(est_vals),
        est_offs,
        saturate_u32(est_segs),
        saturate_u32(est_runs),
        saturate_u32(est_single),
        num_rows,
        num_cols,
        group_cols,
    )
}

fn saturate_u32(value: u64) -> u32 {
    value.min(u32::MAX as u64) as u32
}
