/// Size estimation factors
///
/// A handful of scalar statistics reduced from a bitmap summary. Every
/// encoding's footprint is a function of these numbers only.
use crate::storage::compression::bitmap::BitmapSummary;
use std::fmt;

/// Statistics of one column subset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizeEstimationFactors {
    /// Distinct value tuples
    pub(crate) num_vals: u32,
    /// Non-default cells (sum of occurrence counts)
    pub(crate) num_offs: u64,
    /// Offset-list segments
    pub(crate) num_segs: u32,
    /// Runs including empty skip runs, 0 when runs were not requested
    pub(crate) num_runs: u32,
    /// Tuples occurring exactly once
    pub(crate) num_single: u32,
    /// Rows of the host table
    pub(crate) num_rows: u32,
    /// Columns of the host table; informational, sizes are priced from `group_cols`
    pub(crate) num_cols: u32,
    /// Columns of the subset
    pub(crate) group_cols: u32,
}

impl SizeEstimationFactors {
    /// Creates factors from already aggregated statistics
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        num_vals: u32,
        num_offs: u64,
        num_segs: u32,
        num_runs: u32,
        num_single: u32,
        num_rows: u32,
        num_cols: u32,
        group_cols: u32,
    ) -> Self {
        Self {
            num_vals,
            num_offs,
            num_segs,
            num_runs,
            num_single,
            num_rows,
            num_cols,
            group_cols,
        }
    }

    /// Reduces a bitmap summary in a single pass over all occurrences.
    ///
    /// A tuple whose last offset is `l` spans `l / block_size + 1` segments. A
    /// run starts at every offset that does not directly follow the previous
    /// one, and every full `block_size` stride of the gap before it adds an
    /// empty run.
    pub fn compute(
        ubm: &BitmapSummary,
        include_runs: bool,
        num_rows: u32,
        num_cols: u32,
        block_size: u32,
    ) -> Self {
        let block = block_size.max(1) as i64;
        let num_vals = ubm.num_values();
        let mut num_offs = 0u64;
        let mut num_segs = 0u32;
        let mut num_runs = 0u32;
        let mut num_single = 0u32;

        for i in 0..num_vals as usize {
            let list = ubm.offsets(i);
            let Some(&last) = list.last() else {
                continue;
            };
            num_offs += list.len() as u64;
            num_segs += (last as i64 / block + 1) as u32;
            if list.len() == 1 {
                num_single += 1;
            }
            if include_runs {
                let mut last_off = -2i64;
                for &off in list {
                    let off = off as i64;
                    if off != last_off + 1 {
                        num_runs += 1;
                        num_runs += ((off - last_off) / block) as u32;
                    }
                    last_off = off;
                }
            }
        }

        Self {
            num_vals,
            num_offs,
            num_segs,
            num_runs,
            num_single,
            num_rows,
            num_cols,
            group_cols: ubm.num_cols() as u32,
        }
    }

    pub fn num_vals(&self) -> u32 {
        self.num_vals
    }

    pub fn num_offs(&self) -> u64 {
        self.num_offs
    }

    pub fn num_segs(&self) -> u32 {
        self.num_segs
    }

    pub fn num_runs(&self) -> u32 {
        self.num_runs
    }

    pub fn num_single(&self) -> u32 {
        self.num_single
    }

    pub fn num_rows(&self) -> u32 {
        self.num_rows
    }

    /// Host table width, not read by the default size models
    pub fn num_cols(&self) -> u32 {
        self.num_cols
    }

    pub fn group_cols(&self) -> u32 {
        self.group_cols
    }

    /// Fraction of non-default cells within the subset
    pub fn density(&self) -> f64 {
        let cells = self.num_rows as u64 * self.group_cols as u64;
        if cells == 0 {
            0.0
        } else {
            (self.num_offs as f64 / cells as f64).min(1.0)
        }
    }
}

impl fmt::Display for SizeEstimationFactors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rows:{} cols:{} group cols:{} offsets:{} segments:{} singles:{} runs:{} unique vals:{}",
            self.num_rows,
            self.num_cols,
            self.group_cols,
            self.num_offs,
            self.num_segs,
            self.num_single,
            self.num_runs,
            self.num_vals
        )
    }
}
