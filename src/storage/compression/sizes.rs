/// In-memory footprint models
///
/// `ColGroupFootprint` prices a column group under each encoding from its size
/// estimation factors, `MatrixFootprint` prices an uncompressed block. Both
/// follow the same object-layout accounting: an object header per array, 8-byte
/// alignment, f64 dictionary entries, u8/u16 codes and u32 pointers.
///
/// Absolute byte counts are calibrated, not normative; what callers rely on is
/// that each size grows with the factor driving that encoding and that the
/// uncompressed entry of a single column equals its baseline size.
use crate::common::constants::{MAX_DICT1_VALUES, MAX_DICT2_VALUES, SPARSITY_TURN_POINT};
use crate::common::error::CompressionResult;
use crate::storage::compression::estim::SizeEstimationFactors;
use crate::storage::compression::traits::{BaselineSizeModel, EncodingSizeModel};
use crate::storage::compression::types::CompressionType;

/// Header of a matrix block object
const BLOCK_HEADER: u64 = 44;

/// Header of the sparse row structure
const SPARSE_HEADER: u64 = 16;

/// Bytes per sparse non-zero (f64 value and u32 index)
const SPARSE_ENTRY: u64 = 12;

/// Array reference plus array object header
const ARRAY_OVERHEAD: u64 = 28;

fn array_cost(length: u64, elem_bytes: u64) -> u64 {
    let payload = length.saturating_mul(elem_bytes);
    if payload <= 4 {
        return ARRAY_OVERHEAD + 4;
    }
    // first 4 bytes fill the header slot, the rest pads to 8
    let rest = payload - 4;
    let padded = rest + (8 - rest % 8) % 8;
    ARRAY_OVERHEAD.saturating_add(4).saturating_add(padded)
}

fn byte_array_cost(length: u64) -> u64 {
    array_cost(length, 1)
}

fn char_array_cost(length: u64) -> u64 {
    array_cost(length, 2)
}

fn int_array_cost(length: u64) -> u64 {
    array_cost(length, 4)
}

fn double_array_cost(length: u64) -> u64 {
    // doubles start 8-aligned after 4 bytes of padding
    ARRAY_OVERHEAD
        .saturating_add(4)
        .saturating_add(length.saturating_mul(8))
}

/// Column indexes, row count and flags shared by every column group
pub fn col_group_overhead(group_cols: u32) -> u64 {
    16 + 4 + 1 + 3 + int_array_cost(group_cols as u64)
}

/// Column group overhead plus the distinct-tuple dictionary
fn col_group_value_cost(group_cols: u32, num_vals: u32) -> u64 {
    col_group_overhead(group_cols)
        .saturating_add(double_array_cost(num_vals as u64 * group_cols as u64))
}

/// Footprint of uncompressed dense or sparse blocks
#[derive(Debug, Clone, Copy, Default)]
pub struct MatrixFootprint;

impl MatrixFootprint {
    pub fn new() -> Self {
        Self
    }

    /// Bytes of a dense block
    pub fn dense_size(&self, rows: u32, cols: u32) -> u64 {
        BLOCK_HEADER.saturating_add((rows as u64 * cols as u64).saturating_mul(8))
    }

    /// Bytes of a sparse block holding `nnz` non-zeros
    pub fn sparse_size(&self, nnz: u64) -> u64 {
        BLOCK_HEADER + SPARSE_HEADER + nnz.saturating_mul(SPARSE_ENTRY)
    }

    /// Bytes of the block alone, without column group overhead
    pub fn block_size(&self, rows: u32, cols: u32, density: f64) -> u64 {
        let cells = rows as u64 * cols as u64;
        let nnz = (density.clamp(0.0, 1.0) * cells as f64).round() as u64;
        if nnz == 0 {
            BLOCK_HEADER
        } else if self.would_prefer_sparse(rows, cols, nnz) {
            self.sparse_size(nnz)
        } else {
            self.dense_size(rows, cols)
        }
    }
}

impl BaselineSizeModel for MatrixFootprint {
    fn uncompressed_size(&self, rows: u32, cols: u32, density: f64) -> u64 {
        // column group overhead plus the reference to the wrapped block
        col_group_overhead(cols) + 8 + self.block_size(rows, cols, density)
    }

    fn would_prefer_sparse(&self, rows: u32, cols: u32, nnz: u64) -> bool {
        let cells = rows as u64 * cols as u64;
        if cells == 0 {
            return true;
        }
        let sparsity = nnz as f64 / cells as f64;
        sparsity < SPARSITY_TURN_POINT && self.sparse_size(nnz) < self.dense_size(rows, cols)
    }
}

/// Footprint of encoded column groups
#[derive(Debug, Clone, Copy, Default)]
pub struct ColGroupFootprint {
    baseline: MatrixFootprint,
}

impl ColGroupFootprint {
    pub fn new() -> Self {
        Self {
            baseline: MatrixFootprint::new(),
        }
    }

    fn dict1_size(&self, f: &SizeEstimationFactors) -> u64 {
        if f.num_vals > MAX_DICT1_VALUES {
            return u64::MAX;
        }
        col_group_value_cost(f.group_cols, f.num_vals)
            .saturating_add(byte_array_cost(f.num_rows as u64))
    }

    fn dict2_size(&self, f: &SizeEstimationFactors) -> u64 {
        if f.num_vals > MAX_DICT2_VALUES {
            return u64::MAX;
        }
        col_group_value_cost(f.group_cols, f.num_vals)
            .saturating_add(char_array_cost(f.num_rows as u64))
    }

    fn run_length_size(&self, f: &SizeEstimationFactors) -> u64 {
        // pointer per tuple plus a (start, length) pair per run
        col_group_value_cost(f.group_cols, f.num_vals)
            .saturating_add(int_array_cost(f.num_vals as u64 + 1))
            .saturating_add(char_array_cost(2 * f.num_runs as u64))
    }

    fn offset_list_size(&self, f: &SizeEstimationFactors) -> u64 {
        // pointer per tuple, one u16 per offset and per segment header
        col_group_value_cost(f.group_cols, f.num_vals)
            .saturating_add(int_array_cost(f.num_vals as u64 + 1))
            .saturating_add(char_array_cost(f.num_offs.saturating_add(f.num_segs as u64)))
    }

    fn uncompressed_size(&self, f: &SizeEstimationFactors) -> u64 {
        self.baseline
            .uncompressed_size(f.num_rows, f.group_cols, f.density())
    }
}

impl EncodingSizeModel for ColGroupFootprint {
    fn size_of(
        &self,
        ct: CompressionType,
        factors: &SizeEstimationFactors,
    ) -> CompressionResult<u64> {
        Ok(match ct {
            CompressionType::Dict1 => self.dict1_size(factors),
            CompressionType::Dict2 => self.dict2_size(factors),
            CompressionType::RunLength => self.run_length_size(factors),
            CompressionType::OffsetList => self.offset_list_size(factors),
            CompressionType::Uncompressed => self.uncompressed_size(factors),
        })
    }
}
