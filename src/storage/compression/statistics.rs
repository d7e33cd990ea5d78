/// Statistics of one column classification call
use crate::storage::compression::types::CompressionType;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassificationStatistics {
    /// Time spent estimating every column (ms)
    pub time_estimation: f64,
    /// Time spent comparing against the baseline (ms)
    pub time_classification: f64,
    /// Time spent in the correction pass (ms)
    pub time_correction: f64,
    /// Non-defaults of the not-compressible columns before correction
    pub nnz_uncompressed_initial: u64,
    /// Non-defaults of the not-compressible columns after correction
    pub nnz_uncompressed: u64,
    /// Columns moved to compressible by the correction pass
    pub corrected_columns: Vec<u32>,
    /// Columns whose cheapest encoding is each type, indexed by enum order
    pub best_type_counts: [usize; CompressionType::COUNT],
    /// Sum of baseline sizes over all columns
    pub estimated_size_uncompressed: u64,
    /// Sum of minimum sizes over compressible columns
    pub estimated_size_compressed: u64,
}

impl ClassificationStatistics {
    /// Number of columns whose cheapest encoding is `ct`
    pub fn best_type_count(&self, ct: CompressionType) -> usize {
        self.best_type_counts[ct.index()]
    }

    pub fn total_time(&self) -> f64 {
        self.time_estimation + self.time_classification + self.time_correction
    }

    fn best_types_string(&self) -> String {
        CompressionType::ALL
            .iter()
            .map(|ct| format!("{}:{}", ct, self.best_type_count(*ct)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ClassificationStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Classification Statistics:")?;
        writeln!(
            f,
            "\tphases (ms): estimate {:.3}, classify {:.3}, correct {:.3}, total {:.3}",
            self.time_estimation,
            self.time_classification,
            self.time_correction,
            self.total_time()
        )?;
        writeln!(f, "\tbest types: {}", self.best_types_string())?;
        writeln!(
            f,
            "\tnnz uncompressed: {} -> {} ({} corrected)",
            self.nnz_uncompressed_initial,
            self.nnz_uncompressed,
            self.corrected_columns.len()
        )
    }
}
