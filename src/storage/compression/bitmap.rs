/// Bitmap summaries of column subsets
///
/// A bitmap summary lists, for every distinct non-zero value tuple of a column
/// subset, the strictly increasing row offsets where the tuple occurs. All-zero
/// tuples are the default value and are not listed.
use crate::common::error::CompressionResult;
use crate::invalid_arg_err;
use crate::storage::compression::traits::BitmapExtractor;
use crate::storage::table::TableView;
use ahash::AHashMap;
use ordered_float::OrderedFloat;

/// Distinct value tuples of a column subset with their row offsets
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BitmapSummary {
    /// Tuple values, row-major by tuple
    values: Vec<f64>,
    /// Width of each tuple
    num_cols: usize,
    /// Row offsets per tuple
    offsets: Vec<Vec<u32>>,
}

impl BitmapSummary {
    /// Creates a summary; offsets of each tuple must be non-empty and strictly increasing
    pub fn new(num_cols: usize, values: Vec<f64>, offsets: Vec<Vec<u32>>) -> CompressionResult<Self> {
        if values.len() != num_cols * offsets.len() {
            return Err(invalid_arg_err!(
                "{} tuple values do not match {} tuples of width {}",
                values.len(),
                offsets.len(),
                num_cols
            ));
        }
        for (i, list) in offsets.iter().enumerate() {
            if list.is_empty() {
                return Err(invalid_arg_err!("tuple {} has no occurrences", i));
            }
            if list.windows(2).any(|w| w[0] >= w[1]) {
                return Err(invalid_arg_err!("offsets of tuple {} are not strictly increasing", i));
            }
        }
        Ok(Self {
            values,
            num_cols,
            offsets,
        })
    }

    /// Number of distinct tuples
    pub fn num_values(&self) -> u32 {
        self.offsets.len() as u32
    }

    /// Width of the column subset
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Sorted row offsets of one tuple
    pub fn offsets(&self, tuple: usize) -> &[u32] {
        &self.offsets[tuple]
    }

    /// Number of rows holding one tuple
    pub fn occurrence_count(&self, tuple: usize) -> u32 {
        self.offsets[tuple].len() as u32
    }

    /// Values of one tuple
    pub fn tuple(&self, tuple: usize) -> &[f64] {
        &self.values[tuple * self.num_cols..(tuple + 1) * self.num_cols]
    }
}

/// Hash-based bitmap extraction over table values
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueBitmapExtractor;

impl ValueBitmapExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl BitmapExtractor for ValueBitmapExtractor {
    fn extract(
        &self,
        columns: &[u32],
        table: &TableView<'_>,
        rows: Option<&[u32]>,
    ) -> CompressionResult<BitmapSummary> {
        if columns.is_empty() {
            return Err(invalid_arg_err!("empty column subset"));
        }
        if let Some(&col) = columns.iter().find(|&&c| c as usize >= table.num_cols()) {
            return Err(invalid_arg_err!(
                "column {} out of range for {} columns",
                col,
                table.num_cols()
            ));
        }
        if let Some(rows) = rows {
            if let Some(&row) = rows.iter().find(|&&r| r as usize >= table.num_rows()) {
                return Err(invalid_arg_err!(
                    "row {} out of range for {} rows",
                    row,
                    table.num_rows()
                ));
            }
        }

        let num_positions = rows.map(|r| r.len()).unwrap_or_else(|| table.num_rows());
        let mut index: AHashMap<Vec<OrderedFloat<f64>>, usize> = AHashMap::new();
        let mut values = Vec::new();
        let mut offsets: Vec<Vec<u32>> = Vec::new();
        let mut tuple = Vec::with_capacity(columns.len());

        for pos in 0..num_positions {
            let row = rows.map(|r| r[pos] as usize).unwrap_or(pos);
            tuple.clear();
            tuple.extend(columns.iter().map(|&c| table.get(row, c as usize)));
            if tuple.iter().all(|v| *v == 0.0) {
                continue;
            }

            // -0.0 and 0.0 share one tuple
            let key: Vec<OrderedFloat<f64>> = tuple
                .iter()
                .map(|v| OrderedFloat(if *v == 0.0 { 0.0 } else { *v }))
                .collect();
            let slot = match index.get(&key) {
                Some(&slot) => slot,
                None => {
                    let slot = offsets.len();
                    index.insert(key, slot);
                    values.extend_from_slice(&tuple);
                    offsets.push(Vec::new());
                    slot
                }
            };
            offsets[slot].push(pos as u32);
        }

        Ok(BitmapSummary {
            values,
            num_cols: columns.len(),
            offsets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::table::ColumnMatrix;

    #[test]
    fn test_extract_single_column() {
        let table =
            ColumnMatrix::from_columns(vec![vec![1.0, 0.0, 1.0, 2.0, 2.0, 0.0]]).unwrap();
        let view = TableView::new(&table, false);
        let ubm = ValueBitmapExtractor::new().extract(&[0], &view, None).unwrap();

        assert_eq!(ubm.num_values(), 2);
        assert_eq!(ubm.tuple(0), &[1.0]);
        assert_eq!(ubm.offsets(0), &[0, 2]);
        assert_eq!(ubm.offsets(1), &[3, 4]);
        assert_eq!(ubm.occurrence_count(1), 2);
    }

    #[test]
    fn test_extract_multi_column_tuples() {
        let table = ColumnMatrix::from_columns(vec![
            vec![1.0, 1.0, 0.0, 0.0],
            vec![0.0, 3.0, 0.0, 3.0],
        ])
        .unwrap();
        let view = TableView::new(&table, false);
        let ubm = ValueBitmapExtractor::new().extract(&[0, 1], &view, None).unwrap();

        // (1,0), (1,3), (0,3); the all-zero row 2 is skipped
        assert_eq!(ubm.num_values(), 3);
        assert_eq!(ubm.tuple(1), &[1.0, 3.0]);
        assert_eq!(ubm.offsets(2), &[3]);
    }

    #[test]
    fn test_extract_with_row_selection() {
        let table = ColumnMatrix::from_columns(vec![vec![5.0, 6.0, 5.0, 6.0, 5.0]]).unwrap();
        let view = TableView::new(&table, false);
        let ubm = ValueBitmapExtractor::new()
            .extract(&[0], &view, Some(&[0, 2, 3]))
            .unwrap();

        assert_eq!(ubm.num_values(), 2);
        // offsets are positions within the selection
        assert_eq!(ubm.offsets(0), &[0, 1]);
        assert_eq!(ubm.offsets(1), &[2]);
    }

    #[test]
    fn test_extract_all_zero_column() {
        let table = ColumnMatrix::zeros(100, 1).unwrap();
        let view = TableView::new(&table, false);
        let ubm = ValueBitmapExtractor::new().extract(&[0], &view, None).unwrap();
        assert_eq!(ubm.num_values(), 0);
    }

    #[test]
    fn test_extract_rejects_bad_columns() {
        let table = ColumnMatrix::zeros(4, 2).unwrap();
        let view = TableView::new(&table, false);
        let extractor = ValueBitmapExtractor::new();
        assert!(extractor.extract(&[], &view, None).is_err());
        assert!(extractor.extract(&[2], &view, None).is_err());
        assert!(extractor.extract(&[0], &view, Some(&[4])).is_err());
    }

    #[test]
    fn test_summary_validation() {
        assert!(BitmapSummary::new(1, vec![1.0], vec![vec![3, 1]]).is_err());
        assert!(BitmapSummary::new(1, vec![1.0], vec![vec![]]).is_err());
        assert!(BitmapSummary::new(2, vec![1.0], vec![vec![0]]).is_err());
        assert!(BitmapSummary::new(1, vec![1.0], vec![vec![0, 4]]).is_ok());
    }
}
