//! Table accessor for compression planning
//!
//! The planner only ever reads cell values of a numeric table. `Table` is the
//! read-only accessor, `ColumnMatrix` the column-major in-memory table used by
//! the block compressor, and `TableView` fixes the orientation once so the rest
//! of the planner never re-derives it.

use crate::common::error::CompressionResult;
use crate::invalid_arg_err;

/// Read-only numeric table
pub trait Table: Send + Sync {
    /// Number of physical rows
    fn num_rows(&self) -> usize;

    /// Number of physical columns
    fn num_cols(&self) -> usize;

    /// Cell value; callers stay within bounds
    fn get(&self, row: usize, col: usize) -> f64;

    /// Number of non-zero cells in a column
    fn column_nnz(&self, col: usize) -> usize {
        (0..self.num_rows())
            .filter(|&row| self.get(row, col) != 0.0)
            .count()
    }
}

/// Column-major table of f64 values
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMatrix {
    num_rows: usize,
    num_cols: usize,
    data: Vec<f64>,
}

impl ColumnMatrix {
    /// Creates a table from column-major values
    pub fn new(num_rows: usize, num_cols: usize, data: Vec<f64>) -> CompressionResult<Self> {
        if num_rows > u32::MAX as usize || num_cols > u32::MAX as usize {
            return Err(invalid_arg_err!(
                "table dimensions {}x{} exceed the u32 range",
                num_rows,
                num_cols
            ));
        }
        if data.len() != num_rows * num_cols {
            return Err(invalid_arg_err!(
                "expected {} values for a {}x{} table, got {}",
                num_rows * num_cols,
                num_rows,
                num_cols,
                data.len()
            ));
        }
        Ok(Self {
            num_rows,
            num_cols,
            data,
        })
    }

    /// Creates a table from a list of equally long columns
    pub fn from_columns(columns: Vec<Vec<f64>>) -> CompressionResult<Self> {
        let num_cols = columns.len();
        let num_rows = columns.first().map(|c| c.len()).unwrap_or(0);
        if let Some(pos) = columns.iter().position(|c| c.len() != num_rows) {
            return Err(invalid_arg_err!(
                "column {} has {} rows, expected {}",
                pos,
                columns[pos].len(),
                num_rows
            ));
        }
        Self::new(num_rows, num_cols, columns.into_iter().flatten().collect())
    }

    /// Creates an all-zero table
    pub fn zeros(num_rows: usize, num_cols: usize) -> CompressionResult<Self> {
        Self::new(num_rows, num_cols, vec![0.0; num_rows * num_cols])
    }

    /// Returns one column as a slice
    pub fn column(&self, col: usize) -> &[f64] {
        &self.data[col * self.num_rows..(col + 1) * self.num_rows]
    }
}

impl Table for ColumnMatrix {
    fn num_rows(&self) -> usize {
        self.num_rows
    }

    fn num_cols(&self) -> usize {
        self.num_cols
    }

    fn get(&self, row: usize, col: usize) -> f64 {
        self.data[col * self.num_rows + row]
    }

    fn column_nnz(&self, col: usize) -> usize {
        self.column(col).iter().filter(|v| **v != 0.0).count()
    }
}

/// A table seen with a fixed orientation
#[derive(Clone, Copy)]
pub struct TableView<'a> {
    table: &'a dyn Table,
    transposed: bool,
}

impl<'a> TableView<'a> {
    pub fn new(table: &'a dyn Table, transposed: bool) -> Self {
        Self { table, transposed }
    }

    /// Number of logical rows
    pub fn num_rows(&self) -> usize {
        if self.transposed {
            self.table.num_cols()
        } else {
            self.table.num_rows()
        }
    }

    /// Number of logical columns
    pub fn num_cols(&self) -> usize {
        if self.transposed {
            self.table.num_rows()
        } else {
            self.table.num_cols()
        }
    }

    /// Cell value at a logical position
    pub fn get(&self, row: usize, col: usize) -> f64 {
        if self.transposed {
            self.table.get(col, row)
        } else {
            self.table.get(row, col)
        }
    }
}

impl std::fmt::Debug for TableView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableView")
            .field("rows", &self.num_rows())
            .field("cols", &self.num_cols())
            .field("transposed", &self.transposed)
            .finish()
    }
}
