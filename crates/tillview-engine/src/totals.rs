//! Row, column and grand totals over a dense pivot table.

use crate::error::EngineError;
use crate::pivot::PivotTable;

/// Relative tolerance for the row-vs-column totals cross-check.
const TOTALS_RELATIVE_TOLERANCE: f64 = 1e-6;

/// Totals computed from a [`PivotTable`], index-aligned with its key sets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PivotTotals {
    row_totals: Vec<f64>,
    col_totals: Vec<f64>,
    grand_total: f64,
}

impl PivotTotals {
    /// Sums every row, every column, and the whole table.
    ///
    /// The grand total is defined as the sum of row totals; [`Self::verify`]
    /// cross-checks it against the column-total sum.
    pub fn compute(table: &PivotTable) -> Self {
        let rows = table.row_keys().len();
        let cols = table.col_keys().len();

        let mut row_totals = vec![0.0; rows];
        let mut col_totals = vec![0.0; cols];
        for (r, (_, cells)) in table.rows().enumerate() {
            for (c, cell) in cells.iter().enumerate() {
                row_totals[r] += cell;
                col_totals[c] += cell;
            }
        }
        let grand_total = row_totals.iter().sum();

        PivotTotals {
            row_totals,
            col_totals,
            grand_total,
        }
    }

    /// Row totals in row-key order.
    pub fn row_totals(&self) -> &[f64] {
        &self.row_totals
    }

    /// Column totals in column-key order.
    pub fn col_totals(&self) -> &[f64] {
        &self.col_totals
    }

    pub fn grand_total(&self) -> f64 {
        self.grand_total
    }

    /// Cross-checks that row-total and column-total sums agree.
    ///
    /// Both sums range over the same dense grid, so a mismatch indicates a
    /// construction defect rather than bad input. Tests run this after every
    /// build; production callers may skip it.
    pub fn verify(&self) -> Result<(), EngineError> {
        let rows: f64 = self.row_totals.iter().sum();
        let columns: f64 = self.col_totals.iter().sum();
        if within_tolerance(rows, columns) && within_tolerance(rows, self.grand_total) {
            Ok(())
        } else {
            log::warn!("pivot totals cross-check failed: rows {rows} vs columns {columns}");
            Err(EngineError::TotalsMismatch { rows, columns })
        }
    }
}

fn within_tolerance(a: f64, b: f64) -> bool {
    // Relative below 1e-6, treated as absolute near zero.
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= TOTALS_RELATIVE_TOLERANCE * scale
}
