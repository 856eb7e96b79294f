//! Dense pivot construction over string-keyed facts.
//!
//! Row and column key sets are the sorted, deduplicated unions of the keys
//! seen across all facts. Sale dates are ISO `YYYY-MM-DD` strings, so their
//! lexicographic order is already chronological.

use std::collections::{BTreeSet, HashMap};

use crate::normalize::{DatasetStatus, FactRow};

/// Dense two-dimensional table from (row key, column key) to a measure.
///
/// Every key pair has a cell; pairs absent from the input hold `0.0`. When
/// the same pair occurs more than once, the last occurrence wins: source
/// data arrives pre-aggregated per (department, date), so summing duplicates
/// would double-count. Built once per fetch and never mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PivotTable {
    row_keys: Vec<String>,
    col_keys: Vec<String>,
    /// Row-major, `row_keys.len() * col_keys.len()` cells.
    grid: Vec<f64>,
}

impl PivotTable {
    /// Builds the dense table from normalized facts.
    ///
    /// Empty input yields an empty table (no rows, no columns); callers
    /// render that as "no data".
    pub fn from_facts(facts: &[FactRow]) -> Self {
        if facts.is_empty() {
            return Self::default();
        }

        let mut row_set = BTreeSet::new();
        let mut col_set = BTreeSet::new();
        for fact in facts {
            row_set.insert(fact.row_key.as_str());
            col_set.insert(fact.col_key.as_str());
        }

        let row_keys: Vec<String> = row_set.iter().map(|k| k.to_string()).collect();
        let col_keys: Vec<String> = col_set.iter().map(|k| k.to_string()).collect();

        let row_index: HashMap<&str, usize> = row_set
            .iter()
            .enumerate()
            .map(|(idx, key)| (*key, idx))
            .collect();
        let col_index: HashMap<&str, usize> = col_set
            .iter()
            .enumerate()
            .map(|(idx, key)| (*key, idx))
            .collect();

        let cols = col_keys.len();
        let mut grid = vec![0.0; row_keys.len() * cols];
        for fact in facts {
            // Later facts overwrite earlier ones.
            let r = row_index[fact.row_key.as_str()];
            let c = col_index[fact.col_key.as_str()];
            grid[r * cols + c] = fact.value;
        }

        PivotTable {
            row_keys,
            col_keys,
            grid,
        }
    }

    pub fn row_keys(&self) -> &[String] {
        &self.row_keys
    }

    pub fn col_keys(&self) -> &[String] {
        &self.col_keys
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    pub fn status(&self) -> DatasetStatus {
        if self.is_empty() {
            DatasetStatus::Empty
        } else {
            DatasetStatus::Ready
        }
    }

    /// Cell lookup by key pair; `None` when either key is unknown.
    pub fn value(&self, row_key: &str, col_key: &str) -> Option<f64> {
        let r = self.row_keys.iter().position(|k| k == row_key)?;
        let c = self.col_keys.iter().position(|k| k == col_key)?;
        Some(self.grid[r * self.col_keys.len() + c])
    }

    /// One row of cells, in column-key order.
    pub fn row(&self, row_idx: usize) -> &[f64] {
        let cols = self.col_keys.len();
        &self.grid[row_idx * cols..(row_idx + 1) * cols]
    }

    /// Iterates `(row key, cells)` pairs in row-key order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.row_keys
            .iter()
            .enumerate()
            .map(|(idx, key)| (key.as_str(), self.row(idx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_facts() -> Vec<FactRow> {
        vec![
            FactRow::new("A", "2025-01-01", 100.0),
            FactRow::new("A", "2025-01-02", 50.0),
            FactRow::new("B", "2025-01-01", 30.0),
        ]
    }

    #[test]
    fn builds_sorted_key_sets_and_dense_grid() {
        let table = PivotTable::from_facts(&sample_facts());
        assert_eq!(table.row_keys(), ["A", "B"]);
        assert_eq!(table.col_keys(), ["2025-01-01", "2025-01-02"]);
        assert_eq!(table.value("A", "2025-01-01"), Some(100.0));
        assert_eq!(table.value("A", "2025-01-02"), Some(50.0));
        assert_eq!(table.value("B", "2025-01-01"), Some(30.0));
        // The (B, 2025-01-02) pair never occurred: densified to zero.
        assert_eq!(table.value("B", "2025-01-02"), Some(0.0));
    }

    #[test]
    fn unknown_keys_return_none() {
        let table = PivotTable::from_facts(&sample_facts());
        assert_eq!(table.value("C", "2025-01-01"), None);
        assert_eq!(table.value("A", "2025-02-01"), None);
    }

    #[test]
    fn key_sets_are_deduplicated_and_sorted() {
        let facts = vec![
            FactRow::new("Deli", "2025-01-02", 1.0),
            FactRow::new("Bakery", "2025-01-01", 2.0),
            FactRow::new("Deli", "2025-01-01", 3.0),
            FactRow::new("Bakery", "2025-01-02", 4.0),
        ];
        let table = PivotTable::from_facts(&facts);
        assert_eq!(table.row_keys(), ["Bakery", "Deli"]);
        assert_eq!(table.col_keys(), ["2025-01-01", "2025-01-02"]);
    }

    #[test]
    fn duplicate_pairs_keep_the_last_value() {
        let facts = vec![
            FactRow::new("A", "2025-01-01", 10.0),
            FactRow::new("B", "2025-01-01", 5.0),
            FactRow::new("A", "2025-01-01", 70.0),
        ];
        let table = PivotTable::from_facts(&facts);
        assert_eq!(table.value("A", "2025-01-01"), Some(70.0));
        assert_eq!(table.value("B", "2025-01-01"), Some(5.0));
    }

    #[test]
    fn empty_input_builds_empty_table() {
        let table = PivotTable::from_facts(&[]);
        assert!(table.is_empty());
        assert!(table.row_keys().is_empty());
        assert!(table.col_keys().is_empty());
        assert_eq!(table.status(), DatasetStatus::Empty);
    }

    #[test]
    fn rebuilding_from_the_same_facts_is_identical() {
        let facts = sample_facts();
        assert_eq!(PivotTable::from_facts(&facts), PivotTable::from_facts(&facts));
    }

    #[test]
    fn rows_iterate_in_key_order() {
        let table = PivotTable::from_facts(&sample_facts());
        let rows: Vec<(&str, Vec<f64>)> = table
            .rows()
            .map(|(key, cells)| (key, cells.to_vec()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("A", vec![100.0, 50.0]),
                ("B", vec![30.0, 0.0]),
            ]
        );
    }
}
