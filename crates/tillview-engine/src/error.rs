use thiserror::Error;

/// Errors the aggregation pipeline can report.
///
/// Recoverable per-record conditions (a row missing its key field, an empty
/// dataset) are not errors; they surface as skip counts and dataset status
/// instead. What remains is misconfiguration and the totals cross-check.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EngineError {
    /// A field-mapping role was configured with an empty field name.
    #[error("field map {role} name is empty")]
    EmptyFieldName { role: &'static str },
    /// Row-total and column-total sums disagree beyond tolerance.
    ///
    /// The dense grid makes both sums range over the same cells, so this can
    /// only fire on a pivot construction defect. Tests assert it never does.
    #[error("totals mismatch: row sums give {rows}, column sums give {columns}")]
    TotalsMismatch { rows: f64, columns: f64 },
}
