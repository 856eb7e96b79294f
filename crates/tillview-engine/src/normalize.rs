//! Row normalization: heterogeneous source records in, canonical facts out.
//!
//! Backend rows arrive as decoded JSON objects whose field names differ per
//! report (`DepartmentName`/`SaleDate`/`DailySales`, `TransactionDate`/...).
//! A [`FieldMap`] names which fields play the row-key, column-key and value
//! roles; everything else in a record is ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EngineError;

/// One normalized observation: row key, column key, numeric measure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FactRow {
    pub row_key: String,
    pub col_key: String,
    pub value: f64,
}

impl FactRow {
    pub fn new(
        row_key: impl Into<String>,
        col_key: impl Into<String>,
        value: f64,
    ) -> Self {
        FactRow {
            row_key: row_key.into(),
            col_key: col_key.into(),
            value,
        }
    }
}

/// Field-mapping configuration for one report's row shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMap {
    /// Field holding the row dimension (e.g. `DepartmentName`).
    pub row_key: String,
    /// Field holding the column dimension (e.g. `SaleDate`).
    pub column_key: String,
    /// Field holding the numeric measure (e.g. `DailySales`).
    pub value: String,
    /// Substituted when the value field is missing, null, or non-numeric.
    #[serde(default)]
    pub default_value: f64,
}

impl FieldMap {
    pub fn new(
        row_key: impl Into<String>,
        column_key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        FieldMap {
            row_key: row_key.into(),
            column_key: column_key.into(),
            value: value.into(),
            default_value: 0.0,
        }
    }

    fn validate(&self) -> Result<(), EngineError> {
        for (role, name) in [
            ("row key", &self.row_key),
            ("column key", &self.column_key),
            ("value", &self.value),
        ] {
            if name.trim().is_empty() {
                return Err(EngineError::EmptyFieldName { role });
            }
        }
        Ok(())
    }
}

/// Records dropped during normalization, by reason.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SkippedRecords {
    /// Record was not a JSON object at all.
    pub malformed: usize,
    /// The configured row-key field was absent or not a usable key.
    pub missing_row_key: usize,
    /// The configured column-key field was absent or not a usable key.
    pub missing_column_key: usize,
}

impl SkippedRecords {
    pub fn total(&self) -> usize {
        self.malformed + self.missing_row_key + self.missing_column_key
    }
}

/// Dataset classification after normalization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatasetStatus {
    /// No facts survived; render "no data", not an error.
    Empty,
    /// At least one fact is available.
    Ready,
}

/// Output of a normalization pass: surviving facts plus skip accounting.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizedRows {
    pub facts: Vec<FactRow>,
    pub skipped: SkippedRecords,
}

impl NormalizedRows {
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn status(&self) -> DatasetStatus {
        if self.facts.is_empty() {
            DatasetStatus::Empty
        } else {
            DatasetStatus::Ready
        }
    }
}

/// Normalizes decoded JSON records into fact rows.
///
/// A record missing its key fields is skipped and counted, never folded into
/// an empty-string bucket. A missing or non-numeric value field becomes
/// `map.default_value`. Only the map itself can make this fail (empty role
/// names).
pub fn normalize_records(
    records: &[Value],
    map: &FieldMap,
) -> Result<NormalizedRows, EngineError> {
    map.validate()?;

    let mut facts = Vec::with_capacity(records.len());
    let mut skipped = SkippedRecords::default();

    for record in records {
        let Some(object) = record.as_object() else {
            skipped.malformed += 1;
            continue;
        };
        let Some(row_key) = key_field(object.get(&map.row_key)) else {
            skipped.missing_row_key += 1;
            continue;
        };
        let Some(col_key) = key_field(object.get(&map.column_key)) else {
            skipped.missing_column_key += 1;
            continue;
        };
        let value = numeric_field(object.get(&map.value)).unwrap_or(map.default_value);
        facts.push(FactRow {
            row_key,
            col_key,
            value,
        });
    }

    if skipped.total() > 0 {
        log::debug!(
            "normalization skipped {}/{} records (malformed: {}, missing {}: {}, missing {}: {})",
            skipped.total(),
            records.len(),
            skipped.malformed,
            map.row_key,
            skipped.missing_row_key,
            map.column_key,
            skipped.missing_column_key,
        );
    }

    Ok(NormalizedRows { facts, skipped })
}

/// Extracts a key string. Strings and numbers qualify; null, booleans and
/// nested structures do not.
fn key_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Extracts a finite numeric measure, accepting numbers and numeric strings.
fn numeric_field(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}
