//! `tillview-engine` turns flat retail report rows into render-ready aggregates.
//!
//! The pipeline is deliberately small and synchronous:
//! - Normalize heterogeneous source records into `(row key, column key, value)` facts
//! - Pivot the facts into a dense dates-by-departments table (absent cells are 0)
//! - Total the table by row, by column, and overall
//! - Annotate entity lists with derived percentage metrics (gross profit %,
//!   sales contribution %)
//!
//! Each stage runs to completion on the full in-memory dataset before the next
//! reads it; nothing is streamed, shared, or mutated after construction. An
//! empty dataset flows through as a renderable "no data" outcome, never as an
//! error.

mod error;
pub mod metrics;
pub mod normalize;
pub mod pivot;
pub mod reports;
pub mod totals;

pub use error::EngineError;
pub use normalize::{
    normalize_records, DatasetStatus, FactRow, FieldMap, NormalizedRows, SkippedRecords,
};
pub use pivot::PivotTable;
pub use totals::PivotTotals;
