//! `tillview-model` defines the wire-level report shapes shared across TillView.
//!
//! The crate is intentionally self-contained so it can be reused by:
//! - the aggregation engine (pivot/totals/derived-metric builders)
//! - the desktop shell's API client via `serde` (JSON-safe schema)
//! - report tooling (CLI dumps, fixtures)
//!
//! Row-level fields keep the backend's PascalCase column aliases
//! (`DepartmentName`, `SaleDate`); summary blocks keep its snake_case keys.
//! No aggregation logic lives here, only shapes and period validation.

mod period;
pub mod reports;
mod serde_compat;

pub use period::{PeriodError, ReportPeriod};
pub use reports::rows::{DailyDepartmentSales, DepartmentCostFact, DepartmentSalesFact, SaleEntry};
pub use reports::{
    BestDay, BestDepartment, DashboardSummary, DepartmentFigures, DepartmentListResponse,
    DepartmentTotals, SalesDashboardResponse, VatDailyTotals, VatDepartmentLine, VatRateLine,
    VatRatesResponse, VatReportResponse, VatReturnSummary, VatSummaryResponse, VatSummaryTotals,
};
