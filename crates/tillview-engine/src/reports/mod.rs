//! Report builders: decoded rows in, render-ready views out.
//!
//! Each builder mirrors one dashboard view. All of them treat an empty input
//! as a renderable outcome (zeroed summaries, no best day/department) rather
//! than an error.

pub mod dashboard;
pub mod departments;
pub mod vat;

pub use dashboard::{build_sales_dashboard, dashboard_table, DashboardTable};
pub use departments::{
    annotate_percentages, build_department_list, DepartmentAggregates, DepartmentAnalysis,
};
pub use vat::{
    build_vat_rates, build_vat_report, build_vat_summary, daily_vat_from_entries,
    department_sales_from_entries, VatConfig,
};
