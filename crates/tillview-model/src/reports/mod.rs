//! Render-ready report shapes for the dashboard views.
//!
//! Each response struct mirrors one backend report endpoint. Optional
//! sections (`best_day`, per-row derived percentages) tolerate being absent
//! so partially-populated payloads still decode.

use serde::{Deserialize, Serialize};

use crate::serde_compat::{empty_object_as_none, null_as_default};
use crate::ReportPeriod;

pub mod rows;


/// Headline figures for the dashboard summary strip.
///
/// Monetary fields are rounded to 2 decimal places when the report is
/// assembled; counts stay integral.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_transactions: u64,
    pub trading_days: u64,
    pub total_sales_incl: f64,
    pub total_sales_excl: f64,
    pub total_tax: f64,
    pub avg_transaction_value: f64,
    pub total_items_sold: u64,
    pub avg_daily_sales: f64,
}

/// Highest-revenue trading day in the period.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BestDay {
    pub date: String,
    pub sales: f64,
    pub transactions: u64,
}

/// Highest-revenue department in the period.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BestDepartment {
    pub name: String,
    pub sales: f64,
    pub transactions: u64,
}

/// Per-department rollup over the whole period, ordered by sales descending.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DepartmentTotals {
    pub department_name: String,
    #[serde(rename = "DepartmentID")]
    pub department_id: i64,
    pub total_sales: f64,
    pub transaction_count: u64,
    pub avg_transaction_value: f64,
}

/// Everything the sales dashboard view needs for one period.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SalesDashboardResponse {
    pub period: ReportPeriod,
    pub summary: DashboardSummary,
    #[serde(
        default,
        deserialize_with = "empty_object_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub best_day: Option<BestDay>,
    #[serde(
        default,
        deserialize_with = "empty_object_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub best_department: Option<BestDepartment>,
    #[serde(default)]
    pub daily_by_department: Vec<rows::DailyDepartmentSales>,
    #[serde(default)]
    pub department_summary: Vec<DepartmentTotals>,
}

/// One department's stock, cost and profitability figures.
///
/// The percentage fields are `None` until the derived-metric pass annotates
/// them; payloads without them still decode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DepartmentFigures {
    pub department_name: String,
    #[serde(rename = "DepartmentID")]
    pub department_id: i64,
    pub stock_on_hand_cost: f64,
    pub cost_of_sales: f64,
    pub sales_exclusive: f64,
    pub sales_inclusive: f64,
    pub gross_profit_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_profit_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_contribution_percent: Option<f64>,
}

/// Department analysis listing, ordered by department name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DepartmentListResponse {
    #[serde(default)]
    pub departments: Vec<DepartmentFigures>,
}

/// One line of the VAT return, split into vatable and non-vatable portions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VatDepartmentLine {
    pub department_name: String,
    pub sales_inclusive: f64,
    pub sales_exclusive: f64,
    pub sales_tax: f64,
    pub vatable: f64,
    pub non_vatable: f64,
}

/// VAT return totals across all departments.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VatReturnSummary {
    pub total_sales_inclusive: f64,
    pub total_sales_exclusive: f64,
    pub total_sales_tax: f64,
    pub total_vatable: f64,
    pub total_non_vatable: f64,
}

/// Per-department VAT return for one period.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VatReportResponse {
    #[serde(default)]
    pub departments: Vec<VatDepartmentLine>,
    pub summary: VatReturnSummary,
}

/// One trading day's VAT totals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VatDailyTotals {
    pub transaction_date: String,
    pub total_excl: f64,
    #[serde(rename = "TotalVAT")]
    pub total_vat: f64,
    pub total_incl: f64,
    pub transaction_count: u64,
}

/// Period-level VAT totals.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VatSummaryTotals {
    pub total_sales_excl_vat: f64,
    pub total_vat_amount: f64,
    pub total_sales_incl_vat: f64,
    pub total_transactions: u64,
}

/// Day-by-day VAT breakdown for one period.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VatSummaryResponse {
    pub period: ReportPeriod,
    pub summary: VatSummaryTotals,
    #[serde(default)]
    pub daily_breakdown: Vec<VatDailyTotals>,
}

/// Sales and VAT grouped by (tax rate, department).
///
/// The grouping query left-joins tax and department lookups, so every field
/// except the counts can arrive as NULL; those decode as zero or `None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VatRateLine {
    #[serde(default, deserialize_with = "null_as_default")]
    pub vat_rate: f64,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub item_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_sales: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_vat: f64,
}

/// Rate analysis listing, ordered by rate then department.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VatRatesResponse {
    #[serde(default)]
    pub vat_rates: Vec<VatRateLine>,
}
