//! Input row grains the aggregation engine consumes.
//!
//! These mirror the backend's grouped query outputs: already summed per
//! (day, department) or per department, but not yet shaped into a report.

use serde::{Deserialize, Serialize};

/// One sale line, the finest grain the engine accepts.
///
/// Mirrors a transaction-entry record joined to its department: the line's
/// exclusive value is `quantity * unit_price`, the inclusive value adds
/// `sales_tax`. Several lines share a `transaction_number`, so transaction
/// counts are distinct counts, never line counts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SaleEntry {
    pub transaction_number: i64,
    pub sale_date: String,
    pub department_name: String,
    #[serde(rename = "DepartmentID")]
    pub department_id: i64,
    pub quantity: f64,
    #[serde(rename = "Price")]
    pub unit_price: f64,
    #[serde(default)]
    pub sales_tax: f64,
}

impl SaleEntry {
    /// Line value excluding tax.
    pub fn exclusive(&self) -> f64 {
        self.quantity * self.unit_price
    }

    /// Line value including tax.
    pub fn inclusive(&self) -> f64 {
        self.exclusive() + self.sales_tax
    }
}

/// One department's sales on one trading day.
///
/// The input grain for the dates-by-departments pivot; `sale_date` is an ISO
/// `YYYY-MM-DD` string, so lexicographic order is chronological order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DailyDepartmentSales {
    pub sale_date: String,
    pub department_name: String,
    #[serde(rename = "DepartmentID")]
    pub department_id: i64,
    pub daily_sales: f64,
    #[serde(default)]
    pub transaction_count: u64,
}

/// One department's exclusive sales and collected tax over a period.
///
/// Input grain for the VAT return; the inclusive figure and the
/// vatable/non-vatable split are derived from these two amounts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DepartmentSalesFact {
    pub department_name: String,
    pub sales_exclusive: f64,
    pub sales_tax: f64,
}

/// One department's trading figures with stock and cost context.
///
/// Input grain for the department analysis view; profitability and
/// contribution percentages are derived downstream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DepartmentCostFact {
    pub department_name: String,
    #[serde(rename = "DepartmentID")]
    pub department_id: i64,
    #[serde(default)]
    pub stock_on_hand_cost: f64,
    pub cost_of_sales: f64,
    pub sales_exclusive: f64,
    pub sales_tax: f64,
}
