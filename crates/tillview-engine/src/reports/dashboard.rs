//! Sales dashboard assembly: the dates-by-departments pivot plus the period
//! summary blocks.

use std::collections::{BTreeMap, HashSet};

use tillview_model::{
    BestDay, BestDepartment, DailyDepartmentSales, DashboardSummary, DepartmentTotals,
    ReportPeriod, SaleEntry, SalesDashboardResponse,
};

use crate::metrics::{finite_or_zero, round2, safe_divide};
use crate::normalize::FactRow;
use crate::pivot::PivotTable;
use crate::totals::PivotTotals;

/// The dates-by-departments view the dashboard grid renders.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardTable {
    pub table: PivotTable,
    pub totals: PivotTotals,
}

/// Pivots per-day department sales into the dashboard grid.
///
/// Row keys are department names, column keys sale dates, cell values the
/// day's sales; absent (department, date) cells are zero. Non-finite sales
/// values scrub to zero the same way decoded records do.
pub fn dashboard_table(rows: &[DailyDepartmentSales]) -> DashboardTable {
    let facts: Vec<FactRow> = rows
        .iter()
        .map(|row| {
            FactRow::new(
                row.department_name.clone(),
                row.sale_date.clone(),
                finite_or_zero(row.daily_sales),
            )
        })
        .collect();
    let table = PivotTable::from_facts(&facts);
    let totals = PivotTotals::compute(&table);
    DashboardTable { table, totals }
}

#[derive(Default)]
struct DayAcc {
    sales: f64,
    transactions: HashSet<i64>,
}

#[derive(Default)]
struct CellAcc {
    sales: f64,
    transactions: HashSet<i64>,
}

#[derive(Default)]
struct DeptAcc {
    sales: f64,
    transactions: HashSet<i64>,
    line_count: u64,
}

/// Assembles the full dashboard report from sale lines.
///
/// Transaction counts are distinct transaction numbers, never line counts;
/// `avg_transaction_value` averages line values the way the report query
/// does. Summary monetary fields are rounded to 2 decimals, per-row
/// breakdown figures stay unrounded. Ties for best day and best department
/// resolve to the earliest date and the alphabetically first department.
/// Non-finite line amounts scrub to zero before they reach any total.
pub fn build_sales_dashboard(
    period: ReportPeriod,
    entries: &[SaleEntry],
) -> SalesDashboardResponse {
    let mut days: BTreeMap<&str, DayAcc> = BTreeMap::new();
    let mut cells: BTreeMap<(&str, &str, i64), CellAcc> = BTreeMap::new();
    let mut depts: BTreeMap<(&str, i64), DeptAcc> = BTreeMap::new();
    let mut transactions: HashSet<i64> = HashSet::new();
    let mut total_excl = 0.0;
    let mut total_tax = 0.0;
    let mut total_incl = 0.0;
    let mut total_items = 0.0;

    for entry in entries {
        let exclusive = finite_or_zero(entry.exclusive());
        let tax = finite_or_zero(entry.sales_tax);
        let inclusive = exclusive + tax;
        total_excl += exclusive;
        total_tax += tax;
        total_incl += inclusive;
        total_items += finite_or_zero(entry.quantity);
        transactions.insert(entry.transaction_number);

        let day = days.entry(entry.sale_date.as_str()).or_default();
        day.sales += inclusive;
        day.transactions.insert(entry.transaction_number);

        let cell = cells
            .entry((
                entry.sale_date.as_str(),
                entry.department_name.as_str(),
                entry.department_id,
            ))
            .or_default();
        cell.sales += inclusive;
        cell.transactions.insert(entry.transaction_number);

        let dept = depts
            .entry((entry.department_name.as_str(), entry.department_id))
            .or_default();
        dept.sales += inclusive;
        dept.transactions.insert(entry.transaction_number);
        dept.line_count += 1;
    }

    let trading_days = days.len() as u64;
    let summary = DashboardSummary {
        total_transactions: transactions.len() as u64,
        trading_days,
        total_sales_incl: round2(total_incl),
        total_sales_excl: round2(total_excl),
        total_tax: round2(total_tax),
        avg_transaction_value: round2(safe_divide(total_incl, entries.len() as f64, 0.0)),
        total_items_sold: total_items as u64,
        avg_daily_sales: round2(total_incl / (trading_days.max(1) as f64)),
    };

    // BTreeMap iteration gives (date, department) order, matching the grid.
    let daily_by_department: Vec<DailyDepartmentSales> = cells
        .iter()
        .map(|((date, name, id), acc)| DailyDepartmentSales {
            sale_date: date.to_string(),
            department_name: name.to_string(),
            department_id: *id,
            daily_sales: acc.sales,
            transaction_count: acc.transactions.len() as u64,
        })
        .collect();

    let mut department_summary: Vec<DepartmentTotals> = depts
        .iter()
        .map(|((name, id), acc)| DepartmentTotals {
            department_name: name.to_string(),
            department_id: *id,
            total_sales: acc.sales,
            transaction_count: acc.transactions.len() as u64,
            avg_transaction_value: safe_divide(acc.sales, acc.line_count as f64, 0.0),
        })
        .collect();
    // Stable sort over name order, so equal-sales departments stay alphabetical.
    department_summary.sort_by(|a, b| b.total_sales.total_cmp(&a.total_sales));

    let mut best: Option<(&str, &DayAcc)> = None;
    for (date, acc) in &days {
        if best.map_or(true, |(_, current)| acc.sales > current.sales) {
            best = Some((date, acc));
        }
    }
    let best_day = best.map(|(date, acc)| BestDay {
        date: date.to_string(),
        sales: round2(acc.sales),
        transactions: acc.transactions.len() as u64,
    });

    let best_department = department_summary.first().map(|dept| BestDepartment {
        name: dept.department_name.clone(),
        sales: round2(dept.total_sales),
        transactions: dept.transaction_count,
    });

    SalesDashboardResponse {
        period,
        summary,
        best_day,
        best_department,
        daily_by_department,
        department_summary,
    }
}
