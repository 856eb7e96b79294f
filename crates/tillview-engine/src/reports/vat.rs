//! VAT views: the department return, the daily summary, and rate analysis.

use std::collections::{BTreeMap, HashSet};

use tillview_model::{
    DepartmentSalesFact, ReportPeriod, SaleEntry, VatDailyTotals, VatDepartmentLine, VatRateLine,
    VatRatesResponse, VatReportResponse, VatReturnSummary, VatSummaryResponse, VatSummaryTotals,
};

use crate::metrics::{finite_or_zero, round2, safe_divide};

/// Standard-rate configuration for the vatable/non-vatable split.
///
/// The split reconstructs the taxed portion of exclusive sales from the
/// collected tax: `vatable = tax / standard_rate`. At the default 16% rate
/// that is the familiar x6.25 factor on the return.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VatConfig {
    pub standard_rate: f64,
}

impl Default for VatConfig {
    fn default() -> Self {
        VatConfig {
            standard_rate: 0.16,
        }
    }
}

impl VatConfig {
    fn vatable_portion(&self, sales_tax: f64) -> f64 {
        safe_divide(sales_tax, self.standard_rate, 0.0)
    }
}

/// Builds the per-department VAT return, lines ordered by department name.
///
/// Line figures are rounded to 2 decimals; the summary sums the unrounded
/// figures first and rounds last, so it matches what the lines were rounded
/// from rather than compounding their rounding.
pub fn build_vat_report(facts: &[DepartmentSalesFact], vat: VatConfig) -> VatReportResponse {
    let mut ordered: Vec<&DepartmentSalesFact> = facts.iter().collect();
    ordered.sort_by(|a, b| a.department_name.cmp(&b.department_name));

    let mut sum_inclusive = 0.0;
    let mut sum_exclusive = 0.0;
    let mut sum_tax = 0.0;
    let mut sum_vatable = 0.0;
    let mut sum_non_vatable = 0.0;

    let mut departments = Vec::with_capacity(ordered.len());
    for fact in ordered {
        let sales_inclusive = fact.sales_exclusive + fact.sales_tax;
        let vatable = vat.vatable_portion(fact.sales_tax);
        let non_vatable = fact.sales_exclusive - vatable;

        sum_inclusive += sales_inclusive;
        sum_exclusive += fact.sales_exclusive;
        sum_tax += fact.sales_tax;
        sum_vatable += vatable;
        sum_non_vatable += non_vatable;

        departments.push(VatDepartmentLine {
            department_name: fact.department_name.clone(),
            sales_inclusive: round2(sales_inclusive),
            sales_exclusive: round2(fact.sales_exclusive),
            sales_tax: round2(fact.sales_tax),
            vatable: round2(vatable),
            non_vatable: round2(non_vatable),
        });
    }

    VatReportResponse {
        departments,
        summary: VatReturnSummary {
            total_sales_inclusive: round2(sum_inclusive),
            total_sales_exclusive: round2(sum_exclusive),
            total_sales_tax: round2(sum_tax),
            total_vatable: round2(sum_vatable),
            total_non_vatable: round2(sum_non_vatable),
        },
    }
}

/// Groups sale lines into per-department exclusive/tax facts.
pub fn department_sales_from_entries(entries: &[SaleEntry]) -> Vec<DepartmentSalesFact> {
    let mut groups: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for entry in entries {
        let group = groups.entry(entry.department_name.as_str()).or_default();
        group.0 += finite_or_zero(entry.exclusive());
        group.1 += finite_or_zero(entry.sales_tax);
    }
    groups
        .into_iter()
        .map(|(name, (sales_exclusive, sales_tax))| DepartmentSalesFact {
            department_name: name.to_string(),
            sales_exclusive,
            sales_tax,
        })
        .collect()
}

#[derive(Default)]
struct DayVat {
    excl: f64,
    vat: f64,
    incl: f64,
    transactions: HashSet<i64>,
}

/// Groups sale lines into per-day VAT totals, ordered by date.
pub fn daily_vat_from_entries(entries: &[SaleEntry]) -> Vec<VatDailyTotals> {
    let mut days: BTreeMap<&str, DayVat> = BTreeMap::new();
    for entry in entries {
        let day = days.entry(entry.sale_date.as_str()).or_default();
        let excl = finite_or_zero(entry.exclusive());
        let tax = finite_or_zero(entry.sales_tax);
        day.excl += excl;
        day.vat += tax;
        day.incl += excl + tax;
        day.transactions.insert(entry.transaction_number);
    }
    days.into_iter()
        .map(|(date, acc)| VatDailyTotals {
            transaction_date: date.to_string(),
            total_excl: acc.excl,
            total_vat: acc.vat,
            total_incl: acc.incl,
            transaction_count: acc.transactions.len() as u64,
        })
        .collect()
}

/// Builds the daily VAT summary over per-day totals.
///
/// Rows come back ordered by date; summary amounts are rounded to
/// 2 decimals while the per-day rows pass through untouched.
pub fn build_vat_summary(period: ReportPeriod, days: &[VatDailyTotals]) -> VatSummaryResponse {
    let mut daily_breakdown = days.to_vec();
    daily_breakdown.sort_by(|a, b| a.transaction_date.cmp(&b.transaction_date));

    let summary = VatSummaryTotals {
        total_sales_excl_vat: round2(days.iter().map(|d| d.total_excl).sum::<f64>()),
        total_vat_amount: round2(days.iter().map(|d| d.total_vat).sum::<f64>()),
        total_sales_incl_vat: round2(days.iter().map(|d| d.total_incl).sum::<f64>()),
        total_transactions: days.iter().map(|d| d.transaction_count).sum(),
    };

    VatSummaryResponse {
        period,
        summary,
        daily_breakdown,
    }
}

/// Orders rate-analysis lines by rate then department, unassigned first.
pub fn build_vat_rates(mut lines: Vec<VatRateLine>) -> VatRatesResponse {
    lines.sort_by(|a, b| {
        a.vat_rate
            .total_cmp(&b.vat_rate)
            .then_with(|| a.department.cmp(&b.department))
    });
    VatRatesResponse { vat_rates: lines }
}
