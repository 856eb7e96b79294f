//! Department analysis: profitability and contribution annotation.

use serde::Serialize;
use tillview_model::{DepartmentCostFact, DepartmentFigures, DepartmentListResponse};

use crate::metrics::percentage;

/// Column sums across every department in the listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct DepartmentAggregates {
    pub stock_on_hand_cost: f64,
    pub cost_of_sales: f64,
    pub sales_exclusive: f64,
    pub sales_inclusive: f64,
    pub gross_profit_value: f64,
}

/// Render-ready department analysis: annotated rows plus the totals footer.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DepartmentAnalysis {
    pub response: DepartmentListResponse,
    pub totals: DepartmentAggregates,
    /// Gross profit % of the aggregate, not the mean of per-row percentages.
    pub overall_gp_percent: f64,
}

/// Builds the department listing from trading facts, ordered by name.
///
/// Derives the inclusive figure and gross profit from each fact, then
/// annotates the percentage fields and the aggregate footer.
pub fn build_department_list(facts: &[DepartmentCostFact]) -> DepartmentAnalysis {
    let mut figures: Vec<DepartmentFigures> = facts
        .iter()
        .map(|fact| DepartmentFigures {
            department_name: fact.department_name.clone(),
            department_id: fact.department_id,
            stock_on_hand_cost: fact.stock_on_hand_cost,
            cost_of_sales: fact.cost_of_sales,
            sales_exclusive: fact.sales_exclusive,
            sales_inclusive: fact.sales_exclusive + fact.sales_tax,
            gross_profit_value: fact.sales_exclusive - fact.cost_of_sales,
            gross_profit_percent: None,
            sales_contribution_percent: None,
        })
        .collect();
    figures.sort_by(|a, b| a.department_name.cmp(&b.department_name));
    annotate_percentages(&mut figures);

    let mut totals = DepartmentAggregates::default();
    for figure in &figures {
        totals.stock_on_hand_cost += figure.stock_on_hand_cost;
        totals.cost_of_sales += figure.cost_of_sales;
        totals.sales_exclusive += figure.sales_exclusive;
        totals.sales_inclusive += figure.sales_inclusive;
        totals.gross_profit_value += figure.gross_profit_value;
    }
    let overall_gp_percent = percentage(totals.gross_profit_value, totals.sales_exclusive);

    DepartmentAnalysis {
        response: DepartmentListResponse {
            departments: figures,
        },
        totals,
        overall_gp_percent,
    }
}

/// Fills the derived percentage fields on each entity.
///
/// Gross profit % divides each entity's profit by its own exclusive sales;
/// contribution % divides by the listing's total. Both guard non-positive
/// denominators to 0, so a department with no sales reports zero rather
/// than `NaN`. Contributions over one listing sum to 100 within
/// floating-point tolerance whenever any sales exist.
pub fn annotate_percentages(departments: &mut [DepartmentFigures]) {
    let total_exclusive: f64 = departments.iter().map(|d| d.sales_exclusive).sum();
    for dept in departments {
        dept.gross_profit_percent =
            Some(percentage(dept.gross_profit_value, dept.sales_exclusive));
        dept.sales_contribution_percent =
            Some(percentage(dept.sales_exclusive, total_exclusive));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fact(
        name: &str,
        cost_of_sales: f64,
        sales_exclusive: f64,
        sales_tax: f64,
    ) -> DepartmentCostFact {
        DepartmentCostFact {
            department_name: name.to_string(),
            department_id: 1,
            stock_on_hand_cost: 0.0,
            cost_of_sales,
            sales_exclusive,
            sales_tax,
        }
    }

    #[test]
    fn derives_inclusive_and_gross_profit_figures() {
        let analysis = build_department_list(&[fact("Bakery", 750.0, 1000.0, 160.0)]);
        let dept = &analysis.response.departments[0];
        assert_eq!(dept.sales_inclusive, 1160.0);
        assert_eq!(dept.gross_profit_value, 250.0);
        assert_eq!(dept.gross_profit_percent, Some(25.0));
        assert_eq!(dept.sales_contribution_percent, Some(100.0));
        assert_eq!(analysis.overall_gp_percent, 25.0);
    }

    #[test]
    fn zero_sales_department_reports_zero_percentages() {
        let analysis = build_department_list(&[
            fact("Bakery", 750.0, 1000.0, 160.0),
            fact("Kiosk", 0.0, 0.0, 0.0),
        ]);
        let kiosk = &analysis.response.departments[1];
        assert_eq!(kiosk.gross_profit_percent, Some(0.0));
        assert_eq!(kiosk.sales_contribution_percent, Some(0.0));
        // The trading department carries the whole contribution.
        assert_eq!(
            analysis.response.departments[0].sales_contribution_percent,
            Some(100.0)
        );
    }

    #[test]
    fn listing_is_ordered_by_department_name() {
        let analysis = build_department_list(&[
            fact("Produce", 10.0, 20.0, 0.0),
            fact("Bakery", 10.0, 20.0, 0.0),
            fact("Deli", 10.0, 20.0, 0.0),
        ]);
        let names: Vec<&str> = analysis
            .response
            .departments
            .iter()
            .map(|d| d.department_name.as_str())
            .collect();
        assert_eq!(names, ["Bakery", "Deli", "Produce"]);
    }

    #[test]
    fn contributions_sum_to_one_hundred() {
        let analysis = build_department_list(&[
            fact("A", 0.0, 333.0, 0.0),
            fact("B", 0.0, 333.0, 0.0),
            fact("C", 0.0, 334.0, 0.0),
        ]);
        let sum: f64 = analysis
            .response
            .departments
            .iter()
            .filter_map(|d| d.sales_contribution_percent)
            .sum();
        assert!((sum - 100.0).abs() < 0.02, "contributions summed to {sum}");
    }

    #[test]
    fn empty_listing_builds_zeroed_analysis() {
        let analysis = build_department_list(&[]);
        assert!(analysis.response.departments.is_empty());
        assert_eq!(analysis.totals, DepartmentAggregates::default());
        assert_eq!(analysis.overall_gp_percent, 0.0);
    }
}
