use std::fmt::{self, Write as _};
use std::fs;
use std::io::{self, Read as _, Write as _};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tillview_engine::reports::{
    build_sales_dashboard, build_vat_report, build_vat_summary, daily_vat_from_entries,
    dashboard_table, department_sales_from_entries, VatConfig,
};
use tillview_model::{
    ReportPeriod, SaleEntry, SalesDashboardResponse, VatReportResponse, VatSummaryResponse,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ReportKind {
    Dashboard,
    VatReturn,
    VatSummary,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(about = "Run the TillView report pipeline over a JSON dump of sale entries.")]
struct Args {
    /// Sale-entry rows as a JSON array ('-' reads stdin).
    input: PathBuf,

    /// Period start date (YYYY-MM-DD).
    #[arg(long)]
    start: String,

    /// Period end date (YYYY-MM-DD).
    #[arg(long)]
    end: String,

    /// Which report to build.
    #[arg(long, value_enum, default_value_t = ReportKind::Dashboard)]
    report: ReportKind,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let entries = read_entries(&args.input)?;
    let period =
        ReportPeriod::parse(&args.start, &args.end).context("invalid report period")?;

    match args.report {
        ReportKind::Dashboard => {
            let response = build_sales_dashboard(period, &entries);
            emit(args.format, &response, render_dashboard)
        }
        ReportKind::VatReturn => {
            let facts = department_sales_from_entries(&entries);
            let report = build_vat_report(&facts, VatConfig::default());
            emit(args.format, &report, render_vat_return)
        }
        ReportKind::VatSummary => {
            let days = daily_vat_from_entries(&entries);
            let response = build_vat_summary(period, &days);
            emit(args.format, &response, render_vat_summary)
        }
    }
}

fn read_entries(path: &Path) -> Result<Vec<SaleEntry>> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("read sale entries from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("read sale entries {}", path.display()))?
    };
    serde_json::from_str(&raw).context("parse sale entries (expected a JSON array)")
}

fn emit<T: Serialize>(
    format: OutputFormat,
    value: &T,
    render: impl Fn(&T, &mut String) -> fmt::Result,
) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Text => {
            let mut text = String::new();
            render(value, &mut text)?;
            print!("{text}");
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    write_json(value, stdout.lock())
}

fn write_json<T: Serialize>(value: &T, mut out: impl io::Write) -> Result<()> {
    serde_json::to_writer(&mut out, value)?;
    out.write_all(b"\n")?;
    Ok(())
}

fn render_dashboard(response: &SalesDashboardResponse, out: &mut String) -> fmt::Result {
    let period = &response.period;
    writeln!(
        out,
        "Sales dashboard {} to {}",
        period.start_date, period.end_date
    )?;

    let pivot = dashboard_table(&response.daily_by_department);
    if pivot.table.is_empty() {
        writeln!(out, "No data for this period.")?;
        return Ok(());
    }

    let summary = &response.summary;
    writeln!(
        out,
        "  transactions: {}  trading days: {}  items sold: {}",
        summary.total_transactions, summary.trading_days, summary.total_items_sold
    )?;
    writeln!(
        out,
        "  sales incl: {:.2}  excl: {:.2}  tax: {:.2}",
        summary.total_sales_incl, summary.total_sales_excl, summary.total_tax
    )?;
    writeln!(
        out,
        "  avg transaction: {:.2}  avg daily sales: {:.2}",
        summary.avg_transaction_value, summary.avg_daily_sales
    )?;
    writeln!(out)?;

    let name_width = pivot
        .table
        .row_keys()
        .iter()
        .map(String::len)
        .max()
        .unwrap_or(0)
        .max("Department".len());

    write!(out, "{:<name_width$}", "Department")?;
    for col in pivot.table.col_keys() {
        write!(out, "  {col:>12}")?;
    }
    writeln!(out, "  {:>12}", "Total")?;

    for (idx, (row_key, cells)) in pivot.table.rows().enumerate() {
        write!(out, "{row_key:<name_width$}")?;
        for cell in cells {
            write!(out, "  {cell:>12.2}")?;
        }
        writeln!(out, "  {:>12.2}", pivot.totals.row_totals()[idx])?;
    }

    write!(out, "{:<name_width$}", "Total")?;
    for total in pivot.totals.col_totals() {
        write!(out, "  {total:>12.2}")?;
    }
    writeln!(out, "  {:>12.2}", pivot.totals.grand_total())?;

    if let Some(best) = &response.best_day {
        writeln!(out)?;
        writeln!(
            out,
            "Best day: {} ({:.2} across {} transactions)",
            best.date, best.sales, best.transactions
        )?;
    }
    if let Some(best) = &response.best_department {
        writeln!(out, "Best department: {} ({:.2})", best.name, best.sales)?;
    }
    Ok(())
}

fn render_vat_return(report: &VatReportResponse, out: &mut String) -> fmt::Result {
    writeln!(out, "VAT return")?;
    if report.departments.is_empty() {
        writeln!(out, "No data for this period.")?;
        return Ok(());
    }

    let name_width = report
        .departments
        .iter()
        .map(|line| line.department_name.len())
        .max()
        .unwrap_or(0)
        .max("Department".len());

    writeln!(
        out,
        "{:<name_width$}  {:>12}  {:>12}  {:>12}  {:>12}  {:>12}",
        "Department", "Inclusive", "Exclusive", "Tax", "Vatable", "Non-vatable"
    )?;
    for line in &report.departments {
        writeln!(
            out,
            "{:<name_width$}  {:>12.2}  {:>12.2}  {:>12.2}  {:>12.2}  {:>12.2}",
            line.department_name,
            line.sales_inclusive,
            line.sales_exclusive,
            line.sales_tax,
            line.vatable,
            line.non_vatable
        )?;
    }
    let summary = &report.summary;
    writeln!(
        out,
        "{:<name_width$}  {:>12.2}  {:>12.2}  {:>12.2}  {:>12.2}  {:>12.2}",
        "Totals",
        summary.total_sales_inclusive,
        summary.total_sales_exclusive,
        summary.total_sales_tax,
        summary.total_vatable,
        summary.total_non_vatable
    )?;
    Ok(())
}

fn render_vat_summary(response: &VatSummaryResponse, out: &mut String) -> fmt::Result {
    let period = &response.period;
    writeln!(
        out,
        "VAT summary {} to {}",
        period.start_date, period.end_date
    )?;
    if response.daily_breakdown.is_empty() {
        writeln!(out, "No data for this period.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<10}  {:>12}  {:>12}  {:>12}  {:>12}",
        "Date", "Excl VAT", "VAT", "Incl VAT", "Transactions"
    )?;
    for day in &response.daily_breakdown {
        writeln!(
            out,
            "{:<10}  {:>12.2}  {:>12.2}  {:>12.2}  {:>12}",
            day.transaction_date,
            day.total_excl,
            day.total_vat,
            day.total_incl,
            day.transaction_count
        )?;
    }
    let summary = &response.summary;
    writeln!(
        out,
        "{:<10}  {:>12.2}  {:>12.2}  {:>12.2}  {:>12}",
        "Totals",
        summary.total_sales_excl_vat,
        summary.total_vat_amount,
        summary.total_sales_incl_vat,
        summary.total_transactions
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write as _;

    fn period() -> ReportPeriod {
        ReportPeriod::parse("2025-01-01", "2025-01-31").unwrap()
    }

    fn entry(
        transaction_number: i64,
        sale_date: &str,
        department_name: &str,
        department_id: i64,
        quantity: f64,
        unit_price: f64,
        sales_tax: f64,
    ) -> SaleEntry {
        SaleEntry {
            transaction_number,
            sale_date: sale_date.to_string(),
            department_name: department_name.to_string(),
            department_id,
            quantity,
            unit_price,
            sales_tax,
        }
    }

    fn basket() -> Vec<SaleEntry> {
        vec![
            entry(1, "2025-01-01", "Bakery", 1, 2.0, 10.0, 3.25),
            entry(1, "2025-01-01", "Deli", 2, 1.0, 50.0, 8.0),
            entry(2, "2025-01-01", "Bakery", 1, 1.0, 30.0, 4.75),
            entry(3, "2025-01-02", "Deli", 2, 3.0, 20.0, 9.5),
        ]
    }

    #[test]
    fn parses_cli_arguments() {
        let args = Args::try_parse_from([
            "tillview-report-cli",
            "sales.json",
            "--start",
            "2025-01-01",
            "--end",
            "2025-01-31",
            "--report",
            "vat-return",
            "--format",
            "json",
        ])
        .unwrap();
        assert!(matches!(args.report, ReportKind::VatReturn));
        assert!(matches!(args.format, OutputFormat::Json));
        assert_eq!(args.input, PathBuf::from("sales.json"));
    }

    #[test]
    fn reads_entries_from_a_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"[{"TransactionNumber": 1, "SaleDate": "2025-01-01",
                 "DepartmentName": "Bakery", "DepartmentID": 1,
                 "Quantity": 2.0, "Price": 10.0, "SalesTax": 3.25}]"#,
        )
        .unwrap();
        let entries = read_entries(file.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].department_name, "Bakery");
        assert_eq!(entries[0].exclusive(), 20.0);
    }

    #[test]
    fn rejects_non_array_input() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"rows": []}"#).unwrap();
        assert!(read_entries(file.path()).is_err());
    }

    #[test]
    fn renders_the_dashboard_grid_with_totals() {
        let response = build_sales_dashboard(period(), &basket());
        let mut text = String::new();
        render_dashboard(&response, &mut text).unwrap();

        assert!(text.contains("Sales dashboard 2025-01-01 to 2025-01-31"));
        // Bakery had no trade on the 2nd; the densified zero cell renders.
        let bakery = text.lines().find(|l| l.starts_with("Bakery")).unwrap();
        assert!(bakery.contains("0.00"));
        let totals = text.lines().find(|l| l.starts_with("Total ")).unwrap();
        assert!(totals.contains("185.50"));
        assert!(text.contains("Best department: Deli (127.50)"));
    }

    #[test]
    fn json_output_is_one_line_and_decodes_back() {
        let response = build_sales_dashboard(period(), &basket());
        let mut buf = Vec::new();
        write_json(&response, &mut buf).unwrap();
        let printed = String::from_utf8(buf).unwrap();
        assert!(printed.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(&printed).unwrap();
        assert_eq!(value["summary"]["total_sales_incl"], 185.5);
        assert_eq!(value["best_department"]["name"], "Deli");
    }

    #[test]
    fn renders_no_data_for_an_empty_period() {
        let response = build_sales_dashboard(period(), &[]);
        let mut text = String::new();
        render_dashboard(&response, &mut text).unwrap();
        assert!(text.contains("No data for this period."));
    }

    #[test]
    fn renders_vat_return_lines() {
        let facts = department_sales_from_entries(&basket());
        let report = build_vat_report(&facts, VatConfig::default());
        let mut text = String::new();
        render_vat_return(&report, &mut text).unwrap();

        let bakery = text.lines().find(|l| l.starts_with("Bakery")).unwrap();
        assert!(bakery.contains("50.00"));
        let totals = text.lines().last().unwrap();
        assert!(totals.starts_with("Totals"));
        assert!(totals.contains("160.00"));
    }

    #[test]
    fn renders_vat_summary_totals() {
        let days = daily_vat_from_entries(&basket());
        let response = build_vat_summary(period(), &days);
        let mut text = String::new();
        render_vat_summary(&response, &mut text).unwrap();

        assert!(text.contains("VAT summary 2025-01-01 to 2025-01-31"));
        let totals = text.lines().last().unwrap();
        assert!(totals.starts_with("Totals"));
        assert!(totals.contains("185.50"));
        assert!(totals.ends_with('3'));
    }
}
