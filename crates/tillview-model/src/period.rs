use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing a [`ReportPeriod`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    /// A date string did not parse as `YYYY-MM-DD`.
    #[error("invalid {field} {value:?}: expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },
    /// The end date precedes the start date.
    #[error("period end {end} precedes start {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

/// Inclusive date range a report covers.
///
/// Serializes as `{"start_date": "2025-01-01", "end_date": "2025-01-31"}`,
/// matching the `period` block the dashboard already speaks. Construct via
/// [`ReportPeriod::new`] or [`ReportPeriod::parse`] so ordering is validated;
/// dates arrive from query parameters as `YYYY-MM-DD` strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ReportPeriod {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, PeriodError> {
        if end_date < start_date {
            return Err(PeriodError::EndBeforeStart {
                start: start_date,
                end: end_date,
            });
        }
        Ok(ReportPeriod {
            start_date,
            end_date,
        })
    }

    /// Parses a period from two `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, PeriodError> {
        let start_date = parse_iso_date("start date", start)?;
        let end_date = parse_iso_date("end date", end)?;
        Self::new(start_date, end_date)
    }

    /// Number of calendar days covered, inclusive of both endpoints.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

fn parse_iso_date(field: &'static str, value: &str) -> Result<NaiveDate, PeriodError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| PeriodError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_iso_dates() {
        let period = ReportPeriod::parse("2025-01-01", "2025-01-31").unwrap();
        assert_eq!(period.days(), 31);
        assert_eq!(
            period.start_date,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
    }

    #[test]
    fn single_day_period_is_valid() {
        let period = ReportPeriod::parse("2025-06-15", "2025-06-15").unwrap();
        assert_eq!(period.days(), 1);
    }

    #[test]
    fn rejects_malformed_dates() {
        let err = ReportPeriod::parse("01/01/2025", "2025-01-31").unwrap_err();
        assert_eq!(
            err,
            PeriodError::InvalidDate {
                field: "start date",
                value: "01/01/2025".to_string(),
            }
        );
        assert!(ReportPeriod::parse("2025-01-01", "2025-13-40").is_err());
    }

    #[test]
    fn rejects_reversed_range() {
        let err = ReportPeriod::parse("2025-02-01", "2025-01-01").unwrap_err();
        assert!(matches!(err, PeriodError::EndBeforeStart { .. }));
    }

    #[test]
    fn serde_uses_iso_strings() {
        let period = ReportPeriod::parse("2025-01-01", "2025-01-31").unwrap();
        let json = serde_json::to_value(period).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"start_date": "2025-01-01", "end_date": "2025-01-31"})
        );
        let decoded: ReportPeriod = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, period);
    }
}
