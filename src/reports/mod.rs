//! Reports module for the ledger
//!
//! Provides the named ledger views (all, deposits, payments), the
//! calendar-period reports, vendor lookups and custom searches.

pub mod period;
pub mod search;

pub use period::Period;
pub use search::SearchCriteria;

use chrono::NaiveDate;

use crate::models::{Money, Transaction};
use crate::storage::Ledger;

/// Which subset of the ledger a report selects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportKind {
    All,
    Deposits,
    Payments,
    MonthToDate,
    PreviousMonth,
    YearToDate,
    PreviousYear,
    /// Case-insensitive exact vendor name
    Vendor(String),
    Search(SearchCriteria),
}

impl ReportKind {
    /// The calendar period behind a date-based report
    pub fn period(&self) -> Option<Period> {
        match self {
            Self::MonthToDate => Some(Period::MonthToDate),
            Self::PreviousMonth => Some(Period::PreviousMonth),
            Self::YearToDate => Some(Period::YearToDate),
            Self::PreviousYear => Some(Period::PreviousYear),
            _ => None,
        }
    }

    /// Check whether a transaction belongs in this report
    pub fn matches(&self, txn: &Transaction, today: NaiveDate) -> bool {
        if let Some(period) = self.period() {
            return period.contains(txn.date(), today);
        }

        match self {
            Self::All => true,
            Self::Deposits => txn.is_deposit(),
            Self::Payments => txn.is_payment(),
            // Only the query is trimmed; stored vendors compare as written
            Self::Vendor(name) => txn.vendor().to_lowercase() == name.trim().to_lowercase(),
            Self::Search(criteria) => criteria.matches(txn),
            _ => false,
        }
    }

    pub fn title(&self) -> String {
        if let Some(period) = self.period() {
            return period.to_string();
        }

        match self {
            Self::All => "All Transactions".to_string(),
            Self::Deposits => "Deposits".to_string(),
            Self::Payments => "Payments".to_string(),
            Self::Vendor(name) => format!("Vendor: {}", name.trim()),
            Self::Search(criteria) => format!("Search: {}", criteria),
            _ => String::new(),
        }
    }

    /// Message shown when the report selects nothing
    pub fn empty_message(&self) -> String {
        match self {
            Self::Vendor(name) => {
                format!("No transactions found for vendor '{}'.", name.trim())
            }
            _ => "No transactions found.".to_string(),
        }
    }
}

/// A generated report: the kind plus the selected records, newest first
#[derive(Debug)]
pub struct Report<'a> {
    pub kind: ReportKind,
    pub entries: Vec<&'a Transaction>,
}

impl<'a> Report<'a> {
    /// Sort the ledger newest first and select the records `kind` covers
    pub fn generate(ledger: &'a mut Ledger, kind: ReportKind, today: NaiveDate) -> Self {
        let entries = ledger.query(&kind, today);
        Self { kind, entries }
    }

    pub fn title(&self) -> String {
        self.kind.title()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Sum of the selected amounts
    pub fn total(&self) -> Money {
        self.entries.iter().map(|txn| txn.amount()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;
    use std::fs;
    use tempfile::TempDir;

    const LEDGER: &str = "\
date|time|description|vendor|amount
2024-01-03|09:00:00|coffee|Cafe|-4.50
2023-12-20|12:00:00|gift|Grandma|100.00
2019-12-24|18:30:00|tree|Tree Farm|-60.00
2023-11-05|08:00:00|rent|Landlord|-1200.00
2024-01-09|17:45:00|paycheck|ACME|2500.00
2022-07-01|10:00:00|refund|amazon|15.00
";

    fn ledger(dir: &TempDir) -> Ledger {
        let path = dir.path().join("ledger.csv");
        fs::write(&path, LEDGER).unwrap();
        Ledger::load(LedgerConfig::in_place(path)).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    fn vendors(report: &Report) -> Vec<String> {
        report.entries.iter().map(|t| t.vendor().to_string()).collect()
    }

    #[test]
    fn test_month_to_date_newest_first() {
        let temp_dir = TempDir::new().unwrap();
        let mut ledger = ledger(&temp_dir);

        let report = Report::generate(&mut ledger, ReportKind::MonthToDate, today());
        assert_eq!(vendors(&report), ["ACME", "Cafe"]);
        assert_eq!(report.total(), Money::from_cents(249550));
    }

    #[test]
    fn test_previous_month_in_january_spans_years() {
        let temp_dir = TempDir::new().unwrap();
        let mut ledger = ledger(&temp_dir);

        let report = Report::generate(&mut ledger, ReportKind::PreviousMonth, today());
        assert_eq!(vendors(&report), ["Grandma", "Tree Farm"]);
    }

    #[test]
    fn test_year_reports() {
        let temp_dir = TempDir::new().unwrap();
        let mut ledger = ledger(&temp_dir);

        let ytd = Report::generate(&mut ledger, ReportKind::YearToDate, today());
        assert_eq!(ytd.len(), 2);

        let last_year = Report::generate(&mut ledger, ReportKind::PreviousYear, today());
        assert_eq!(vendors(&last_year), ["Grandma", "Landlord"]);
    }

    #[test]
    fn test_vendor_report() {
        let temp_dir = TempDir::new().unwrap();
        let mut ledger = ledger(&temp_dir);

        let report = Report::generate(&mut ledger, ReportKind::Vendor("AMAZON".into()), today());
        assert_eq!(vendors(&report), ["amazon"]);

        let kind = ReportKind::Vendor(" Nobody ".into());
        assert_eq!(kind.empty_message(), "No transactions found for vendor 'Nobody'.");
        let report = Report::generate(&mut ledger, kind, today());
        assert!(report.is_empty());
    }

    #[test]
    fn test_vendor_match_does_not_trim_stored_vendor() {
        let stamp = today().and_hms_opt(9, 0, 0).unwrap();
        let padded = Transaction::new(stamp, "refund", " Amazon", Money::from_cents(100));
        let exact = Transaction::new(stamp, "refund", "Amazon", Money::from_cents(100));

        let kind = ReportKind::Vendor(" amazon ".into());
        assert!(!kind.matches(&padded, today()));
        assert!(kind.matches(&exact, today()));
    }

    #[test]
    fn test_search_by_amount_only() {
        let temp_dir = TempDir::new().unwrap();
        let mut ledger = ledger(&temp_dir);

        let criteria = SearchCriteria::new().amount(Money::from_cents(-450));
        let report = Report::generate(&mut ledger, ReportKind::Search(criteria), today());
        assert_eq!(vendors(&report), ["Cafe"]);
    }

    #[test]
    fn test_deposits_and_payments_partition() {
        let temp_dir = TempDir::new().unwrap();
        let mut ledger = ledger(&temp_dir);

        let deposits = Report::generate(&mut ledger, ReportKind::Deposits, today()).len();
        let payments = Report::generate(&mut ledger, ReportKind::Payments, today()).len();
        assert_eq!(deposits + payments, ledger.len());
        assert_eq!(deposits, 3);
    }

    #[test]
    fn test_titles() {
        assert_eq!(ReportKind::MonthToDate.title(), "Month to Date");
        assert_eq!(ReportKind::All.title(), "All Transactions");
        assert_eq!(ReportKind::Vendor("Joe".into()).title(), "Vendor: Joe");
        assert_eq!(ReportKind::All.empty_message(), "No transactions found.");
    }
}
