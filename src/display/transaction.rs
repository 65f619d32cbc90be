//! Transaction display formatting
//!
//! Provides utilities for formatting transactions for terminal display,
//! including register views and report summaries.

use crate::models::{Money, Transaction, DATE_FORMAT, TIME_FORMAT};
use crate::reports::Report;

const DESCRIPTION_WIDTH: usize = 24;
const VENDOR_WIDTH: usize = 18;
const AMOUNT_WIDTH: usize = 14;
const RULE_WIDTH: usize = 10 + 1 + 8 + 1 + DESCRIPTION_WIDTH + 1 + VENDOR_WIDTH + 1 + AMOUNT_WIDTH;

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &Transaction, symbol: &str) -> String {
    format!(
        "{:10} {:8} {} {} {:>width$}",
        txn.timestamp().format(DATE_FORMAT),
        txn.timestamp().format(TIME_FORMAT),
        truncate(txn.description(), DESCRIPTION_WIDTH),
        truncate(txn.vendor(), VENDOR_WIDTH),
        txn.amount().format_with_symbol(symbol),
        width = AMOUNT_WIDTH
    )
}

/// Format a list of transactions as a register with a closing balance
pub fn format_transaction_register(transactions: &[&Transaction], symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:10} {:8} {:dw$} {:vw$} {:>aw$}\n",
        "Date",
        "Time",
        "Description",
        "Vendor",
        "Amount",
        dw = DESCRIPTION_WIDTH,
        vw = VENDOR_WIDTH,
        aw = AMOUNT_WIDTH
    ));
    output.push_str(&"-".repeat(RULE_WIDTH));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, symbol));
        output.push('\n');
    }

    let balance: Money = transactions.iter().map(|txn| txn.amount()).sum();
    output.push_str(&"-".repeat(RULE_WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "{:>label$} {:>aw$}\n",
        "Balance:",
        balance.format_with_symbol(symbol),
        label = RULE_WIDTH - AMOUNT_WIDTH - 1,
        aw = AMOUNT_WIDTH
    ));

    output
}

/// Format a report: its title followed by the register or its empty message
pub fn format_report(report: &Report, symbol: &str) -> String {
    let title = report.title();
    let mut output = String::new();
    output.push_str(&title);
    output.push('\n');
    output.push_str(&"=".repeat(title.chars().count().max(RULE_WIDTH)));
    output.push('\n');

    if report.is_empty() {
        output.push_str(&report.kind.empty_message());
        output.push('\n');
    } else {
        output.push_str(&format_transaction_register(&report.entries, symbol));
    }

    output
}

/// Pad or cut a string to exactly `width` characters
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        format!("{:width$}", s, width = width)
    } else {
        let kept: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ReportKind;
    use chrono::NaiveDate;

    fn txn(description: &str, vendor: &str, cents: i64) -> Transaction {
        let stamp = NaiveDate::from_ymd_opt(2023, 4, 15)
            .unwrap()
            .and_hms_opt(16, 5, 9)
            .unwrap();
        Transaction::new(stamp, description, vendor, Money::from_cents(cents))
    }

    #[test]
    fn test_format_transaction_row() {
        let formatted = format_transaction_row(&txn("ergonomic keyboard", "Amazon", -8950), "$");
        assert!(formatted.starts_with("2023-04-15 16:05:09 ergonomic keyboard"));
        assert!(formatted.contains("Amazon"));
        assert!(formatted.ends_with("-$89.50"));
    }

    #[test]
    fn test_register_balance_saturates() {
        let a = txn("windfall", "Lottery", i64::MAX);
        let b = txn("windfall", "Lottery", i64::MAX);
        let output = format_transaction_register(&[&a, &b], "$");

        let max = Money::from_cents(i64::MAX).format_with_symbol("$");
        assert!(output.lines().last().unwrap().ends_with(&max));
    }

    #[test]
    fn test_rows_share_column_widths() {
        let short = format_transaction_row(&txn("a", "b", 1), "$");
        let long = format_transaction_row(
            &txn("a description far longer than the column", "a vendor name that is long", 1),
            "$",
        );
        assert_eq!(short.chars().count(), long.chars().count());
        assert!(long.contains("..."));
    }

    #[test]
    fn test_format_empty_register() {
        let formatted = format_transaction_register(&[], "$");
        assert_eq!(formatted, "No transactions found.\n");
    }

    #[test]
    fn test_register_balance() {
        let a = txn("pay", "ACME", 250000);
        let b = txn("rent", "Landlord", -120000);
        let formatted = format_transaction_register(&[&a, &b], "€");

        let last = formatted.lines().last().unwrap();
        assert!(last.contains("Balance:"));
        assert!(last.ends_with("€1300.00"));
    }

    #[test]
    fn test_format_empty_vendor_report() {
        let report = Report {
            kind: ReportKind::Vendor("Nobody".into()),
            entries: Vec::new(),
        };
        let formatted = format_report(&report, "$");
        assert!(formatted.starts_with("Vendor: Nobody\n"));
        assert!(formatted.contains("No transactions found for vendor 'Nobody'."));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Short", 10), "Short     ");
        let result = truncate("A very long string", 10);
        assert_eq!(result.chars().count(), 10);
        assert!(result.ends_with("..."));
        assert_eq!(truncate("Café Olé au lait", 8), "Café ...");
    }
}
