//! CLI commands for recording and listing transactions

use clap::Args;

use crate::display::format_report;
use crate::error::LedgerResult;
use crate::models::{Money, TransactionKind};
use crate::reports::{Report, ReportKind};
use crate::storage::Ledger;

/// Arguments shared by `deposit` and `payment`
#[derive(Args, Debug)]
pub struct RecordArgs {
    /// What the transaction was for
    pub description: String,

    /// Person or company on the other side
    pub vendor: String,

    /// Amount (e.g. 12.50); payments may be given as positive numbers
    #[arg(allow_hyphen_values = true)]
    pub amount: Money,
}

/// Arguments for `list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show deposits
    #[arg(long, conflicts_with = "payments")]
    pub deposits: bool,

    /// Only show payments
    #[arg(long)]
    pub payments: bool,
}

/// Append a deposit or payment stamped with the current time
pub fn handle_record_command(
    ledger: &mut Ledger,
    kind: TransactionKind,
    args: RecordArgs,
    symbol: &str,
) -> LedgerResult<()> {
    let amount = match kind {
        // A payment typed as a positive number means money going out
        TransactionKind::Payment if args.amount.is_positive() => -args.amount,
        _ => args.amount,
    };

    let txn = ledger.append(kind, args.description, args.vendor, amount)?;

    println!(
        "Recorded {}: {} {} ({})",
        kind.to_string().to_lowercase(),
        txn.amount().format_with_symbol(symbol),
        txn.vendor(),
        txn.timestamp().format("%Y-%m-%d %H:%M:%S")
    );

    Ok(())
}

/// Print the register, optionally limited to deposits or payments
pub fn handle_list_command(ledger: &mut Ledger, args: ListArgs, symbol: &str) -> LedgerResult<()> {
    let kind = if args.deposits {
        ReportKind::Deposits
    } else if args.payments {
        ReportKind::Payments
    } else {
        ReportKind::All
    };

    // These views do not depend on the date
    let report = Report::generate(ledger, kind, chrono::NaiveDate::MIN);
    print!("{}", format_report(&report, symbol));

    Ok(())
}
