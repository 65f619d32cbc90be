//! CLI commands for reports
//!
//! Each subcommand maps onto a [`ReportKind`] and prints the same register
//! the console menu shows.

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::display::format_report;
use crate::error::LedgerResult;
use crate::models::Money;
use crate::reports::{Report, ReportKind, SearchCriteria};
use crate::storage::Ledger;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Transactions from the current month
    #[command(alias = "mtd")]
    MonthToDate,

    /// Transactions from last month's calendar month, in any year
    PreviousMonth,

    /// Transactions from the current year
    #[command(alias = "ytd")]
    YearToDate,

    /// Transactions from last year
    PreviousYear,

    /// Transactions for one vendor (case-insensitive)
    Vendor {
        /// Vendor name
        name: String,
    },

    /// Custom search; every filter is optional
    Search(SearchArgs),
}

/// Filters for `report search`
#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Earliest date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Latest date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Description contains this text
    #[arg(short, long)]
    pub description: Option<String>,

    /// Vendor contains this text
    #[arg(short, long)]
    pub vendor: Option<String>,

    /// Exact amount
    #[arg(short, long, allow_hyphen_values = true)]
    pub amount: Option<Money>,
}

impl From<SearchArgs> for SearchCriteria {
    fn from(args: SearchArgs) -> Self {
        let mut criteria = SearchCriteria::new();
        criteria.start_date = args.from;
        criteria.end_date = args.to;
        criteria.amount = args.amount;
        if let Some(text) = args.description {
            criteria = criteria.description(text);
        }
        if let Some(text) = args.vendor {
            criteria = criteria.vendor(text);
        }
        criteria
    }
}

impl From<ReportCommands> for ReportKind {
    fn from(cmd: ReportCommands) -> Self {
        match cmd {
            ReportCommands::MonthToDate => ReportKind::MonthToDate,
            ReportCommands::PreviousMonth => ReportKind::PreviousMonth,
            ReportCommands::YearToDate => ReportKind::YearToDate,
            ReportCommands::PreviousYear => ReportKind::PreviousYear,
            ReportCommands::Vendor { name } => ReportKind::Vendor(name),
            ReportCommands::Search(args) => ReportKind::Search(args.into()),
        }
    }
}

/// Handle report commands
pub fn handle_report_command(
    ledger: &mut Ledger,
    cmd: ReportCommands,
    today: NaiveDate,
    symbol: &str,
) -> LedgerResult<()> {
    let report = Report::generate(ledger, cmd.into(), today);
    print!("{}", format_report(&report, symbol));
    Ok(())
}
