//! Interactive console menu
//!
//! Three screens (home, ledger and reports) read choices through a
//! [`Prompter`]. End of input at any prompt leaves every screen at once.

use chrono::{Local, NaiveDate};
use tracing::{debug, error};

use super::input::Prompter;
use crate::display::format_report;
use crate::models::TransactionKind;
use crate::reports::search::{parse_amount_input, parse_date_input};
use crate::reports::{Report, ReportKind, SearchCriteria};
use crate::storage::Ledger;

/// Shown for any choice a screen does not offer
pub const INVALID_CHOICE: &str =
    "Sorry, your input does not match any of the given options. Please try again!";

const HOME_TITLE: &str = "\
~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
|          Home Screen          |
~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~";

const HOME_OPTIONS: &str = "\
Please enter one of the following options:
D) Add Deposit - save a new deposit to the ledger
P) Make Payment (Debit) - save payment info to the ledger
L) Ledger - display the ledger screen
X) Exit - quit the application";

const LEDGER_TITLE: &str = "\
~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
|            Ledger             |
~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~";

const LEDGER_OPTIONS: &str = "\
Please enter one of the following options:
A) All - display all entries in the ledger
D) Deposits - show all deposits
P) Payments - show all payments
R) Reports - filter ledger
H) Home - go back to the home page";

const REPORTS_TITLE: &str = "\
~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
|            Reports            |
~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~";

const REPORTS_OPTIONS: &str = "\
Filter the ledger by choosing one of the following options:
1) Month to Date
2) Previous month
3) Year to Date
4) Previous Year
5) Search by Vendor - displays all entries from the specified vendor
6) Custom search
0) Back - go back to the ledger screen";

/// The console menu over one ledger
pub struct Menu<'a, P> {
    ledger: &'a mut Ledger,
    prompter: P,
    currency_symbol: String,
    /// Fixed date for the period reports; the local date when unset
    today: Option<NaiveDate>,
}

impl<'a, P: Prompter> Menu<'a, P> {
    pub fn new(ledger: &'a mut Ledger, prompter: P) -> Self {
        Self {
            ledger,
            prompter,
            currency_symbol: "$".to_string(),
            today: None,
        }
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Pin the date the period reports are relative to
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Give back the prompter, e.g. to inspect a transcript
    pub fn into_prompter(self) -> P {
        self.prompter
    }

    /// Run the home screen until the user exits or input ends
    pub fn run(&mut self) {
        if self.home().is_none() {
            debug!("console input ended");
        }
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    fn choice(&mut self, options: &str) -> Option<String> {
        let line = self.prompter.read_line(options)?;
        Some(line.trim().to_lowercase())
    }

    fn home(&mut self) -> Option<()> {
        loop {
            self.prompter.say(HOME_TITLE);
            match self.choice(HOME_OPTIONS)?.as_str() {
                "d" => self.record(TransactionKind::Deposit)?,
                "p" => self.record(TransactionKind::Payment)?,
                "l" => self.ledger_screen()?,
                "x" => {
                    self.prompter.say("Exiting Account Ledger Application...");
                    return Some(());
                }
                _ => self.prompter.say(INVALID_CHOICE),
            }
        }
    }

    fn ledger_screen(&mut self) -> Option<()> {
        loop {
            self.prompter.say(LEDGER_TITLE);
            match self.choice(LEDGER_OPTIONS)?.as_str() {
                "a" => self.show(ReportKind::All),
                "d" => self.show(ReportKind::Deposits),
                "p" => self.show(ReportKind::Payments),
                "r" => self.reports_screen()?,
                "h" => {
                    self.prompter.say("Returning to Home Menu...");
                    return Some(());
                }
                _ => self.prompter.say(INVALID_CHOICE),
            }
        }
    }

    fn reports_screen(&mut self) -> Option<()> {
        loop {
            self.prompter.say(REPORTS_TITLE);
            match self.prompter.read_integer(REPORTS_OPTIONS)? {
                1 => self.show(ReportKind::MonthToDate),
                2 => self.show(ReportKind::PreviousMonth),
                3 => self.show(ReportKind::YearToDate),
                4 => self.show(ReportKind::PreviousYear),
                5 => {
                    let vendor = self
                        .prompter
                        .read_line("Please enter the name of the vendor: ")?;
                    self.show(ReportKind::Vendor(vendor));
                }
                6 => {
                    let criteria = self.search_criteria()?;
                    self.show(ReportKind::Search(criteria));
                }
                0 => {
                    self.prompter.say("Returning to Ledger Menu...");
                    return Some(());
                }
                _ => self.prompter.say(INVALID_CHOICE),
            }
        }
    }

    fn show(&mut self, kind: ReportKind) {
        debug!(report = %kind.title(), "showing report");
        let today = self.today();
        let report = Report::generate(&mut *self.ledger, kind, today);
        let text = format_report(&report, &self.currency_symbol);
        self.prompter.say(&text);
    }

    /// Collect a deposit or payment and append it to the ledger
    fn record(&mut self, kind: TransactionKind) -> Option<()> {
        let noun = kind.to_string().to_lowercase();
        let counterpart = match kind {
            TransactionKind::Deposit => "who made the deposit",
            TransactionKind::Payment => "who received the payment",
        };
        let amount_prompt = match kind {
            TransactionKind::Deposit => "Please enter the deposit amount (positive number):",
            TransactionKind::Payment => "Please enter the payment amount (negative number):",
        };

        self.prompter
            .say(&format!("---Enter your {} information---", noun));
        let description = self
            .prompter
            .read_line(&format!("Please enter a brief description of the {}: ", noun))?;
        let vendor = self.prompter.read_line(&format!(
            "Please enter the name of the person or company {}:",
            counterpart
        ))?;
        let amount = self.prompter.read_amount(amount_prompt, kind)?;

        match self.ledger.append(kind, description, vendor, amount) {
            Ok(txn) => {
                self.prompter.say(&format!(
                    "{} of {} saved to the ledger.",
                    kind,
                    txn.amount().format_with_symbol(&self.currency_symbol)
                ));
            }
            Err(e) => {
                error!(error = %e, %kind, "could not record transaction");
                self.prompter.say(&format!(
                    "The {} could not be saved: {}. It is kept for this session and the \
                     ledger is saved again on exit.",
                    noun, e
                ));
            }
        }

        Some(())
    }

    /// Ask for each search criterion; blank answers leave it unset
    fn search_criteria(&mut self) -> Option<SearchCriteria> {
        let mut criteria = SearchCriteria::new();
        criteria.start_date = self.read_date("Please enter the start date (YYYY-MM-DD): ")?;
        criteria.end_date = self.read_date("Please enter the end date (YYYY-MM-DD): ")?;

        let description = self
            .prompter
            .read_line("Please enter a description of the transaction to filter by: ")?;
        let vendor = self
            .prompter
            .read_line("Please enter a vendor to filter by: ")?;
        criteria = criteria.description(description).vendor(vendor);

        criteria.amount = loop {
            let line = self.prompter.read_line("Please enter the amount: ")?;
            match parse_amount_input(&line) {
                Ok(amount) => break amount,
                Err(e) => self
                    .prompter
                    .say(&format!("{}. Leave blank to skip.", e)),
            }
        };

        Some(criteria)
    }

    fn read_date(&mut self, prompt: &str) -> Option<Option<NaiveDate>> {
        loop {
            let line = self.prompter.read_line(prompt)?;
            match parse_date_input(&line) {
                Ok(date) => return Some(date),
                Err(e) => self.prompter.say(&format!("{}. Leave blank to skip.", e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::input::Console;
    use crate::config::LedgerConfig;
    use crate::models::Money;
    use std::fs;
    use tempfile::TempDir;

    const LEDGER: &str = "\
date|time|description|vendor|amount
2024-03-02|09:00:00|coffee|Cafe|-4.50
2024-02-14|19:30:00|dinner|Bistro|-80.00
2024-03-01|08:00:00|paycheck|ACME|2500.00
";

    fn load(dir: &TempDir) -> Ledger {
        let path = dir.path().join("ledger.csv");
        fs::write(&path, LEDGER).unwrap();
        Ledger::load(LedgerConfig::in_place(path)).unwrap()
    }

    /// Drive the menu with `script` and return everything it printed
    fn run(ledger: &mut Ledger, script: &str) -> String {
        let console = Console::new(script.as_bytes(), Vec::new());
        let mut menu =
            Menu::new(ledger, console).with_today(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        menu.run();
        String::from_utf8(menu.into_prompter().into_output()).unwrap()
    }

    #[test]
    fn test_exit_from_home() {
        let temp_dir = TempDir::new().unwrap();
        let mut ledger = load(&temp_dir);

        let out = run(&mut ledger, "x\n");
        assert!(out.contains("Home Screen"));
        assert!(out.ends_with("Exiting Account Ledger Application...\n"));
    }

    #[test]
    fn test_invalid_choice_redisplays() {
        let temp_dir = TempDir::new().unwrap();
        let mut ledger = load(&temp_dir);

        let out = run(&mut ledger, "q\nX\n");
        assert!(out.contains(INVALID_CHOICE));
        assert_eq!(out.matches("Home Screen").count(), 2);
    }

    #[test]
    fn test_end_of_input_exits() {
        let temp_dir = TempDir::new().unwrap();
        let mut ledger = load(&temp_dir);

        let out = run(&mut ledger, "l\nr\n");
        assert!(out.contains("Reports"));
        assert!(!out.contains("Exiting"));
    }

    #[test]
    fn test_add_deposit_reprompts_for_sign() {
        let temp_dir = TempDir::new().unwrap();
        let mut ledger = load(&temp_dir);

        let out = run(&mut ledger, "d\nbirthday\nGrandma\n-5\n50\nx\n");
        assert!(out.contains("Please enter a positive number"));
        assert!(out.contains("Deposit of $50.00 saved to the ledger."));

        assert_eq!(ledger.len(), 4);
        let mut reloaded = Ledger::load(ledger.config().clone()).unwrap();
        assert_eq!(reloaded.by_vendor("Grandma").len(), 1);
    }

    #[test]
    fn test_make_payment() {
        let temp_dir = TempDir::new().unwrap();
        let mut ledger = load(&temp_dir);

        run(&mut ledger, "p\ngroceries\nMarket\n-42.10\nx\n");
        let payments: Vec<Money> = ledger.payments().iter().map(|t| t.amount()).collect();
        assert!(payments.contains(&Money::from_cents(-4210)));
    }

    #[test]
    fn test_ledger_all_newest_first() {
        let temp_dir = TempDir::new().unwrap();
        let mut ledger = load(&temp_dir);

        let out = run(&mut ledger, "l\na\nh\nx\n");
        let cafe = out.find("Cafe").unwrap();
        let acme = out.find("ACME").unwrap();
        let bistro = out.find("Bistro").unwrap();
        assert!(cafe < acme && acme < bistro);
        assert!(out.contains("Returning to Home Menu..."));
    }

    #[test]
    fn test_reports_month_to_date_and_non_integer() {
        let temp_dir = TempDir::new().unwrap();
        let mut ledger = load(&temp_dir);

        let out = run(&mut ledger, "l\nr\nabc\n1\n0\nh\nx\n");
        assert!(out.contains("Please enter an integer..."));
        assert!(out.contains("Month to Date"));
        assert!(out.contains("ACME"));
        assert!(!out.contains("Bistro"));
        assert!(out.contains("Returning to Ledger Menu..."));
    }

    #[test]
    fn test_vendor_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let mut ledger = load(&temp_dir);

        let out = run(&mut ledger, "l\nr\n5\nNobody\n0\nh\nx\n");
        assert!(out.contains("No transactions found for vendor 'Nobody'."));
    }

    #[test]
    fn test_custom_search_reprompts_bad_date() {
        let temp_dir = TempDir::new().unwrap();
        let mut ledger = load(&temp_dir);

        let out = run(&mut ledger, "l\nr\n6\nmarch\n2024-03-01\n\n\n\n\n0\nh\nx\n");
        assert!(out.contains("invalid date 'march'"));
        assert!(out.contains("Cafe"));
        assert!(out.contains("ACME"));
        assert!(!out.contains("Bistro"));
    }

    #[test]
    fn test_save_failure_keeps_session_going() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("ledger.csv");
        fs::write(&source, LEDGER).unwrap();
        let output = temp_dir.path().join("out.csv");
        fs::create_dir(&output).unwrap();
        let mut ledger = Ledger::load(LedgerConfig::new(&source, &output)).unwrap();

        let out = run(&mut ledger, "d\ngift\nAunt\n10\nx\n");
        assert!(out.contains("The deposit could not be saved"));
        assert!(out.contains("Exiting Account Ledger Application..."));
        assert!(ledger.is_dirty());
    }
}
