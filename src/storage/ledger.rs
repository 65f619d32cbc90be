//! Ledger store backed by a pipe-delimited file
//!
//! The whole file is read once at startup. Every append rewrites the output
//! file in full (header plus every record, newest first), so the file always
//! mirrors the in-memory list.

use std::io::{BufRead, Write};

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, error, warn};

use crate::config::LedgerConfig;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Transaction, TransactionKind};
use crate::reports::{ReportKind, SearchCriteria};

use super::codec::{self, DEFAULT_HEADER};
use super::file_io::{open_required, write_atomic};

/// In-memory ledger with its backing file configuration
#[derive(Debug)]
pub struct Ledger {
    config: LedgerConfig,
    /// First line of the loaded file, written back unchanged
    header: String,
    transactions: Vec<Transaction>,
    /// Records dropped during load because a field failed to parse
    skipped: usize,
    /// In-memory state has changes the output file does not have
    dirty: bool,
}

impl Ledger {
    /// Load every record from `config.source_path`
    ///
    /// Records whose date, time or amount fail to parse are skipped with a
    /// warning. A line with the wrong number of fields aborts the load.
    pub fn load(config: LedgerConfig) -> LedgerResult<Self> {
        let mut source = open_required(&config.source_path)?;

        let mut header = String::new();
        source.read_line(&mut header).map_err(|e| {
            LedgerError::Io(format!(
                "Failed to read {}: {}",
                config.source_path.display(),
                e
            ))
        })?;
        let header = header.trim_end_matches(|c| c == '\r' || c == '\n').to_string();

        let mut transactions = Vec::new();
        let mut skipped = 0;

        // Record lines are numbered from 2, after the header
        for (line, text) in (2u64..).zip(source.lines()) {
            let text = text?;
            if text.is_empty() {
                continue;
            }

            match codec::decode_text(&text, line)? {
                Ok(txn) => transactions.push(txn),
                Err(e) => {
                    skipped += 1;
                    warn!(
                        path = %config.source_path.display(),
                        line,
                        error = %e,
                        "skipping unreadable ledger record"
                    );
                }
            }
        }

        debug!(
            path = %config.source_path.display(),
            loaded = transactions.len(),
            skipped,
            "ledger loaded"
        );

        Ok(Self {
            config,
            header,
            transactions,
            skipped,
            dirty: false,
        })
    }

    /// Create a new ledger file holding only a header line
    pub fn create(config: LedgerConfig, header: impl Into<String>) -> LedgerResult<Self> {
        if config.source_path.exists() {
            return Err(LedgerError::AlreadyExists(config.source_path.clone()));
        }

        let header = header.into();
        write_atomic(&config.source_path, |out| {
            writeln!(out, "{}", header)?;
            Ok(())
        })?;

        debug!(path = %config.source_path.display(), "ledger created");

        Ok(Self {
            config,
            header,
            transactions: Vec::new(),
            skipped: 0,
            dirty: false,
        })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    /// Records in their current in-memory order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Number of records dropped during load
    pub fn skipped_records(&self) -> usize {
        self.skipped
    }

    /// Check whether the output file is behind the in-memory state
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Record a new transaction stamped with the current local time, then save
    pub fn append(
        &mut self,
        kind: TransactionKind,
        description: impl Into<String>,
        vendor: impl Into<String>,
        amount: Money,
    ) -> LedgerResult<Transaction> {
        self.record(kind, Transaction::now(description, vendor, amount))
    }

    /// Record a new transaction with an explicit timestamp, then save
    ///
    /// If the save fails the record stays in memory and the ledger is left
    /// dirty; call [`Ledger::save`] to retry.
    pub fn append_at(
        &mut self,
        kind: TransactionKind,
        timestamp: NaiveDateTime,
        description: impl Into<String>,
        vendor: impl Into<String>,
        amount: Money,
    ) -> LedgerResult<Transaction> {
        self.record(kind, Transaction::new(timestamp, description, vendor, amount))
    }

    fn record(&mut self, kind: TransactionKind, txn: Transaction) -> LedgerResult<Transaction> {
        let amount = txn.amount();
        if !kind.accepts(amount) {
            return Err(LedgerError::Validation(match kind {
                TransactionKind::Deposit => format!("deposit amount cannot be negative: {}", amount),
                TransactionKind::Payment => format!("payment amount cannot be positive: {}", amount),
            }));
        }
        // One record per line in the file
        if [txn.description(), txn.vendor()]
            .iter()
            .any(|field| field.contains(['\n', '\r']))
        {
            return Err(LedgerError::Validation(
                "description and vendor cannot contain line breaks".into(),
            ));
        }

        debug!(%kind, record = %txn, "appending transaction");

        self.transactions.push(txn.clone());
        self.dirty = true;
        self.save()?;

        Ok(txn)
    }

    /// Add a deposit stamped with the current time
    pub fn add_deposit(
        &mut self,
        description: impl Into<String>,
        vendor: impl Into<String>,
        amount: Money,
    ) -> LedgerResult<Transaction> {
        self.append(TransactionKind::Deposit, description, vendor, amount)
    }

    /// Add a payment stamped with the current time
    pub fn make_payment(
        &mut self,
        description: impl Into<String>,
        vendor: impl Into<String>,
        amount: Money,
    ) -> LedgerResult<Transaction> {
        self.append(TransactionKind::Payment, description, vendor, amount)
    }

    /// Rewrite the output file with the header and every record, newest first
    pub fn save(&mut self) -> LedgerResult<()> {
        self.sort_descending();

        let header = if self.header.is_empty() {
            DEFAULT_HEADER
        } else {
            self.header.as_str()
        };
        let transactions = &self.transactions;

        let result = write_atomic(&self.config.output_path, |out| {
            writeln!(out, "{}", header)?;
            let mut records = codec::writer(out);
            for txn in transactions {
                codec::encode_record(&mut records, txn)?;
            }
            records.flush()?;
            Ok(())
        });

        match result {
            Ok(()) => {
                self.dirty = false;
                debug!(
                    path = %self.config.output_path.display(),
                    records = self.transactions.len(),
                    "ledger saved"
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    path = %self.config.output_path.display(),
                    error = %e,
                    "ledger save failed; in-memory changes are not on disk"
                );
                Err(e)
            }
        }
    }

    /// Order records newest first
    ///
    /// The sort is stable, so records sharing a timestamp keep their relative
    /// order and repeated calls change nothing.
    pub fn sort_descending(&mut self) {
        self.transactions
            .sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
    }

    /// Records matching `predicate`, in the current in-memory order
    pub fn filter<P>(&self, mut predicate: P) -> Vec<&Transaction>
    where
        P: FnMut(&Transaction) -> bool,
    {
        self.transactions
            .iter()
            .filter(|txn| predicate(*txn))
            .collect()
    }

    /// Sort newest first, then select the records a report covers
    pub fn query(&mut self, kind: &ReportKind, today: NaiveDate) -> Vec<&Transaction> {
        self.sort_descending();
        self.filter(|txn| kind.matches(txn, today))
    }

    /// Every record, newest first
    pub fn all(&mut self) -> Vec<&Transaction> {
        self.sort_descending();
        self.transactions.iter().collect()
    }

    /// Records with a non-negative amount, newest first
    pub fn deposits(&mut self) -> Vec<&Transaction> {
        self.sort_descending();
        self.filter(Transaction::is_deposit)
    }

    /// Records with a negative amount, newest first
    pub fn payments(&mut self) -> Vec<&Transaction> {
        self.sort_descending();
        self.filter(Transaction::is_payment)
    }

    pub fn month_to_date(&mut self, today: NaiveDate) -> Vec<&Transaction> {
        self.query(&ReportKind::MonthToDate, today)
    }

    pub fn previous_month(&mut self, today: NaiveDate) -> Vec<&Transaction> {
        self.query(&ReportKind::PreviousMonth, today)
    }

    pub fn year_to_date(&mut self, today: NaiveDate) -> Vec<&Transaction> {
        self.query(&ReportKind::YearToDate, today)
    }

    pub fn previous_year(&mut self, today: NaiveDate) -> Vec<&Transaction> {
        self.query(&ReportKind::PreviousYear, today)
    }

    /// Records whose vendor equals `vendor`, ignoring case
    pub fn by_vendor(&mut self, vendor: &str) -> Vec<&Transaction> {
        let kind = ReportKind::Vendor(vendor.to_string());
        self.sort_descending();
        self.filter(|txn| kind.matches(txn, NaiveDate::MIN))
    }

    /// Records matching every constraint set in `criteria`
    pub fn search(&mut self, criteria: &SearchCriteria) -> Vec<&Transaction> {
        self.sort_descending();
        self.filter(|txn| criteria.matches(txn))
    }
}
