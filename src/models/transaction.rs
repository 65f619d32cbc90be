//! Transaction model
//!
//! Represents a single deposit or payment with its timestamp, description,
//! vendor and signed amount. Records are immutable once built.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;

use thiserror::Error;

use super::money::{Money, MoneyParseError};

/// Date format used in the ledger file
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time format used in the ledger file (24-hour clock)
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// Incoming funds (non-negative amount)
    Deposit,
    /// Outgoing funds (non-positive amount)
    Payment,
}

impl TransactionKind {
    /// Classify an amount: negative amounts are payments, everything else deposits
    pub fn of(amount: Money) -> Self {
        if amount.is_negative() {
            Self::Payment
        } else {
            Self::Deposit
        }
    }

    /// Check whether an amount has the sign this kind requires
    pub fn accepts(&self, amount: Money) -> bool {
        match self {
            Self::Deposit => !amount.is_negative(),
            Self::Payment => !amount.is_positive(),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit => write!(f, "Deposit"),
            Self::Payment => write!(f, "Payment"),
        }
    }
}

/// Errors raised while building a transaction from raw text fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("invalid time '{0}' (expected HH:MM:SS)")]
    InvalidTime(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] MoneyParseError),
}

/// A ledger transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    timestamp: NaiveDateTime,
    description: String,
    vendor: String,
    amount: Money,
}

impl Transaction {
    /// Create a transaction; the timestamp is truncated to whole seconds
    pub fn new(
        timestamp: NaiveDateTime,
        description: impl Into<String>,
        vendor: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            timestamp: truncate_to_seconds(timestamp),
            description: description.into(),
            vendor: vendor.into(),
            amount,
        }
    }

    /// Create a transaction stamped with the current local date and time
    pub fn now(description: impl Into<String>, vendor: impl Into<String>, amount: Money) -> Self {
        Self::new(Local::now().naive_local(), description, vendor, amount)
    }

    /// Build a transaction from the five raw ledger fields
    pub fn from_fields(
        date: &str,
        time: &str,
        description: &str,
        vendor: &str,
        amount: &str,
    ) -> Result<Self, RecordError> {
        let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
            .map_err(|_| RecordError::InvalidDate(date.to_string()))?;
        let time = NaiveTime::parse_from_str(time.trim(), TIME_FORMAT)
            .map_err(|_| RecordError::InvalidTime(time.to_string()))?;
        let amount = Money::parse(amount)?;

        Ok(Self::new(date.and_time(time), description, vendor, amount))
    }

    /// The five ledger fields in file order
    pub fn to_fields(&self) -> [String; 5] {
        [
            self.timestamp.format(DATE_FORMAT).to_string(),
            self.timestamp.format(TIME_FORMAT).to_string(),
            self.description.clone(),
            self.vendor.clone(),
            self.amount.to_plain_string(),
        ]
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.timestamp.time()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Deposit or payment, from the amount's sign
    pub fn kind(&self) -> TransactionKind {
        TransactionKind::of(self.amount)
    }

    pub fn is_deposit(&self) -> bool {
        self.kind() == TransactionKind::Deposit
    }

    pub fn is_payment(&self) -> bool {
        self.kind() == TransactionKind::Payment
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fields().join("|"))
    }
}

fn truncate_to_seconds(timestamp: NaiveDateTime) -> NaiveDateTime {
    timestamp.with_nanosecond(0).unwrap_or(timestamp)
}
