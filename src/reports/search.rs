//! Custom search over the ledger
//!
//! Each criterion is optional; a transaction matches when it satisfies every
//! criterion that is set.

use chrono::NaiveDate;
use std::fmt;

use crate::models::{Money, MoneyParseError, RecordError, Transaction, DATE_FORMAT};

/// Constraints for a custom search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    /// Earliest date to include (inclusive)
    pub start_date: Option<NaiveDate>,
    /// Latest date to include (inclusive)
    pub end_date: Option<NaiveDate>,
    /// Description substring (case-insensitive)
    pub description: Option<String>,
    /// Vendor substring (case-insensitive)
    pub vendor: Option<String>,
    /// Exact amount
    pub amount: Option<Money>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn since(mut self, start: NaiveDate) -> Self {
        self.start_date = Some(start);
        self
    }

    pub fn until(mut self, end: NaiveDate) -> Self {
        self.end_date = Some(end);
        self
    }

    /// Filter by description; blank text sets no constraint
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = non_blank(text.into());
        self
    }

    /// Filter by vendor; blank text sets no constraint
    pub fn vendor(mut self, text: impl Into<String>) -> Self {
        self.vendor = non_blank(text.into());
        self
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Check whether no criterion is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check if a transaction matches every criterion that is set
    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(start) = self.start_date {
            if txn.date() < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if txn.date() > end {
                return false;
            }
        }

        if let Some(ref text) = self.description {
            if !contains_ignore_case(txn.description(), text) {
                return false;
            }
        }
        if let Some(ref text) = self.vendor {
            if !contains_ignore_case(txn.vendor(), text) {
                return false;
            }
        }

        if let Some(amount) = self.amount {
            if txn.amount() != amount {
                return false;
            }
        }

        true
    }
}

impl fmt::Display for SearchCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(start) = self.start_date {
            parts.push(format!("from {}", start));
        }
        if let Some(end) = self.end_date {
            parts.push(format!("to {}", end));
        }
        if let Some(ref text) = self.description {
            parts.push(format!("description \"{}\"", text));
        }
        if let Some(ref text) = self.vendor {
            parts.push(format!("vendor \"{}\"", text));
        }
        if let Some(amount) = self.amount {
            parts.push(format!("amount {}", amount));
        }

        if parts.is_empty() {
            write!(f, "everything")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}

/// Parse a typed date where blank input means "no constraint"
pub fn parse_date_input(input: &str) -> Result<Option<NaiveDate>, RecordError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map(Some)
        .map_err(|_| RecordError::InvalidDate(input.to_string()))
}

/// Parse a typed amount where blank input means "no constraint"
pub fn parse_amount_input(input: &str) -> Result<Option<Money>, MoneyParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    Money::parse(input).map(Some)
}

fn non_blank(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
