//! Calendar periods used by the date-based reports
//!
//! Every period is relative to a `today` supplied by the caller so reports
//! stay deterministic under test.

use chrono::{Datelike, NaiveDate};
use std::fmt;

/// A calendar window relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// Same year and month as today
    MonthToDate,
    /// The month before today's, in any year
    PreviousMonth,
    /// Same year as today
    YearToDate,
    /// The year before today's
    PreviousYear,
}

impl Period {
    /// Check whether `date` falls in this period
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            Self::MonthToDate => date.year() == today.year() && date.month() == today.month(),
            // Matches on the month number alone, so last year's records for
            // that month are included too
            Self::PreviousMonth => date.month() == previous_month(today.month()),
            Self::YearToDate => date.year() == today.year(),
            Self::PreviousYear => date.year() == today.year() - 1,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MonthToDate => write!(f, "Month to Date"),
            Self::PreviousMonth => write!(f, "Previous Month"),
            Self::YearToDate => write!(f, "Year to Date"),
            Self::PreviousYear => write!(f, "Previous Year"),
        }
    }
}

/// Month number before `month`, wrapping January to December
pub fn previous_month(month: u32) -> u32 {
    if month <= 1 {
        12
    } else {
        month - 1
    }
}
