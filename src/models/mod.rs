//! Core data models for the ledger
//!
//! This module contains the value types the ledger stores: transactions and
//! the fixed-point money amount they carry.

pub mod money;
pub mod transaction;

pub use money::{Money, MoneyParseError};
pub use transaction::{RecordError, Transaction, TransactionKind, DATE_FORMAT, TIME_FORMAT};
