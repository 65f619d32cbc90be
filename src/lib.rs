//! Account Ledger - terminal personal ledger for deposits and payments
//!
//! This library provides the core functionality for the `ledger` binary. It
//! keeps every transaction of a pipe-delimited ledger file in memory, rewrites
//! the file after each change, and offers date, vendor and custom-search views
//! through a console menu or one-shot subcommands.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Money and transaction records
//! - `storage`: Ledger file codec and the in-memory ledger
//! - `reports`: Period, vendor and search reports
//! - `display`: Fixed-width register formatting
//! - `cli`: Subcommand handlers, console menu and input abstraction
//! - `logging`: Diagnostic logging to stderr
//!
//! # Example
//!
//! ```rust,ignore
//! use account_ledger::config::LedgerConfig;
//! use account_ledger::storage::Ledger;
//!
//! let mut ledger = Ledger::load(LedgerConfig::in_place("transactions.csv"))?;
//! for txn in ledger.deposits() {
//!     println!("{}", txn);
//! }
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
