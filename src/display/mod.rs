//! Display formatting for terminal output
//!
//! Provides fixed-width register tables shared by the console menu and the
//! command-line subcommands.

pub mod transaction;

pub use transaction::{format_report, format_transaction_register, format_transaction_row};
