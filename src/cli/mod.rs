//! CLI command handlers and the interactive console
//!
//! This module contains the clap subcommand handlers, the console menu and
//! the input abstraction the menu reads through.

pub mod input;
pub mod menu;
pub mod report;
pub mod transaction;

pub use input::{Console, Prompter};
pub use menu::Menu;
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_list_command, handle_record_command, ListArgs, RecordArgs};
