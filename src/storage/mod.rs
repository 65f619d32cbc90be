//! Storage layer for the ledger
//!
//! Provides the pipe-delimited record codec, atomic file rewrites and the
//! in-memory `Ledger` that ties them together.

pub mod codec;
pub mod file_io;
pub mod ledger;

pub use codec::DEFAULT_HEADER;
pub use file_io::{open_required, write_atomic};
pub use ledger::Ledger;
