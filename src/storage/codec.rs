//! Pipe-delimited ledger line format
//!
//! Each record is one line, `date|time|description|vendor|amount`. Fields
//! containing the delimiter or a double quote are wrapped in double quotes
//! with embedded quotes doubled; plain fields are written bare.
//!
//! Lines written before quoting existed are still read verbatim: a line that
//! splits into exactly five fields on `|`, none of them wholly wrapped in
//! quotes, is taken as is, stray quotes included. Only other lines go through
//! the quote-aware reader.

use std::io::{Read, Write};

use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{RecordError, Transaction};

/// Field delimiter
pub const DELIMITER: u8 = b'|';

/// Number of fields in a record
pub const FIELD_COUNT: usize = 5;

/// Header written to new ledger files
pub const DEFAULT_HEADER: &str = "date|time|description|vendor|amount";

/// Build a record reader over the lines that follow the header
pub fn reader<R: Read>(source: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_reader(source)
}

/// Build a record writer producing `\n`-terminated lines
pub fn writer<W: Write>(sink: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(sink)
}

/// Decode one record
///
/// A wrong field count is a structural error for the whole file; a field that
/// fails to parse is returned as the inner [`RecordError`] so the caller can
/// skip just that record.
pub fn decode_record(
    record: &StringRecord,
    line: u64,
) -> LedgerResult<Result<Transaction, RecordError>> {
    if record.len() != FIELD_COUNT {
        return Err(LedgerError::MalformedRecord {
            line,
            fields: record.len(),
        });
    }

    Ok(Transaction::from_fields(
        &record[0], &record[1], &record[2], &record[3], &record[4],
    ))
}

/// Encode one record
pub fn encode_record<W: Write>(writer: &mut csv::Writer<W>, txn: &Transaction) -> LedgerResult<()> {
    writer.write_record(txn.to_fields())?;
    Ok(())
}

/// Encode a single transaction as a line, without the terminator
pub fn encode_line(txn: &Transaction) -> LedgerResult<String> {
    let mut out = writer(Vec::new());
    encode_record(&mut out, txn)?;
    let bytes = out
        .into_inner()
        .map_err(|e| LedgerError::Storage(e.to_string()))?;
    let line = String::from_utf8(bytes).map_err(|e| LedgerError::Storage(e.to_string()))?;
    Ok(line.trim_end_matches('\n').to_string())
}

/// Decode the text of one file line, `line` being its 1-based number
///
/// Same error split as [`decode_record`].
pub fn decode_text(text: &str, line: u64) -> LedgerResult<Result<Transaction, RecordError>> {
    if let Some(fields) = split_plain(text) {
        return Ok(Transaction::from_fields(
            fields[0], fields[1], fields[2], fields[3], fields[4],
        ));
    }

    let mut input = reader(text.as_bytes());
    let mut record = StringRecord::new();
    if !input.read_record(&mut record)? {
        return Err(LedgerError::MalformedRecord { line, fields: 0 });
    }
    decode_record(&record, line)
}

/// Decode a single line into a transaction
pub fn decode_line(line: &str) -> LedgerResult<Transaction> {
    decode_text(line, 1)?.map_err(|e| LedgerError::Validation(e.to_string()))
}

/// Split an unquoted line, or `None` if it needs the quote-aware reader
fn split_plain(text: &str) -> Option<Vec<&str>> {
    let fields: Vec<&str> = text.split(DELIMITER as char).collect();
    let wrapped = |field: &&str| field.len() >= 2 && field.starts_with('"') && field.ends_with('"');

    (fields.len() == FIELD_COUNT && !fields.iter().any(wrapped)).then_some(fields)
}
