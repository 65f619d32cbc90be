//! Console input abstraction
//!
//! The menu reads every answer through [`Prompter`], so it can be driven by
//! standard input in the binary and by an in-memory script in tests. `None`
//! from any read means input has ended and the caller should unwind.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use tracing::warn;

use crate::models::{Money, TransactionKind};

/// Shown when an integer choice could not be parsed
pub const NOT_AN_INTEGER: &str = "Please enter an integer...";

/// Line-oriented question and answer capability
pub trait Prompter {
    /// Show `prompt` (if any) and read one line without its terminator
    fn read_line(&mut self, prompt: &str) -> Option<String>;

    /// Show a line of text
    fn say(&mut self, text: &str);

    /// Read an integer, asking again until one is entered
    fn read_integer(&mut self, prompt: &str) -> Option<i64> {
        let mut line = self.read_line(prompt)?;
        loop {
            match line.trim().parse() {
                Ok(value) => return Some(value),
                Err(_) => {
                    self.say(NOT_AN_INTEGER);
                    line = self.read_line("")?;
                }
            }
        }
    }

    /// Read an amount whose sign suits `kind`, asking again until one is entered
    fn read_amount(&mut self, prompt: &str, kind: TransactionKind) -> Option<Money> {
        loop {
            let line = self.read_line(prompt)?;
            match Money::parse(&line) {
                Ok(amount) if kind.accepts(amount) => return Some(amount),
                _ => self.say(amount_hint(kind)),
            }
        }
    }
}

fn amount_hint(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Deposit => "Please enter a positive number... Ex: 10, 594.3, 321.45",
        TransactionKind::Payment => "Please enter a negative number... Ex: -14, -385.3, -123.45",
    }
}

/// A [`Prompter`] over any buffered reader and writer
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the writer, e.g. to inspect a transcript
    pub fn into_output(self) -> W {
        self.output
    }
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console bound to standard input and output
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for Console<R, W> {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        if !prompt.is_empty() {
            self.say(prompt);
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(|c| c == '\r' || c == '\n').to_string()),
            Err(e) => {
                warn!(error = %e, "failed to read console input");
                None
            }
        }
    }

    fn say(&mut self, text: &str) {
        let written = writeln!(self.output, "{}", text).and_then(|()| self.output.flush());
        if let Err(e) = written {
            warn!(error = %e, "failed to write console output");
        }
    }
}
