//! Line-oriented console input
//!
//! Reads from any `BufRead` and writes to any `Write`, so the interactive
//! session can be driven by scripted input. End of input is reported as
//! `None` rather than an error.

use std::fmt;
use std::io::{self, BufRead, Write};

use crate::error::{LedgerError, LedgerResult};
use crate::models::Money;

/// Prompt-and-read helper used by the session
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
    hide_pin: bool,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            hide_pin: false,
        }
    }

    /// Read PINs through the terminal without echo
    ///
    /// Only meaningful when stdin is a terminal; the caller decides.
    pub fn hide_pin(mut self, hide: bool) -> Self {
        self.hide_pin = hide;
        self
    }

    /// Write one line of output
    pub fn say(&mut self, message: impl fmt::Display) -> LedgerResult<()> {
        writeln!(self.writer, "{}", message)?;
        Ok(())
    }

    /// Write preformatted text as-is
    pub fn write_block(&mut self, text: &str) -> LedgerResult<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    /// Show `prompt` and read one trimmed line; `None` at end of input
    pub fn read_line(&mut self, prompt: &str) -> LedgerResult<Option<String>> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut input = String::new();
        if self.reader.read_line(&mut input)? == 0 {
            // Keep the transcript tidy when input ends mid-prompt
            writeln!(self.writer)?;
            return Ok(None);
        }

        Ok(Some(input.trim().to_string()))
    }

    /// Read a whole number, re-prompting until one parses
    pub fn read_number(&mut self, prompt: &str) -> LedgerResult<Option<i64>> {
        loop {
            let Some(input) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match input.parse::<i64>() {
                Ok(number) => return Ok(Some(number)),
                Err(_) => self.say("Invalid input. Please enter a valid number.")?,
            }
        }
    }

    /// Read a money amount, re-prompting until one parses
    ///
    /// Sign is not checked here; non-positive amounts are rejected by the
    /// operation that receives them.
    pub fn read_amount(&mut self, prompt: &str) -> LedgerResult<Option<Money>> {
        loop {
            let Some(input) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match Money::parse(&input) {
                Ok(amount) => return Ok(Some(amount)),
                Err(_) => self.say("Invalid input. Please enter a valid amount.")?,
            }
        }
    }

    /// Read a PIN as a number, hidden when configured
    pub fn read_pin(&mut self, prompt: &str) -> LedgerResult<Option<i64>> {
        if !self.hide_pin {
            return self.read_number(prompt);
        }

        loop {
            let input = match rpassword::prompt_password(prompt) {
                Ok(input) => input,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
                Err(e) => return Err(LedgerError::Io(format!("Failed to read PIN: {}", e))),
            };
            match input.trim().parse::<i64>() {
                Ok(pin) => return Ok(Some(pin)),
                Err(_) => self.say("Invalid input. Please enter a valid number.")?,
            }
        }
    }

    /// Give back the reader and writer
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}
