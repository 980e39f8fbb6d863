//! Line-oriented field prompts.
//!
//! # Invariants
//! - Blank input maps to "not supplied".
//! - Unparseable numbers map to "not supplied", never to an error.
//! - In update prompts the literal `-` clears a nullable field.

use std::io::{self, BufRead, Write};

pub(crate) const CLEAR_MARKER: &str = "-";

/// Reads answers from `input` after writing prompts to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes a full line of program output.
    pub fn say(&mut self, message: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", message.as_ref())
    }

    /// Prompts and returns the trimmed answer, or `None` at end of input.
    pub fn line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }

    pub fn text(&mut self, prompt: &str) -> io::Result<Option<String>> {
        Ok(self.line(prompt)?.and_then(non_blank))
    }

    pub fn int(&mut self, prompt: &str) -> io::Result<Option<i64>> {
        Ok(self.text(prompt)?.and_then(|value| value.parse().ok()))
    }

    pub fn real(&mut self, prompt: &str) -> io::Result<Option<f64>> {
        Ok(self.text(prompt)?.and_then(|value| parse_real(&value)))
    }

    /// Update prompt for a nullable text column.
    pub fn text_change(&mut self, prompt: &str) -> io::Result<Option<Option<String>>> {
        Ok(self.text(prompt)?.map(|value| {
            if value == CLEAR_MARKER {
                None
            } else {
                Some(value)
            }
        }))
    }

    pub fn int_change(&mut self, prompt: &str) -> io::Result<Option<Option<i64>>> {
        Ok(self
            .text(prompt)?
            .and_then(|value| parse_change(&value, |raw| raw.parse().ok())))
    }

    pub fn real_change(&mut self, prompt: &str) -> io::Result<Option<Option<f64>>> {
        Ok(self.text(prompt)?.and_then(|value| parse_change(&value, parse_real)))
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn parse_real(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|number| number.is_finite())
}

fn parse_change<T>(value: &str, parse: impl Fn(&str) -> Option<T>) -> Option<Option<T>> {
    if value == CLEAR_MARKER {
        return Some(None);
    }
    parse(value).map(Some)
}
