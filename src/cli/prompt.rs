//! Line-oriented input prompts for the interactive shell
//!
//! Required fields are asked for in a loop until the answer parses. Optional
//! fields map an empty answer to "keep the current value".

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::EmployeeId;
use crate::storage::codec;

/// Date formats accepted from the user
const INPUT_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

#[derive(Debug, Error)]
pub enum PromptError {
    /// The input stream ended
    #[error("input closed")]
    Closed,

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Parses a calendar date in one of the accepted input formats
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    INPUT_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
}

/// Checks a text field, returning the reason it is rejected
///
/// Empty text is allowed; only values that would break the line format
/// are refused.
pub fn check_text(s: &str) -> Result<(), &'static str> {
    if codec::is_storable(s) {
        Ok(())
    } else {
        Err("commas are not allowed")
    }
}

/// Reads answers from `R` and writes prompts to `W`
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Returns the output stream
    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    /// Writes a line of text
    pub fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message)
    }

    /// Writes a prompt and reads one line, without its line ending
    pub fn ask(&mut self, prompt: &str) -> Result<String, PromptError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }

        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    /// Asks for text until a storable value is entered, empty included
    pub fn required_text(&mut self, prompt: &str) -> Result<String, PromptError> {
        loop {
            let answer = self.ask(prompt)?;
            match check_text(&answer) {
                Ok(()) => return Ok(answer),
                Err(reason) => self.say(&format!("Invalid input: {}.", reason))?,
            }
        }
    }

    /// Asks for text; an empty answer keeps the current value
    pub fn optional_text(&mut self, prompt: &str) -> Result<Option<String>, PromptError> {
        loop {
            let answer = self.ask(prompt)?;
            if answer.trim().is_empty() {
                return Ok(None);
            }
            match check_text(&answer) {
                Ok(()) => return Ok(Some(answer)),
                Err(reason) => self.say(&format!("Invalid input: {}.", reason))?,
            }
        }
    }

    /// Asks for an employee ID until a positive integer is entered
    pub fn employee_id(&mut self, prompt: &str) -> Result<EmployeeId, PromptError> {
        let mut current = prompt.to_string();
        loop {
            let answer = self.ask(&current)?;
            if let Ok(id) = answer.parse() {
                return Ok(id);
            }
            current = format!("Invalid input. {}", prompt);
        }
    }

    /// Asks for a salary until a non-negative number is entered
    pub fn salary(&mut self, prompt: &str) -> Result<f64, PromptError> {
        loop {
            let answer = self.ask(prompt)?;
            match codec::parse_salary(&answer) {
                Some(salary) => return Ok(salary),
                None => self.say("Invalid input: enter a non-negative number.")?,
            }
        }
    }

    /// Asks for a salary; an empty or invalid answer keeps the current value
    pub fn optional_salary(&mut self, prompt: &str) -> Result<Option<f64>, PromptError> {
        let answer = self.ask(prompt)?;
        Ok(codec::parse_salary(&answer))
    }

    /// Asks for a date until one parses
    pub fn date(&mut self, prompt: &str) -> Result<NaiveDate, PromptError> {
        loop {
            let answer = self.ask(prompt)?;
            match parse_date(&answer) {
                Some(date) => return Ok(date),
                None => self.say("Invalid input: enter a date as YYYY-MM-DD.")?,
            }
        }
    }

    /// Asks for a date; an empty or invalid answer keeps the current value
    pub fn optional_date(&mut self, prompt: &str) -> Result<Option<NaiveDate>, PromptError> {
        let answer = self.ask(prompt)?;
        Ok(parse_date(&answer))
    }
}
