//! Output formatting for CLI commands

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::domain::Employee;

/// Output format
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
    verbose: bool,
}

impl Output {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    /// Prints a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "success": true,
                        "message": message
                    })
                );
            }
        }
    }

    /// Prints a warning on stderr
    pub fn warn(&self, message: &str) {
        match self.format {
            OutputFormat::Text => eprintln!("Warning: {}", message),
            OutputFormat::Json => {
                eprintln!("{}", serde_json::json!({ "warning": message }));
            }
        }
    }

    /// Prints structured data
    pub fn data<T: Serialize>(&self, data: &T) {
        match self.format {
            OutputFormat::Text => {
                // Callers render their own text; this is only a fallback
                if let Ok(json) = serde_json::to_string_pretty(data) {
                    println!("{}", json);
                }
            }
            OutputFormat::Json => {
                if let Ok(json) = serde_json::to_string(data) {
                    println!("{}", json);
                }
            }
        }
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Prints a verbose debug message with context (only when --verbose is set)
    pub fn verbose_ctx(&self, context: &str, message: &str) {
        if self.verbose {
            eprintln!("[verbose:{}] {}", context, message);
        }
    }

    /// Prints a verbose debug message (only when --verbose is set)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", message);
        }
    }
}

const TABLE_RULE_WIDTH: usize = 92;

/// Writes employees as a fixed-width table
pub fn write_table<'a, W, I>(out: &mut W, employees: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Employee>,
{
    let rule = "-".repeat(TABLE_RULE_WIDTH);

    writeln!(out, "{}", rule)?;
    writeln!(
        out,
        "| {:<5} | {:<20} | {:<15} | {:<15} | {:<10} | {:<12} |",
        "ID", "Name", "Department", "Position", "Salary", "Date of Hire"
    )?;
    writeln!(out, "{}", rule)?;

    for employee in employees {
        writeln!(
            out,
            "| {:<5} | {:<20} | {:<15} | {:<15} | {:<10.2} | {:<12} |",
            employee.id,
            employee.name,
            employee.department,
            employee.position,
            employee.salary,
            employee.date_of_hire.format("%Y-%m-%d").to_string(),
        )?;
    }

    writeln!(out, "{}", rule)
}

/// Writes one employee as a single descriptive line
pub fn write_summary<W: Write>(out: &mut W, employee: &Employee) -> io::Result<()> {
    writeln!(
        out,
        "ID: {}, Name: {}, Department: {}, Position: {}, Salary: {:.2}, Date of Hire: {}",
        employee.id,
        employee.name,
        employee.department,
        employee.position,
        employee.salary,
        employee.date_of_hire.format("%Y-%m-%d"),
    )
}
