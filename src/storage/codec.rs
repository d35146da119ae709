//! Line codec for employee records
//!
//! One record per line, six comma-separated fields in fixed order:
//!
//! ```text
//! <id>,<name>,<department>,<position>,<salary>,<YYYY-MM-DD>
//! ```
//!
//! There is no header and no escaping. Text fields that contain the
//! delimiter or a line break cannot be represented, so [`encode`] refuses
//! them instead of writing a line that would not decode.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{Employee, EmployeeId};

/// Field separator
pub const DELIMITER: char = ',';

/// Number of fields on every line
pub const FIELD_COUNT: usize = 6;

/// Date format used on disk
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq)]
pub enum CodecError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("invalid id '{0}'")]
    InvalidId(String),

    #[error("invalid salary '{0}'")]
    InvalidSalary(String),

    #[error("invalid date of hire '{0}'")]
    InvalidDate(String),

    #[error("{field} contains a comma or line break and cannot be stored")]
    Delimiter { field: &'static str },
}

/// Encodes a record as a single line (without the trailing newline)
pub fn encode(employee: &Employee) -> Result<String, CodecError> {
    for (field, value) in [
        ("name", &employee.name),
        ("department", &employee.department),
        ("position", &employee.position),
    ] {
        if !is_storable(value) {
            return Err(CodecError::Delimiter { field });
        }
    }

    Ok(format!(
        "{id}{d}{name}{d}{department}{d}{position}{d}{salary}{d}{date}",
        d = DELIMITER,
        id = employee.id,
        name = employee.name,
        department = employee.department,
        position = employee.position,
        salary = employee.salary,
        date = employee.date_of_hire.format(DATE_FORMAT),
    ))
}

/// Decodes one line into a record
pub fn decode(line: &str) -> Result<Employee, CodecError> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    if fields.len() != FIELD_COUNT {
        return Err(CodecError::FieldCount {
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    }

    let id: EmployeeId = fields[0]
        .parse()
        .map_err(|_| CodecError::InvalidId(fields[0].to_string()))?;

    let salary = parse_salary(fields[4])
        .ok_or_else(|| CodecError::InvalidSalary(fields[4].to_string()))?;

    let date_of_hire = NaiveDate::parse_from_str(fields[5].trim(), DATE_FORMAT)
        .map_err(|_| CodecError::InvalidDate(fields[5].to_string()))?;

    Ok(Employee {
        id,
        name: fields[1].to_string(),
        department: fields[2].to_string(),
        position: fields[3].to_string(),
        salary,
        date_of_hire,
    })
}

/// Returns true if a text field can be written without breaking the line format
pub fn is_storable(value: &str) -> bool {
    !value.contains(DELIMITER) && !value.contains(['\n', '\r'])
}

/// Parses a salary, accepting only finite non-negative numbers
pub fn parse_salary(s: &str) -> Option<f64> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}
