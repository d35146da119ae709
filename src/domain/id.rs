//! Employee identifiers
//!
//! IDs are positive integers assigned by the store. They are never
//! supplied by the user when creating a record, only when referring
//! to an existing one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid employee ID: expected a positive integer, got '{0}'")]
    Invalid(String),
}

/// Employee ID, always greater than zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct EmployeeId(NonZeroU32);

impl EmployeeId {
    /// Creates an ID from a raw value, rejecting zero
    pub fn new(value: u32) -> Result<Self, IdError> {
        NonZeroU32::new(value)
            .map(Self)
            .ok_or_else(|| IdError::Invalid(value.to_string()))
    }

    /// Returns the first ID handed out by an empty store
    pub fn first() -> Self {
        Self(NonZeroU32::MIN)
    }

    /// Returns the ID `count + 1`, or `None` past the largest ID
    pub fn following_count(count: usize) -> Option<Self> {
        let count = u32::try_from(count).ok()?;
        NonZeroU32::MIN.checked_add(count).map(Self)
    }

    /// Returns the raw numeric value
    pub fn get(&self) -> u32 {
        self.0.get()
    }

    /// Returns the ID that follows this one, or `None` at the largest ID
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for EmployeeId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let value: u32 = s.parse().map_err(|_| IdError::Invalid(s.to_string()))?;
        Self::new(value)
    }
}

impl TryFrom<u32> for EmployeeId {
    type Error = IdError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmployeeId> for u32 {
    fn from(id: EmployeeId) -> Self {
        id.get()
    }
}
