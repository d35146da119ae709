//! Employee domain model
//!
//! An employee is the only entity the roster manages. Records are created
//! by the store, which assigns the ID; everything else can be changed in
//! place through an [`EmployeeUpdate`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::id::EmployeeId;

/// A single employee record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Store-assigned identifier, immutable after creation
    pub id: EmployeeId,

    pub name: String,

    pub department: String,

    pub position: String,

    /// Annual salary, never negative
    pub salary: f64,

    /// Calendar date the employee was hired
    pub date_of_hire: NaiveDate,
}

impl Employee {
    /// Builds a record from its ID and the user-supplied fields
    pub fn new(id: EmployeeId, fields: NewEmployee) -> Self {
        Self {
            id,
            name: fields.name,
            department: fields.department,
            position: fields.position,
            salary: fields.salary,
            date_of_hire: fields.date_of_hire,
        }
    }

    /// Applies an update, keeping every field the update leaves out
    pub fn apply(&mut self, update: EmployeeUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(department) = update.department {
            self.department = department;
        }
        if let Some(position) = update.position {
            self.position = position;
        }
        if let Some(salary) = update.salary {
            self.salary = salary;
        }
        if let Some(date) = update.date_of_hire {
            self.date_of_hire = date;
        }
    }

    /// Case-insensitive substring match against the name
    pub fn name_contains(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Fields supplied when creating a record
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub name: String,
    pub department: String,
    pub position: String,
    pub salary: f64,
    pub date_of_hire: NaiveDate,
}

/// Partial update of a record; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub salary: Option<f64>,
    pub date_of_hire: Option<NaiveDate>,
}

impl EmployeeUpdate {
    /// Returns true if the update changes nothing
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.department.is_none()
            && self.position.is_none()
            && self.salary.is_none()
            && self.date_of_hire.is_none()
    }
}
