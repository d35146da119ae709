//! Domain models for the roster
//!
//! Contains the record types without any I/O concerns.

mod id;
mod employee;

pub use id::{EmployeeId, IdError};
pub use employee::{Employee, EmployeeUpdate, NewEmployee};
