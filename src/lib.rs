//! Roster - A local employee record manager
//!
//! Keeps an ordered collection of employee records in memory, rewrites a
//! flat comma-delimited file after every change, and drives it from either
//! one-shot subcommands or an interactive menu.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Employee, EmployeeId, EmployeeUpdate, NewEmployee};
pub use storage::{EmployeeStore, StoreError};
