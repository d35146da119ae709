//! One-shot employee commands

use std::io;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;

use super::output::{write_table, Output};
use super::prompt::{check_text, parse_date};
use crate::domain::{EmployeeId, EmployeeUpdate, NewEmployee};
use crate::storage::{codec, EmployeeStore};

/// Fields for a new employee
#[derive(Args)]
pub struct AddArgs {
    /// Full name
    #[arg(long, value_parser = parse_text_arg)]
    pub name: String,

    /// Department
    #[arg(long, value_parser = parse_text_arg)]
    pub department: String,

    /// Job title
    #[arg(long, value_parser = parse_text_arg)]
    pub position: String,

    /// Salary (non-negative number)
    #[arg(long, value_parser = parse_salary_arg)]
    pub salary: f64,

    /// Date of hire (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub hired: NaiveDate,
}

impl From<AddArgs> for NewEmployee {
    fn from(args: AddArgs) -> Self {
        Self {
            name: args.name,
            department: args.department,
            position: args.position,
            salary: args.salary,
            date_of_hire: args.hired,
        }
    }
}

/// Fields to change; omitted fields keep their current value
#[derive(Args)]
pub struct UpdateArgs {
    /// New name
    #[arg(long, value_parser = parse_text_arg)]
    pub name: Option<String>,

    /// New department
    #[arg(long, value_parser = parse_text_arg)]
    pub department: Option<String>,

    /// New job title
    #[arg(long, value_parser = parse_text_arg)]
    pub position: Option<String>,

    /// New salary
    #[arg(long, value_parser = parse_salary_arg)]
    pub salary: Option<f64>,

    /// New date of hire (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub hired: Option<NaiveDate>,
}

impl From<UpdateArgs> for EmployeeUpdate {
    fn from(args: UpdateArgs) -> Self {
        Self {
            name: args.name,
            department: args.department,
            position: args.position,
            salary: args.salary,
            date_of_hire: args.hired,
        }
    }
}

fn parse_text_arg(s: &str) -> Result<String, String> {
    check_text(s)
        .map(|()| s.to_string())
        .map_err(|reason| reason.to_string())
}

fn parse_salary_arg(s: &str) -> Result<f64, String> {
    codec::parse_salary(s).ok_or_else(|| format!("'{}' is not a non-negative number", s))
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).ok_or_else(|| format!("'{}' is not a date (expected YYYY-MM-DD)", s))
}

pub fn add(store: &mut EmployeeStore, output: &Output, args: AddArgs) -> Result<()> {
    let employee = store.create(args.into())?;
    output.verbose_ctx("add", &format!("Assigned ID {}", employee.id));

    if output.is_json() {
        output.data(&employee);
    } else {
        output.success(&format!(
            "Added employee {} - {}",
            employee.id, employee.name
        ));
    }

    Ok(())
}

pub fn update(
    store: &mut EmployeeStore,
    output: &Output,
    id: EmployeeId,
    args: UpdateArgs,
) -> Result<()> {
    let update = EmployeeUpdate::from(args);
    if update.is_empty() {
        anyhow::bail!("Nothing to update: pass at least one of --name, --department, --position, --salary, --hired");
    }

    let employee = store.update(id, update)?;

    if output.is_json() {
        output.data(&employee);
    } else {
        output.success(&format!("Updated employee {}", employee.id));
    }

    Ok(())
}

pub fn delete(store: &mut EmployeeStore, output: &Output, id: EmployeeId) -> Result<()> {
    let removed = store.delete(id)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": removed.id,
            "deleted": true,
        }));
    } else {
        output.success(&format!(
            "Deleted employee {} - {}",
            removed.id, removed.name
        ));
    }

    Ok(())
}

pub fn show(store: &EmployeeStore, output: &Output, id: EmployeeId) -> Result<()> {
    let employee = store
        .find_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("Employee not found: {}", id))?;

    if output.is_json() {
        output.data(employee);
    } else {
        println!("Employee: {}", employee.id);
        println!("Name: {}", employee.name);
        println!("Department: {}", employee.department);
        println!("Position: {}", employee.position);
        println!("Salary: {:.2}", employee.salary);
        println!("Date of Hire: {}", employee.date_of_hire.format("%Y-%m-%d"));
    }

    Ok(())
}

pub fn list(store: &EmployeeStore, output: &Output) -> Result<()> {
    let employees = store.list_all();

    if output.is_json() {
        output.data(&employees);
    } else if employees.is_empty() {
        println!("No employees to display.");
    } else {
        write_table(&mut io::stdout().lock(), employees).context("Failed to write table")?;
    }

    Ok(())
}

pub fn search(store: &EmployeeStore, output: &Output, query: &str) -> Result<()> {
    let found = store.search_by_name(query);
    output.verbose_ctx("search", &format!("Found {} match(es) for '{}'", found.len(), query));

    if output.is_json() {
        output.data(&found);
    } else if found.is_empty() {
        println!("No employees found.");
    } else {
        write_table(&mut io::stdout().lock(), found).context("Failed to write table")?;
    }

    Ok(())
}
