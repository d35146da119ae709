//! Interactive menu
//!
//! Presents the six menu actions in a loop until the user exits or input
//! ends. Each action drives the [`EmployeeStore`]; failed saves are
//! reported and the session continues with the in-memory state.

use std::io::{BufRead, Write};

use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};

use super::output::{write_summary, write_table};
use super::prompt::{PromptError, Prompter};
use crate::domain::{EmployeeUpdate, NewEmployee};
use crate::storage::{EmployeeStore, LoadReport, StoreError};

const MENU: &str = "\
Employee Management System

1. Add New Employee
2. Update Employee
3. Delete Employee
4. View All Employees
5. Search Employee
6. Exit
";

/// Terminal behaviour of the shell
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellOptions {
    /// Clear the screen before showing the menu
    pub clear_screen: bool,

    /// Wait for Enter after showing results
    pub pause: bool,
}

impl ShellOptions {
    /// Options for a session attached to a terminal
    pub fn interactive() -> Self {
        Self {
            clear_screen: true,
            pause: true,
        }
    }
}

/// A menu selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Add,
    Update,
    Delete,
    List,
    Search,
    Exit,
}

impl Action {
    fn parse(selection: &str) -> Option<Self> {
        match selection.trim() {
            "1" => Some(Action::Add),
            "2" => Some(Action::Update),
            "3" => Some(Action::Delete),
            "4" => Some(Action::List),
            "5" => Some(Action::Search),
            "6" => Some(Action::Exit),
            _ => None,
        }
    }
}

/// Interactive session over an employee store
pub struct Shell<'a, R, W> {
    store: &'a mut EmployeeStore,
    prompt: Prompter<R, W>,
    options: ShellOptions,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(store: &'a mut EmployeeStore, input: R, output: W, options: ShellOptions) -> Self {
        Self {
            store,
            prompt: Prompter::new(input, output),
            options,
        }
    }

    /// Reports what the startup load found
    pub fn greet(&mut self, report: &LoadReport) -> Result<(), PromptError> {
        if report.existed {
            self.prompt.say(&format!(
                "{} employees loaded from file.",
                self.store.len()
            ))?;
        } else {
            self.prompt.say("No existing employee data found.")?;
        }
        Ok(())
    }

    /// Runs the menu loop until Exit or end of input
    pub fn run(&mut self) -> Result<(), PromptError> {
        match self.menu_loop() {
            Err(PromptError::Closed) => Ok(()),
            other => other,
        }
    }

    fn menu_loop(&mut self) -> Result<(), PromptError> {
        loop {
            self.show_menu()?;
            let selection = self.prompt.ask("Select: ")?;

            match Action::parse(&selection) {
                Some(Action::Add) => self.add()?,
                Some(Action::Update) => self.update()?,
                Some(Action::Delete) => self.delete()?,
                Some(Action::List) => self.list()?,
                Some(Action::Search) => self.search()?,
                Some(Action::Exit) => {
                    self.prompt.say("Exiting...")?;
                    return Ok(());
                }
                None => self.prompt.say("Invalid selection, please try again.")?,
            }
        }
    }

    fn show_menu(&mut self) -> Result<(), PromptError> {
        if self.options.clear_screen {
            crossterm::queue!(self.prompt.out(), Clear(ClearType::All), MoveTo(0, 0))?;
        }
        self.prompt.say(MENU)?;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PromptError> {
        if self.options.pause {
            self.prompt
                .ask("\nPress Enter to return to the main menu...")?;
        }
        Ok(())
    }

    fn add(&mut self) -> Result<(), PromptError> {
        let fields = NewEmployee {
            name: self.prompt.required_text("Please enter employee Name: ")?,
            department: self
                .prompt
                .required_text("Please enter employee Department: ")?,
            position: self.prompt.required_text("Please enter employee Position: ")?,
            salary: self.prompt.salary("Please enter employee Salary: ")?,
            date_of_hire: self
                .prompt
                .date("Please enter Date of Hire (YYYY-MM-DD): ")?,
        };

        match self.store.create(fields) {
            Ok(employee) => {
                self.prompt.say(&format!(
                    "Employee added successfully! (ID {})",
                    employee.id
                ))?;
                self.prompt.say("Employee data saved to file.")?;
            }
            Err(e) => self.report_error(&e)?,
        }

        self.pause()
    }

    fn update(&mut self) -> Result<(), PromptError> {
        let id = self.prompt.employee_id("Enter Employee ID to update: ")?;
        let current = match self.store.find_by_id(id) {
            Some(employee) => employee.clone(),
            None => {
                self.prompt.say("Employee not found!")?;
                return Ok(());
            }
        };

        let update = EmployeeUpdate {
            name: self.prompt.optional_text(&format!(
                "Enter new name (or press Enter to keep '{}'): ",
                current.name
            ))?,
            department: self.prompt.optional_text(&format!(
                "Enter new department (or press Enter to keep '{}'): ",
                current.department
            ))?,
            position: self.prompt.optional_text(&format!(
                "Enter new position (or press Enter to keep '{}'): ",
                current.position
            ))?,
            salary: self.prompt.optional_salary(&format!(
                "Enter new salary (or press Enter to keep {:.2}): ",
                current.salary
            ))?,
            date_of_hire: self.prompt.optional_date(&format!(
                "Enter new Date of Hire (or press Enter to keep {}): ",
                current.date_of_hire.format("%Y-%m-%d")
            ))?,
        };

        match self.store.update(id, update) {
            Ok(_) => {
                self.prompt.say("Employee updated successfully!")?;
                self.prompt.say("Employee data saved to file.")?;
            }
            Err(e) => self.report_error(&e)?,
        }
        Ok(())
    }

    fn delete(&mut self) -> Result<(), PromptError> {
        let id = self.prompt.employee_id("Enter Employee ID to delete: ")?;

        match self.store.delete(id) {
            Ok(_) => {
                self.prompt.say("Employee deleted successfully!")?;
                self.prompt.say("Employee data saved to file.")?;
            }
            Err(e) => self.report_error(&e)?,
        }
        Ok(())
    }

    fn list(&mut self) -> Result<(), PromptError> {
        if self.store.is_empty() {
            self.prompt.say("No employees to display.")?;
            return Ok(());
        }

        write_table(self.prompt.out(), self.store.list_all())?;
        self.pause()
    }

    fn search(&mut self) -> Result<(), PromptError> {
        if self.store.is_empty() {
            self.prompt.say("No employees to search.")?;
            return Ok(());
        }

        let query = self.prompt.ask("Enter employee name to search: ")?;
        let found = self.store.search_by_name(&query);

        if found.is_empty() {
            self.prompt.say("No employees found.")?;
            return Ok(());
        }

        let out = self.prompt.out();
        writeln!(out, "Search Results:")?;
        for employee in found {
            write_summary(out, employee)?;
        }

        self.pause()
    }

    fn report_error(&mut self, error: &StoreError) -> Result<(), PromptError> {
        match error {
            StoreError::NotFound(_) => self.prompt.say("Employee not found!")?,
            StoreError::Write { .. } => self.prompt.say(&format!(
                "Change kept in memory, but saving failed: {}",
                error
            ))?,
            _ => self.prompt.say(&error.to_string())?,
        }
        Ok(())
    }
}
