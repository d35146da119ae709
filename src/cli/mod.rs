//! # Command-Line Interface
//!
//! User-facing commands, the interactive menu and output formatting.
//!
//! ## Commands
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Interactive | Menu-driven session | `roster`, `roster shell` |
//! | Records | One-shot CRUD | `add`, `update`, `delete`, `show` |
//! | Query | Read-only views | `list`, `search` |
//! | Setup | Configuration | `init` |
//!
//! ## Output Formats
//!
//! One-shot commands support the `--format` flag:
//! - `text` (default) - Human-readable tables
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! roster --verbose list
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod employee;
mod prompt;
mod shell;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
pub use prompt::{PromptError, Prompter};
pub use shell::{Shell, ShellOptions};
