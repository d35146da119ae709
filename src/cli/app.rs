//! Main CLI application structure

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::tty::IsTty;

use super::employee::{self, AddArgs, UpdateArgs};
use super::output::{Output, OutputFormat};
use super::shell::{Shell, ShellOptions};
use crate::domain::EmployeeId;
use crate::storage::{Config, EmployeeStore, LoadReport, RecordFile};

#[derive(Parser)]
#[command(name = "roster")]
#[command(author, version, about = "Local employee record manager")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Employee data file (overrides roster.toml)
    #[arg(long, global = true, env = "ROSTER_FILE")]
    pub file: Option<PathBuf>,

    /// Command to run; starts the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default roster.toml
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Start the interactive menu
    Shell,

    /// Add an employee
    Add(AddArgs),

    /// Update an employee's fields
    Update {
        /// Employee ID
        id: EmployeeId,

        #[command(flatten)]
        fields: UpdateArgs,
    },

    /// Delete an employee
    Delete {
        /// Employee ID
        id: EmployeeId,
    },

    /// Show one employee
    Show {
        /// Employee ID
        id: EmployeeId,
    },

    /// List all employees
    List,

    /// Search employees by name (case-insensitive substring)
    Search {
        /// Part of the name to look for
        query: String,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let format = cli.format.unwrap_or(config.global.default_format);
    let output = Output::new(format, cli.verbose);

    output.verbose("Roster starting");
    if let Some(root) = &config.project_root {
        output.verbose_ctx("config", &format!("Using project config in {}", root.display()));
    }

    let file = cli.file.as_deref();
    let open = || open_store(&config, file, &output).map(|(store, _)| store);

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Initializing config at: {}", path));
            let (config_path, created) = Config::init(Path::new(&path))?;
            if created {
                output.success(&format!("Initialized roster config at {}", config_path.display()));
            } else {
                output.success(&format!("Config already exists at {}", config_path.display()));
            }
        }

        Commands::Shell => run_shell(&config, file, &output)?,

        Commands::Add(args) => employee::add(&mut open()?, &output, args)?,
        Commands::Update { id, fields } => employee::update(&mut open()?, &output, id, fields)?,
        Commands::Delete { id } => employee::delete(&mut open()?, &output, id)?,
        Commands::Show { id } => employee::show(&open()?, &output, id)?,
        Commands::List => employee::list(&open()?, &output)?,
        Commands::Search { query } => employee::search(&open()?, &output, &query)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Loads the configured data file into a store
fn open_store(
    config: &Config,
    file_override: Option<&Path>,
    output: &Output,
) -> Result<(EmployeeStore, LoadReport)> {
    let path = config.data_file(file_override);
    output.verbose_ctx(
        "store",
        &format!(
            "Loading {} (id policy: {:?}, load policy: {:?})",
            path.display(),
            config.project.id_policy,
            config.project.load_policy
        ),
    );

    let (store, report) = EmployeeStore::open(
        RecordFile::new(&path),
        config.project.id_policy,
        config.project.load_policy,
    )
    .context("Failed to load employee data")?;

    for skipped in &report.skipped {
        output.warn(&format!(
            "Skipped malformed line {} in {}: {}",
            skipped.line,
            path.display(),
            skipped.error
        ));
    }
    output.verbose_ctx("store", &format!("Loaded {} employees", store.len()));

    Ok((store, report))
}

/// Runs the interactive menu on stdin/stdout
fn run_shell(config: &Config, file_override: Option<&Path>, output: &Output) -> Result<()> {
    let (mut store, report) = open_store(config, file_override, output)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let options = if stdin.is_tty() && stdout.is_tty() {
        ShellOptions::interactive()
    } else {
        ShellOptions::default()
    };
    output.verbose_ctx("shell", &format!("Starting shell with {:?}", options));

    let mut shell = Shell::new(&mut store, stdin.lock(), stdout.lock(), options);
    shell.greet(&report)?;
    shell.run()?;

    Ok(())
}
