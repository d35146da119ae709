//! # Storage Layer
//!
//! Persistence for the roster: a flat comma-delimited file holding one
//! employee per line, the in-memory store that rewrites it after every
//! change, and configuration.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Employees | One comma-separated line per record | `employees.csv` (configurable) |
//! | Project config | TOML | `roster.toml` |
//! | Global config | TOML | `~/.config/roster/config.toml` |
//!
//! ## Write Safety
//!
//! - [`RecordFile`] holds an `fs2` lock while reading or writing
//! - Every save is a full rewrite (temp file + rename)
//!
//! ## Key Types
//!
//! - [`EmployeeStore`] - Ordered in-memory collection with CRUD and search
//! - [`RecordFile`] - Load/save of the backing file
//! - [`codec`] - Encoding of a single record line
//! - [`Config`] - Project and global configuration

pub mod codec;
mod file;
mod store;
mod config;

pub use codec::CodecError;
pub use file::{LoadError, LoadPolicy, Loaded, RecordFile, SkippedLine};
pub use store::{EmployeeStore, IdPolicy, LoadReport, StoreError};
pub use config::{Config, ConfigError, GlobalConfig, ProjectConfig, DEFAULT_DATA_FILE, PROJECT_CONFIG_FILE};
