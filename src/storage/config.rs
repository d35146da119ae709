//! Configuration handling for the roster
//!
//! Configuration is read from `roster.toml` (project, found by walking up
//! from the working directory) and `~/.config/roster/config.toml` (global).
//! Command-line flags take precedence over both.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::file::LoadPolicy;
use super::store::IdPolicy;
use crate::cli::OutputFormat;

/// Name of the project configuration file
pub const PROJECT_CONFIG_FILE: &str = "roster.toml";

/// Backing file used when nothing else is configured
pub const DEFAULT_DATA_FILE: &str = "employees.csv";

const DEFAULT_PROJECT_CONFIG: &str = r#"# Roster configuration

# Backing file, relative to this directory
data_file = "employees.csv"

# ID assignment for new employees: "sequential" or "count"
id_policy = "sequential"

# Malformed lines in the data file: "strict" aborts, "lenient" skips them
load_policy = "strict"
"#;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ProjectConfig {
    /// Backing file, relative to the directory holding `roster.toml`
    pub data_file: Option<PathBuf>,

    /// ID assignment policy
    pub id_policy: IdPolicy,

    /// Handling of malformed lines on load
    pub load_policy: LoadPolicy,
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,

    /// Backing file used outside any project
    pub data_file: Option<PathBuf>,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    pub project_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration for the current working directory
    pub fn load() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine working directory")?;
        Self::load_from(&cwd)
    }

    /// Loads configuration, searching for a project upward from `start`
    pub fn load_from(start: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let project_root = Self::find_project_root(start);

        let project = match &project_root {
            Some(root) => Self::load_project_config(root)?,
            None => ProjectConfig::default(),
        };

        Ok(Self {
            project,
            global,
            project_root,
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "roster", "roster").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    /// Loads project configuration from a specific root
    fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
        let config_path = project_root.join(PROJECT_CONFIG_FILE);

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read project config: {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse project config")?;

        if config
            .data_file
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            return Err(ConfigError::Invalid("data_file must not be empty".to_string()).into());
        }

        Ok(config)
    }

    /// Finds the project root by looking for `roster.toml` in `start` and its parents
    pub fn find_project_root(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if current.join(PROJECT_CONFIG_FILE).is_file() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Returns true if a project configuration was found
    pub fn is_in_project(&self) -> bool {
        self.project_root.is_some()
    }

    /// Resolves the backing file
    ///
    /// Precedence: explicit override, project `data_file` (relative to the
    /// project root), global `data_file`, then `employees.csv` in the project
    /// root or the working directory.
    pub fn data_file(&self, override_path: Option<&Path>) -> PathBuf {
        if let Some(path) = override_path {
            return path.to_path_buf();
        }

        if let Some(root) = &self.project_root {
            return match &self.project.data_file {
                Some(file) => root.join(file),
                None => root.join(DEFAULT_DATA_FILE),
            };
        }

        self.global
            .data_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }

    /// Writes a default `roster.toml` into `dir`, leaving an existing one alone
    ///
    /// Returns the path to the config file and whether it was created.
    pub fn init(dir: &Path) -> Result<(PathBuf, bool)> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

        let config_path = dir.join(PROJECT_CONFIG_FILE);
        if config_path.exists() {
            return Ok((config_path, false));
        }

        fs::write(&config_path, DEFAULT_PROJECT_CONFIG)
            .with_context(|| format!("Failed to write config: {}", config_path.display()))?;

        Ok((config_path, true))
    }
}
