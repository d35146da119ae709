//! Flat-file persistence for employee records
//!
//! Records live in a single text file, one encoded line per record (see
//! [`codec`](super::codec)). Every save rewrites the whole file: the new
//! content goes to a temp file which is then renamed over the old one, so
//! readers see either the previous state or the new one.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::codec::{self, CodecError};
use super::store::StoreError;
use crate::domain::Employee;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed record at {}:{line}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        #[source]
        source: CodecError,
    },
}

/// What to do with a line that does not decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
    /// Abort the whole load on the first malformed line
    #[default]
    Strict,
    /// Skip malformed lines and report them
    Lenient,
}

/// A line skipped by a lenient load
#[derive(Debug)]
pub struct SkippedLine {
    /// 1-based line number
    pub line: usize,
    pub error: CodecError,
}

/// Result of loading the backing file
#[derive(Debug, Default)]
pub struct Loaded {
    /// Records in file order
    pub employees: Vec<Employee>,

    /// Lines dropped under [`LoadPolicy::Lenient`]
    pub skipped: Vec<SkippedLine>,

    /// False when the file did not exist (a normal cold start)
    pub existed: bool,
}

/// The backing file of an employee store
#[derive(Debug, Clone)]
pub struct RecordFile {
    path: PathBuf,
}

impl RecordFile {
    /// Creates a handle for the file at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all records, in file order
    ///
    /// A missing file yields an empty collection. Blank lines are ignored.
    pub fn load(&self, policy: LoadPolicy) -> Result<Loaded, LoadError> {
        if !self.path.exists() {
            return Ok(Loaded::default());
        }

        let io_err = |source: io::Error| LoadError::Io {
            path: self.path.clone(),
            source,
        };

        let file = File::open(&self.path).map_err(io_err)?;

        // Acquire shared lock for reading
        file.lock_shared().map_err(io_err)?;

        let reader = BufReader::new(&file);
        let mut loaded = Loaded {
            existed: true,
            ..Loaded::default()
        };

        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(io_err)?;
            let line_num = index + 1;

            if line.trim().is_empty() {
                continue;
            }

            match codec::decode(&line) {
                Ok(employee) => loaded.employees.push(employee),
                Err(error) => match policy {
                    LoadPolicy::Strict => {
                        return Err(LoadError::Malformed {
                            path: self.path.clone(),
                            line: line_num,
                            source: error,
                        })
                    }
                    LoadPolicy::Lenient => loaded.skipped.push(SkippedLine {
                        line: line_num,
                        error,
                    }),
                },
            }
        }

        // Lock is released when file is dropped
        Ok(loaded)
    }

    /// Writes all records to the file (full rewrite)
    ///
    /// Every record is encoded before anything touches the disk, so an
    /// unencodable record leaves the previous file intact.
    pub fn save(&self, employees: &[Employee]) -> Result<(), StoreError> {
        let mut lines = Vec::with_capacity(employees.len());
        for employee in employees {
            let line = codec::encode(employee).map_err(|source| StoreError::Encode {
                id: employee.id,
                source,
            })?;
            lines.push(line);
        }

        let write_err = |source: io::Error| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let temp_path = self.temp_path();

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(write_err)?;

            // Acquire exclusive lock
            file.lock_exclusive().map_err(write_err)?;

            let mut writer = BufWriter::new(&file);
            for line in &lines {
                writeln!(writer, "{}", line).map_err(write_err)?;
            }
            writer.flush().map_err(write_err)?;
        }

        // Atomic rename
        fs::rename(&temp_path, &self.path).map_err(|source| {
            let _ = fs::remove_file(&temp_path);
            write_err(source)
        })
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
