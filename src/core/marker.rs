//! core::marker
//!
//! Reading the declared-environment marker.
//!
//! # Format
//!
//! The marker is the first line of a local variables file, for example:
//!
//! ```text
//! #environment|production
//! # leave the line above as is
//! variable "region" { ... }
//! ```
//!
//! Only the first line is read. Interpreting it is the resolver's job; this
//! module never rejects a file because of its contents, so a missing file
//! (`MarkerError::NotFound`) stays distinguishable from a bad record.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Separator between the tag and the environment name.
pub const MARKER_DELIMITER: char = '|';

/// Errors from reading the marker file.
#[derive(Debug, Error)]
pub enum MarkerError {
    #[error("marker file '{path}' not found or unreadable: {source}")]
    NotFound {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The first line of the marker file, with surrounding whitespace removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerRecord {
    line: String,
}

impl MarkerRecord {
    /// Build a record from an already-read line.
    pub fn from_line(line: impl AsRef<str>) -> Self {
        Self {
            line: line.as_ref().trim().to_string(),
        }
    }

    /// The raw line.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Fields of the line split on [`MARKER_DELIMITER`].
    pub fn fields(&self) -> Vec<&str> {
        self.line.split(MARKER_DELIMITER).collect()
    }
}

/// Read the marker record from the first line of `path`.
///
/// # Errors
///
/// Returns `MarkerError::NotFound` if the file cannot be opened or read.
/// A first line that is not valid UTF-8 is still returned as a record.
pub fn read_marker(path: &Path) -> Result<MarkerRecord, MarkerError> {
    let not_found = |source| MarkerError::NotFound {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(not_found)?;
    let mut first = Vec::new();
    BufReader::new(file)
        .read_until(b'\n', &mut first)
        .map_err(not_found)?;

    // Undecodable bytes are content, not an I/O failure; they surface as
    // replacement characters and the resolver rejects the record.
    let record = MarkerRecord::from_line(String::from_utf8_lossy(&first));
    debug!(path = %path.display(), line = record.line(), "read marker");
    Ok(record)
}
