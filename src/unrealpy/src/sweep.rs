//! Removal of previously transpiled sources.
//!
//! Only files carrying the transpiler's signature comment are deleted, so
//! hand-written C++ living next to generated output is left alone.

use crate::transpile::{GENERATED_SIGNATURE, OUTPUT_EXT};
use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// How many leading lines are searched for the signature
pub const SIGNATURE_SCAN_LINES: usize = 10;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("failed to sweep {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepReport {
    pub files_removed: Vec<PathBuf>,
    pub dirs_removed: Vec<PathBuf>,
}

impl SweepReport {
    pub fn is_empty(&self) -> bool {
        self.files_removed.is_empty() && self.dirs_removed.is_empty()
    }
}

/// True when one of the first lines of `path` starts with the generator signature
pub fn is_transpiled_output(path: &Path) -> io::Result<bool> {
    let mut reader = BufReader::new(fs::File::open(path)?);
    let mut line = Vec::new();

    for _ in 0..SIGNATURE_SCAN_LINES {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        if line.starts_with(GENERATED_SIGNATURE.as_bytes()) {
            return Ok(true);
        }
    }

    Ok(false)
}

/// Delete every transpiled file below `root`, then its directory if now empty.
///
/// A missing root is treated as already clean. Re-running after an
/// interruption picks up where the previous run stopped.
pub fn sweep(root: &Path) -> Result<SweepReport, SweepError> {
    let mut report = SweepReport::default();

    if !root.is_dir() {
        tracing::debug!("Nothing to sweep at {}", root.display());
        return Ok(report);
    }

    let mut candidates = Vec::new();
    for entry in walkdir::WalkDir::new(root) {
        let entry = entry?;
        let is_output = entry
            .path()
            .extension()
            .map(|e| e.eq_ignore_ascii_case(OUTPUT_EXT))
            .unwrap_or(false);
        if entry.file_type().is_file() && is_output {
            candidates.push(entry.into_path());
        }
    }

    for file_path in candidates {
        let generated = is_transpiled_output(&file_path).map_err(|source| SweepError::Io {
            path: file_path.clone(),
            source,
        })?;
        if !generated {
            continue;
        }

        tracing::debug!("Cleaning {}", file_path.display());
        fs::remove_file(&file_path).map_err(|source| SweepError::Io {
            path: file_path.clone(),
            source,
        })?;

        if let Some(dir) = file_path.parent() {
            if remove_if_empty(dir)? {
                tracing::debug!("Removed empty dir {}", dir.display());
                report.dirs_removed.push(dir.to_path_buf());
            } else {
                tracing::debug!("Keeping non-empty dir {}", dir.display());
            }
        }

        report.files_removed.push(file_path);
    }

    Ok(report)
}

/// Remove `dir` if it has no entries left.
///
/// A directory that still has entries is kept; any other failure is an error.
fn remove_if_empty(dir: &Path) -> Result<bool, SweepError> {
    let io_err = |source| SweepError::Io {
        path: dir.to_path_buf(),
        source,
    };

    match fs::remove_dir(dir) {
        Ok(()) => Ok(true),
        Err(remove_err) => {
            let populated = fs::read_dir(dir)
                .map_err(io_err)?
                .next()
                .is_some();
            if populated {
                Ok(false)
            } else {
                Err(io_err(remove_err))
            }
        }
    }
}
