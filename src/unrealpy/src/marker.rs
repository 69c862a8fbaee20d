//! Marker-delimited registration region in the editor target file.
//!
//! The engine's `UE4Editor.Target.cs` is hand-maintained except for the lines
//! between two sentinel comments:
//!
//! ```text
//! // @UNREALPY@
//! OutExtraModuleNames.Add("UnrealPy_Unreal_Asset_Registry");
//! // @/UNREALPY@
//! ```
//!
//! Only that region is touched. Every other byte of the file, line endings
//! included, is copied through unchanged.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const START_MARKER: &str = "@UNREALPY@";
pub const END_MARKER: &str = "@/UNREALPY@";

#[derive(Error, Debug)]
pub enum MarkerError {
    #[error("marker {0} not found")]
    Missing(&'static str),

    #[error(
        "marker {marker} not found in {}. Add the following lines somewhere in \
         SetupBinaries(...) among the OutExtraModuleNames.Add(...) calls:\n\
         // @UNREALPY@\n// @/UNREALPY@",
        .path.display()
    )]
    NotFound { path: PathBuf, marker: &'static str },

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Registration line emitted for one module, terminated by `line_ending`
pub fn registration_line(module_name: &str, line_ending: &str) -> String {
    format!("OutExtraModuleNames.Add(\"{}\");{}", module_name, line_ending)
}

/// Insert a registration line directly after the start marker.
///
/// Returns `None` when the start marker is absent; the caller then leaves the
/// file alone. Newer registrations end up above older ones. The inserted line
/// reuses the start marker's line ending.
pub fn insert_registration(contents: &str, module_name: &str) -> Option<String> {
    let mut out = String::with_capacity(contents.len() + 64);
    let mut inserted = false;

    for line in contents.split_inclusive('\n') {
        out.push_str(line);
        if !inserted && line.contains(START_MARKER) {
            let line_ending = if line.ends_with("\r\n") { "\r\n" } else { "\n" };
            if !line.ends_with('\n') {
                out.push_str(line_ending);
            }
            out.push_str(&registration_line(module_name, line_ending));
            inserted = true;
        }
    }

    inserted.then_some(out)
}

/// Drop every line strictly between the markers, keeping the markers.
///
/// Returns the rewritten text and the number of lines removed. Both markers
/// must be present.
pub fn remove_registrations(contents: &str) -> Result<(String, usize), MarkerError> {
    let mut out = String::with_capacity(contents.len());
    let mut start_found = false;
    let mut end_found = false;
    let mut removed = 0;

    for line in contents.split_inclusive('\n') {
        if end_found || !start_found {
            out.push_str(line);
            if !start_found && line.contains(START_MARKER) {
                start_found = true;
            }
        } else if line.contains(END_MARKER) {
            end_found = true;
            out.push_str(line);
        } else {
            removed += 1;
        }
    }

    if !start_found {
        return Err(MarkerError::Missing(START_MARKER));
    }
    if !end_found {
        return Err(MarkerError::Missing(END_MARKER));
    }

    Ok((out, removed))
}

/// Register `module_name` in the target file at `path`.
///
/// Returns false, leaving the file untouched, when the start marker is missing.
pub fn register_in_file(path: &Path, module_name: &str) -> Result<bool, MarkerError> {
    let contents = read(path)?;

    match insert_registration(&contents, module_name) {
        Some(patched) => {
            write(path, &patched)?;
            tracing::debug!("Registered {} in {}", module_name, path.display());
            Ok(true)
        }
        None => {
            tracing::warn!(
                "No {} marker in {}, {} was not registered",
                START_MARKER,
                path.display(),
                module_name
            );
            Ok(false)
        }
    }
}

/// Strip all registrations from the target file at `path`.
///
/// The file is not rewritten when a marker is missing.
pub fn clear_file(path: &Path) -> Result<usize, MarkerError> {
    let contents = read(path)?;

    let (cleared, removed) = remove_registrations(&contents).map_err(|e| match e {
        MarkerError::Missing(marker) => MarkerError::NotFound {
            path: path.to_path_buf(),
            marker,
        },
        other => other,
    })?;

    if removed > 0 {
        write(path, &cleared)?;
    }
    Ok(removed)
}

fn read(path: &Path) -> Result<String, MarkerError> {
    fs::read_to_string(path).map_err(|source| MarkerError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, contents: &str) -> Result<(), MarkerError> {
    fs::write(path, contents).map_err(|source| MarkerError::Io {
        path: path.to_path_buf(),
        source,
    })
}
