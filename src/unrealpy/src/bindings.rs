//! Core bindings build.
//!
//! Every `unreal.<ext>` source in the project is transpiled into the core
//! `UnrealPy` module's private directory, mirroring the project's directory
//! layout, after sweeping whatever an earlier run left there.

use crate::config::Settings;
use crate::process::ProcessRunner;
use crate::sweep::{self, SweepError};
use crate::template::CORE_PCH;
use crate::transpile::{self, TranspileError, OUTPUT_EXT};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File stem of the core binding sources
pub const CORE_SOURCE_STEM: &str = "unreal";

#[derive(Error, Debug)]
pub enum BindingsError {
    #[error(transparent)]
    Sweep(#[from] SweepError),

    #[error(transparent)]
    Transpile(#[from] TranspileError),

    #[error("failed to create {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}

/// Project sources that make up the core bindings, sorted by path.
///
/// A missing project directory has no sources.
pub fn find_core_sources(settings: &Settings) -> Result<Vec<PathBuf>, BindingsError> {
    let file_name = format!("{}.{}", CORE_SOURCE_STEM, settings.source_ext);

    if !settings.project_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut sources = Vec::new();
    for entry in walkdir::WalkDir::new(&settings.project_dir) {
        let entry = entry?;
        if entry.file_type().is_file() && entry.file_name() == file_name.as_str() {
            sources.push(entry.into_path());
        }
    }
    sources.sort();
    Ok(sources)
}

/// Output path for a core source, relative layout preserved
pub fn output_for(settings: &Settings, source: &Path) -> PathBuf {
    let relative_dir = source
        .parent()
        .and_then(|dir| dir.strip_prefix(&settings.project_dir).ok())
        .unwrap_or(Path::new(""));

    settings
        .core_private_dir()
        .join(relative_dir)
        .join(format!("{}.{}", CORE_SOURCE_STEM, OUTPUT_EXT))
}

/// Sweep the core private directory and transpile every core source into it
pub fn build_core_bindings(
    settings: &Settings,
    runner: &dyn ProcessRunner,
) -> Result<Vec<PathBuf>, BindingsError> {
    sweep::sweep(&settings.core_private_dir())?;

    let mut outputs = Vec::new();
    for source in find_core_sources(settings)? {
        let output = output_for(settings, &source);
        if let Some(dir) = output.parent() {
            fs::create_dir_all(dir).map_err(|source| BindingsError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        tracing::info!("Transpiling {} -> {}", source.display(), output.display());
        transpile::transpile(&settings.transpiler, &source, &output, false, runner)?;
        transpile::prepend_pch_include(&output, CORE_PCH)?;
        outputs.push(output);
    }

    if outputs.is_empty() {
        tracing::warn!(
            "No {}.{} sources found under {}",
            CORE_SOURCE_STEM,
            settings.source_ext,
            settings.project_dir.display()
        );
    }

    Ok(outputs)
}
