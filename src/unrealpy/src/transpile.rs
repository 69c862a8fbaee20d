//! Transpiler invocation and output post-processing.

use crate::process::{Invocation, ProcessExit, ProcessRunner};
use crate::template::pch_include;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Comment the transpiler writes near the top of every file it generates
pub const GENERATED_SIGNATURE: &str = "/* Generated by Cython";

/// Extension of transpiled C++ output, without the dot
pub const OUTPUT_EXT: &str = "cpp";

#[derive(Error, Debug)]
pub enum TranspileError {
    #[error("transpiler {tool} could not be found. Is it installed and on PATH?")]
    ToolNotFound { tool: String },

    #[error("failed to launch {tool}: {source}")]
    Launch {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("{tool} failed with {exit} for {}", .input.display())]
    Failed {
        tool: String,
        input: PathBuf,
        exit: ProcessExit,
    },

    #[error("failed to rewrite {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Run the transpiler on `input`, writing C++ to `output`
pub fn transpile(
    transpiler: &str,
    input: &Path,
    output: &Path,
    verbose: bool,
    runner: &dyn ProcessRunner,
) -> Result<(), TranspileError> {
    let mut invocation = Invocation::new(transpiler);
    if verbose {
        invocation = invocation.arg("--verbose");
    }
    let invocation = invocation.arg("--cplus").arg("-o").arg(output).arg(input);

    tracing::debug!("Transpiling {} -> {}", input.display(), output.display());

    let exit = runner.run(&invocation).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            TranspileError::ToolNotFound {
                tool: transpiler.to_string(),
            }
        } else {
            TranspileError::Launch {
                tool: transpiler.to_string(),
                source,
            }
        }
    })?;

    if !exit.success() {
        return Err(TranspileError::Failed {
            tool: transpiler.to_string(),
            input: input.to_path_buf(),
            exit,
        });
    }

    Ok(())
}

/// Prepend an include of `pch` to a transpiled file, keeping its bytes intact
pub fn prepend_pch_include(output: &Path, pch: &str) -> Result<(), TranspileError> {
    let io_err = |source| TranspileError::Io {
        path: output.to_path_buf(),
        source,
    };

    let original = fs::read(output).map_err(io_err)?;
    let mut contents = pch_include(pch).into_bytes();
    contents.extend_from_slice(&original);
    fs::write(output, contents).map_err(io_err)
}
