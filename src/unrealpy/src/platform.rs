//! Host platform profiles.
//!
//! Every OS-dependent string the build needs (script suffixes, library
//! suffixes, the engine's platform label) lives in one immutable record
//! selected once at startup.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("{0} is not a supported host platform (expected windows or macos)")]
    Unsupported(String),
}

/// OS-dependent constants for one host platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// Suffix of the engine's shell scripts (`GenerateProjectFiles<ext>`)
    pub script_ext: &'static str,
    /// Suffix of dynamic libraries, including the dot
    pub dynamic_library_ext: &'static str,
    /// Suffix of static libraries, including the dot
    pub static_library_ext: &'static str,
    /// Platform label passed to the engine build script
    pub unreal_name: &'static str,
    /// Build script path relative to `Engine/Build/BatchFiles`
    pub build_script: &'static str,
    /// Base name of the embedded interpreter library
    pub python_lib_name: &'static str,
    /// File name the built editor library is installed under for import
    pub python_module_file: &'static str,
}

pub const WINDOWS: Platform = Platform {
    script_ext: ".bat",
    dynamic_library_ext: ".dll",
    static_library_ext: ".lib",
    unreal_name: "Win64",
    build_script: "Build.bat",
    python_lib_name: "python27",
    python_module_file: "unreal.pyd",
};

pub const MAC: Platform = Platform {
    script_ext: ".sh",
    dynamic_library_ext: ".dylib",
    static_library_ext: ".a",
    unreal_name: "Mac",
    build_script: "Mac/Build.sh",
    python_lib_name: "libpython2.7",
    python_module_file: "unreal.so",
};

impl Platform {
    /// Resolve the profile for an OS identifier.
    ///
    /// Accepts both Rust's `std::env::consts::OS` names and the
    /// `sys.platform` spellings (`win32`, `darwin`). There is no fallback.
    pub fn for_os(os: &str) -> Result<&'static Platform, PlatformError> {
        match os {
            "windows" | "win32" => Ok(&WINDOWS),
            "macos" | "darwin" => Ok(&MAC),
            other => Err(PlatformError::Unsupported(other.to_string())),
        }
    }

    /// Profile of the running host
    pub fn host() -> Result<&'static Platform, PlatformError> {
        Self::for_os(std::env::consts::OS)
    }
}
