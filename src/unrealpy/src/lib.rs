//! # unrealpy
//!
//! Build orchestration for embedding a Python interpreter in the Unreal
//! Engine editor.
//!
//! This library provides functionality to:
//! - Derive editor module names and paths from dotted Python module names
//! - Transpile `.pyx` sources to C++ and install them as editor modules
//! - Register generated modules in the editor target file
//! - Sweep previously generated sources
//! - Drive the engine's project generation and editor build
//!
//! ## Example
//!
//! ```no_run
//! use unrealpy::{ModuleDescriptor, Settings, SystemRunner};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::from_env()?;
//! let runner = SystemRunner;
//!
//! unrealpy::marker::clear_file(&settings.target_file())?;
//!
//! let module = ModuleDescriptor::new("unreal.asset_registry", &settings)?;
//! module.build(&settings, &runner)?;
//!
//! unrealpy::engine::build(&settings, &runner)?;
//! # Ok(())
//! # }
//! ```

pub mod bindings;
pub mod config;
pub mod engine;
pub mod marker;
pub mod module;
pub mod naming;
pub mod platform;
pub mod process;
pub mod sweep;
pub mod template;
pub mod transpile;

// Re-export commonly used items
#[doc(inline)]
pub use bindings::{build_core_bindings, BindingsError};
#[doc(inline)]
pub use config::{ConfigError, Settings};
#[doc(inline)]
pub use engine::ToolError;
#[doc(inline)]
pub use marker::MarkerError;
#[doc(inline)]
pub use module::{ModuleDescriptor, ModuleError};
#[doc(inline)]
pub use platform::{Platform, PlatformError};
#[doc(inline)]
pub use process::{Invocation, ProcessExit, ProcessRunner, SystemRunner};
#[doc(inline)]
pub use sweep::{sweep, SweepError, SweepReport};
#[doc(inline)]
pub use template::BuildRules;
#[doc(inline)]
pub use transpile::TranspileError;
