//! Core CLI definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::global::GlobalArgs;

/// Module built when none is named on the command line
pub const DEFAULT_MODULE: &str = "unreal.asset_registry";

#[derive(Parser)]
#[command(name = "unrealpy")]
#[command(about = "Build embedded-Python editor modules for Unreal Engine", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clear registrations, build modules, then build the editor
    #[command(visible_alias = "b")]
    Build {
        /// Dotted module names (e.g. "unreal.asset_registry")
        #[arg(default_value = DEFAULT_MODULE)]
        modules: Vec<String>,

        /// Stop after the modules are generated and registered
        #[arg(long)]
        no_engine: bool,

        /// Install the built core library as an importable Python module
        #[arg(long)]
        install: bool,
    },

    /// Remove registrations, generated module directories and transpiled sources
    Clean {
        /// Dotted module names whose generated directories should be removed
        modules: Vec<String>,
    },

    /// Delete transpiled sources below a directory
    Sweep {
        /// Directory to sweep (defaults to the core module's Private directory)
        root: Option<PathBuf>,
    },

    /// Transpile the core unreal bindings into the core module
    Bindings,

    /// Write a build rules template for a module into Modules/
    Scaffold {
        /// Dotted module name
        module: String,

        /// Overwrite an existing template
        #[arg(short, long)]
        force: bool,
    },

    /// Show the names and paths derived for a module
    #[command(visible_alias = "d")]
    Describe {
        /// Dotted module name
        module: String,

        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Regenerate project files and build the editor
    Engine {
        /// Only regenerate project files
        #[arg(long)]
        generate_only: bool,

        /// Install the built core library as an importable Python module
        #[arg(long, conflicts_with = "generate_only")]
        install: bool,
    },

    /// Save --transpiler and --configuration as defaults
    #[command(visible_alias = "c")]
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
