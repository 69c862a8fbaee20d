//! Arguments shared by every subcommand

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use unrealpy::config::{ENGINE_ROOT_VAR, PYTHON_ROOT_VAR};
use unrealpy::{Platform, Settings};

use crate::config::Config;

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Unreal Engine root directory
    #[arg(long, global = true, env = ENGINE_ROOT_VAR, value_name = "DIR")]
    pub engine_root: Option<PathBuf>,

    /// Python interpreter root directory
    #[arg(long, global = true, env = PYTHON_ROOT_VAR, value_name = "DIR")]
    pub python_root: Option<PathBuf>,

    /// Directory holding the module sources and Modules/ templates
    #[arg(long, global = true, default_value = ".", value_name = "DIR")]
    pub project_dir: PathBuf,

    /// Transpiler executable (overrides the configured default)
    #[arg(long, global = true)]
    pub transpiler: Option<String>,

    /// Editor build configuration (overrides the configured default)
    #[arg(long, global = true)]
    pub configuration: Option<String>,

    /// Extension of module source files
    #[arg(long, global = true, value_name = "EXT")]
    pub source_ext: Option<String>,

    /// Log every derived path and external command
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// Build the settings every library operation takes.
    ///
    /// Command-line values win over the user config file, which wins over
    /// built-in defaults.
    pub fn settings(&self, config: &Config) -> Result<Settings> {
        let platform = Platform::host().context("Unsupported host platform")?;
        self.settings_for(config, platform)
    }

    fn settings_for(&self, config: &Config, platform: &'static Platform) -> Result<Settings> {
        let mut settings = Settings::new(
            self.engine_root.clone(),
            self.python_root.clone(),
            platform,
        )
        .context("Missing required configuration")?
        .with_project_dir(&self.project_dir);

        if let Some(transpiler) = self.transpiler.as_deref().or(config.get_transpiler()) {
            settings = settings.with_transpiler(transpiler);
        }
        if let Some(configuration) = self.configuration.as_deref().or(config.get_configuration())
        {
            settings = settings.with_configuration(configuration);
        }
        if let Some(source_ext) = &self.source_ext {
            settings = settings.with_source_ext(source_ext);
        }

        Ok(settings)
    }
}
