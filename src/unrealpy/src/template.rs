//! Generated file contents: per-module build rules and precompiled headers.

use crate::config::Settings;
use std::fmt;
use std::path::{Path, PathBuf};

/// First line of every file this tool writes
pub const GENERATED_HEADER: &str =
    "// This file is generated by unrealpy and edits will be overwritten";

/// Precompiled header of the core bindings module, relative to its module directory
pub const CORE_PCH: &str = "Private/UnrealPyPrivatePCH.h";

/// Body of a generated module's precompiled header
pub fn pch_contents() -> String {
    format!(
        "{}\n\n\
         #pragma warning (disable:4510)\n\
         #pragma warning (disable:4610)\n\
         #pragma warning (disable:4146)\n",
        GENERATED_HEADER
    )
}

/// Directive prepended to transpiled output so it picks up the module's PCH
pub fn pch_include(pch: &str) -> String {
    format!("\n#include \"{}\"\n\n", pch)
}

/// File name the engine expects for a module's build rules
pub fn rules_file_name(module_name: &str) -> String {
    format!("{}.Build.cs", module_name)
}

/// Inputs of a module's `.Build.cs` rules class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRules {
    pub module_name: String,
    pub python_include_dir: PathBuf,
    pub python_lib_dir: PathBuf,
    pub python_lib_file: PathBuf,
}

impl BuildRules {
    pub fn new(module_name: impl Into<String>, settings: &Settings) -> Self {
        BuildRules {
            module_name: module_name.into(),
            python_include_dir: settings.python_include_dir(),
            python_lib_dir: settings.python_lib_dir(),
            python_lib_file: settings.python_lib_file(),
        }
    }

    /// File name the engine expects for these rules
    pub fn file_name(&self) -> String {
        rules_file_name(&self.module_name)
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

/// Paths are embedded in C# string literals
fn cs_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "\\\\")
}

impl fmt::Display for BuildRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = &self.module_name;

        writeln!(f, "{}", GENERATED_HEADER)?;
        writeln!(f)?;
        writeln!(f, "using UnrealBuildTool;")?;
        writeln!(f, "using System.Diagnostics;")?;
        writeln!(f, "using System.IO;")?;
        writeln!(f)?;
        writeln!(f, "public class {} : ModuleRules", name)?;
        writeln!(f, "{{")?;
        writeln!(f, "    public {}(TargetInfo Target)", name)?;
        writeln!(f, "    {{")?;
        writeln!(f, "        PublicIncludePaths.Add(\"Editor/UnrealEd/Public\");")?;
        writeln!(f)?;
        writeln!(f, "        PrivateDependencyModuleNames.AddRange(")?;
        writeln!(f, "            new string[] {{")?;
        for dependency in ["Core", "CoreUObject", "Engine", "UnrealEd"] {
            writeln!(f, "                \"{}\",", dependency)?;
        }
        writeln!(f, "            }}")?;
        writeln!(f, "        );")?;
        writeln!(f)?;
        writeln!(
            f,
            "        PrivateIncludePaths.Add(\"{}\");",
            cs_path(&self.python_include_dir)
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "        PublicLibraryPaths.Add(\"{}\");",
            cs_path(&self.python_lib_dir)
        )?;
        writeln!(
            f,
            "        PublicAdditionalLibraries.Add(\"{}\");",
            cs_path(&self.python_lib_file)
        )?;
        writeln!(f, "    }}")?;
        writeln!(f, "}}")
    }
}
