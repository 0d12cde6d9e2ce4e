//! Configuration management for the code generator
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (codegen.toml)
//! - Environment variables (FAIRGRAPH_*)
//!
//! ## Example config file (codegen.toml):
//! ```toml
//! [paths]
//! schema_root = "../openMINDS/target/schema.tpl.json"
//! target_root = "target/fairgraph"
//!
//! [layout]
//! schema_file_ending = ".schema.tpl.json"
//! module_extension = "py"
//! package_marker = "__init__.py"
//!
//! [classes]
//! base_class = "KGObject"
//! default_space = "model"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::codegen::descriptor::{DEFAULT_BASE_CLASS, DEFAULT_SPACE};

/// Main configuration for the generator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodegenConfig {
    /// Input and output locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// File naming of inputs and outputs
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Class-level settings written into every generated module
    #[serde(default)]
    pub classes: ClassesConfig,
}

/// Input and output locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Root holding `<group>/<version>/` schema template trees
    #[serde(default = "default_schema_root")]
    pub schema_root: PathBuf,

    /// Package root the generated modules are written under
    #[serde(default = "default_target_root")]
    pub target_root: PathBuf,
}

/// File naming of inputs and outputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Suffix identifying schema template files
    #[serde(default = "default_schema_file_ending")]
    pub schema_file_ending: String,

    /// Extension of generated modules
    #[serde(default = "default_module_extension")]
    pub module_extension: String,

    /// File marking a directory as a package
    #[serde(default = "default_package_marker")]
    pub package_marker: String,
}

/// Class-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassesConfig {
    #[serde(default = "default_base_class")]
    pub base_class: String,

    #[serde(default = "default_space")]
    pub default_space: String,
}

// Default value functions
fn default_schema_root() -> PathBuf {
    PathBuf::from("schemas")
}

fn default_target_root() -> PathBuf {
    PathBuf::from("target/fairgraph")
}

fn default_schema_file_ending() -> String {
    ".schema.tpl.json".to_string()
}

fn default_module_extension() -> String {
    "py".to_string()
}

fn default_package_marker() -> String {
    "__init__.py".to_string()
}

fn default_base_class() -> String {
    DEFAULT_BASE_CLASS.to_string()
}

fn default_space() -> String {
    DEFAULT_SPACE.to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            schema_root: default_schema_root(),
            target_root: default_target_root(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            schema_file_ending: default_schema_file_ending(),
            module_extension: default_module_extension(),
            package_marker: default_package_marker(),
        }
    }
}

impl Default for ClassesConfig {
    fn default() -> Self {
        Self {
            base_class: default_base_class(),
            default_space: default_space(),
        }
    }
}

impl CodegenConfig {
    /// Load configuration from default locations, optionally adding a required file on top
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["codegen.toml", ".codegen.toml", "config/codegen.toml"];
        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(config_dir) = directories::ProjectDirs::from("eu", "ebrains", "fairgraph-codegen") {
            let xdg_config = config_dir.config_dir().join("codegen.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // FAIRGRAPH_PATHS__TARGET_ROOT=... style overrides
        builder = builder.add_source(
            Environment::with_prefix("FAIRGRAPH")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}
