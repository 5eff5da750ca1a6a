//! Configuration System
//!
//! Layered configuration: built-in defaults, the global file, the project
//! `dirtrail.toml` (or an explicit file), then `DIRTRAIL__*` environment
//! variables. CLI flags are applied on top by the binary.

use crate::differ::DifferBackend;
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::pipeline::ConsolidationOptions;
use crate::render::{OutputFormat, RenderOptions, DEFAULT_TITLE};
use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

mod merge;
mod sources;

pub use merge::merge_policy::ENV_PREFIX;
pub use sources::global_file::global_config_path;
pub use sources::project_file::{project_config_path, PROJECT_CONFIG_FILE};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirtrailConfig {
    #[serde(default)]
    pub differ: DifferConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Differ back-end selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifferConfig {
    #[serde(default = "default_backend")]
    pub backend: DifferBackend,

    /// Executable used by the git back-end
    #[serde(default = "default_git_binary")]
    pub git_binary: String,

    /// Path components skipped by the walk back-end
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,
}

fn default_backend() -> DifferBackend {
    DifferBackend::Git
}

fn default_git_binary() -> String {
    "git".to_string()
}

fn default_ignore() -> Vec<String> {
    vec![".git".to_string()]
}

impl Default for DifferConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            git_binary: default_git_binary(),
            ignore: default_ignore(),
        }
    }
}

/// Pipeline behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_true")]
    pub prepend_synthetic_empty: bool,

    #[serde(default)]
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            prepend_synthetic_empty: true,
            parallel: false,
        }
    }
}

impl PipelineConfig {
    pub fn options(&self) -> ConsolidationOptions {
        ConsolidationOptions {
            prepend_synthetic_empty: self.prepend_synthetic_empty,
            parallel: self.parallel,
        }
    }
}

/// Output rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    #[serde(default)]
    pub group_by_folder: bool,

    #[serde(default = "default_title")]
    pub title: String,

    /// Colored terminal tables
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_format() -> OutputFormat {
    OutputFormat::Html
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            group_by_folder: false,
            title: default_title(),
            color: true,
        }
    }
}

impl RenderConfig {
    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            group_by_folder: self.group_by_folder,
            title: self.title.clone(),
            color: self.color,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Differ(String),
    Render(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Differ(msg) => write!(f, "Differ: {}", msg),
            ValidationError::Render(msg) => write!(f, "Render: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl DirtrailConfig {
    /// Validate the entire configuration, collecting every problem
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.differ.backend == DifferBackend::Git && self.differ.git_binary.trim().is_empty() {
            errors.push(ValidationError::Differ(
                "git_binary cannot be empty when the git backend is selected".to_string(),
            ));
        }
        if self.render.title.trim().is_empty() {
            errors.push(ValidationError::Render("title cannot be empty".to_string()));
        }
        if self.logging.output == "file" && self.logging.file.is_none() {
            errors.push(ValidationError::Logging(
                "output 'file' requires logging.file".to_string(),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate, folding every problem into one error
    pub fn check(&self) -> Result<(), ApiError> {
        self.validate().map_err(|errors| {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                msgs.join("\n")
            ))
        })
    }

    /// [`check`](Self::check), passing the configuration through
    pub fn validated(self) -> Result<Self, ApiError> {
        self.check()?;
        Ok(self)
    }

    /// Effective configuration as TOML
    pub fn to_toml(&self) -> Result<String, ApiError> {
        toml::to_string_pretty(self).map_err(|e| ApiError::ConfigError(e.to_string()))
    }
}

/// Loads configuration from the layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, global file, `<project_root>/dirtrail.toml`, environment
    pub fn load(project_root: &Path) -> Result<DirtrailConfig, ConfigError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::project_file::add_to_builder(builder, project_root)?;
        builder
            .add_source(merge::merge_policy::environment())
            .build()?
            .try_deserialize()
    }

    /// Defaults, the given file (required), environment
    pub fn load_from_file(path: &Path) -> Result<DirtrailConfig, ConfigError> {
        merge::merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .add_source(merge::merge_policy::environment())
            .build()?
            .try_deserialize()
    }

    /// Defaults only; ignores files and environment
    pub fn defaults() -> Result<DirtrailConfig, ConfigError> {
        Config::builder()
            .build()?
            .try_deserialize::<DirtrailConfig>()
    }
}
