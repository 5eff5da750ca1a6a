//! CLI route: run context built from configuration; executes one run.

use crate::cli::parse::Cli;
use crate::config::{ConfigLoader, DirtrailConfig};
use crate::differ::build_differ;
use crate::error::ApiError;
use crate::pipeline::consolidate_across_directories;
use crate::render::render;
use std::path::{Path, PathBuf};
use tracing::info;

/// Runtime context for CLI execution: the effective configuration.
pub struct RunContext {
    config: DirtrailConfig,
}

impl RunContext {
    /// Build a context from an already assembled configuration.
    pub fn from_config(config: DirtrailConfig) -> Result<Self, ApiError> {
        Ok(Self {
            config: config.validated()?,
        })
    }

    pub fn config(&self) -> &DirtrailConfig {
        &self.config
    }

    /// Apply CLI flags on top of the loaded configuration, then re-validate.
    pub fn apply_cli(&mut self, cli: &Cli) -> Result<(), ApiError> {
        let config = &mut self.config;
        if cli.no_empty_start {
            config.pipeline.prepend_synthetic_empty = false;
        }
        if cli.parallel {
            config.pipeline.parallel = true;
        }
        if cli.group_by_folder {
            config.render.group_by_folder = true;
        }
        if cli.no_color {
            config.render.color = false;
        }
        if let Some(format) = cli.format {
            config.render.format = format;
        }
        if let Some(backend) = cli.differ {
            config.differ.backend = backend;
        }
        if let Some(ref title) = cli.title {
            config.render.title = title.clone();
        }
        self.config.check()
    }

    /// Run the pipeline over `directories` and render the result.
    pub fn execute(&self, directories: &[PathBuf]) -> Result<String, ApiError> {
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| ApiError::ConfigError(format!("Failed to start async runtime: {}", e)))?;

        let differ = build_differ(&self.config.differ);
        let options = self.config.pipeline.options();
        let table = runtime.block_on(consolidate_across_directories(
            differ,
            directories,
            options,
        ))?;

        info!(
            rows = table.rows.len(),
            format = ?self.config.render.format,
            "Rendering consolidated table"
        );
        render(&table, self.config.render.format, &self.config.render.options())
    }
}

/// Load configuration from an explicit file or the project lookup chain.
pub fn load_config(
    project_root: &Path,
    config_path: Option<&Path>,
) -> Result<DirtrailConfig, ApiError> {
    let config = match config_path {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load(project_root)?,
    };
    Ok(config)
}
