//! Merge rules: defaults, override order, environment layer.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment};

/// Prefix of environment overrides, e.g. `DIRTRAIL__DIFFER__BACKEND=walk`
pub const ENV_PREFIX: &str = "DIRTRAIL";

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("differ.backend", "git")?
        .set_default("differ.git_binary", "git")?
        .set_default("differ.ignore", vec![".git".to_string()])?
        .set_default("pipeline.prepend_synthetic_empty", true)?
        .set_default("pipeline.parallel", false)?
        .set_default("render.format", "html")?
        .set_default("render.group_by_folder", false)?
        .set_default("render.title", crate::render::DEFAULT_TITLE)?
        .set_default("render.color", true)
}

/// Environment layer; applied last so it overrides every file.
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
