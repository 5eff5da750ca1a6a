//! Layered configuration: project file, explicit file, environment

use super::test_utils::with_env;
use dirtrail::config::{ConfigLoader, DirtrailConfig, PROJECT_CONFIG_FILE};
use dirtrail::differ::DifferBackend;
use dirtrail::render::OutputFormat;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_defaults_without_any_file() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("project");
    fs::create_dir_all(&project).unwrap();

    let config = with_env(&temp, &[], || ConfigLoader::load(&project)).unwrap();
    assert_eq!(config, DirtrailConfig::default());
}

#[test]
fn test_project_file_overrides_defaults() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("project");
    fs::create_dir_all(&project).unwrap();
    fs::write(
        project.join(PROJECT_CONFIG_FILE),
        r#"
[differ]
backend = "walk"

[render]
format = "json"
group_by_folder = true
"#,
    )
    .unwrap();

    let config = with_env(&temp, &[], || ConfigLoader::load(&project)).unwrap();
    assert_eq!(config.differ.backend, DifferBackend::Walk);
    assert_eq!(config.render.format, OutputFormat::Json);
    assert!(config.render.group_by_folder);
    assert!(config.pipeline.prepend_synthetic_empty);
}

#[test]
fn test_environment_overrides_project_file() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("project");
    fs::create_dir_all(&project).unwrap();
    fs::write(
        project.join(PROJECT_CONFIG_FILE),
        "[differ]\nbackend = \"walk\"\n",
    )
    .unwrap();

    let config = with_env(
        &temp,
        &[
            ("DIRTRAIL__DIFFER__BACKEND", "git"),
            ("DIRTRAIL__PIPELINE__PARALLEL", "true"),
        ],
        || ConfigLoader::load(&project),
    )
    .unwrap();
    assert_eq!(config.differ.backend, DifferBackend::Git);
    assert!(config.pipeline.parallel);
}

#[test]
fn test_global_file_is_read_from_xdg_config_home() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("project");
    fs::create_dir_all(&project).unwrap();

    let config = with_env(&temp, &[], || {
        // Only meaningful where the platform resolves global config under XDG_CONFIG_HOME.
        let Some(path) = dirtrail::config::global_config_path() else {
            return ConfigLoader::load(&project);
        };
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[render]\ntitle = \"Release history\"\n").unwrap();
        ConfigLoader::load(&project)
    })
    .unwrap();

    if cfg!(target_os = "linux") {
        assert_eq!(config.render.title, "Release history");
    }
}

#[test]
fn test_explicit_file_must_exist() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.toml");
    let result = with_env(&temp, &[], || ConfigLoader::load_from_file(&missing));
    assert!(result.is_err());
}

#[test]
fn test_invalid_backend_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("custom.toml");
    fs::write(&file, "[differ]\nbackend = \"svn\"\n").unwrap();

    let result = with_env(&temp, &[], || ConfigLoader::load_from_file(&file));
    assert!(result.is_err());
}
