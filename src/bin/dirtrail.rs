//! dirtrail CLI Binary
//!
//! Renders the consolidated change table for an ordered list of snapshots.

use clap::Parser;
use dirtrail::cli::{load_config, map_error, write_output, Cli, RunContext};
use dirtrail::config::DirtrailConfig;
use dirtrail::error::ApiError;
use dirtrail::logging::{init_logging, LoggingConfig};
use std::path::Path;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let config = match load_config(Path::new("."), cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    let logging_config = build_logging_config(&cli, &config);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("dirtrail starting");

    match run(&cli, config) {
        Ok(()) => info!("Run completed successfully"),
        Err(e) => {
            error!("Run failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

fn run(cli: &Cli, config: DirtrailConfig) -> Result<(), ApiError> {
    let mut context = RunContext::from_config(config)?;
    context.apply_cli(cli)?;

    if cli.print_config {
        return write_output(&context.config().to_toml()?, None);
    }

    let rendered = context.execute(&cli.directories)?;
    write_output(&rendered, cli.output.as_deref())
}

/// Build logging configuration from the loaded config and CLI flags.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, config: &DirtrailConfig) -> LoggingConfig {
    let mut logging = config.logging.clone();

    if cli.quiet {
        logging.enabled = false;
    }
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }
    if let Some(ref file) = cli.log_file {
        logging.file = Some(file.clone());
        logging.output = "file".to_string();
    }

    logging
}
