//! Command handlers for the AutoBuilder CLI.

pub mod generate;
pub mod info;
pub mod init;
pub mod validate;

use crate::cli::Cli;
use autobuilder_core::config::{AutobuilderConfig, CONFIG_FILE_NAME};
use autobuilder_core::error::Result;
use autobuilder_core::tooling::BuildConfig;
use std::env;
use tracing::{debug, warn};

/// Resolves the build configuration from `--config`, a discovered
/// autobuilder.toml, or defaults, then applies command-line overrides.
pub fn load_build_config(cli: &Cli) -> Result<BuildConfig> {
    dotenv::dotenv().ok();

    let mut config = match &cli.config {
        Some(path) => BuildConfig::from_toml_path(path)?,
        None => match AutobuilderConfig::find_config_file(&env::current_dir()?) {
            Ok(path) => {
                debug!("Using configuration at {:?}", path);
                BuildConfig::from_toml_path(path)?
            }
            Err(_) => {
                warn!("No {} found, using defaults", CONFIG_FILE_NAME);
                BuildConfig::default()
            }
        },
    };

    if let Some(source) = cli.source {
        config.source = source.into();
    }
    if let Some(output) = &cli.output {
        config.output_path = output.clone();
    }

    Ok(config)
}
