//! Init command - writes a default autobuilder.toml.

use crate::cli::{Cli, InitArgs};
use autobuilder_core::config::CONFIG_FILE_NAME;
use autobuilder_core::error::Result;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info};

const DEFAULT_CONFIG: &str = r#"# AutoBuilder Configuration

[general]
# Derive names that mark a struct for builder generation.
# #[derive(AutoBuilder)] already emits the builder inline. Do not include!
# a generated file for a type that also derives AutoBuilder, or the builder
# is defined twice. List a separate marker here to generate files only.
markers = ["AutoBuilder"]
# "rust" scans source files, "descriptors" reads TOML/JSON descriptor files
source = "rust"

[source]
scan_path = "."
descriptor_path = "./descriptors"

[output]
# Supports ${VAR} and ${VAR:-default}
path = "./src/generated/"

[driver]
# "abort" writes nothing when a type violates a rule, "continue" skips it
failure_policy = "abort"
parallel = true
"#;

/// Runs the init command.
pub fn run(cli: &Cli, args: InitArgs) -> Result<ExitCode> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| Path::new(CONFIG_FILE_NAME).to_path_buf());

    if config_path.exists() && !args.force {
        error!("{} already exists. Use --force to overwrite.", config_path.display());
        return Ok(ExitCode::FAILURE);
    }

    fs::write(&config_path, DEFAULT_CONFIG)?;
    info!("Created {}", config_path.display());

    info!("AutoBuilder initialized successfully!");
    info!("Next steps:");
    info!("  1. Edit {} to configure your project", CONFIG_FILE_NAME);
    info!("  2. Add #[derive(AutoBuilder)] to your Rust structs");
    info!("  3. Run 'autobuilder generate' to write the builders");

    Ok(ExitCode::SUCCESS)
}
