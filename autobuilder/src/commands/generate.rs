//! Generate command - validates discovered types and writes their builders.

use super::load_build_config;
use crate::cli::{Cli, GenerateArgs};
use autobuilder_core::error::Result;
use autobuilder_core::tooling::BuilderGenerator;
use std::process::ExitCode;
use tracing::{info, warn};

/// Runs the generate command.
pub fn run(cli: &Cli, args: GenerateArgs) -> Result<ExitCode> {
    let mut config = load_build_config(cli)?;
    if let Some(policy) = args.failure_policy() {
        config.failure_policy = policy;
    }
    if args.sequential {
        config.parallel = false;
    }

    let report = BuilderGenerator::new(config).generate_all()?;

    for file in &report.files {
        info!("  {} -> {} ({} bytes)", file.builder, file.path.display(), file.bytes_written);
    }
    for violation in &report.violations {
        warn!("  skipped {}: {}", violation.type_name, violation);
    }
    info!(
        "Processed {} types, wrote {} builders",
        report.types_processed,
        report.files.len()
    );

    Ok(if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
