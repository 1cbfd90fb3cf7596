//! Validate command - checks discovered types against the builder rules.

use super::load_build_config;
use crate::cli::{Cli, ValidateArgs};
use autobuilder_core::error::Result;
use autobuilder_core::tooling::BuilderGenerator;
use std::process::ExitCode;
use tracing::{error, info, warn};

/// Runs the validate command.
pub fn run(cli: &Cli, _args: ValidateArgs) -> Result<ExitCode> {
    info!("Validating AutoBuilder types");

    let generator = BuilderGenerator::new(load_build_config(cli)?);
    let types = generator.discover()?;
    if types.is_empty() {
        warn!("No AutoBuilder types found");
    }

    let violations = generator.check(&types);
    for violation in &violations {
        error!("  [{}] {}", violation.rule, violation);
        println!("{}: {}", violation.type_name, violation);
    }

    if violations.is_empty() {
        info!("Validation passed: {} types OK", types.len());
        Ok(ExitCode::SUCCESS)
    } else {
        error!(
            "Validation failed: {} of {} types violate a rule",
            violations.len(),
            types.len()
        );
        Ok(ExitCode::FAILURE)
    }
}
