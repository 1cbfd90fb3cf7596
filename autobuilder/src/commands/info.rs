//! Info command - displays discovered types and the builders they would get.

use super::load_build_config;
use crate::cli::{Cli, InfoArgs};
use autobuilder_core::error::Result;
use autobuilder_core::selector::FieldSelector;
use autobuilder_core::tooling::{BuilderGenerator, builder_file_name};
use std::process::ExitCode;

/// Runs the info command.
pub fn run(cli: &Cli, args: InfoArgs) -> Result<ExitCode> {
    let generator = BuilderGenerator::new(load_build_config(cli)?);
    let types = generator.discover()?;
    let synthesized = generator.synthesize_all(&types);

    if args.json {
        let sources: Vec<_> = synthesized
            .iter()
            .filter_map(|result| result.outcome.as_ref().ok())
            .collect();
        println!("{}", serde_json::to_string_pretty(&sources)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("\n=== Configuration ===\n");
    let config = generator.config();
    println!("Source:         {:?}", config.source);
    println!("Scan Path:      {}", config.scan_path.display());
    println!("Output Path:    {}", config.output_path.display());
    println!("Failure Policy: {:?}", config.failure_policy);

    println!("\n=== Types ({}) ===", types.len());
    for (ty, result) in types.iter().zip(&synthesized) {
        println!("\n{} ({})", ty.descriptor.name, ty.origin.display());
        for field in &ty.descriptor.fields {
            match FieldSelector::exclusion_reason(field) {
                None => println!("  + {}: {}", field.name, field.ty),
                Some(reason) => println!("  - {}: {} ({})", field.name, field.ty, reason),
            }
        }
        match &result.outcome {
            Ok(source) => println!(
                "  builder: {} -> {}",
                source.name,
                builder_file_name(&source.name)
            ),
            Err(violation) => println!("  rejected: {}", violation),
        }
    }

    Ok(ExitCode::SUCCESS)
}
