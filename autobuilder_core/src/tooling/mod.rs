//! Build-time tooling for discovering types and writing their builders.
//!
//! This module provides utilities for:
//! - Scanning Rust workspaces for structs carrying a builder marker derive
//! - Loading type descriptors from TOML/JSON files
//! - Writing one builder source file per type from a build.rs file
//!
//! ## Quick Start (in build.rs)
//!
//! ```rust,ignore
//! fn main() {
//!     autobuilder_core::tooling::generate().expect("Builder generation failed");
//!     println!("cargo:rerun-if-changed=src/");
//!     println!("cargo:rerun-if-changed=autobuilder.toml");
//! }
//! ```

mod build_config;
mod descriptor_loader;
mod generator;
mod workspace_scanner;

pub use build_config::*;
pub use descriptor_loader::*;
pub use generator::*;
pub use workspace_scanner::*;

use crate::descriptor::TypeDescriptor;
use crate::error::AutobuilderError;
use std::path::PathBuf;

/// A descriptor together with the file it was found in.
#[derive(Debug, Clone)]
pub struct DiscoveredType {
    pub descriptor: TypeDescriptor,
    pub origin: PathBuf,
}

/// Generates every builder using configuration from autobuilder.toml.
///
/// Reads `autobuilder.toml` (searching from `CARGO_MANIFEST_DIR` upward) and
/// writes one builder file per discovered type.
///
/// # Errors
///
/// Returns `AutobuilderError` if:
/// - Configuration file cannot be found or parsed
/// - Source files cannot be read
/// - A type violates a rule under the abort policy
/// - Output files cannot be written
pub fn generate() -> Result<GenerationReport, AutobuilderError> {
    let config = BuildConfig::from_toml()?;
    BuilderGenerator::new(config).generate_all()
}

/// Generates builders with a custom configuration.
pub fn generate_with_config(config: BuildConfig) -> Result<GenerationReport, AutobuilderError> {
    BuilderGenerator::new(config).generate_all()
}
