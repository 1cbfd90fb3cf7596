//! Command-line interface definitions for AutoBuilder.

use autobuilder_core::config::{FailurePolicy, SourceKind};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// AutoBuilder - fluent builder generation for plain data structs
#[derive(Parser, Debug)]
#[command(name = "autobuilder")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to autobuilder.toml configuration file
    #[arg(short, long, global = true, env = "AUTOBUILDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Where type definitions come from (overrides config file)
    #[arg(long, global = true, value_enum)]
    pub source: Option<SourceOfTruth>,

    /// Enable verbose output (-v, -vv, -vvv for increasing verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output path override (overrides config file)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Source of truth for type definitions
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SourceOfTruth {
    /// Rust structs with #[derive(AutoBuilder)]
    Rust,
    /// TOML/JSON descriptor files
    Descriptors,
}

impl From<SourceOfTruth> for SourceKind {
    fn from(source: SourceOfTruth) -> Self {
        match source {
            SourceOfTruth::Rust => SourceKind::Rust,
            SourceOfTruth::Descriptors => SourceKind::Descriptors,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate discovered types and write their builders
    Generate(GenerateArgs),

    /// Check discovered types against the builder rules without writing anything
    Validate(ValidateArgs),

    /// Display discovered types, their eligible fields and builder names
    Info(InfoArgs),

    /// Initialize a new autobuilder.toml configuration file
    Init(InitArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Skip types that violate a rule instead of aborting
    #[arg(long)]
    pub keep_going: bool,

    /// Process types one at a time
    #[arg(long)]
    pub sequential: bool,
}

impl GenerateArgs {
    /// Failure policy override, if the flag was given.
    pub fn failure_policy(&self) -> Option<FailurePolicy> {
        self.keep_going.then_some(FailurePolicy::Continue)
    }
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {}

#[derive(Args, Debug, Clone)]
pub struct InfoArgs {
    /// Print the generated builder models as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(long)]
    pub force: bool,
}
