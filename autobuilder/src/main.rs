mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands, GenerateArgs};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

fn init_tracing(cli: &Cli) {
    // RUST_LOG wins over -v / -q
    let default_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(cli.verbose > 1)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);
    debug!("Parsed arguments: {:?}", cli);

    let result = match cli.command.clone() {
        Some(Commands::Generate(args)) => commands::generate::run(&cli, args),
        Some(Commands::Validate(args)) => commands::validate::run(&cli, args),
        Some(Commands::Info(args)) => commands::info::run(&cli, args),
        Some(Commands::Init(args)) => commands::init::run(&cli, args),
        None => commands::generate::run(&cli, GenerateArgs::default()),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
