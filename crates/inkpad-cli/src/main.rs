//! Inkpad document tool.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command};
use crate::commands::{run_convert, run_info};

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let result = match &cli.command {
        Command::Info(args) => run_info(args),
        Command::Convert(args) => run_convert(args),
    };

    if let Err(error) = result {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

fn init_logging(cli: &Cli) {
    let filter = EnvFilter::builder()
        .with_default_directive(cli.verbosity.tracing_level_filter().into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
