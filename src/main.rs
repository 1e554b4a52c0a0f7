//! Variant prioritization worker main executable.

pub mod analysis;
pub mod common;
pub mod dao;
pub mod filters;
pub mod inheritance;
pub mod model;
pub mod pheno;
pub mod priority;

use clap::{Args, Parser, Subcommand};
use console::Term;

/// CLI parser based on clap.
#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Variant prioritization heavy lifting",
    long_about = "This tool performs the heavy lifting of rare-disease variant prioritization"
)]
struct Cli {
    /// Commonly used arguments
    #[command(flatten)]
    common: common::Args,

    /// The sub command to run
    #[command(subcommand)]
    command: Commands,
}

/// Enum supporting the parsing of top-level commands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Analysis related commands.
    Analyze(Analyze),
}

/// Parsing of "analyze *" sub commands.
#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
struct Analyze {
    /// The sub command to run
    #[command(subcommand)]
    command: AnalyzeCommands,
}

/// Enum supporting the parsing of "analyze *" sub commands.
#[derive(Debug, Subcommand)]
enum AnalyzeCommands {
    Run(analysis::Args),
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Build a tracing subscriber according to the configuration in `cli.common`.
    let collector = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(match cli.common.verbose.log_level() {
            Some(level) => match level {
                log::Level::Error => tracing::Level::ERROR,
                log::Level::Warn => tracing::Level::WARN,
                log::Level::Info => tracing::Level::INFO,
                log::Level::Debug => tracing::Level::DEBUG,
                log::Level::Trace => tracing::Level::TRACE,
            },
            None => tracing::Level::INFO,
        })
        .compact()
        .finish();

    // Install collector and go into sub commands.
    let term = Term::stderr();
    tracing::subscriber::with_default(collector, || {
        match &cli.command {
            Commands::Analyze(analyze) => match &analyze.command {
                AnalyzeCommands::Run(args) => {
                    analysis::run(&cli.common, args)?;
                }
            },
        }

        Ok::<(), anyhow::Error>(())
    })?;
    term.write_line("All done. Have a nice day!")?;

    Ok(())
}
