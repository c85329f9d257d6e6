//! Firewatch CLI - dispatch lookups over the resident / station / medical record store
//!
//! # Usage
//!
//! ```bash
//! firewatch alert child "1509 Culver St"
//! firewatch alert flood 1,2
//! firewatch --output-format json alert fire "1509 Culver St"
//! firewatch station covered 3
//! firewatch resident add --json '{"firstName":"Ann", ...}'
//! firewatch --no-reset medical delete Ann Boyd
//! ```

mod commands;
mod context;
mod output;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use commands::{
    alert::AlertCommand, medical::MedicalCommand, resident::ResidentCommand,
    station::StationCommand,
};
use context::{CliContext, Overrides};
use firewatch::FirewatchResult;
use output::{OutputFormat, OutputFormatter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "firewatch")]
#[command(version)]
#[command(about = "Firewatch - resident, station and medical record lookups for dispatchers", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Working data file (overrides configuration)
    #[arg(long, global = true, value_name = "FILE", env = "FIREWATCH_DATA_FILE")]
    data_file: Option<PathBuf>,

    /// Seed document (overrides configuration)
    #[arg(long, global = true, value_name = "FILE", env = "FIREWATCH_SEED_FILE")]
    seed_file: Option<PathBuf>,

    /// Keep the working file instead of re-copying the seed
    #[arg(long, global = true)]
    no_reset: bool,

    /// Compute ages as of this date (YYYY-MM-DD) instead of today
    #[arg(long, global = true, value_name = "DATE")]
    reference_date: Option<NaiveDate>,

    /// Output format (table, json, plain)
    #[arg(short, long, global = true, default_value = "table")]
    output_format: String,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Dispatch queries
    Alert {
        #[command(subcommand)]
        command: AlertCommand,
    },

    /// Resident management
    Resident {
        #[command(subcommand)]
        command: ResidentCommand,
    },

    /// Station coverage management
    Station {
        #[command(subcommand)]
        command: StationCommand,
    },

    /// Medical record management
    Medical {
        #[command(subcommand)]
        command: MedicalCommand,
    },
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let filter = if verbose {
        EnvFilter::new("firewatch=debug")
    } else {
        EnvFilter::from_default_env().add_directive("firewatch=info".parse()?)
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(ctx: &mut CliContext, command: Commands) -> FirewatchResult<()> {
    match command {
        Commands::Alert { command } => commands::alert::execute(ctx, command),
        Commands::Resident { command } => commands::resident::execute(ctx, command),
        Commands::Station { command } => commands::station::execute(ctx, command),
        Commands::Medical { command } => commands::medical::execute(ctx, command),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose).context("Failed to initialise logging")?;

    let output_format: OutputFormat = cli.output_format.parse().unwrap_or_else(|e| {
        eprintln!("Warning: {}. Using table format.", e);
        OutputFormat::Table
    });

    let overrides = Overrides {
        data_file: cli.data_file,
        seed_file: cli.seed_file,
        no_reset: cli.no_reset,
    };
    let mut ctx =
        CliContext::new(cli.config, &overrides).context("Error loading configuration")?;
    ctx.output_format = output_format;
    ctx.reference_date = cli.reference_date;

    if let Err(err) = run(&mut ctx, cli.command) {
        OutputFormatter::new(output_format).failure(&err);
        std::process::exit(1);
    }
    Ok(())
}
