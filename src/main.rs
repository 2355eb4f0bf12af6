//! Dosis
//!
//! Command line entry point for the pediatric dosage calculator.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use dosis::config::{self, Config, LogFormat};
use dosis::{report, DosageCalculator, Formulary};

#[derive(Parser)]
#[command(name = "dosis", about = "Pediatric weight-based dosage calculator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Extra settings file layered over config/default and config/<DOSIS_ENV>
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the drugs available for calculation
    List,
    /// Show the reference entry for one drug
    Show { drug: String },
    /// Calculate the dose for a drug and patient weight
    Calc {
        #[arg(long, default_value = "")]
        drug: String,
        /// Weight in kg; `.` or `,` as decimal separator
        #[arg(long, default_value = "")]
        weight: String,
        /// Also print how the dose was reached
        #[arg(long)]
        explain: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(settings: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match settings.log.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

fn main() -> Result<ExitCode> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let settings = config::load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&settings);

    let practice_entries = settings
        .drug_references()
        .context("Invalid drug entry in configuration")?;
    debug!(entries = practice_entries.len(), "Configured formulary entries");
    let formulary = Formulary::standard()
        .with_entries(practice_entries)
        .context("Failed to build formulary")?;
    let calculator = DosageCalculator::new(&formulary);

    match cli.command {
        Commands::List => {
            for drug in formulary.iter() {
                println!("{:<28} {}", drug.id, drug.picker_label());
            }
        }
        Commands::Show { drug } => match formulary.get(&drug) {
            Some(reference) => println!("{}", serde_json::to_string_pretty(reference)?),
            None => {
                eprintln!("{}", dosis::DosageError::unknown_drug(&drug));
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::Calc {
            drug,
            weight,
            explain,
            json,
        } => match calculator.compute_from_input(&drug, &weight) {
            Ok(result) if json => println!("{}", serde_json::to_string_pretty(&result)?),
            Ok(result) => {
                println!("{}", result);
                if explain {
                    println!();
                    println!("{}", report::explain(&result));
                }
            }
            Err(e) => {
                debug!("Calculation rejected: {}", e);
                eprintln!("{}", e);
                return Ok(ExitCode::FAILURE);
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}
