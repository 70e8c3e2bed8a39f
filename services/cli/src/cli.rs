use crate::commands::{
    run_analyze, run_substitutes, run_thresholds, AnalyzeArgs, SubstitutesArgs, ThresholdsArgs,
};
use clap::{Parser, Subcommand};
use nutrilens::config::AppConfig;
use nutrilens::error::AppError;
use nutrilens::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "nutrilens",
    about = "Analyze scanned food products against a personal health profile",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a product payload for a profile and print the result as JSON
    Analyze(AnalyzeArgs),
    /// Print the threshold table merged for the given profile tags
    Thresholds(ThresholdsArgs),
    /// Suggest substitutes for one harmful ingredient
    Substitutes(SubstitutesArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(environment = ?config.environment, "configuration loaded");

    match cli.command {
        Command::Analyze(args) => run_analyze(args, &config),
        Command::Thresholds(args) => run_thresholds(args),
        Command::Substitutes(args) => run_substitutes(args),
    }
}
