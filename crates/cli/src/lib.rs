//! `crumbcast-cli`
//!
//! Presentation shell for the bakery demand forecaster. The original
//! application drove training, prediction, and offer analysis from a menu;
//! here each workflow is a subcommand over the same two core entry points.

pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "crumbcast",
    about = "Bakery demand forecasting and discount suggestions",
    after_help = "Examples:\n  crumbcast train --data pankira.csv --models models\n  crumbcast predict --models models --product pan-canilla --day Lunes --weather Soleado\n  crumbcast recommend --models models --day Lunes --weather Soleado"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Train per-product models from a sales history CSV and persist artifacts")]
    Train(TrainArgs),
    #[command(about = "Predict demand for one product on a given day and weather")]
    Predict(PredictArgs),
    #[command(about = "Compare predictions to historical averages and suggest discounts")]
    Recommend(RecommendArgs),
}

#[derive(Debug, clap::Args)]
pub struct TrainArgs {
    #[arg(long, help = "Sales history CSV")]
    pub data: PathBuf,
    #[arg(long, default_value = "models", help = "Artifact directory")]
    pub models: PathBuf,
    #[arg(long, help = "Training seed (fixed default keeps runs reproducible)")]
    pub seed: Option<u64>,
    #[arg(long, help = "Training epochs")]
    pub epochs: Option<usize>,
    #[arg(long, help = "Mini-batch size")]
    pub batch_size: Option<usize>,
    #[arg(long, help = "Gradient-descent learning rate")]
    pub learning_rate: Option<f64>,
    #[arg(long, help = "Minimum usable rows per product")]
    pub min_rows: Option<usize>,
    #[arg(long, help = "Held-out fraction for early stopping (e.g. 0.2)")]
    pub validation_split: Option<f64>,
    #[arg(long, help = "Non-improving epochs tolerated before early stop")]
    pub patience: Option<usize>,
}

#[derive(Debug, clap::Args)]
pub struct PredictArgs {
    #[arg(long, default_value = "models", help = "Artifact directory")]
    pub models: PathBuf,
    #[arg(long, help = "Product id, e.g. pan-canilla")]
    pub product: String,
    #[arg(long, help = "Day-of-week label as it appears in the training data")]
    pub day: String,
    #[arg(long, help = "Weather label as it appears in the training data")]
    pub weather: String,
}

#[derive(Debug, clap::Args)]
pub struct RecommendArgs {
    #[arg(long, default_value = "models", help = "Artifact directory")]
    pub models: PathBuf,
    #[arg(long, help = "Day-of-week label")]
    pub day: String,
    #[arg(long, help = "Weather label")]
    pub weather: String,
    #[arg(long, default_value_t = crumbcast_forecast::DEFAULT_THRESHOLD_RATIO,
          help = "Discount when prediction < average * threshold")]
    pub threshold: f64,
    #[arg(long, default_value_t = 1,
          help = "Ignore averages backed by fewer observations than this")]
    pub min_samples: usize,
    #[arg(long, help = "Emit machine-readable JSON output")]
    pub json: bool,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Train(args) => commands::train::run(args),
        Command::Predict(args) => commands::predict::run(args),
        Command::Recommend(args) => commands::recommend::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
