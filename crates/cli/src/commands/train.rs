//! The offline training step: CSV in, artifact directory out.

use anyhow::Context;

use crumbcast_dataset::SalesHistory;
use crumbcast_forecast::{train_all, TrainConfig};
use crumbcast_store::ArtifactStore;

use crate::TrainArgs;

pub fn run(args: TrainArgs) -> anyhow::Result<()> {
    let history = SalesHistory::from_csv_path(&args.data)
        .with_context(|| format!("loading sales history from {}", args.data.display()))?;
    tracing::info!(rows = history.len(), data = %args.data.display(), "loaded sales history");

    let defaults = TrainConfig::default();
    let config = TrainConfig {
        seed: args.seed.unwrap_or(defaults.seed),
        epochs: args.epochs.unwrap_or(defaults.epochs),
        batch_size: args.batch_size.unwrap_or(defaults.batch_size),
        learning_rate: args.learning_rate.unwrap_or(defaults.learning_rate),
        min_rows: args.min_rows.unwrap_or(defaults.min_rows),
        validation_split: args.validation_split.or(defaults.validation_split),
        patience: args.patience.unwrap_or(defaults.patience),
        ..defaults
    };

    let artifacts = train_all(&history, &config).context("training failed")?;
    ArtifactStore::new(&args.models)
        .save(&artifacts)
        .context("persisting artifacts")?;

    println!(
        "Training complete: {} models saved to {}",
        artifacts.models.len(),
        args.models.display()
    );
    Ok(())
}
