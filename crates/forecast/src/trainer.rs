//! Offline training step.
//!
//! Fits both vocabularies, trains one regressor per product on the encoded
//! and standardized rows, and computes the historical average table. The
//! output is a [`TrainedArtifacts`] bundle that the store persists and the
//! interactive side loads read-only.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crumbcast_core::{ForecastError, ForecastResult, Product};
use crumbcast_dataset::SalesHistory;

use crate::averages::AverageTable;
use crate::encoder::Vocabulary;
use crate::network::Network;
use crate::scaler::StandardScaler;

/// Training hyperparameters.
///
/// Defaults mirror the original setup (two hidden layers of 8 and 4 units,
/// 40 epochs, batch size 8). The seed is fixed by default so a rerun over
/// identical data reproduces every artifact byte-for-byte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub hidden: [usize; 2],
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub seed: u64,
    /// Minimum usable rows per product; below this training fails with
    /// `InsufficientData` instead of fitting a degenerate model.
    pub min_rows: usize,
    /// Fraction of rows held out for early stopping. `None` disables it.
    pub validation_split: Option<f64>,
    /// Non-improving validation epochs tolerated before stopping.
    pub patience: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            hidden: [8, 4],
            epochs: 40,
            batch_size: 8,
            learning_rate: 0.01,
            seed: 42,
            min_rows: 10,
            validation_split: None,
            patience: 5,
        }
    }
}

/// One product's trained regressor plus the scaler states it was fitted with.
///
/// Created by training, loaded read-only at inference time, never mutated
/// in place. Prediction always routes through the persisted scaler states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductModel {
    product: Product,
    network: Network,
    input_scaler: StandardScaler,
    output_scaler: StandardScaler,
}

impl ProductModel {
    pub fn product(&self) -> Product {
        self.product
    }

    /// Predict the quantity (original units) for one encoded feature vector.
    pub fn predict(&self, features: &[f64]) -> f64 {
        let scaled_in = self.input_scaler.transform(features);
        let scaled_out = self.network.forward(&scaled_in);
        self.output_scaler.inverse_one(scaled_out)
    }
}

/// Everything the offline step produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedArtifacts {
    pub day_vocab: Vocabulary,
    pub weather_vocab: Vocabulary,
    pub models: BTreeMap<Product, ProductModel>,
    pub averages: AverageTable,
}

/// Train the full artifact set from a loaded sales history.
///
/// Rows whose quantity cell was missing are dropped per product; a product
/// left with fewer than `min_rows` usable rows aborts the run with
/// [`ForecastError::InsufficientData`].
pub fn train_all(history: &SalesHistory, config: &TrainConfig) -> ForecastResult<TrainedArtifacts> {
    let day_vocab = Vocabulary::fit("day", history.day_labels());
    let weather_vocab = Vocabulary::fit("weather", history.weather_labels());
    let averages = AverageTable::compute(history);

    let mut models = BTreeMap::new();
    let total = Product::ALL.len();
    for (idx, product) in Product::ALL.into_iter().enumerate() {
        let mut features = Vec::new();
        let mut targets = Vec::new();
        for record in history.records() {
            let Some(quantity) = record.quantity(product) else {
                continue;
            };
            let day = day_vocab.encode(&record.day)?;
            let weather = weather_vocab.encode(&record.weather)?;
            features.push(vec![day as f64, weather as f64]);
            targets.push(quantity);
        }

        // Per-product seed offset keeps models independent while the
        // whole run stays reproducible.
        let seed = config.seed.wrapping_add(idx as u64);
        let model = train_product(product, features, targets, config, seed)?;
        tracing::info!(
            product = %product,
            trained = idx + 1,
            total,
            "trained demand model"
        );
        models.insert(product, model);
    }

    Ok(TrainedArtifacts {
        day_vocab,
        weather_vocab,
        models,
        averages,
    })
}

/// Fit one product's scalers and network.
fn train_product(
    product: Product,
    features: Vec<Vec<f64>>,
    targets: Vec<f64>,
    config: &TrainConfig,
    seed: u64,
) -> ForecastResult<ProductModel> {
    let rows = features.len();
    if rows < config.min_rows {
        return Err(ForecastError::insufficient_data(
            product,
            rows,
            config.min_rows,
        ));
    }

    let input_scaler = StandardScaler::fit(&features);
    let output_scaler = StandardScaler::fit_column(&targets);

    let xs: Vec<Vec<f64>> = features.iter().map(|row| input_scaler.transform(row)).collect();
    let ys: Vec<f64> = targets
        .iter()
        .map(|y| output_scaler.transform_one(*y))
        .collect();

    let mut rng = StdRng::seed_from_u64(seed);
    let sizes = [
        input_scaler.features(),
        config.hidden[0],
        config.hidden[1],
        1,
    ];
    let mut network = Network::new(&sizes, &mut rng);

    // Optional held-out split for early stopping. Too few rows for a
    // meaningful split falls back to plain fixed-epoch training.
    let mut indices: Vec<usize> = (0..rows).collect();
    let validation_rows = match config.validation_split {
        Some(frac) if frac > 0.0 && frac < 1.0 => {
            let n = ((rows as f64) * frac).round() as usize;
            if n >= 1 && rows - n >= 2 {
                indices.shuffle(&mut rng);
                n
            } else {
                0
            }
        }
        _ => 0,
    };
    let (validation_idx, train_idx) = indices.split_at(validation_rows);
    let mut train_idx: Vec<usize> = train_idx.to_vec();

    let validation: Vec<(&[f64], f64)> = validation_idx
        .iter()
        .map(|&i| (xs[i].as_slice(), ys[i]))
        .collect();

    let mut best: Option<(Network, f64)> = None;
    let mut stale_epochs = 0usize;

    for epoch in 0..config.epochs {
        train_idx.shuffle(&mut rng);
        for chunk in train_idx.chunks(config.batch_size.max(1)) {
            let batch: Vec<(&[f64], f64)> =
                chunk.iter().map(|&i| (xs[i].as_slice(), ys[i])).collect();
            network.train_batch(&batch, config.learning_rate);
        }

        if validation.is_empty() {
            continue;
        }
        let val_mse = network.mse(&validation);
        match &best {
            Some((_, best_mse)) if val_mse >= *best_mse => {
                stale_epochs += 1;
                if stale_epochs >= config.patience {
                    tracing::debug!(product = %product, epoch, val_mse, "early stop");
                    break;
                }
            }
            _ => {
                best = Some((network.clone(), val_mse));
                stale_epochs = 0;
            }
        }
    }

    // Restore the best validation weights when early stopping was active.
    if let Some((best_network, _)) = best {
        network = best_network;
    }

    let train_data: Vec<(&[f64], f64)> = train_idx
        .iter()
        .map(|&i| (xs[i].as_slice(), ys[i]))
        .collect();
    tracing::debug!(
        product = %product,
        rows,
        train_mse = network.mse(&train_data),
        "finished product training"
    );

    Ok(ProductModel {
        product,
        network,
        input_scaler,
        output_scaler,
    })
}
