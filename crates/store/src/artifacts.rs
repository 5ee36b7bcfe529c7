//! JSON artifact files in a models directory.
//!
//! Layout (one file per artifact, mirroring the original's per-object
//! dumps):
//!
//! ```text
//! models/
//!   day_vocabulary.json
//!   weather_vocabulary.json
//!   averages.json
//!   model_<product-id>.json    one per product (network + both scalers)
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crumbcast_core::{ForecastError, Product};
use crumbcast_forecast::{AverageTable, ForecastContext, ProductModel, TrainedArtifacts, Vocabulary};

const DAY_VOCAB_FILE: &str = "day_vocabulary.json";
const WEATHER_VOCAB_FILE: &str = "weather_vocabulary.json";
const AVERAGES_FILE: &str = "averages.json";

#[derive(Debug, Error)]
pub enum StoreError {
    /// A required artifact file does not exist (or the set is incomplete).
    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error("artifact I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("artifact {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Reads and writes the artifact directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn model_file(product: Product) -> String {
        format!("model_{}.json", product.id())
    }

    /// Persist a full training run. Creates the directory if needed and
    /// overwrites any previous run's files.
    pub fn save(&self, artifacts: &TrainedArtifacts) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        self.write_json(DAY_VOCAB_FILE, &artifacts.day_vocab)?;
        self.write_json(WEATHER_VOCAB_FILE, &artifacts.weather_vocab)?;
        self.write_json(AVERAGES_FILE, &artifacts.averages)?;
        for (product, model) in &artifacts.models {
            self.write_json(&Self::model_file(*product), model)?;
        }
        tracing::info!(dir = %self.dir.display(), "saved training artifacts");
        Ok(())
    }

    /// Load every artifact and assemble a validated [`ForecastContext`].
    ///
    /// A missing file surfaces as [`ForecastError::MissingArtifact`] naming
    /// the file, so shells can direct the user to the training step.
    pub fn load(&self) -> Result<ForecastContext, StoreError> {
        let day_vocab: Vocabulary = self.read_json(DAY_VOCAB_FILE)?;
        let weather_vocab: Vocabulary = self.read_json(WEATHER_VOCAB_FILE)?;
        let averages: AverageTable = self.read_json(AVERAGES_FILE)?;

        let mut models = BTreeMap::new();
        for product in Product::ALL {
            let model: ProductModel = self.read_json(&Self::model_file(product))?;
            models.insert(product, model);
        }

        Ok(ForecastContext::new(
            day_vocab,
            weather_vocab,
            models,
            averages,
        )?)
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<(), StoreError> {
        let path = self.dir.join(name);
        let json = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, json).map_err(|source| StoreError::Io { path, source })
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<T, StoreError> {
        let path = self.dir.join(name);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(source) if source.kind() == ErrorKind::NotFound => {
                return Err(ForecastError::missing_artifact(path.display().to_string()).into());
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Json { path, source })
    }
}
