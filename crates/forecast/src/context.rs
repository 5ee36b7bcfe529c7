//! The loaded-artifact context serving interactive requests.
//!
//! One [`ForecastContext`] is built per session from persisted artifacts and
//! then only read. Construction validates that every product has a model, so
//! a gap in the artifact set is caught at startup rather than at first use.

use std::collections::BTreeMap;

use crumbcast_core::{ForecastError, ForecastResult, Product};

use crate::averages::AverageTable;
use crate::encoder::Vocabulary;
use crate::recommend::{should_discount, Recommendation, RecommendPolicy};
use crate::trainer::{ProductModel, TrainedArtifacts};

/// Read-only bundle of everything the prediction side needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastContext {
    day_vocab: Vocabulary,
    weather_vocab: Vocabulary,
    models: BTreeMap<Product, ProductModel>,
    averages: AverageTable,
}

impl ForecastContext {
    /// Assemble a context, failing with [`ForecastError::MissingArtifact`]
    /// when any product lacks a model.
    pub fn new(
        day_vocab: Vocabulary,
        weather_vocab: Vocabulary,
        models: BTreeMap<Product, ProductModel>,
        averages: AverageTable,
    ) -> ForecastResult<Self> {
        for product in Product::ALL {
            if !models.contains_key(&product) {
                return Err(ForecastError::missing_artifact(format!(
                    "model for {}",
                    product.id()
                )));
            }
        }
        Ok(Self {
            day_vocab,
            weather_vocab,
            models,
            averages,
        })
    }

    /// Build a context straight from a training run (no persistence hop).
    pub fn from_artifacts(artifacts: TrainedArtifacts) -> ForecastResult<Self> {
        Self::new(
            artifacts.day_vocab,
            artifacts.weather_vocab,
            artifacts.models,
            artifacts.averages,
        )
    }

    /// Known day labels, for shells populating a selector.
    pub fn day_labels(&self) -> &[String] {
        self.day_vocab.labels()
    }

    /// Known weather labels.
    pub fn weather_labels(&self) -> &[String] {
        self.weather_vocab.labels()
    }

    pub fn averages(&self) -> &AverageTable {
        &self.averages
    }

    /// Predict demand for one product: encode → scale → network → unscale,
    /// truncated to integer units.
    pub fn predict(&self, product: Product, day: &str, weather: &str) -> ForecastResult<i64> {
        let features = self.encode(day, weather)?;
        // Validated at construction: every product has a model.
        let model = self
            .models
            .get(&product)
            .ok_or_else(|| ForecastError::missing_artifact(format!("model for {}", product.id())))?;
        Ok(model.predict(&features).trunc() as i64)
    }

    /// Run the recommendation rule over every product for one (day, weather).
    ///
    /// Always returns one entry per product; callers filter on `discount`.
    /// A missing average cell reads as zero, which never triggers a discount.
    pub fn recommend_all(
        &self,
        day: &str,
        weather: &str,
        policy: &RecommendPolicy,
    ) -> ForecastResult<Vec<Recommendation>> {
        let features = self.encode(day, weather)?;

        let mut recommendations = Vec::with_capacity(Product::ALL.len());
        for product in Product::ALL {
            let model = self.models.get(&product).ok_or_else(|| {
                ForecastError::missing_artifact(format!("model for {}", product.id()))
            })?;
            let predicted = model.predict(&features).trunc() as i64;

            let stats = self.averages.get(product, day);
            let historical_average = stats.map_or(0.0, |s| s.mean);
            let enough_samples = stats.is_some_and(|s| s.samples >= policy.min_samples);
            let discount = enough_samples
                && should_discount(predicted as f64, historical_average, policy.threshold_ratio);

            recommendations.push(Recommendation {
                product,
                predicted,
                historical_average: historical_average as i64,
                discount,
            });
        }
        Ok(recommendations)
    }

    fn encode(&self, day: &str, weather: &str) -> ForecastResult<Vec<f64>> {
        let day_code = self.day_vocab.encode(day)?;
        let weather_code = self.weather_vocab.encode(weather)?;
        Ok(vec![day_code as f64, weather_code as f64])
    }
}
