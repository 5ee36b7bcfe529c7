//! Domain error model.

use thiserror::Error;

use crate::product::Product;

/// Result type used across the forecasting pipeline.
pub type ForecastResult<T> = Result<T, ForecastError>;

/// Pipeline-level error.
///
/// Every failure here is deterministic; nothing is transient and nothing is
/// retried. Shells translate these into user-facing messages.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ForecastError {
    /// A categorical label was not present in the fitted vocabulary.
    ///
    /// User-recoverable: the shell should re-prompt with the known labels.
    #[error("unknown {kind} label: {label:?}")]
    UnknownCategory { kind: String, label: String },

    /// A required training artifact is absent.
    ///
    /// Fatal for the session; the user must run the training step first.
    #[error("missing artifact {name:?}: run the training step first")]
    MissingArtifact { name: String },

    /// The training set for a product is too small to fit a model.
    #[error("insufficient data for {product}: {rows} usable row(s), need at least {min}")]
    InsufficientData {
        product: Product,
        rows: usize,
        min: usize,
    },
}

impl ForecastError {
    pub fn unknown_category(kind: impl Into<String>, label: impl Into<String>) -> Self {
        Self::UnknownCategory {
            kind: kind.into(),
            label: label.into(),
        }
    }

    pub fn missing_artifact(name: impl Into<String>) -> Self {
        Self::MissingArtifact { name: name.into() }
    }

    pub fn insufficient_data(product: Product, rows: usize, min: usize) -> Self {
        Self::InsufficientData { product, rows, min }
    }
}
