//! `crumbcast-forecast`
//!
//! **Responsibility:** the demand-forecasting core.
//!
//! This crate owns the whole pipeline between raw sales history and a
//! discount suggestion:
//! - categorical feature encoding with fixed vocabularies,
//! - per-product feed-forward regressors and their scalers,
//! - the per-day historical average table,
//! - the discount recommendation rule,
//! - [`ForecastContext`], the read-only bundle of loaded artifacts that
//!   serves `predict` and `recommend_all`.
//!
//! Everything here is deterministic and synchronous: a request runs
//! start-to-finish on the calling thread, and nothing mutates the loaded
//! artifacts.

pub mod averages;
pub mod context;
pub mod encoder;
pub mod network;
pub mod recommend;
pub mod scaler;
pub mod trainer;

pub use averages::{AverageTable, DayStats};
pub use context::ForecastContext;
pub use encoder::Vocabulary;
pub use network::Network;
pub use recommend::{should_discount, Recommendation, RecommendPolicy, DEFAULT_THRESHOLD_RATIO};
pub use scaler::StandardScaler;
pub use trainer::{train_all, ProductModel, TrainConfig, TrainedArtifacts};
