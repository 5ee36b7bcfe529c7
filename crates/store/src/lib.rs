//! `crumbcast-store`
//!
//! **Responsibility:** artifact persistence.
//!
//! Training writes one JSON file per artifact into a models directory;
//! the interactive side loads them back into a validated
//! [`ForecastContext`]. Artifacts are written exactly once per training run
//! and never mutated in place.

pub mod artifacts;

pub use artifacts::{ArtifactStore, StoreError};
