//! `crumbcast-dataset`
//!
//! **Responsibility:** ingest of the raw sales history CSV.
//!
//! This crate turns the bakery's transaction export into typed records.
//! It knows nothing about models or artifacts; the forecast crate consumes
//! `SalesHistory` for vocabulary fitting, training, and averaging.

pub mod history;

pub use history::{DatasetError, SalesHistory, SalesRecord, DAY_COLUMN, WEATHER_COLUMN};
