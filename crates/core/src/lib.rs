//! `crumbcast-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no I/O, no model math):
//! the closed product enumeration and the shared error taxonomy.

pub mod error;
pub mod product;

pub use error::{ForecastError, ForecastResult};
pub use product::Product;
