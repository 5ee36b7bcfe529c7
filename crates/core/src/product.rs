//! The closed set of bread products the bakery tracks.
//!
//! The original data keys everything by the CSV quantity column name
//! (`Pan_Canilla_Cantidad`, ...). Artifacts and lookups here are keyed by
//! this enum instead, so a missing product is caught when artifacts are
//! loaded, not at first use.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ForecastError;

/// One bread product. Each product owns an independent regression model.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Product {
    #[serde(rename = "Pan_Canilla_Cantidad")]
    Canilla,
    #[serde(rename = "Pan_Frances_Cantidad")]
    Frances,
    #[serde(rename = "Pan_Colombiano_Cantidad")]
    Colombiano,
    #[serde(rename = "Pan_Sobao_Cantidad")]
    Sobao,
    #[serde(rename = "Pan_Dulce_Cantidad")]
    Dulce,
    #[serde(rename = "Pan_De_Coco_Cantidad")]
    DeCoco,
    #[serde(rename = "Pan_De_Arequipe_Cantidad")]
    DeArequipe,
}

impl Product {
    /// Every product, in a fixed order. Training, validation, and
    /// recommendation all iterate this.
    pub const ALL: [Product; 7] = [
        Product::Canilla,
        Product::Frances,
        Product::Colombiano,
        Product::Sobao,
        Product::Dulce,
        Product::DeCoco,
        Product::DeArequipe,
    ];

    /// The quantity column for this product in the sales history CSV.
    pub fn column_name(&self) -> &'static str {
        match self {
            Product::Canilla => "Pan_Canilla_Cantidad",
            Product::Frances => "Pan_Frances_Cantidad",
            Product::Colombiano => "Pan_Colombiano_Cantidad",
            Product::Sobao => "Pan_Sobao_Cantidad",
            Product::Dulce => "Pan_Dulce_Cantidad",
            Product::DeCoco => "Pan_De_Coco_Cantidad",
            Product::DeArequipe => "Pan_De_Arequipe_Cantidad",
        }
    }

    /// Stable identifier used in artifact file names and CLI arguments.
    pub fn id(&self) -> &'static str {
        match self {
            Product::Canilla => "pan-canilla",
            Product::Frances => "pan-frances",
            Product::Colombiano => "pan-colombiano",
            Product::Sobao => "pan-sobao",
            Product::Dulce => "pan-dulce",
            Product::DeCoco => "pan-de-coco",
            Product::DeArequipe => "pan-de-arequipe",
        }
    }

    /// Human-readable name for shells.
    pub fn display_name(&self) -> &'static str {
        match self {
            Product::Canilla => "Pan Canilla",
            Product::Frances => "Pan Frances",
            Product::Colombiano => "Pan Colombiano",
            Product::Sobao => "Pan Sobao",
            Product::Dulce => "Pan Dulce",
            Product::DeCoco => "Pan De Coco",
            Product::DeArequipe => "Pan De Arequipe",
        }
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Product {
    type Err = ForecastError;

    /// Accepts the CLI id (`pan-canilla`) or the CSV column name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Product::ALL
            .into_iter()
            .find(|p| p.id() == s || p.column_name() == s)
            .ok_or_else(|| ForecastError::unknown_category("product", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_products_have_distinct_columns_and_ids() {
        let columns: std::collections::BTreeSet<_> =
            Product::ALL.iter().map(|p| p.column_name()).collect();
        let ids: std::collections::BTreeSet<_> = Product::ALL.iter().map(|p| p.id()).collect();
        assert_eq!(columns.len(), Product::ALL.len());
        assert_eq!(ids.len(), Product::ALL.len());
    }

    #[test]
    fn parses_id_and_column_name() {
        assert_eq!("pan-de-coco".parse::<Product>().unwrap(), Product::DeCoco);
        assert_eq!(
            "Pan_De_Coco_Cantidad".parse::<Product>().unwrap(),
            Product::DeCoco
        );
    }

    #[test]
    fn unknown_product_is_a_typed_error() {
        let err = "croissant".parse::<Product>().unwrap_err();
        assert!(matches!(err, ForecastError::UnknownCategory { .. }));
    }

    #[test]
    fn serde_uses_the_column_name() {
        let json = serde_json::to_string(&Product::Canilla).unwrap();
        assert_eq!(json, "\"Pan_Canilla_Cantidad\"");
        let back: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Product::Canilla);
    }
}
