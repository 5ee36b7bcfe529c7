//! Typed view over the sales history CSV.
//!
//! Expected header: `Dia_De_La_Semana`, `Clima`, and one quantity column per
//! product (see [`Product::column_name`]). Column lookup is header-based;
//! column order in the file does not matter.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crumbcast_core::Product;

/// Day-of-week column in the sales export.
pub const DAY_COLUMN: &str = "Dia_De_La_Semana";

/// Weather column in the sales export.
pub const WEATHER_COLUMN: &str = "Clima";

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read sales history: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed sales history: {0}")]
    Csv(#[from] csv::Error),

    #[error("sales history is missing required column {0:?}")]
    MissingColumn(String),
}

/// One day of sales: the categorical inputs plus the observed quantity per
/// product. A quantity is `None` when the source cell was not numeric;
/// such cells never reject the whole row.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub day: String,
    pub weather: String,
    pub quantities: BTreeMap<Product, Option<f64>>,
}

impl SalesRecord {
    pub fn quantity(&self, product: Product) -> Option<f64> {
        self.quantities.get(&product).copied().flatten()
    }
}

/// The full training table, loaded once per training/analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesHistory {
    records: Vec<SalesRecord>,
}

impl SalesHistory {
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        Self::from_reader(File::open(path)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, DatasetError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let column = |name: &str| -> Result<usize, DatasetError> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
        };

        let day_idx = column(DAY_COLUMN)?;
        let weather_idx = column(WEATHER_COLUMN)?;
        let mut product_idx = BTreeMap::new();
        for product in Product::ALL {
            product_idx.insert(product, column(product.column_name())?);
        }

        let mut records = Vec::new();
        for row in rdr.records() {
            let row = row?;
            let mut quantities = BTreeMap::new();
            for (product, idx) in &product_idx {
                // Non-numeric cells (typos, blanks) become missing.
                let value = row.get(*idx).and_then(|cell| cell.parse::<f64>().ok());
                quantities.insert(*product, value);
            }
            records.push(SalesRecord {
                day: row.get(day_idx).unwrap_or_default().to_string(),
                weather: row.get(weather_idx).unwrap_or_default().to_string(),
                quantities,
            });
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Day labels in row order (with repeats), ready for vocabulary fitting.
    pub fn day_labels(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.day.as_str())
    }

    /// Weather labels in row order (with repeats).
    pub fn weather_labels(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.weather.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_csv() -> String {
        let mut header = vec![DAY_COLUMN.to_string(), WEATHER_COLUMN.to_string()];
        header.extend(Product::ALL.iter().map(|p| p.column_name().to_string()));
        format!(
            "{}\nLunes,Soleado,10,12,8,5,7,3,4\nMartes,Lluvioso,9,n/a,7,4,6,2,3\n",
            header.join(",")
        )
    }

    #[test]
    fn loads_rows_with_header_based_columns() {
        let history = SalesHistory::from_reader(sample_csv().as_bytes()).unwrap();
        assert_eq!(history.len(), 2);
        let first = &history.records()[0];
        assert_eq!(first.day, "Lunes");
        assert_eq!(first.weather, "Soleado");
        assert_eq!(first.quantity(Product::Canilla), Some(10.0));
        assert_eq!(first.quantity(Product::DeArequipe), Some(4.0));
    }

    #[test]
    fn non_numeric_quantity_becomes_missing_without_dropping_the_row() {
        let history = SalesHistory::from_reader(sample_csv().as_bytes()).unwrap();
        let second = &history.records()[1];
        assert_eq!(second.quantity(Product::Frances), None);
        assert_eq!(second.quantity(Product::Canilla), Some(9.0));
    }

    #[test]
    fn missing_quantity_column_is_a_typed_error() {
        let csv = format!("{DAY_COLUMN},{WEATHER_COLUMN}\nLunes,Soleado\n");
        let err = SalesHistory::from_reader(csv.as_bytes()).unwrap_err();
        match err {
            DatasetError::MissingColumn(name) => {
                assert_eq!(name, Product::Canilla.column_name());
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn label_iterators_preserve_row_order() {
        let history = SalesHistory::from_reader(sample_csv().as_bytes()).unwrap();
        let days: Vec<_> = history.day_labels().collect();
        assert_eq!(days, vec!["Lunes", "Martes"]);
        let weathers: Vec<_> = history.weather_labels().collect();
        assert_eq!(weathers, vec!["Soleado", "Lluvioso"]);
    }
}
