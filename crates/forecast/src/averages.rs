//! Historical per-day sales averages.
//!
//! Computed once per training/analysis run and loaded read-only by the
//! recommendation path. Missing (product, day) combinations have no entry;
//! treating "no data" as zero is the recommendation layer's call, not ours.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crumbcast_core::Product;
use crumbcast_dataset::SalesHistory;

/// Mean historical quantity for one (product, day-of-week) cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayStats {
    /// Arithmetic mean, rounded to the nearest integer.
    pub mean: f64,
    /// How many observations back the mean. Lets the recommendation layer
    /// ignore averages built on too few data points.
    pub samples: usize,
}

/// (product, day-of-week) → mean historical quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AverageTable {
    table: BTreeMap<Product, BTreeMap<String, DayStats>>,
}

impl AverageTable {
    /// Group each product's usable quantities by day label and average them.
    /// Every day label present in the input ends up as a key; rows with a
    /// missing quantity contribute nothing for that product.
    pub fn compute(history: &SalesHistory) -> Self {
        let mut sums: BTreeMap<Product, BTreeMap<String, (f64, usize)>> = BTreeMap::new();
        for record in history.records() {
            for product in Product::ALL {
                let Some(quantity) = record.quantity(product) else {
                    continue;
                };
                let (sum, count) = sums
                    .entry(product)
                    .or_default()
                    .entry(record.day.clone())
                    .or_insert((0.0, 0));
                *sum += quantity;
                *count += 1;
            }
        }

        let table = sums
            .into_iter()
            .map(|(product, days)| {
                let days = days
                    .into_iter()
                    .map(|(day, (sum, samples))| {
                        let mean = (sum / samples as f64).round();
                        (day, DayStats { mean, samples })
                    })
                    .collect();
                (product, days)
            })
            .collect();

        Self { table }
    }

    /// Stats for one cell; `None` means no data was observed.
    pub fn get(&self, product: Product, day: &str) -> Option<&DayStats> {
        self.table.get(&product).and_then(|days| days.get(day))
    }

    /// Rounded mean for one cell.
    pub fn mean(&self, product: Product, day: &str) -> Option<f64> {
        self.get(product, day).map(|stats| stats.mean)
    }

    pub fn days(&self, product: Product) -> impl Iterator<Item = &str> {
        self.table
            .get(&product)
            .into_iter()
            .flat_map(|days| days.keys().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crumbcast_dataset::{DAY_COLUMN, WEATHER_COLUMN};

    fn history(rows: &[(&str, i64)]) -> SalesHistory {
        // Single varying product (Canilla); the rest stay constant.
        let mut header = vec![DAY_COLUMN.to_string(), WEATHER_COLUMN.to_string()];
        header.extend(Product::ALL.iter().map(|p| p.column_name().to_string()));
        let mut csv = format!("{}\n", header.join(","));
        for (day, qty) in rows {
            csv.push_str(&format!("{day},Soleado,{qty},1,1,1,1,1,1\n"));
        }
        SalesHistory::from_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn means_are_grouped_by_day_and_rounded() {
        let table = AverageTable::compute(&history(&[("Lunes", 10), ("Lunes", 20), ("Martes", 5)]));
        assert_eq!(table.mean(Product::Canilla, "Lunes"), Some(15.0));
        assert_eq!(table.mean(Product::Canilla, "Martes"), Some(5.0));
    }

    #[test]
    fn sample_counts_are_tracked_per_cell() {
        let table = AverageTable::compute(&history(&[("Lunes", 10), ("Lunes", 20), ("Martes", 5)]));
        assert_eq!(table.get(Product::Canilla, "Lunes").unwrap().samples, 2);
        assert_eq!(table.get(Product::Canilla, "Martes").unwrap().samples, 1);
    }

    #[test]
    fn absent_combinations_have_no_entry() {
        let table = AverageTable::compute(&history(&[("Lunes", 10)]));
        assert!(table.get(Product::Canilla, "Domingo").is_none());
    }

    #[test]
    fn rounding_is_to_nearest_integer() {
        let table = AverageTable::compute(&history(&[("Lunes", 10), ("Lunes", 11)]));
        // 10.5 rounds away from zero.
        assert_eq!(table.mean(Product::Canilla, "Lunes"), Some(11.0));
    }

    #[test]
    fn missing_quantities_do_not_contribute() {
        let mut header = vec![DAY_COLUMN.to_string(), WEATHER_COLUMN.to_string()];
        header.extend(Product::ALL.iter().map(|p| p.column_name().to_string()));
        let csv = format!(
            "{}\nLunes,Soleado,10,1,1,1,1,1,1\nLunes,Soleado,x,1,1,1,1,1,1\n",
            header.join(",")
        );
        let table = AverageTable::compute(&SalesHistory::from_reader(csv.as_bytes()).unwrap());
        let stats = table.get(Product::Canilla, "Lunes").unwrap();
        assert_eq!(stats.mean, 10.0);
        assert_eq!(stats.samples, 1);
    }
}
