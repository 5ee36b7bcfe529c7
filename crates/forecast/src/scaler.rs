//! Input/output standardization.
//!
//! The scaler state is fitted once on training data and persisted with the
//! model; inference must transform through the *same* state. Refitting at
//! inference time would silently shift every prediction.

use serde::{Deserialize, Serialize};

/// Per-feature mean/standard-deviation standardization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    std: Vec<f64>,
}

impl StandardScaler {
    /// Fit per-feature mean and population standard deviation over `rows`.
    ///
    /// A zero-variance feature gets unit scale so `transform` stays total
    /// (and inverts cleanly).
    pub fn fit(rows: &[Vec<f64>]) -> Self {
        let features = rows.first().map_or(0, Vec::len);
        let n = rows.len() as f64;

        let mut mean = vec![0.0; features];
        for row in rows {
            for (m, v) in mean.iter_mut().zip(row) {
                *m += v;
            }
        }
        for m in &mut mean {
            *m /= n;
        }

        let mut std = vec![0.0; features];
        for row in rows {
            for (s, (v, m)) in std.iter_mut().zip(row.iter().zip(&mean)) {
                let d = v - m;
                *s += d * d;
            }
        }
        for s in &mut std {
            *s = (*s / n).sqrt();
            if *s <= f64::EPSILON {
                *s = 1.0;
            }
        }

        Self { mean, std }
    }

    /// Fit over a single-feature column.
    pub fn fit_column(values: &[f64]) -> Self {
        let rows: Vec<Vec<f64>> = values.iter().map(|v| vec![*v]).collect();
        Self::fit(&rows)
    }

    pub fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.mean.iter().zip(&self.std))
            .map(|(v, (m, s))| (v - m) / s)
            .collect()
    }

    pub fn inverse_transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.mean.iter().zip(&self.std))
            .map(|(v, (m, s))| v * s + m)
            .collect()
    }

    /// Single-feature convenience used for the target scaler.
    pub fn transform_one(&self, value: f64) -> f64 {
        self.transform(&[value])[0]
    }

    pub fn inverse_one(&self, value: f64) -> f64 {
        self.inverse_transform(&[value])[0]
    }

    pub fn features(&self) -> usize {
        self.mean.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn transform_centers_and_scales() {
        let rows = vec![vec![0.0, 10.0], vec![2.0, 10.0], vec![4.0, 10.0]];
        let scaler = StandardScaler::fit(&rows);
        let t = scaler.transform(&[2.0, 10.0]);
        assert!(t[0].abs() < 1e-12);
        // Zero-variance feature: unit scale keeps the value centered at zero.
        assert!(t[1].abs() < 1e-12);
    }

    #[test]
    fn inverse_recovers_original_units() {
        let rows = vec![vec![1.0], vec![5.0], vec![9.0]];
        let scaler = StandardScaler::fit(&rows);
        for v in [1.0, 3.5, 9.0, 12.0] {
            let back = scaler.inverse_one(scaler.transform_one(v));
            assert!((back - v).abs() < 1e-9, "{v} round-tripped to {back}");
        }
    }

    proptest! {
        #[test]
        fn round_trip_within_tolerance(
            values in proptest::collection::vec(-1e4f64..1e4, 2..40),
            probe in -1e4f64..1e4,
        ) {
            let scaler = StandardScaler::fit_column(&values);
            let back = scaler.inverse_one(scaler.transform_one(probe));
            prop_assert!((back - probe).abs() < 1e-6);
        }
    }
}
