//! The discount recommendation rule.
//!
//! A pure comparison of a fresh prediction against the historical average.
//! The ratio keeps the rule scale-invariant: a product selling 300 units a
//! day and one selling 12 trip the rule under the same relative dip.

use serde::{Deserialize, Serialize};

use crumbcast_core::Product;

/// Suggest a discount when the prediction falls below 85% of the average.
pub const DEFAULT_THRESHOLD_RATIO: f64 = 0.85;

/// True iff the predicted demand is substantially below the historical
/// average. Total and stateless: a non-positive average never recommends,
/// whatever the prediction.
pub fn should_discount(predicted: f64, historical_average: f64, threshold_ratio: f64) -> bool {
    historical_average > 0.0 && predicted < historical_average * threshold_ratio
}

/// Tunables for a recommendation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommendPolicy {
    pub threshold_ratio: f64,
    /// Averages backed by fewer observations than this never trigger a
    /// suggestion. 1 keeps the original behavior (any average counts).
    pub min_samples: usize,
}

impl Default for RecommendPolicy {
    fn default() -> Self {
        Self {
            threshold_ratio: DEFAULT_THRESHOLD_RATIO,
            min_samples: 1,
        }
    }
}

/// One product's outcome from a `recommend_all` pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub product: Product,
    /// Predicted quantity, truncated to integer units.
    pub predicted: i64,
    /// Rounded historical average for the requested day; 0 when no data.
    pub historical_average: i64,
    pub discount: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn prediction_well_below_average_recommends() {
        // avg 100, threshold 0.85: 80 < 85.
        assert!(should_discount(80.0, 100.0, 0.85));
    }

    #[test]
    fn prediction_near_average_does_not_recommend() {
        // 90 >= 85.
        assert!(!should_discount(90.0, 100.0, 0.85));
    }

    #[test]
    fn boundary_is_strict() {
        assert!(!should_discount(85.0, 100.0, 0.85));
    }

    #[test]
    fn zero_average_never_recommends() {
        assert!(!should_discount(-50.0, 0.0, 0.85));
        assert!(!should_discount(0.0, 0.0, 0.85));
        assert!(!should_discount(1e9, 0.0, 0.85));
    }

    proptest! {
        #[test]
        fn rule_matches_its_definition(
            predicted in -1e6f64..1e6,
            average in 0.0f64..1e6,
            ratio in 1e-6f64..1.0,
        ) {
            let expected = average > 0.0 && predicted < average * ratio;
            prop_assert_eq!(should_discount(predicted, average, ratio), expected);
        }

        #[test]
        fn zero_average_is_always_false(predicted in -1e6f64..1e6, ratio in 1e-6f64..1.0) {
            prop_assert!(!should_discount(predicted, 0.0, ratio));
        }
    }
}
