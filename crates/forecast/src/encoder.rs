//! Categorical feature encoding.
//!
//! A [`Vocabulary`] is fixed at training time and persisted; inference reuses
//! it verbatim. Labels are stored in sorted order so two runs over the same
//! data produce identical codes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crumbcast_core::{ForecastError, ForecastResult};

/// A fixed label → integer-code mapping for one categorical feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Feature name, used in `UnknownCategory` errors ("day", "weather").
    kind: String,
    /// Distinct labels in sorted order; a label's code is its index here.
    labels: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary from every label observed in the training data.
    /// Duplicates collapse; order of appearance does not matter.
    pub fn fit<I, S>(kind: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let distinct: BTreeSet<String> = labels
            .into_iter()
            .map(|l| l.as_ref().to_string())
            .collect();
        Self {
            kind: kind.into(),
            labels: distinct.into_iter().collect(),
        }
    }

    /// Look up the code for a label seen during fit.
    ///
    /// A label absent from the vocabulary is a hard [`ForecastError::UnknownCategory`],
    /// never a silent fallback code.
    pub fn encode(&self, label: &str) -> ForecastResult<usize> {
        self.labels
            .binary_search_by(|known| known.as_str().cmp(label))
            .map_err(|_| ForecastError::unknown_category(&self.kind, label))
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Fitted labels in code order; shells use this to populate selectors.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
