//! Profile-adjusted nutrient thresholds.
//!
//! The effective table starts from the defaults and folds in every active
//! tag's overrides. Numeric limits only ever tighten (the lowest value across
//! tags wins), so the merged table does not depend on tag order. The
//! non-numeric `inverted`/`labels` fields are last-applied-wins; tags are
//! applied in [`ProfileTag`]'s canonical order to keep that deterministic too.

mod defaults;
mod rating;

pub use rating::{daily_value_percent, rate, rate_all, Concern, NutrientRating, RatingLevel};

use super::domain::NutrientKey;
use super::profile::ProfileTag;
use defaults::{default_threshold, overrides_for, ThresholdOverride};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::trace;

/// Rating breakpoints for a single nutrient.
///
/// For regular nutrients values up to `low` rate low and up to `moderate`
/// rate moderate. For `inverted` nutrients (more is better) the comparisons
/// are strict: below `low` is low, below `moderate` is moderate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NutrientThreshold {
    pub low: f64,
    pub moderate: f64,
    pub inverted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<[&'static str; 3]>,
}

/// One threshold per nutrient key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ThresholdTable {
    entries: BTreeMap<NutrientKey, NutrientThreshold>,
}

impl ThresholdTable {
    pub fn defaults() -> Self {
        let entries = NutrientKey::ordered()
            .into_iter()
            .map(|nutrient| (nutrient, default_threshold(nutrient)))
            .collect();
        Self { entries }
    }

    pub fn get(&self, nutrient: NutrientKey) -> Option<&NutrientThreshold> {
        self.entries.get(&nutrient)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NutrientKey, &NutrientThreshold)> {
        self.entries.iter().map(|(key, threshold)| (*key, threshold))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn apply(&mut self, adjustment: &ThresholdOverride) {
        let entry = self
            .entries
            .entry(adjustment.nutrient)
            .or_insert_with(|| default_threshold(adjustment.nutrient));

        if let Some(low) = adjustment.low {
            if low < entry.low {
                entry.low = low;
            }
        }
        if let Some(moderate) = adjustment.moderate {
            if moderate < entry.moderate {
                entry.moderate = moderate;
            }
        }
        if let Some(inverted) = adjustment.inverted {
            entry.inverted = inverted;
        }
        if let Some(labels) = adjustment.labels {
            entry.labels = Some(labels);
        }
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Merge the default thresholds with the overrides of every tag in `tags`.
pub fn build_thresholds<'a, I>(tags: I) -> ThresholdTable
where
    I: IntoIterator<Item = &'a ProfileTag>,
{
    let active: BTreeSet<&ProfileTag> = tags.into_iter().collect();
    let mut table = ThresholdTable::defaults();

    for tag in active {
        let adjustments = overrides_for(tag);
        if adjustments.is_empty() {
            continue;
        }
        trace!(tag = %tag, overrides = adjustments.len(), "applying threshold overrides");
        for adjustment in adjustments {
            table.apply(adjustment);
        }
    }

    table
}
