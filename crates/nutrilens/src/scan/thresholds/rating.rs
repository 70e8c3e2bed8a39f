use super::super::domain::{NutrientData, NutrientKey};
use super::{NutrientThreshold, ThresholdTable};
use serde::Serialize;

const DEFAULT_LABELS: [&str; 3] = ["Low", "Moderate", "High"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingLevel {
    Low,
    Moderate,
    High,
}

impl RatingLevel {
    const fn index(self) -> usize {
        match self {
            Self::Low => 0,
            Self::Moderate => 1,
            Self::High => 2,
        }
    }
}

/// How the rating reads for the person: a high fiber level is good news, a
/// high sugar level is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Concern {
    Good,
    Caution,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientRating {
    pub nutrient: NutrientKey,
    pub value: f64,
    pub unit: &'static str,
    pub level: RatingLevel,
    pub label: &'static str,
    pub concern: Concern,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_value_percent: Option<f64>,
}

/// Rate `value` against `threshold`. Unusable values produce no rating.
pub fn rate(
    nutrient: NutrientKey,
    value: f64,
    threshold: &NutrientThreshold,
) -> Option<NutrientRating> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }

    let (level, concern) = if threshold.inverted {
        if value < threshold.low {
            (RatingLevel::Low, Concern::Warning)
        } else if value < threshold.moderate {
            (RatingLevel::Moderate, Concern::Caution)
        } else {
            (RatingLevel::High, Concern::Good)
        }
    } else if value <= threshold.low {
        (RatingLevel::Low, Concern::Good)
    } else if value <= threshold.moderate {
        (RatingLevel::Moderate, Concern::Caution)
    } else {
        (RatingLevel::High, Concern::Warning)
    };

    let labels = threshold.labels.unwrap_or(DEFAULT_LABELS);

    Some(NutrientRating {
        nutrient,
        value,
        unit: nutrient.unit(),
        level,
        label: labels[level.index()],
        concern,
        daily_value_percent: daily_value_percent(nutrient, value),
    })
}

/// Ratings for every nutrient present in `nutrients`, in table order.
pub fn rate_all(nutrients: &NutrientData, table: &ThresholdTable) -> Vec<NutrientRating> {
    table
        .iter()
        .filter_map(|(nutrient, threshold)| {
            nutrients
                .value(nutrient)
                .and_then(|value| rate(nutrient, value, threshold))
        })
        .collect()
}

/// Share of the adult daily reference intake, rounded to one decimal.
/// Display only; classification never reads it.
pub fn daily_value_percent(nutrient: NutrientKey, value: f64) -> Option<f64> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }

    let reference = match nutrient {
        NutrientKey::Energy => 2000.0,
        NutrientKey::Fat => 70.0,
        NutrientKey::SaturatedFat => 20.0,
        NutrientKey::Carbohydrates => 260.0,
        NutrientKey::Sugars => 90.0,
        NutrientKey::Fiber => 30.0,
        NutrientKey::Protein => 50.0,
        NutrientKey::Salt => 6.0,
        NutrientKey::Sodium => 2.4,
    };

    Some((value / reference * 1000.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::super::build_thresholds;
    use super::*;
    use crate::scan::profile::ProfileTag;

    fn threshold(low: f64, moderate: f64, inverted: bool) -> NutrientThreshold {
        NutrientThreshold {
            low,
            moderate,
            inverted,
            labels: None,
        }
    }

    #[test]
    fn regular_thresholds_are_inclusive() {
        let sugars = threshold(5.0, 22.5, false);
        let at_low = rate(NutrientKey::Sugars, 5.0, &sugars).expect("rated");
        assert_eq!(at_low.level, RatingLevel::Low);
        assert_eq!(at_low.concern, Concern::Good);

        let at_moderate = rate(NutrientKey::Sugars, 22.5, &sugars).expect("rated");
        assert_eq!(at_moderate.level, RatingLevel::Moderate);

        let above = rate(NutrientKey::Sugars, 30.0, &sugars).expect("rated");
        assert_eq!(above.level, RatingLevel::High);
        assert_eq!(above.concern, Concern::Warning);
        assert_eq!(above.label, "High");
    }

    #[test]
    fn inverted_thresholds_reward_higher_values() {
        let fiber = NutrientThreshold {
            labels: Some(["Low", "Source", "Rich"]),
            ..threshold(3.0, 6.0, true)
        };
        let low = rate(NutrientKey::Fiber, 1.0, &fiber).expect("rated");
        assert_eq!((low.level, low.concern, low.label), (RatingLevel::Low, Concern::Warning, "Low"));

        let source = rate(NutrientKey::Fiber, 3.0, &fiber).expect("rated");
        assert_eq!(source.label, "Source");

        let rich = rate(NutrientKey::Fiber, 6.0, &fiber).expect("rated");
        assert_eq!((rich.level, rich.concern), (RatingLevel::High, Concern::Good));
    }

    #[test]
    fn unusable_values_are_skipped() {
        let salt = threshold(0.3, 1.5, false);
        assert!(rate(NutrientKey::Salt, f64::NAN, &salt).is_none());
        assert!(rate(NutrientKey::Salt, -1.0, &salt).is_none());
    }

    #[test]
    fn rate_all_uses_profile_thresholds_and_skips_missing() {
        let table = build_thresholds(&[ProfileTag::Diabetes]);
        let data = NutrientData {
            sugars: Some(4.0),
            salt: Some(0.2),
            fiber: None,
            ..NutrientData::default()
        };

        let ratings = rate_all(&data, &table);
        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[0].nutrient, NutrientKey::Sugars);
        assert_eq!(ratings[0].level, RatingLevel::Moderate);
        assert_eq!(ratings[1].nutrient, NutrientKey::Salt);
        assert_eq!(ratings[1].level, RatingLevel::Low);
    }

    #[test]
    fn daily_value_percent_rounds_to_one_decimal() {
        assert_eq!(daily_value_percent(NutrientKey::Sugars, 45.0), Some(50.0));
        assert_eq!(daily_value_percent(NutrientKey::Salt, 1.0), Some(16.7));
        assert_eq!(daily_value_percent(NutrientKey::Energy, f64::NAN), None);
    }
}
