use super::super::domain::NutrientKey;
use super::super::profile::ProfileTag;
use super::NutrientThreshold;

const DEFAULT_LABELS: [&str; 3] = ["Low", "Moderate", "High"];
const SOURCE_LABELS: [&str; 3] = ["Low", "Source", "Rich"];

/// Per-100 g rating breakpoints used when no condition applies.
pub(crate) fn default_threshold(nutrient: NutrientKey) -> NutrientThreshold {
    let (low, moderate, inverted, labels) = match nutrient {
        NutrientKey::Energy => (150.0, 400.0, false, None),
        NutrientKey::Fat => (3.0, 17.5, false, None),
        NutrientKey::SaturatedFat => (1.5, 5.0, false, None),
        NutrientKey::Carbohydrates => (10.0, 45.0, false, None),
        NutrientKey::Sugars => (5.0, 22.5, false, None),
        NutrientKey::Fiber => (3.0, 6.0, true, Some(SOURCE_LABELS)),
        NutrientKey::Protein => (5.0, 12.0, true, Some(SOURCE_LABELS)),
        NutrientKey::Salt => (0.3, 1.5, false, None),
        NutrientKey::Sodium => (0.12, 0.6, false, None),
    };

    NutrientThreshold {
        low,
        moderate,
        inverted,
        labels,
    }
}

/// Partial adjustment of one nutrient's threshold for a profile tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ThresholdOverride {
    pub nutrient: NutrientKey,
    pub low: Option<f64>,
    pub moderate: Option<f64>,
    pub inverted: Option<bool>,
    pub labels: Option<[&'static str; 3]>,
}

const fn limit(nutrient: NutrientKey, low: f64, moderate: f64) -> ThresholdOverride {
    ThresholdOverride {
        nutrient,
        low: Some(low),
        moderate: Some(moderate),
        inverted: None,
        labels: None,
    }
}

const fn ceiling(nutrient: NutrientKey, low: f64, moderate: f64) -> ThresholdOverride {
    ThresholdOverride {
        nutrient,
        low: Some(low),
        moderate: Some(moderate),
        inverted: Some(false),
        labels: Some(DEFAULT_LABELS),
    }
}

const DIABETES: &[ThresholdOverride] = &[
    limit(NutrientKey::Sugars, 2.0, 5.0),
    limit(NutrientKey::Carbohydrates, 5.0, 20.0),
    limit(NutrientKey::Energy, 120.0, 300.0),
];

const HYPERTENSION: &[ThresholdOverride] = &[
    limit(NutrientKey::Salt, 0.1, 0.6),
    limit(NutrientKey::Sodium, 0.04, 0.24),
];

const HEART_DISEASE: &[ThresholdOverride] = &[
    limit(NutrientKey::Fat, 3.0, 10.0),
    limit(NutrientKey::SaturatedFat, 1.0, 3.0),
    limit(NutrientKey::Salt, 0.2, 1.0),
    limit(NutrientKey::Sodium, 0.08, 0.4),
];

const HIGH_CHOLESTEROL: &[ThresholdOverride] = &[
    limit(NutrientKey::SaturatedFat, 1.0, 2.5),
    limit(NutrientKey::Fat, 3.0, 12.0),
];

const KIDNEY_DISEASE: &[ThresholdOverride] = &[
    ceiling(NutrientKey::Protein, 4.0, 10.0),
    limit(NutrientKey::Salt, 0.1, 0.5),
    limit(NutrientKey::Sodium, 0.04, 0.2),
];

const OBESITY: &[ThresholdOverride] = &[
    limit(NutrientKey::Energy, 100.0, 250.0),
    limit(NutrientKey::Fat, 3.0, 12.0),
    limit(NutrientKey::Sugars, 4.0, 12.0),
];

const PCOS: &[ThresholdOverride] = &[
    limit(NutrientKey::Sugars, 3.0, 10.0),
    limit(NutrientKey::Carbohydrates, 8.0, 30.0),
];

const IBS: &[ThresholdOverride] = &[limit(NutrientKey::Fat, 3.0, 10.0)];

const KETO: &[ThresholdOverride] = &[
    limit(NutrientKey::Carbohydrates, 3.0, 10.0),
    limit(NutrientKey::Sugars, 2.0, 5.0),
];

const LOW_SODIUM: &[ThresholdOverride] = &[
    limit(NutrientKey::Salt, 0.1, 0.3),
    limit(NutrientKey::Sodium, 0.04, 0.12),
];

const LOW_SUGAR: &[ThresholdOverride] = &[limit(NutrientKey::Sugars, 2.5, 5.0)];

/// Overrides registered for `tag`; empty for tags without entries.
pub(crate) fn overrides_for(tag: &ProfileTag) -> &'static [ThresholdOverride] {
    match tag {
        ProfileTag::Diabetes => DIABETES,
        ProfileTag::Hypertension => HYPERTENSION,
        ProfileTag::HeartDisease => HEART_DISEASE,
        ProfileTag::HighCholesterol => HIGH_CHOLESTEROL,
        ProfileTag::KidneyDisease => KIDNEY_DISEASE,
        ProfileTag::Obesity => OBESITY,
        ProfileTag::Pcos => PCOS,
        ProfileTag::Ibs => IBS,
        ProfileTag::Keto => KETO,
        ProfileTag::LowSodium => LOW_SODIUM,
        ProfileTag::LowSugar => LOW_SUGAR,
        ProfileTag::GlutenIntolerance
        | ProfileTag::LactoseIntolerance
        | ProfileTag::PeanutAllergy
        | ProfileTag::TreeNutAllergy
        | ProfileTag::MilkAllergy
        | ProfileTag::EggAllergy
        | ProfileTag::SoyAllergy
        | ProfileTag::WheatAllergy
        | ProfileTag::FishAllergy
        | ProfileTag::ShellfishAllergy
        | ProfileTag::SesameAllergy
        | ProfileTag::Vegan
        | ProfileTag::Vegetarian
        | ProfileTag::Other(_) => &[],
    }
}
