use super::super::domain::{Bucket, NutrientData, NutrientKey, SeverityColor};
use super::super::profile::ProfileTag;
use serde::Serialize;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InsightKey {
    Glycemic,
    Sodium,
    SaturatedFat,
    Sugar,
    Fiber,
    Protein,
    Calorie,
    InflammatoryFat,
    DigestiveLoad,
    CarbLoad,
    Additives,
}

/// Which way a metric gets worse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    /// Larger metric values are more severe.
    Rising,
    /// Smaller metric values are more severe (e.g. fiber).
    Falling,
}

/// Breakpoints separating the four buckets. Comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Breakpoints {
    pub moderate: f64,
    pub high: f64,
    pub very_high: f64,
    pub direction: Direction,
}

impl Breakpoints {
    const fn rising(moderate: f64, high: f64, very_high: f64) -> Self {
        Self {
            moderate,
            high,
            very_high,
            direction: Direction::Rising,
        }
    }

    const fn falling(moderate: f64, high: f64, very_high: f64) -> Self {
        Self {
            moderate,
            high,
            very_high,
            direction: Direction::Falling,
        }
    }

    pub(crate) fn bucket(&self, metric: f64) -> Bucket {
        let beyond = |limit: f64| match self.direction {
            Direction::Rising => metric > limit,
            Direction::Falling => metric < limit,
        };

        if beyond(self.very_high) {
            Bucket::VeryHigh
        } else if beyond(self.high) {
            Bucket::High
        } else if beyond(self.moderate) {
            Bucket::Moderate
        } else {
            Bucket::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightResult {
    pub label: &'static str,
    pub color: SeverityColor,
    pub bucket: Bucket,
    pub metric: f64,
}

/// One of the fixed impact insights.
#[derive(Debug, Clone)]
pub struct InsightDefinition {
    pub key: InsightKey,
    pub label: &'static str,
    pub relevant_to: Vec<ProfileTag>,
    pub icons: [&'static str; 4],
    bucket_labels: [&'static str; 4],
    breakpoints: Breakpoints,
    metric: fn(&NutrientData) -> Option<f64>,
}

impl InsightDefinition {
    /// Classify `data`. Nothing is returned when a required nutrient is
    /// missing; the metric is never guessed.
    pub fn compute(&self, data: &NutrientData) -> Option<InsightResult> {
        let metric = (self.metric)(data).filter(|value| value.is_finite())?;
        let bucket = self.breakpoints.bucket(metric);

        Some(InsightResult {
            label: self.bucket_labels[bucket.index()],
            color: bucket.color(),
            bucket,
            metric,
        })
    }

    pub fn icon(&self, bucket: Bucket) -> &'static str {
        self.icons[bucket.index()]
    }

    pub fn is_relevant_to<'a, I>(&self, tags: I) -> bool
    where
        I: IntoIterator<Item = &'a ProfileTag>,
    {
        tags.into_iter().any(|tag| self.relevant_to.contains(tag))
    }
}

fn glycemic(data: &NutrientData) -> Option<f64> {
    let sugars = data.value(NutrientKey::Sugars)?;
    let fiber = data.value(NutrientKey::Fiber).unwrap_or(0.0);
    let net_carbs = data
        .value(NutrientKey::Carbohydrates)
        .map(|carbs| (carbs - fiber).max(0.0))
        .unwrap_or(0.0);
    Some((sugars * 2.0 + net_carbs) / (fiber + 1.0))
}

/// Sodium in mg, derived from salt when sodium itself is missing.
fn sodium_mg(data: &NutrientData) -> Option<f64> {
    data.value(NutrientKey::Sodium)
        .map(|sodium| sodium * 1000.0)
        .or_else(|| data.value(NutrientKey::Salt).map(|salt| salt * 400.0))
}

fn saturated_fat(data: &NutrientData) -> Option<f64> {
    data.value(NutrientKey::SaturatedFat)
}

fn sugar(data: &NutrientData) -> Option<f64> {
    data.value(NutrientKey::Sugars)
}

fn fiber(data: &NutrientData) -> Option<f64> {
    data.value(NutrientKey::Fiber)
}

fn protein(data: &NutrientData) -> Option<f64> {
    data.value(NutrientKey::Protein)
}

fn calorie(data: &NutrientData) -> Option<f64> {
    data.value(NutrientKey::Energy)
}

fn inflammatory_fat(data: &NutrientData) -> Option<f64> {
    let fat = data.value(NutrientKey::Fat).filter(|fat| *fat > 0.0)?;
    let saturated = data.value(NutrientKey::SaturatedFat)?;
    Some((saturated / fat).min(1.0))
}

fn digestive_load(data: &NutrientData) -> Option<f64> {
    let fat = data.value(NutrientKey::Fat)?;
    let sugars = data.value(NutrientKey::Sugars).unwrap_or(0.0);
    let fiber = data.value(NutrientKey::Fiber).unwrap_or(0.0);
    Some((fat * 0.5 + sugars * 0.3 - fiber * 0.5).max(0.0))
}

fn carb_load(data: &NutrientData) -> Option<f64> {
    data.value(NutrientKey::Carbohydrates)
}

fn additives(data: &NutrientData) -> Option<f64> {
    data.additives()
}

const WARNING_ICONS: [&str; 4] = ["check-circle", "info", "alert-triangle", "alert-octagon"];

static DEFINITIONS: OnceLock<Vec<InsightDefinition>> = OnceLock::new();

/// The eleven insight definitions, in encounter order.
pub fn definitions() -> &'static [InsightDefinition] {
    DEFINITIONS.get_or_init(|| {
        use ProfileTag::*;

        vec![
            InsightDefinition {
                key: InsightKey::Glycemic,
                label: "Glycemic impact",
                relevant_to: vec![Diabetes, Obesity, Pcos, Keto, LowSugar],
                icons: ["activity", "activity", "trending-up", "zap"],
                bucket_labels: [
                    "Low glycemic load",
                    "Moderate glycemic load",
                    "High glycemic load",
                    "Very high glycemic load",
                ],
                breakpoints: Breakpoints::rising(5.0, 15.0, 30.0),
                metric: glycemic,
            },
            InsightDefinition {
                key: InsightKey::Sodium,
                label: "Sodium",
                relevant_to: vec![Hypertension, HeartDisease, KidneyDisease, LowSodium],
                icons: ["droplet", "droplet", "alert-triangle", "alert-octagon"],
                bucket_labels: ["Low sodium", "Moderate sodium", "High sodium", "Very high sodium"],
                breakpoints: Breakpoints::rising(120.0, 400.0, 600.0),
                metric: sodium_mg,
            },
            InsightDefinition {
                key: InsightKey::SaturatedFat,
                label: "Saturated fat",
                relevant_to: vec![HeartDisease, HighCholesterol, Obesity],
                icons: ["heart", "heart", "alert-triangle", "alert-octagon"],
                bucket_labels: [
                    "Low saturated fat",
                    "Moderate saturated fat",
                    "High saturated fat",
                    "Very high saturated fat",
                ],
                breakpoints: Breakpoints::rising(1.5, 5.0, 10.0),
                metric: saturated_fat,
            },
            InsightDefinition {
                key: InsightKey::Sugar,
                label: "Sugar",
                relevant_to: vec![Diabetes, Obesity, Pcos, Keto, LowSugar],
                icons: ["cube", "cube", "alert-triangle", "alert-octagon"],
                bucket_labels: ["Low sugar", "Moderate sugar", "High sugar", "Very high sugar"],
                breakpoints: Breakpoints::rising(5.0, 12.5, 22.5),
                metric: sugar,
            },
            InsightDefinition {
                key: InsightKey::Fiber,
                label: "Fiber",
                relevant_to: vec![Diabetes, HighCholesterol, Ibs, Obesity],
                icons: ["leaf", "leaf", "alert-triangle", "alert-octagon"],
                bucket_labels: ["High fiber", "Some fiber", "Low fiber", "Very low fiber"],
                breakpoints: Breakpoints::falling(6.0, 3.0, 1.0),
                metric: fiber,
            },
            InsightDefinition {
                key: InsightKey::Protein,
                label: "Protein load",
                relevant_to: vec![KidneyDisease],
                icons: WARNING_ICONS,
                bucket_labels: [
                    "Low protein",
                    "Moderate protein",
                    "High protein",
                    "Very high protein",
                ],
                breakpoints: Breakpoints::rising(8.0, 15.0, 25.0),
                metric: protein,
            },
            InsightDefinition {
                key: InsightKey::Calorie,
                label: "Calorie density",
                relevant_to: vec![Obesity, Diabetes],
                icons: ["flame", "flame", "alert-triangle", "alert-octagon"],
                bucket_labels: [
                    "Light",
                    "Moderate calories",
                    "Calorie dense",
                    "Very calorie dense",
                ],
                breakpoints: Breakpoints::rising(150.0, 300.0, 500.0),
                metric: calorie,
            },
            InsightDefinition {
                key: InsightKey::InflammatoryFat,
                label: "Fat quality",
                relevant_to: vec![HeartDisease, HighCholesterol, Pcos],
                icons: WARNING_ICONS,
                bucket_labels: [
                    "Mostly unsaturated fat",
                    "Mixed fat profile",
                    "Saturated-heavy fat",
                    "Mostly saturated fat",
                ],
                breakpoints: Breakpoints::rising(0.2, 0.4, 0.6),
                metric: inflammatory_fat,
            },
            InsightDefinition {
                key: InsightKey::DigestiveLoad,
                label: "Digestive load",
                relevant_to: vec![Ibs, GlutenIntolerance, LactoseIntolerance],
                icons: WARNING_ICONS,
                bucket_labels: [
                    "Gentle on digestion",
                    "Moderate digestive load",
                    "Heavy digestive load",
                    "Very heavy digestive load",
                ],
                breakpoints: Breakpoints::rising(5.0, 10.0, 15.0),
                metric: digestive_load,
            },
            InsightDefinition {
                key: InsightKey::CarbLoad,
                label: "Carb load",
                relevant_to: vec![Diabetes, Keto, Pcos],
                icons: ["layers", "layers", "alert-triangle", "alert-octagon"],
                bucket_labels: ["Low carb", "Moderate carb", "High carb", "Very high carb"],
                breakpoints: Breakpoints::rising(20.0, 40.0, 60.0),
                metric: carb_load,
            },
            InsightDefinition {
                key: InsightKey::Additives,
                label: "Additives",
                relevant_to: vec![Ibs, Pcos, GlutenIntolerance, LactoseIntolerance],
                icons: ["flask", "flask", "alert-triangle", "alert-octagon"],
                bucket_labels: [
                    "No additives",
                    "Few additives",
                    "Several additives",
                    "Many additives",
                ],
                breakpoints: Breakpoints::rising(0.0, 2.0, 4.0),
                metric: additives,
            },
        ]
    })
}
