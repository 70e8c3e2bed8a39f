use serde::{Deserialize, Serialize};

/// Vegan/vegetarian status as reported by the product database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tristate {
    Yes,
    No,
    Maybe,
    #[default]
    Unknown,
}

impl Tristate {
    /// Lenient parse of the provider's `"yes"`/`"no"`/`"maybe"` strings.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "yes" => Self::Yes,
            "no" => Self::No,
            "maybe" => Self::Maybe,
            _ => Self::Unknown,
        }
    }
}

/// One ingredient of a scanned product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub text: String,
    #[serde(default)]
    pub vegan: Tristate,
    #[serde(default)]
    pub vegetarian: Tristate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_estimate: Option<f64>,
}

impl Ingredient {
    /// An ingredient known only by its display text.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            vegan: Tristate::Unknown,
            vegetarian: Tristate::Unknown,
            percent_estimate: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Nutrients covered by the rating thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientKey {
    Energy,
    Fat,
    SaturatedFat,
    Carbohydrates,
    Sugars,
    Fiber,
    Protein,
    Salt,
    Sodium,
}

impl NutrientKey {
    pub const fn ordered() -> [Self; 9] {
        [
            Self::Energy,
            Self::Fat,
            Self::SaturatedFat,
            Self::Carbohydrates,
            Self::Sugars,
            Self::Fiber,
            Self::Protein,
            Self::Salt,
            Self::Sodium,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Energy => "Energy",
            Self::Fat => "Fat",
            Self::SaturatedFat => "Saturated fat",
            Self::Carbohydrates => "Carbohydrates",
            Self::Sugars => "Sugars",
            Self::Fiber => "Fiber",
            Self::Protein => "Protein",
            Self::Salt => "Salt",
            Self::Sodium => "Sodium",
        }
    }

    pub const fn unit(self) -> &'static str {
        match self {
            Self::Energy => "kcal",
            _ => "g",
        }
    }
}

/// Nutrient values per 100 g. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientData {
    #[serde(default)]
    pub energy_kcal: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
    #[serde(default)]
    pub saturated_fat: Option<f64>,
    #[serde(default)]
    pub carbohydrates: Option<f64>,
    #[serde(default)]
    pub sugars: Option<f64>,
    #[serde(default)]
    pub fiber: Option<f64>,
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub salt: Option<f64>,
    #[serde(default)]
    pub sodium: Option<f64>,
    #[serde(default)]
    pub additives_count: Option<f64>,
}

impl NutrientData {
    /// Value for `key`, or `None` when absent, NaN, infinite or negative.
    pub fn value(&self, key: NutrientKey) -> Option<f64> {
        let raw = match key {
            NutrientKey::Energy => self.energy_kcal,
            NutrientKey::Fat => self.fat,
            NutrientKey::SaturatedFat => self.saturated_fat,
            NutrientKey::Carbohydrates => self.carbohydrates,
            NutrientKey::Sugars => self.sugars,
            NutrientKey::Fiber => self.fiber,
            NutrientKey::Protein => self.protein,
            NutrientKey::Salt => self.salt,
            NutrientKey::Sodium => self.sodium,
        };
        usable(raw)
    }

    pub fn additives(&self) -> Option<f64> {
        usable(self.additives_count)
    }
}

pub(crate) fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|value| value.is_finite() && *value >= 0.0)
}

/// Why an ingredient landed in the harmful bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmfulReason {
    Vegan,
    Vegetarian,
    UserFlagged,
}

impl HarmfulReason {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vegan => "Not vegan",
            Self::Vegetarian => "Not vegetarian",
            Self::UserFlagged => "Flagged by you",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "vegan" => Some(Self::Vegan),
            "vegetarian" => Some(Self::Vegetarian),
            "user_flagged" | "flagged" => Some(Self::UserFlagged),
            _ => None,
        }
    }
}

/// Severity level assigned by an insight's compute function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Bucket {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl Bucket {
    pub const fn index(self) -> usize {
        match self {
            Self::Low => 0,
            Self::Moderate => 1,
            Self::High => 2,
            Self::VeryHigh => 3,
        }
    }

    pub const fn color(self) -> SeverityColor {
        match self {
            Self::Low => SeverityColor::Green,
            Self::Moderate => SeverityColor::Yellow,
            Self::High => SeverityColor::Orange,
            Self::VeryHigh => SeverityColor::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityColor {
    Green,
    Yellow,
    Orange,
    Red,
}

impl SeverityColor {
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Green => "#2E7D32",
            Self::Yellow => "#F9A825",
            Self::Orange => "#EF6C00",
            Self::Red => "#C62828",
        }
    }
}
