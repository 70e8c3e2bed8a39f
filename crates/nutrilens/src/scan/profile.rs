use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// Health condition, allergy or dietary preference attached to a profile.
///
/// Profiles store tags as display strings; [`ProfileTag::parse`] maps the
/// exact, case-sensitive label onto a known variant and keeps anything else
/// as [`ProfileTag::Other`], which no rule table has entries for. The derived
/// ordering is the canonical order rule merging iterates in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProfileTag {
    // Conditions
    Diabetes,
    Hypertension,
    HeartDisease,
    HighCholesterol,
    KidneyDisease,
    Obesity,
    Pcos,
    Ibs,
    GlutenIntolerance,
    LactoseIntolerance,
    // Allergies
    PeanutAllergy,
    TreeNutAllergy,
    MilkAllergy,
    EggAllergy,
    SoyAllergy,
    WheatAllergy,
    FishAllergy,
    ShellfishAllergy,
    SesameAllergy,
    // Dietary preferences
    Vegan,
    Vegetarian,
    Keto,
    LowSodium,
    LowSugar,
    Other(String),
}

impl ProfileTag {
    /// Every named tag, in canonical order.
    pub const KNOWN: [ProfileTag; 24] = [
        Self::Diabetes,
        Self::Hypertension,
        Self::HeartDisease,
        Self::HighCholesterol,
        Self::KidneyDisease,
        Self::Obesity,
        Self::Pcos,
        Self::Ibs,
        Self::GlutenIntolerance,
        Self::LactoseIntolerance,
        Self::PeanutAllergy,
        Self::TreeNutAllergy,
        Self::MilkAllergy,
        Self::EggAllergy,
        Self::SoyAllergy,
        Self::WheatAllergy,
        Self::FishAllergy,
        Self::ShellfishAllergy,
        Self::SesameAllergy,
        Self::Vegan,
        Self::Vegetarian,
        Self::Keto,
        Self::LowSodium,
        Self::LowSugar,
    ];

    pub fn parse(label: &str) -> Self {
        Self::KNOWN
            .iter()
            .find(|tag| tag.label() == label)
            .cloned()
            .unwrap_or_else(|| Self::Other(label.to_string()))
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Diabetes => "Diabetes",
            Self::Hypertension => "Hypertension",
            Self::HeartDisease => "Heart Disease",
            Self::HighCholesterol => "High Cholesterol",
            Self::KidneyDisease => "Kidney Disease",
            Self::Obesity => "Obesity",
            Self::Pcos => "PCOS",
            Self::Ibs => "IBS",
            Self::GlutenIntolerance => "Gluten Intolerance",
            Self::LactoseIntolerance => "Lactose Intolerance",
            Self::PeanutAllergy => "Peanut Allergy",
            Self::TreeNutAllergy => "Tree Nut Allergy",
            Self::MilkAllergy => "Milk Allergy",
            Self::EggAllergy => "Egg Allergy",
            Self::SoyAllergy => "Soy Allergy",
            Self::WheatAllergy => "Wheat Allergy",
            Self::FishAllergy => "Fish Allergy",
            Self::ShellfishAllergy => "Shellfish Allergy",
            Self::SesameAllergy => "Sesame Allergy",
            Self::Vegan => "Vegan",
            Self::Vegetarian => "Vegetarian",
            Self::Keto => "Keto",
            Self::LowSodium => "Low Sodium",
            Self::LowSugar => "Low Sugar",
            Self::Other(label) => label,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for ProfileTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<&str> for ProfileTag {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl Serialize for ProfileTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for ProfileTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::parse(&label))
    }
}

/// Health profile of the primary user or a family member.
///
/// Tag lists keep the order they were stored in; the substitute cascade and
/// allergen output both depend on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub dietary_preferences: Vec<String>,
}

impl HealthProfile {
    /// Conditions, allergies and dietary preferences as one de-duplicated set.
    pub fn active_tags(&self) -> BTreeSet<ProfileTag> {
        self.conditions
            .iter()
            .chain(&self.allergies)
            .chain(&self.dietary_preferences)
            .map(|label| ProfileTag::parse(label))
            .collect()
    }
}
