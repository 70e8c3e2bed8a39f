pub mod allergens;
pub mod analyzer;
pub mod categorizer;
pub mod domain;
pub mod insights;
pub mod matching;
mod normalizer;
pub mod product;
pub mod profile;
pub mod substitutes;
pub mod thresholds;

#[cfg(test)]
mod tests;

pub use allergens::{allergen_warning, match_allergens, AllergenEvidence, AllergenWarning};
pub use analyzer::{AnalysisConfig, ScanAnalysis, ScanAnalyzer};
pub use categorizer::{categorize, is_e_number, CategorizedIngredients, HarmfulIngredient};
pub use domain::{
    Bucket, HarmfulReason, Ingredient, NutrientData, NutrientKey, SeverityColor, Tristate,
};
pub use insights::{select_insights, InsightKey, InsightResult, RankedInsight, MAX_INSIGHTS};
pub use matching::{reconcile, HybridMatcher};
pub use product::{split_ingredient_text, ProductDecodeError, ProductScan};
pub use profile::{HealthProfile, ProfileTag};
pub use substitutes::recommend;
pub use thresholds::{build_thresholds, NutrientRating, NutrientThreshold, ThresholdTable};
