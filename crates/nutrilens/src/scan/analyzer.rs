use super::allergens::{allergen_warning, match_allergens, AllergenEvidence, AllergenWarning};
use super::categorizer::{categorize, CategorizedIngredients, HarmfulIngredient};
use super::domain::Ingredient;
use super::insights::{select_insights, RankedInsight, MAX_INSIGHTS};
use super::matching::{HybridMatcher, DEFAULT_MIN_WORD_OVERLAP};
use super::product::ProductScan;
use super::profile::HealthProfile;
use super::substitutes::recommend;
use super::thresholds::{build_thresholds, rate_all, NutrientRating, ThresholdTable};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Tunables for a scan pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub insight_limit: usize,
    pub min_word_overlap: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            insight_limit: MAX_INSIGHTS,
            min_word_overlap: DEFAULT_MIN_WORD_OVERLAP,
        }
    }
}

/// Everything the engine derives from one product and one profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanAnalysis {
    pub product_code: String,
    pub product_name: String,
    pub profile_name: String,
    pub ingredients: Vec<Ingredient>,
    pub categorized: CategorizedIngredients,
    pub matched_allergens: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergen_warning: Option<AllergenWarning>,
    pub thresholds: ThresholdTable,
    pub ratings: Vec<NutrientRating>,
    pub insights: Vec<RankedInsight>,
}

/// Runs the full pipeline. Holds no per-scan state, so one analyzer can
/// serve any number of profiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanAnalyzer {
    matcher: HybridMatcher,
    insight_limit: usize,
}

impl Default for ScanAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl ScanAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            matcher: HybridMatcher::new(config.min_word_overlap),
            insight_limit: config.insight_limit.clamp(1, MAX_INSIGHTS),
        }
    }

    pub fn insight_limit(&self) -> usize {
        self.insight_limit
    }

    pub fn analyze(
        &self,
        product: &ProductScan,
        profile: &HealthProfile,
        flagged_ingredients: &[String],
    ) -> ScanAnalysis {
        let clean_names = product.clean_ingredient_names();
        let ingredients = self.matcher.reconcile(&clean_names, &product.ingredients);
        debug!(
            clean = clean_names.len(),
            structured = product.ingredients.len(),
            merged = ingredients.len(),
            "ingredients reconciled"
        );

        let tags = profile.active_tags();
        let thresholds = build_thresholds(&tags);
        let ratings = rate_all(&product.nutriments, &thresholds);

        let ingredient_ids = product.ingredient_ids();
        let evidence = AllergenEvidence {
            allergen_tags: &product.allergens_tags,
            ingredients_text: &product.ingredients_text,
            ingredient_ids: &ingredient_ids,
        };
        let matched_allergens = match_allergens(&profile.allergies, &evidence);
        let warning = allergen_warning(&profile.name, &matched_allergens);

        let categorized = categorize(
            &ingredients,
            &product.allergens_tags,
            &profile.dietary_preferences,
            flagged_ingredients,
        );

        let insights = select_insights(&tags, &product.nutriments, self.insight_limit);

        info!(
            code = %product.code,
            harmful = categorized.harmful.len(),
            allergens = matched_allergens.len(),
            insights = insights.len(),
            "scan analyzed"
        );

        ScanAnalysis {
            product_code: product.code.clone(),
            product_name: product.product_name.clone(),
            profile_name: profile.name.clone(),
            ingredients,
            categorized,
            matched_allergens,
            allergen_warning: warning,
            thresholds,
            ratings,
            insights,
        }
    }

    /// Replacement suggestions for one harmful ingredient, computed on demand.
    pub fn substitutes_for(&self, harmful: &HarmfulIngredient, profile: &HealthProfile) -> Vec<String> {
        recommend(
            &harmful.ingredient.text,
            harmful.reason,
            &profile.conditions,
            &profile.allergies,
        )
    }
}
