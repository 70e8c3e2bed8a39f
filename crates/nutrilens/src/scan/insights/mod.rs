//! Impact insights ranked by how much they matter to the active profile.

mod definitions;
mod weights;

pub use definitions::{definitions, InsightDefinition, InsightKey, InsightResult};

use super::domain::NutrientData;
use super::profile::ProfileTag;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;
use weights::relevance_weight;

/// Hard cap on the number of insights surfaced per scan.
pub const MAX_INSIGHTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedInsight {
    pub key: InsightKey,
    pub title: &'static str,
    pub icon: &'static str,
    pub weight: u8,
    pub result: InsightResult,
}

/// Relevant, computable insights sorted by relevance weight (stable on ties)
/// and truncated to `limit`, itself capped at [`MAX_INSIGHTS`].
pub fn select_insights(
    tags: &BTreeSet<ProfileTag>,
    nutrients: &NutrientData,
    limit: usize,
) -> Vec<RankedInsight> {
    let limit = limit.min(MAX_INSIGHTS);

    let mut ranked: Vec<RankedInsight> = definitions()
        .iter()
        .filter(|definition| definition.is_relevant_to(tags))
        .filter_map(|definition| {
            let result = definition.compute(nutrients)?;
            Some(RankedInsight {
                key: definition.key,
                title: definition.label,
                icon: definition.icon(result.bucket),
                weight: relevance_weight(tags, definition.key),
                result,
            })
        })
        .collect();

    let computed = ranked.len();
    ranked.sort_by(|a, b| b.weight.cmp(&a.weight));
    ranked.truncate(limit);

    debug!(computed, kept = ranked.len(), "insights selected");
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::domain::Bucket;

    fn tags(labels: &[&str]) -> BTreeSet<ProfileTag> {
        labels.iter().map(|label| ProfileTag::parse(label)).collect()
    }

    fn full_nutrients() -> NutrientData {
        NutrientData {
            energy_kcal: Some(520.0),
            fat: Some(30.0),
            saturated_fat: Some(18.0),
            carbohydrates: Some(55.0),
            sugars: Some(48.0),
            fiber: Some(1.5),
            protein: Some(6.0),
            salt: Some(0.4),
            sodium: Some(0.16),
            additives_count: Some(3.0),
        }
    }

    #[test]
    fn irrelevant_profiles_get_no_insights() {
        assert!(select_insights(&tags(&[]), &full_nutrients(), MAX_INSIGHTS).is_empty());
        assert!(select_insights(&tags(&["Vegan", "Gout"]), &full_nutrients(), MAX_INSIGHTS).is_empty());
    }

    #[test]
    fn never_more_than_three() {
        let selected = select_insights(
            &tags(&["Diabetes", "Obesity", "Heart Disease", "IBS", "Kidney Disease"]),
            &full_nutrients(),
            10,
        );
        assert_eq!(selected.len(), MAX_INSIGHTS);
    }

    #[test]
    fn ranks_by_weight_with_stable_ties() {
        let selected = select_insights(&tags(&["Diabetes"]), &full_nutrients(), MAX_INSIGHTS);
        let keys: Vec<InsightKey> = selected.iter().map(|insight| insight.key).collect();
        assert_eq!(
            keys,
            vec![InsightKey::Glycemic, InsightKey::Sugar, InsightKey::CarbLoad]
        );
        assert_eq!(selected[0].weight, 10);

        // Hypertension and Obesity both register 10 for their top insight;
        // sodium is declared before calorie, so it stays first.
        let selected = select_insights(
            &tags(&["Hypertension", "Obesity"]),
            &full_nutrients(),
            2,
        );
        let keys: Vec<InsightKey> = selected.iter().map(|insight| insight.key).collect();
        assert_eq!(keys, vec![InsightKey::Sodium, InsightKey::Calorie]);
    }

    #[test]
    fn missing_sugars_drops_glycemic() {
        let nutrients = NutrientData {
            sugars: None,
            ..full_nutrients()
        };
        let selected = select_insights(&tags(&["Diabetes"]), &nutrients, MAX_INSIGHTS);
        assert!(selected.iter().all(|insight| insight.key != InsightKey::Glycemic));
        assert!(selected.iter().all(|insight| insight.key != InsightKey::Sugar));
        assert_eq!(selected[0].key, InsightKey::CarbLoad);
    }

    #[test]
    fn kidney_profile_ranks_sodium_over_protein() {
        let selected = select_insights(
            &tags(&["Kidney Disease", "Vegan"]),
            &full_nutrients(),
            MAX_INSIGHTS,
        );
        let keys: Vec<InsightKey> = selected.iter().map(|insight| insight.key).collect();
        assert_eq!(keys, vec![InsightKey::Sodium, InsightKey::Protein]);
        assert_eq!(selected[1].result.bucket, Bucket::Low);
    }

    #[test]
    fn unregistered_relevance_defaults_to_weight_one() {
        let selected = select_insights(
            &tags(&["Lactose Intolerance"]),
            &full_nutrients(),
            MAX_INSIGHTS,
        );
        let ranked: Vec<(InsightKey, u8)> = selected
            .iter()
            .map(|insight| (insight.key, insight.weight))
            .collect();
        assert_eq!(
            ranked,
            vec![(InsightKey::DigestiveLoad, 7), (InsightKey::Additives, 1)]
        );
    }

    #[test]
    fn icon_matches_bucket() {
        let selected = select_insights(&tags(&["Hypertension"]), &full_nutrients(), MAX_INSIGHTS);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].result.bucket, Bucket::Moderate);
        assert_eq!(selected[0].icon, "droplet");
    }
}
