use super::domain::{HarmfulReason, Ingredient, Tristate};
use super::normalizer::{normalize_name, strip_language_prefix, whole_word_pattern};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use tracing::debug;

static E_NUMBER: OnceLock<Option<Regex>> = OnceLock::new();

fn e_number_pattern() -> Option<&'static Regex> {
    E_NUMBER
        .get_or_init(|| Regex::new(r"(?i)^[a-z]{2,3}:e\d{3,4}[a-z]?$").ok())
        .as_ref()
}

/// `en:e322`, `en:e150d` and friends.
pub fn is_e_number(id: &str) -> bool {
    e_number_pattern()
        .map(|pattern| pattern.is_match(id.trim()))
        .unwrap_or(false)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HarmfulIngredient {
    pub ingredient: Ingredient,
    pub reason: HarmfulReason,
}

/// Disjoint partition of a product's ingredients.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategorizedIngredients {
    pub harmful: Vec<HarmfulIngredient>,
    pub ok: Vec<Ingredient>,
    pub safe: Vec<Ingredient>,
}

impl CategorizedIngredients {
    pub fn len(&self) -> usize {
        self.harmful.len() + self.ok.len() + self.safe.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The user's personally flagged ingredient names, compiled once per pass.
struct FlaggedNames {
    entries: Vec<(String, Regex)>,
}

impl FlaggedNames {
    fn new(names: &[String]) -> Self {
        let entries = names
            .iter()
            .map(|name| normalize_name(name))
            .filter(|name| !name.is_empty())
            .filter_map(|name| whole_word_pattern(&name).map(|pattern| (name, pattern)))
            .collect();
        Self { entries }
    }

    fn matches(&self, text: &str) -> bool {
        self.entries
            .iter()
            .any(|(name, pattern)| text == name || pattern.is_match(text))
    }
}

fn prefers(preferences: &[String], wanted: &str) -> bool {
    preferences
        .iter()
        .any(|preference| preference.trim().eq_ignore_ascii_case(wanted))
}

fn matches_allergen_tag(id: &str, allergen_tags: &[String]) -> bool {
    let id = strip_language_prefix(id.trim()).to_lowercase();
    if id.is_empty() {
        return false;
    }

    allergen_tags.iter().any(|tag| {
        let tag = strip_language_prefix(tag.trim()).to_lowercase();
        !tag.is_empty() && (id == tag || id.contains(&tag) || tag.contains(&id))
    })
}

/// Bucket every ingredient into harmful, ok or safe.
///
/// Ingredients whose identifier matches a product allergen tag go straight
/// to `safe`: allergens are reported by the allergen matcher and never
/// double-counted here.
pub fn categorize(
    ingredients: &[Ingredient],
    allergen_tags: &[String],
    dietary_preferences: &[String],
    flagged_names: &[String],
) -> CategorizedIngredients {
    let vegan = prefers(dietary_preferences, "vegan");
    let vegetarian = prefers(dietary_preferences, "vegetarian");
    let flagged = FlaggedNames::new(flagged_names);
    let mut result = CategorizedIngredients::default();

    for ingredient in ingredients {
        let id = ingredient.id.as_deref().unwrap_or_default();

        if matches_allergen_tag(id, allergen_tags) {
            result.safe.push(ingredient.clone());
            continue;
        }

        let reason = if vegan && ingredient.vegan == Tristate::No {
            Some(HarmfulReason::Vegan)
        } else if vegetarian && ingredient.vegetarian == Tristate::No {
            Some(HarmfulReason::Vegetarian)
        } else if flagged.matches(&normalize_name(&ingredient.text)) {
            Some(HarmfulReason::UserFlagged)
        } else {
            None
        };

        match reason {
            Some(reason) => result.harmful.push(HarmfulIngredient {
                ingredient: ingredient.clone(),
                reason,
            }),
            None if is_e_number(id) => result.ok.push(ingredient.clone()),
            None => result.safe.push(ingredient.clone()),
        }
    }

    debug!(
        harmful = result.harmful.len(),
        ok = result.ok.len(),
        safe = result.safe.len(),
        "ingredients categorized"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    fn ingredient(id: &str, text: &str, vegan: Tristate, vegetarian: Tristate) -> Ingredient {
        Ingredient {
            id: Some(id.to_string()),
            text: text.to_string(),
            vegan,
            vegetarian,
            percent_estimate: None,
        }
    }

    #[test]
    fn e_number_pattern_requires_prefix_and_digits() {
        assert!(is_e_number("en:e322"));
        assert!(is_e_number("en:E150d"));
        assert!(!is_e_number("e322"));
        assert!(!is_e_number("en:egg"));
        assert!(!is_e_number("en:e"));
    }

    #[test]
    fn soy_lecithin_additive_is_ok() {
        let items = vec![ingredient("en:e322", "soy lecithin", Tristate::Yes, Tristate::Yes)];
        let result = categorize(&items, &[], &[], &[]);
        assert_eq!(result.ok, items);
        assert!(result.harmful.is_empty());
        assert!(result.safe.is_empty());
    }

    #[test]
    fn vegan_conflict_beats_vegetarian_and_flags() {
        let items = vec![ingredient("en:milk", "milk", Tristate::No, Tristate::No)];
        let result = categorize(
            &items,
            &[],
            &strings(&["Vegan", "Vegetarian"]),
            &strings(&["milk"]),
        );
        assert_eq!(result.harmful.len(), 1);
        assert_eq!(result.harmful[0].reason, HarmfulReason::Vegan);
    }

    #[test]
    fn vegetarian_conflict_is_reported() {
        let items = vec![ingredient("en:gelatin", "gelatin", Tristate::No, Tristate::No)];
        let result = categorize(&items, &[], &strings(&["Vegetarian"]), &[]);
        assert_eq!(result.harmful[0].reason, HarmfulReason::Vegetarian);
    }

    #[test]
    fn maybe_and_unknown_status_are_not_conflicts() {
        let items = vec![
            ingredient("en:natural-flavouring", "natural flavouring", Tristate::Maybe, Tristate::Maybe),
            Ingredient::plain("spices"),
        ];
        let result = categorize(&items, &[], &strings(&["Vegan"]), &[]);
        assert!(result.harmful.is_empty());
        assert_eq!(result.safe.len(), 2);
    }

    #[test]
    fn user_flags_match_whole_words_only() {
        let items = vec![
            Ingredient::plain("sugarcane syrup"),
            Ingredient::plain("Brown Sugar"),
            Ingredient::plain("sugar"),
        ];
        let result = categorize(&items, &[], &[], &strings(&["Sugar"]));

        let harmful: Vec<&str> = result
            .harmful
            .iter()
            .map(|entry| entry.ingredient.text.as_str())
            .collect();
        assert_eq!(harmful, vec!["Brown Sugar", "sugar"]);
        assert!(result
            .harmful
            .iter()
            .all(|entry| entry.reason == HarmfulReason::UserFlagged));
        assert_eq!(result.safe, vec![Ingredient::plain("sugarcane syrup")]);
    }

    #[test]
    fn allergen_tagged_ingredients_are_never_harmful() {
        let items = vec![
            ingredient("en:milk", "milk", Tristate::No, Tristate::Yes),
            ingredient("en:peanut", "peanuts", Tristate::Yes, Tristate::Yes),
        ];
        let result = categorize(
            &items,
            &strings(&["en:milk", "en:peanuts"]),
            &strings(&["Vegan"]),
            &strings(&["peanuts"]),
        );
        assert!(result.harmful.is_empty());
        assert!(result.ok.is_empty());
        assert_eq!(result.safe, items);
    }

    #[test]
    fn every_ingredient_lands_in_exactly_one_bucket() {
        let items = vec![
            ingredient("en:milk", "milk", Tristate::No, Tristate::Yes),
            ingredient("en:e471", "mono- and diglycerides", Tristate::Maybe, Tristate::Maybe),
            ingredient("en:sugar", "sugar", Tristate::Yes, Tristate::Yes),
            ingredient("en:palm-oil", "palm oil", Tristate::Yes, Tristate::Yes),
            Ingredient::plain("water"),
        ];
        let result = categorize(
            &items,
            &strings(&["en:milk"]),
            &strings(&["Vegan"]),
            &strings(&["palm oil"]),
        );

        assert_eq!(result.len(), items.len());
        for item in &items {
            let hits = result.harmful.iter().filter(|entry| &entry.ingredient == item).count()
                + result.ok.iter().filter(|entry| *entry == item).count()
                + result.safe.iter().filter(|entry| *entry == item).count();
            assert_eq!(hits, 1, "{} should appear once", item.text);
        }
        assert_eq!(result.ok.len(), 1);
        assert_eq!(result.harmful.len(), 1);
        assert_eq!(result.harmful[0].ingredient.text, "palm oil");
    }
}
