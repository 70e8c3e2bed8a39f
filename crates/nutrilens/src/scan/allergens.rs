//! Allergen matching against a profile's declared allergies.
//!
//! Three independent signals are consulted per allergy: the product's
//! allergen tags, the structured ingredient identifiers and the raw
//! ingredient text. The tag and identifier checks are plain containment, so a
//! short rule entry can hit an unrelated longer identifier. That imprecision
//! is kept on purpose: tightening it changes which allergens get reported.

use super::normalizer::whole_word_pattern;
use super::profile::ProfileTag;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use tracing::debug;

/// Keywords up to this length must match as whole words.
const SHORT_KEYWORD_LEN: usize = 3;

/// Signals for one allergy label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllergenRule {
    pub tags: &'static [&'static str],
    pub keywords: &'static [&'static str],
    pub ingredient_ids: &'static [&'static str],
}

const PEANUT: AllergenRule = AllergenRule {
    tags: &["en:peanuts"],
    keywords: &["peanut", "groundnut", "arachis"],
    ingredient_ids: &["en:peanut"],
};

const TREE_NUT: AllergenRule = AllergenRule {
    tags: &["en:nuts"],
    keywords: &[
        "almond",
        "hazelnut",
        "walnut",
        "cashew",
        "pecan",
        "pistachio",
        "macadamia",
        "brazil nut",
    ],
    ingredient_ids: &[
        "en:almond",
        "en:hazelnut",
        "en:walnut",
        "en:cashew",
        "en:pecan",
        "en:pistachio",
        "en:macadamia",
    ],
};

const MILK: AllergenRule = AllergenRule {
    tags: &["en:milk"],
    // No "butter" keyword: as a substring it matches cocoa and nut butters.
    keywords: &[
        "milk", "whey", "casein", "lactose", "cream", "cheese", "yogurt",
    ],
    ingredient_ids: &[
        "en:milk",
        "en:whey",
        "en:casein",
        "en:lactose",
        "en:butter",
        "en:cream",
        "en:cheese",
    ],
};

const EGG: AllergenRule = AllergenRule {
    tags: &["en:eggs"],
    keywords: &["egg", "albumin", "lysozyme", "mayonnaise"],
    ingredient_ids: &["en:egg"],
};

const SOY: AllergenRule = AllergenRule {
    tags: &["en:soybeans"],
    keywords: &["soy", "soya", "edamame", "tofu"],
    ingredient_ids: &["en:soy", "en:soya"],
};

const GLUTEN: AllergenRule = AllergenRule {
    tags: &["en:gluten"],
    keywords: &["wheat", "barley", "rye", "gluten", "spelt", "malt"],
    ingredient_ids: &["en:wheat", "en:gluten", "en:barley", "en:rye", "en:spelt"],
};

const FISH: AllergenRule = AllergenRule {
    tags: &["en:fish"],
    keywords: &["fish", "anchovy", "cod", "salmon", "tuna", "sardine"],
    ingredient_ids: &["en:fish"],
};

const SHELLFISH: AllergenRule = AllergenRule {
    tags: &["en:crustaceans", "en:molluscs"],
    keywords: &[
        "shrimp", "prawn", "crab", "lobster", "shellfish", "oyster", "mussel", "squid",
    ],
    ingredient_ids: &["en:crustacean", "en:shrimp", "en:prawn", "en:mollusc"],
};

const SESAME: AllergenRule = AllergenRule {
    tags: &["en:sesame-seeds"],
    keywords: &["sesame", "tahini"],
    ingredient_ids: &["en:sesame"],
};

const RULES: [&AllergenRule; 9] = [
    &PEANUT, &TREE_NUT, &MILK, &EGG, &SOY, &GLUTEN, &FISH, &SHELLFISH, &SESAME,
];

static SHORT_KEYWORDS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();

/// Whole-word patterns for every short rule keyword, compiled once.
fn short_keyword_patterns() -> &'static [(&'static str, Regex)] {
    SHORT_KEYWORDS.get_or_init(|| {
        RULES
            .iter()
            .flat_map(|rule| rule.keywords.iter().copied())
            .filter(|keyword| is_short(keyword))
            .filter_map(|keyword| whole_word_pattern(keyword).map(|pattern| (keyword, pattern)))
            .collect()
    })
}

fn is_short(keyword: &str) -> bool {
    keyword.chars().count() <= SHORT_KEYWORD_LEN
}

/// The rule entry for a known allergy label.
pub fn allergen_rule(tag: &ProfileTag) -> Option<&'static AllergenRule> {
    match tag {
        ProfileTag::PeanutAllergy => Some(&PEANUT),
        ProfileTag::TreeNutAllergy => Some(&TREE_NUT),
        ProfileTag::MilkAllergy | ProfileTag::LactoseIntolerance => Some(&MILK),
        ProfileTag::EggAllergy => Some(&EGG),
        ProfileTag::SoyAllergy => Some(&SOY),
        ProfileTag::WheatAllergy | ProfileTag::GlutenIntolerance => Some(&GLUTEN),
        ProfileTag::FishAllergy => Some(&FISH),
        ProfileTag::ShellfishAllergy => Some(&SHELLFISH),
        ProfileTag::SesameAllergy => Some(&SESAME),
        _ => None,
    }
}

/// Product-side data the matcher looks at.
#[derive(Debug, Clone, Copy)]
pub struct AllergenEvidence<'a> {
    pub allergen_tags: &'a [String],
    pub ingredients_text: &'a str,
    pub ingredient_ids: &'a [String],
}

impl<'a> AllergenEvidence<'a> {
    fn matches_rule(&self, rule: &AllergenRule, text: &str) -> bool {
        self.allergen_tags
            .iter()
            .any(|tag| rule.tags.iter().any(|needle| tag.contains(needle)))
            || self
                .ingredient_ids
                .iter()
                .any(|id| rule.ingredient_ids.iter().any(|needle| id.contains(needle)))
            || rule
                .keywords
                .iter()
                .any(|keyword| keyword_in_text(text, keyword))
    }

    fn matches_first_word(&self, label: &str, text: &str) -> bool {
        let Some(word) = label.split_whitespace().next() else {
            return false;
        };
        let Some(pattern) = whole_word_pattern(&word.to_lowercase()) else {
            return false;
        };

        self.allergen_tags.iter().any(|tag| pattern.is_match(tag))
            || pattern.is_match(text)
            || self.ingredient_ids.iter().any(|id| pattern.is_match(id))
    }
}

fn keyword_in_text(text: &str, keyword: &str) -> bool {
    if !is_short(keyword) {
        return text.contains(keyword);
    }
    short_keyword_patterns()
        .iter()
        .find(|(short, _)| *short == keyword)
        .map(|(_, pattern)| pattern.is_match(text))
        .unwrap_or(false)
}

/// Allergy labels from `allergies` that the product triggers, in profile
/// order. Each label stops at its first matching signal.
pub fn match_allergens(allergies: &[String], evidence: &AllergenEvidence<'_>) -> Vec<String> {
    let text = evidence.ingredients_text.to_lowercase();

    let matched: Vec<String> = allergies
        .iter()
        .filter(|label| match allergen_rule(&ProfileTag::parse(label)) {
            Some(rule) => evidence.matches_rule(rule, &text),
            None => evidence.matches_first_word(label, &text),
        })
        .cloned()
        .collect();

    debug!(
        declared = allergies.len(),
        matched = matched.len(),
        "allergen matching complete"
    );
    matched
}

/// Personalized warning shown when at least one allergy matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllergenWarning {
    pub profile_name: String,
    pub matched: Vec<String>,
    pub message: String,
}

pub fn allergen_warning(profile_name: &str, matched: &[String]) -> Option<AllergenWarning> {
    if matched.is_empty() {
        return None;
    }

    let who = if profile_name.trim().is_empty() {
        "this profile".to_string()
    } else {
        profile_name.trim().to_string()
    };

    Some(AllergenWarning {
        profile_name: profile_name.to_string(),
        matched: matched.to_vec(),
        message: format!("Contains {} triggers for {}", join_labels(matched), who),
    })
}

fn join_labels(labels: &[String]) -> String {
    match labels {
        [] => String::new(),
        [only] => only.clone(),
        [head @ .., last] => format!("{} and {}", head.join(", "), last),
    }
}
