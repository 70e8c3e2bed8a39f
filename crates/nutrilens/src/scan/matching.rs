//! Reconciles the clean, text-derived ingredient names with the structured
//! ingredient records supplied by the product database.
//!
//! The clean list decides what is displayed (length, order and text); the
//! structured records only contribute metadata. Each structured record can be
//! claimed by at most one clean name.

use super::domain::Ingredient;
use super::normalizer::{id_to_text, normalize_name, significant_words};

pub const DEFAULT_MIN_WORD_OVERLAP: f64 = 0.5;

/// Pre-normalized view of one structured record.
struct Candidate<'a> {
    record: &'a Ingredient,
    text: String,
    id_text: Option<String>,
    words: Vec<String>,
}

impl<'a> Candidate<'a> {
    fn new(record: &'a Ingredient) -> Self {
        let text = normalize_name(&record.text);
        let id_text = record
            .id
            .as_deref()
            .map(id_to_text)
            .filter(|value| !value.is_empty());
        let words = if text.is_empty() {
            id_text.as_deref().map(significant_words).unwrap_or_default()
        } else {
            significant_words(&text)
        };

        Self {
            record,
            text,
            id_text,
            words,
        }
    }

    fn forms(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.text.as_str())
            .chain(self.id_text.as_deref())
            .filter(|form| !form.is_empty())
    }

    fn exact(&self, name: &str) -> bool {
        self.forms().any(|form| form == name)
    }

    fn contains(&self, name: &str) -> bool {
        self.forms()
            .any(|form| form.contains(name) || name.contains(form))
    }

    fn overlap(&self, name_words: &[String]) -> f64 {
        let widest = name_words.len().max(self.words.len());
        if widest == 0 {
            return 0.0;
        }
        let shared = name_words
            .iter()
            .filter(|word| self.words.contains(word))
            .count();
        shared as f64 / widest as f64
    }
}

/// Greedy three-pass matcher over a pool of structured records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HybridMatcher {
    min_word_overlap: f64,
}

impl Default for HybridMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_WORD_OVERLAP)
    }
}

impl HybridMatcher {
    pub fn new(min_word_overlap: f64) -> Self {
        let sanitized = if min_word_overlap.is_finite() && min_word_overlap > 0.0 {
            min_word_overlap.min(1.0)
        } else {
            DEFAULT_MIN_WORD_OVERLAP
        };

        Self {
            min_word_overlap: sanitized,
        }
    }

    pub fn min_word_overlap(&self) -> f64 {
        self.min_word_overlap
    }

    /// Produce one ingredient per clean name, enriched with the metadata of
    /// the best structured match. With no clean names the structured list is
    /// returned as-is.
    pub fn reconcile(&self, clean_names: &[String], structured: &[Ingredient]) -> Vec<Ingredient> {
        if clean_names.is_empty() {
            return structured.to_vec();
        }

        let pool: Vec<Candidate<'_>> = structured.iter().map(Candidate::new).collect();
        let mut claimed = vec![false; pool.len()];

        clean_names
            .iter()
            .map(|clean_name| {
                let name = normalize_name(clean_name);
                match self.claim(&name, &pool, &mut claimed) {
                    Some(index) => merged(clean_name, pool[index].record),
                    None => Ingredient::plain(clean_name.clone()),
                }
            })
            .collect()
    }

    fn claim(&self, name: &str, pool: &[Candidate<'_>], claimed: &mut [bool]) -> Option<usize> {
        if name.is_empty() {
            return None;
        }

        let found = {
            let taken: &[bool] = claimed;
            unclaimed(pool, taken)
                .find(|(_, candidate)| candidate.exact(name))
                .or_else(|| unclaimed(pool, taken).find(|(_, candidate)| candidate.contains(name)))
                .map(|(index, _)| index)
                .or_else(|| self.best_overlap(name, unclaimed(pool, taken)))
        };

        if let Some(index) = found {
            claimed[index] = true;
        }
        found
    }

    fn best_overlap<'p, 'c: 'p, I>(&self, name: &str, candidates: I) -> Option<usize>
    where
        I: Iterator<Item = (usize, &'p Candidate<'c>)>,
    {
        let name_words = significant_words(name);
        if name_words.is_empty() {
            return None;
        }

        let mut best: Option<(usize, f64)> = None;
        for (index, candidate) in candidates {
            let score = candidate.overlap(&name_words);
            if score < self.min_word_overlap {
                continue;
            }
            if best.map(|(_, top)| score > top).unwrap_or(true) {
                best = Some((index, score));
            }
        }
        best.map(|(index, _)| index)
    }
}

fn unclaimed<'p, 'c>(
    pool: &'p [Candidate<'c>],
    claimed: &'p [bool],
) -> impl Iterator<Item = (usize, &'p Candidate<'c>)> + 'p {
    pool.iter()
        .enumerate()
        .filter(move |(index, _)| !claimed[*index])
}

fn merged(clean_name: &str, record: &Ingredient) -> Ingredient {
    Ingredient {
        id: record.id.clone(),
        text: clean_name.to_string(),
        vegan: record.vegan,
        vegetarian: record.vegetarian,
        percent_estimate: record.percent_estimate,
    }
}

/// Convenience wrapper using the default overlap ratio.
pub fn reconcile(clean_names: &[String], structured: &[Ingredient]) -> Vec<Ingredient> {
    HybridMatcher::default().reconcile(clean_names, structured)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::domain::Tristate;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    fn record(id: &str, text: &str, vegan: Tristate) -> Ingredient {
        Ingredient {
            id: Some(id.to_string()),
            text: text.to_string(),
            vegan,
            vegetarian: Tristate::Yes,
            percent_estimate: None,
        }
    }

    #[test]
    fn empty_clean_list_returns_structured_unchanged() {
        let structured = vec![record("en:sugar", "Sugar", Tristate::Yes)];
        assert_eq!(reconcile(&[], &structured), structured);
    }

    #[test]
    fn output_follows_clean_names_and_keeps_display_text() {
        let structured = vec![
            record("en:whole-milk-powder", "WHOLE MILK powder", Tristate::No),
            record("en:sugar", "sugar", Tristate::Yes),
        ];
        let result = reconcile(&names(&["Sugar", "Whole milk powder", "Salt"]), &structured);

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "Sugar");
        assert_eq!(result[0].id.as_deref(), Some("en:sugar"));
        assert_eq!(result[1].text, "Whole milk powder");
        assert_eq!(result[1].vegan, Tristate::No);
        assert_eq!(result[2], Ingredient::plain("Salt"));
    }

    #[test]
    fn exact_match_accepts_identifier_form() {
        let structured = vec![record("en:soy-lecithin", "emulsifier", Tristate::Yes)];
        let result = reconcile(&names(&["soy lecithin"]), &structured);
        assert_eq!(result[0].id.as_deref(), Some("en:soy-lecithin"));
    }

    #[test]
    fn exact_match_beats_earlier_containment() {
        let structured = vec![
            record("en:cocoa-butter", "cocoa butter", Tristate::Yes),
            record("en:butter", "butter", Tristate::No),
        ];
        let result = reconcile(&names(&["Butter"]), &structured);
        assert_eq!(result[0].id.as_deref(), Some("en:butter"));
    }

    #[test]
    fn containment_matches_noisy_records() {
        let structured = vec![record("en:hazelnut", "hazelnuts 13%", Tristate::Yes)];
        let result = reconcile(&names(&["hazelnuts"]), &structured);
        assert_eq!(result[0].id.as_deref(), Some("en:hazelnut"));
    }

    #[test]
    fn word_overlap_picks_best_candidate() {
        let structured = vec![
            record("en:oil-blend", "oil vegetable rapeseed sunflower", Tristate::Yes),
            record("en:refined-oil", "oil sunflower refined", Tristate::Yes),
        ];
        let result = reconcile(&names(&["refined sunflower oil"]), &structured);
        assert_eq!(result[0].id.as_deref(), Some("en:refined-oil"));
    }

    #[test]
    fn word_overlap_below_threshold_is_rejected() {
        let structured = vec![record("en:x", "modified corn starch thickener", Tristate::Yes)];
        let result = reconcile(&names(&["corn syrup solids"]), &structured);
        assert_eq!(result[0].id, None);
        assert_eq!(result[0].vegan, Tristate::Unknown);
    }

    #[test]
    fn claimed_records_are_not_reused() {
        let structured = vec![record("en:milk", "milk", Tristate::No)];
        let result = reconcile(&names(&["milk", "Milk"]), &structured);
        assert_eq!(result[0].id.as_deref(), Some("en:milk"));
        assert_eq!(result[1].id, None);
    }

    #[test]
    fn stricter_overlap_rejects_partial_matches() {
        let structured = vec![record("en:refined-oil", "oil sunflower refined", Tristate::Yes)];
        let strict = HybridMatcher::new(1.0);
        let result = strict.reconcile(&names(&["sunflower oil high oleic"]), &structured);
        assert_eq!(result[0].id, None);
        assert_eq!(HybridMatcher::new(f64::NAN).min_word_overlap(), DEFAULT_MIN_WORD_OVERLAP);
    }
}
