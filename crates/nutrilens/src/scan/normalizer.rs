use regex::Regex;

pub(crate) fn normalize_name(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase()
}

/// Drop a language prefix such as `en:` from an Open Food Facts identifier.
pub(crate) fn strip_language_prefix(id: &str) -> &str {
    match id.split_once(':') {
        Some((prefix, rest)) if (2..=3).contains(&prefix.len()) => rest,
        _ => id,
    }
}

/// `en:soy-lecithin` becomes `soy lecithin`.
pub(crate) fn id_to_text(id: &str) -> String {
    normalize_name(&strip_language_prefix(id).replace('-', " "))
}

/// Words longer than two characters, the unit of the word-overlap pass.
pub(crate) fn significant_words(value: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    for word in value
        .split(|ch: char| !ch.is_alphanumeric())
        .filter(|word| word.chars().count() > 2)
    {
        let word = word.to_lowercase();
        if !words.contains(&word) {
            words.push(word);
        }
    }
    words
}

/// Case-insensitive word-boundary pattern for a literal phrase.
pub(crate) fn whole_word_pattern(phrase: &str) -> Option<Regex> {
    let phrase = phrase.trim();
    if phrase.is_empty() {
        return None;
    }
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(phrase))).ok()
}
