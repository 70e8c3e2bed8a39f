//! Decoding of Open Food Facts shaped product payloads.
//!
//! Product data arrives with optional, sometimes stringly-typed numbers and
//! a structured ingredient list that may itself be JSON-encoded text. The
//! decoder never rejects a product for bad nutrient or ingredient data; it
//! degrades to "absent" and logs.

use super::domain::{usable, Ingredient, NutrientData, Tristate};
use super::normalizer::id_to_text;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::sync::OnceLock;
use tracing::warn;

const KJ_PER_KCAL: f64 = 4.184;

#[derive(Debug, thiserror::Error)]
pub enum ProductDecodeError {
    #[error("product payload could not be decoded: {0}")]
    Json(#[from] serde_json::Error),
    #[error("product payload must be a JSON object")]
    NotAnObject,
    #[error("structured ingredients must be an array")]
    IngredientsNotArray,
    #[error("structured ingredient #{index} is malformed: {reason}")]
    MalformedIngredient { index: usize, reason: String },
}

/// A scanned product as handed to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductScan {
    pub code: String,
    pub product_name: String,
    pub lang: Option<String>,
    /// Per 100 g. `additives_n` from the payload lands in `additives_count`.
    pub nutriments: NutrientData,
    pub allergens_tags: Vec<String>,
    pub ingredients_text: String,
    pub ingredients: Vec<Ingredient>,
}

impl ProductScan {
    pub fn from_json_str(payload: &str) -> Result<Self, ProductDecodeError> {
        let value: Value = serde_json::from_str(payload)?;
        Self::from_value(value)
    }

    /// Accepts either the bare product object or the `{"product": {...}}`
    /// envelope returned by the product API.
    pub fn from_value(value: Value) -> Result<Self, ProductDecodeError> {
        let value = match value {
            Value::Object(mut map) => match map.remove("product") {
                Some(inner @ Value::Object(_)) => inner,
                Some(other) => {
                    map.insert("product".to_string(), other);
                    Value::Object(map)
                }
                None => Value::Object(map),
            },
            _ => return Err(ProductDecodeError::NotAnObject),
        };

        let raw: RawProduct = serde_json::from_value(value)?;
        Ok(raw.into_scan())
    }

    /// Clean, display-ready ingredient names parsed from the raw text.
    pub fn clean_ingredient_names(&self) -> Vec<String> {
        split_ingredient_text(&self.ingredients_text)
    }

    pub fn ingredient_ids(&self) -> Vec<String> {
        self.ingredients
            .iter()
            .filter_map(|ingredient| ingredient.id.clone())
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawProduct {
    #[serde(default, deserialize_with = "lenient_string")]
    code: String,
    #[serde(default, deserialize_with = "lenient_string")]
    product_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    lang: String,
    #[serde(default, deserialize_with = "lenient_nutriments")]
    nutriments: RawNutriments,
    #[serde(default, deserialize_with = "lenient_number")]
    additives_n: Option<f64>,
    #[serde(default, deserialize_with = "string_list")]
    allergens_tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    ingredients_text: String,
    #[serde(default, deserialize_with = "lenient_string")]
    ingredients_text_en: String,
    #[serde(default)]
    ingredients: Option<Value>,
}

impl RawProduct {
    fn into_scan(self) -> ProductScan {
        let ingredients = match self.ingredients.as_ref() {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => decode_structured_ingredients(value).unwrap_or_else(|err| {
                warn!(code = %self.code, error = %err, "ignoring structured ingredients");
                Vec::new()
            }),
        };

        let ingredients_text = if self.ingredients_text_en.trim().is_empty() {
            self.ingredients_text
        } else {
            self.ingredients_text_en
        };

        let mut nutriments = self.nutriments.into_data();
        nutriments.additives_count = usable(self.additives_n);

        ProductScan {
            code: self.code,
            product_name: self.product_name,
            lang: Some(self.lang).filter(|lang| !lang.trim().is_empty()),
            nutriments,
            allergens_tags: self.allergens_tags,
            ingredients_text,
            ingredients,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawNutriments {
    #[serde(rename = "energy-kcal_100g", default, deserialize_with = "lenient_number")]
    energy_kcal: Option<f64>,
    #[serde(rename = "energy_100g", default, deserialize_with = "lenient_number")]
    energy_kj: Option<f64>,
    #[serde(rename = "fat_100g", default, deserialize_with = "lenient_number")]
    fat: Option<f64>,
    #[serde(rename = "saturated-fat_100g", default, deserialize_with = "lenient_number")]
    saturated_fat: Option<f64>,
    #[serde(rename = "carbohydrates_100g", default, deserialize_with = "lenient_number")]
    carbohydrates: Option<f64>,
    #[serde(rename = "sugars_100g", default, deserialize_with = "lenient_number")]
    sugars: Option<f64>,
    #[serde(rename = "fiber_100g", default, deserialize_with = "lenient_number")]
    fiber: Option<f64>,
    #[serde(rename = "proteins_100g", default, deserialize_with = "lenient_number")]
    protein: Option<f64>,
    #[serde(rename = "salt_100g", default, deserialize_with = "lenient_number")]
    salt: Option<f64>,
    #[serde(rename = "sodium_100g", default, deserialize_with = "lenient_number")]
    sodium: Option<f64>,
}

impl RawNutriments {
    fn into_data(self) -> NutrientData {
        let energy_kcal = usable(self.energy_kcal)
            .or_else(|| usable(self.energy_kj).map(|kj| kj / KJ_PER_KCAL));

        NutrientData {
            energy_kcal,
            fat: usable(self.fat),
            saturated_fat: usable(self.saturated_fat),
            carbohydrates: usable(self.carbohydrates),
            sugars: usable(self.sugars),
            fiber: usable(self.fiber),
            protein: usable(self.protein),
            salt: usable(self.salt),
            sodium: usable(self.sodium),
            additives_count: None,
        }
    }
}

fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

fn lenient_nutriments<'de, D>(deserializer: D) -> Result<RawNutriments, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => RawNutriments::default(),
        Some(value) => RawNutriments::deserialize(value).unwrap_or_else(|err| {
            warn!(error = %err, "ignoring malformed nutriments");
            RawNutriments::default()
        }),
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => text,
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    })
}

fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
                _ => None,
            })
            .collect(),
        Some(Value::String(text)) => text
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    })
}

/// Decode the provider's structured ingredient list. The list may be an
/// array or a JSON-encoded string holding one.
pub fn decode_structured_ingredients(value: &Value) -> Result<Vec<Ingredient>, ProductDecodeError> {
    let decoded;
    let items = match value {
        Value::Array(items) => items,
        Value::String(encoded) => {
            decoded = serde_json::from_str::<Value>(encoded)?;
            match &decoded {
                Value::Array(items) => items,
                _ => return Err(ProductDecodeError::IngredientsNotArray),
            }
        }
        _ => return Err(ProductDecodeError::IngredientsNotArray),
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| decode_ingredient(index, item))
        .collect()
}

fn decode_ingredient(index: usize, item: &Value) -> Result<Ingredient, ProductDecodeError> {
    let malformed = |reason: &str| ProductDecodeError::MalformedIngredient {
        index,
        reason: reason.to_string(),
    };

    let Value::Object(fields) = item else {
        return Err(malformed("expected an object"));
    };

    let id = fields
        .get("id")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string);
    let text = fields
        .get("text")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string);

    let text = match (text, id.as_deref()) {
        (Some(text), _) => text,
        (None, Some(id)) => id_to_text(id),
        (None, None) => return Err(malformed("needs an id or a text")),
    };

    let status = |key: &str| {
        fields
            .get(key)
            .and_then(Value::as_str)
            .map(Tristate::parse)
            .unwrap_or_default()
    };

    Ok(Ingredient {
        id,
        text,
        vegan: status("vegan"),
        vegetarian: status("vegetarian"),
        percent_estimate: usable(fields.get("percent_estimate").and_then(number_from_value)),
    })
}

static PERCENTAGE: OnceLock<Option<Regex>> = OnceLock::new();

fn percentage_pattern() -> Option<&'static Regex> {
    PERCENTAGE
        .get_or_init(|| Regex::new(r"[<>~]?\s*\d+(?:[.,]\d+)?\s*%").ok())
        .as_ref()
}

/// Turn raw label text into the ordered, de-duplicated clean-name list.
pub fn split_ingredient_text(raw: &str) -> Vec<String> {
    let body = strip_label(raw.trim());
    let mut names: Vec<String> = Vec::new();
    let mut seen: Vec<String> = Vec::new();

    for part in top_level_parts(body) {
        let name = clean_part(&part);
        if name.is_empty() {
            continue;
        }
        let key = name.to_lowercase();
        if !seen.contains(&key) {
            seen.push(key);
            names.push(name);
        }
    }
    names
}

fn strip_label(text: &str) -> &str {
    const LABEL: &str = "ingredients";
    match text.get(..LABEL.len()) {
        Some(head) if head.eq_ignore_ascii_case(LABEL) => {
            let rest = text[LABEL.len()..].trim_start();
            rest.strip_prefix(':').unwrap_or(text).trim_start()
        }
        _ => text,
    }
}

/// Split on `,` and `;` outside of any bracket, dropping bracketed detail.
///
/// A bracket that is never closed is ignored and the text after it is split
/// as usual, so truncated or OCR-damaged labels keep their later entries.
fn top_level_parts(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut opened_at = 0usize;

    for (index, ch) in text.char_indices() {
        match ch {
            '(' | '[' | '{' => {
                if depth == 0 {
                    opened_at = index;
                }
                depth += 1;
            }
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' | ';' if depth == 0 => parts.push(std::mem::take(&mut current)),
            _ if depth == 0 => current.push(ch),
            _ => {}
        }
    }

    if depth > 0 {
        warn!(offset = opened_at, "unclosed bracket in ingredient text");
        let mut tail = top_level_parts(&text[opened_at + 1..]).into_iter();
        if let Some(head) = tail.next() {
            current.push_str(&head);
        }
        parts.push(current);
        parts.extend(tail);
        return parts;
    }

    parts.push(current);
    parts
}

fn clean_part(part: &str) -> String {
    let without_emphasis = part.replace(['_', '*'], "");
    let without_percent = match percentage_pattern() {
        Some(pattern) => pattern.replace_all(&without_emphasis, " ").into_owned(),
        None => without_emphasis,
    };
    let collapsed = without_percent.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_matches(|ch: char| ch == '.' || ch == ':' || ch.is_whitespace())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn splits_top_level_and_drops_detail() {
        let names = split_ingredient_text(
            "Ingredients: Sugar, palm oil (rspo, segregated), HAZELNUTS 13%; \
             skimmed _milk_ powder 8.7 %, cocoa [fat-reduced], sugar.",
        );
        assert_eq!(
            names,
            vec!["Sugar", "palm oil", "HAZELNUTS", "skimmed milk powder", "cocoa"]
        );
    }

    #[test]
    fn unclosed_bracket_keeps_later_ingredients() {
        assert_eq!(
            split_ingredient_text("sugar (cane, water, salt, milk"),
            vec!["sugar cane", "water", "salt", "milk"]
        );
        assert_eq!(
            split_ingredient_text("cocoa (fat-reduced), flour [wheat, (rye, salt"),
            vec!["cocoa", "flour wheat", "rye", "salt"]
        );
    }

    #[test]
    fn split_handles_blank_and_unlabelled_text() {
        assert!(split_ingredient_text("").is_empty());
        assert!(split_ingredient_text(" , ;  ").is_empty());
        assert_eq!(split_ingredient_text("water"), vec!["water"]);
        assert_eq!(
            split_ingredient_text("Ingredients list, salt"),
            vec!["Ingredients list", "salt"]
        );
    }

    #[test]
    fn decodes_wrapped_payload_with_string_numbers() {
        let payload = json!({
            "code": "3017620422003",
            "product": {
                "code": 3017620422003u64,
                "product_name": "Hazelnut spread",
                "lang": "en",
                "additives_n": "1",
                "allergens_tags": ["en:milk", "en:nuts", ""],
                "ingredients_text": "Sugar, palm oil, hazelnuts 13%",
                "nutriments": {
                    "energy-kcal_100g": 539,
                    "sugars_100g": "56,3",
                    "fat_100g": 30.9,
                    "salt_100g": -1,
                    "fiber_100g": null
                }
            }
        });

        let scan = ProductScan::from_value(payload).expect("product decodes");
        assert_eq!(scan.code, "3017620422003");
        assert_eq!(scan.lang.as_deref(), Some("en"));
        assert_eq!(scan.nutriments.energy_kcal, Some(539.0));
        assert_eq!(scan.nutriments.sugars, Some(56.3));
        assert_eq!(scan.nutriments.salt, None);
        assert_eq!(scan.nutriments.fiber, None);
        assert_eq!(scan.nutriments.additives_count, Some(1.0));
        assert_eq!(scan.allergens_tags, vec!["en:milk", "en:nuts"]);
        assert_eq!(
            scan.clean_ingredient_names(),
            vec!["Sugar", "palm oil", "hazelnuts"]
        );
    }

    #[test]
    fn energy_falls_back_to_kilojoules() {
        let scan = ProductScan::from_value(json!({
            "nutriments": { "energy_100g": 418.4 }
        }))
        .expect("product decodes");
        let kcal = scan.nutriments.energy_kcal.expect("energy present");
        assert!((kcal - 100.0).abs() < 1e-9);
    }

    #[test]
    fn structured_ingredients_accept_encoded_strings() {
        let encoded = json!([
            { "id": "en:sugar", "text": "Sugar", "vegan": "yes", "percent_estimate": "40" },
            { "id": "en:soy-lecithin", "vegetarian": "maybe" }
        ])
        .to_string();

        let decoded = decode_structured_ingredients(&Value::String(encoded)).expect("decodes");
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].vegan, Tristate::Yes);
        assert_eq!(decoded[0].percent_estimate, Some(40.0));
        assert_eq!(decoded[1].text, "soy lecithin");
        assert_eq!(decoded[1].vegetarian, Tristate::Maybe);
        assert_eq!(decoded[1].vegan, Tristate::Unknown);
    }

    #[test]
    fn malformed_structured_ingredients_are_reported() {
        let err = decode_structured_ingredients(&json!([{ "text": "salt" }, 7]))
            .expect_err("second entry is not an object");
        assert!(matches!(
            err,
            ProductDecodeError::MalformedIngredient { index: 1, .. }
        ));

        let err = decode_structured_ingredients(&json!({ "id": "en:salt" }))
            .expect_err("object is not a list");
        assert!(matches!(err, ProductDecodeError::IngredientsNotArray));

        let err = decode_structured_ingredients(&json!("[not json"))
            .expect_err("broken encoding");
        assert!(matches!(err, ProductDecodeError::Json(_)));
    }

    #[test]
    fn bad_structured_ingredients_degrade_to_empty() {
        let scan = ProductScan::from_value(json!({
            "ingredients_text": "water, salt",
            "ingredients": "{broken"
        }))
        .expect("product still decodes");
        assert!(scan.ingredients.is_empty());
        assert_eq!(scan.clean_ingredient_names(), vec!["water", "salt"]);
    }

    #[test]
    fn malformed_nutriments_degrade_to_absent() {
        for nutriments in [json!("n/a"), json!(42), json!(null)] {
            let scan = ProductScan::from_value(json!({
                "ingredients_text": "water, salt",
                "nutriments": nutriments,
                "additives_n": 2
            }))
            .expect("product still decodes");
            assert_eq!(scan.clean_ingredient_names(), vec!["water", "salt"]);
            assert_eq!(scan.nutriments.energy_kcal, None);
            assert_eq!(scan.nutriments.additives_count, Some(2.0));
        }
    }

    #[test]
    fn non_object_payloads_are_rejected() {
        assert!(matches!(
            ProductScan::from_value(json!([1, 2])),
            Err(ProductDecodeError::NotAnObject)
        ));
        assert!(matches!(
            ProductScan::from_json_str("nope"),
            Err(ProductDecodeError::Json(_))
        ));
    }

    #[test]
    fn english_text_is_preferred_when_present() {
        let scan = ProductScan::from_value(json!({
            "ingredients_text": "sucre, sel",
            "ingredients_text_en": "sugar, salt"
        }))
        .expect("product decodes");
        assert_eq!(scan.ingredients_text, "sugar, salt");
        assert!(scan.ingredient_ids().is_empty());
    }
}
