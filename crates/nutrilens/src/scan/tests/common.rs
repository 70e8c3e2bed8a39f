use serde_json::json;

use crate::scan::product::ProductScan;
use crate::scan::profile::HealthProfile;

pub(super) fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(super) fn hazelnut_spread() -> ProductScan {
    ProductScan::from_value(json!({
        "product": {
            "code": "3017620422003",
            "product_name": "Hazelnut cocoa spread",
            "lang": "en",
            "additives_n": 1,
            "allergens_tags": ["en:milk", "en:nuts", "en:soybeans"],
            "ingredients_text": "Sugar, palm oil, hazelnuts 13%, skimmed milk powder 8.7%, \
                                 fat-reduced cocoa 7.4%, emulsifier: lecithins (soya), vanillin",
            "ingredients": [
                { "id": "en:sugar", "text": "sugar", "vegan": "yes", "vegetarian": "yes" },
                { "id": "en:palm-oil", "text": "palm oil", "vegan": "yes", "vegetarian": "yes" },
                { "id": "en:hazelnut", "text": "hazelnuts", "vegan": "yes", "vegetarian": "yes",
                  "percent_estimate": 13 },
                { "id": "en:skimmed-milk-powder", "text": "skimmed milk powder",
                  "vegan": "no", "vegetarian": "yes" },
                { "id": "en:fat-reduced-cocoa", "text": "fat-reduced cocoa",
                  "vegan": "yes", "vegetarian": "yes" },
                { "id": "en:e322", "text": "lecithins", "vegan": "yes", "vegetarian": "yes" }
            ],
            "nutriments": {
                "energy-kcal_100g": 539,
                "fat_100g": 30.9,
                "saturated-fat_100g": 10.6,
                "carbohydrates_100g": 57.5,
                "sugars_100g": 56.3,
                "proteins_100g": 6.3,
                "salt_100g": 0.107
            }
        }
    }))
    .expect("fixture product decodes")
}

pub(super) fn diabetic_vegan() -> HealthProfile {
    HealthProfile {
        name: "Alex".to_string(),
        conditions: strings(&["Diabetes"]),
        allergies: strings(&["Milk Allergy", "Peanut Allergy"]),
        dietary_preferences: strings(&["Vegan"]),
    }
}

pub(super) fn kidney_patient() -> HealthProfile {
    HealthProfile {
        name: "Sam".to_string(),
        conditions: strings(&["Kidney Disease", "Hypertension"]),
        allergies: Vec::new(),
        dietary_preferences: Vec::new(),
    }
}
