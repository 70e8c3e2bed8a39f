//! Substitute suggestions for harmful ingredients.
//!
//! Lookup cascades through the reason table (vegan/vegetarian), then each of
//! the profile's allergies, then each of its conditions, and stops at the
//! first stage that yields anything. Within a table only the first keyword
//! found in the ingredient text counts.

use super::domain::HarmfulReason;
use super::profile::ProfileTag;

type SubstituteTable = &'static [(&'static str, &'static [&'static str])];

const VEGAN: SubstituteTable = &[
    ("milk", &["oat milk", "soy milk", "almond milk"]),
    ("butter", &["plant-based butter", "coconut oil"]),
    ("cheese", &["nutritional yeast", "cashew cheese"]),
    ("cream", &["coconut cream", "cashew cream"]),
    ("whey", &["pea protein", "rice protein"]),
    ("egg", &["flax egg", "aquafaba", "chia egg"]),
    ("honey", &["maple syrup", "agave syrup"]),
    ("gelatin", &["agar-agar", "pectin"]),
    ("yogurt", &["coconut yogurt", "soy yogurt"]),
];

const VEGETARIAN: SubstituteTable = &[
    ("gelatin", &["agar-agar", "pectin"]),
    ("rennet", &["microbial rennet"]),
    ("lard", &["vegetable shortening", "sunflower oil"]),
    ("anchov", &["capers", "seaweed flakes"]),
    ("chicken", &["tofu", "seitan"]),
    ("beef", &["lentils", "mushrooms"]),
    ("pork", &["jackfruit", "tempeh"]),
    ("fish", &["marinated tofu", "banana blossom"]),
];

const PEANUT: SubstituteTable = &[
    ("peanut butter", &["sunflower seed butter", "pumpkin seed butter"]),
    ("peanut", &["roasted chickpeas", "sunflower seeds"]),
];

const TREE_NUT: SubstituteTable = &[
    ("almond", &["sunflower seeds", "oat flour"]),
    ("hazelnut", &["toasted pumpkin seeds"]),
    ("cashew", &["white beans", "silken tofu"]),
    ("walnut", &["hemp seeds"]),
];

const MILK: SubstituteTable = &[
    ("milk", &["oat milk", "rice milk"]),
    ("butter", &["olive oil", "dairy-free spread"]),
    ("cheese", &["nutritional yeast"]),
    ("cream", &["coconut cream"]),
    ("whey", &["pea protein"]),
    ("lactose", &["lactose-free milk"]),
];

const EGG: SubstituteTable = &[
    ("egg", &["flax egg", "aquafaba", "applesauce"]),
    ("mayonnaise", &["egg-free mayonnaise", "mashed avocado"]),
];

const SOY: SubstituteTable = &[
    ("soy sauce", &["coconut aminos"]),
    ("soy lecithin", &["sunflower lecithin"]),
    ("tofu", &["chickpea tofu"]),
    ("soy", &["pea protein", "chickpeas"]),
];

const GLUTEN: SubstituteTable = &[
    ("wheat flour", &["rice flour", "buckwheat flour", "oat flour"]),
    ("barley malt", &["maple syrup", "rice syrup"]),
    ("wheat", &["buckwheat", "quinoa"]),
    ("barley", &["brown rice", "millet"]),
    ("rye", &["sorghum"]),
];

const FISH: SubstituteTable = &[
    ("fish sauce", &["soy sauce", "mushroom broth"]),
    ("anchov", &["capers", "miso"]),
    ("fish", &["jackfruit", "tofu"]),
];

const SHELLFISH: SubstituteTable = &[
    ("shrimp", &["king oyster mushrooms"]),
    ("prawn", &["king oyster mushrooms"]),
    ("crab", &["hearts of palm"]),
];

const SESAME: SubstituteTable = &[
    ("tahini", &["sunflower seed butter"]),
    ("sesame", &["poppy seeds", "hemp seeds"]),
];

const DIABETES: SubstituteTable = &[
    ("sugar", &["stevia", "erythritol", "monk fruit"]),
    ("glucose", &["stevia", "allulose"]),
    ("syrup", &["sugar-free syrup", "monk fruit syrup"]),
    ("white flour", &["almond flour", "coconut flour"]),
    ("white rice", &["cauliflower rice", "brown rice"]),
    ("maltodextrin", &["inulin", "psyllium husk"]),
];

const HYPERTENSION: SubstituteTable = &[
    ("soy sauce", &["low-sodium soy sauce", "coconut aminos"]),
    ("salt", &["herb blends", "lemon juice", "potassium salt"]),
    ("sodium", &["herb blends", "garlic powder"]),
    ("monosodium glutamate", &["nutritional yeast", "mushroom powder"]),
];

const HEART_DISEASE: SubstituteTable = &[
    ("palm oil", &["olive oil", "canola oil"]),
    ("butter", &["olive oil", "avocado"]),
    ("cream", &["low-fat yogurt"]),
    ("hydrogenated", &["olive oil", "canola oil"]),
    ("salt", &["herb blends"]),
];

const HIGH_CHOLESTEROL: SubstituteTable = &[
    ("palm oil", &["olive oil", "sunflower oil"]),
    ("coconut oil", &["olive oil", "rapeseed oil"]),
    ("butter", &["plant sterol spread", "olive oil"]),
    ("egg yolk", &["egg whites"]),
];

const KIDNEY_DISEASE: SubstituteTable = &[
    ("salt", &["herb blends", "lemon juice"]),
    ("phosphate", &["phosphate-free leavening"]),
    ("potassium chloride", &["herb blends"]),
];

const OBESITY: SubstituteTable = &[
    ("sugar", &["stevia", "cinnamon"]),
    ("cream", &["greek yogurt"]),
    ("oil", &["cooking spray", "vegetable broth"]),
];

const PCOS: SubstituteTable = &[
    ("sugar", &["stevia", "cinnamon"]),
    ("white flour", &["whole wheat flour", "chickpea flour"]),
    ("syrup", &["mashed banana"]),
];

const IBS: SubstituteTable = &[
    ("garlic", &["garlic-infused oil", "chives"]),
    ("onion", &["green onion tops", "asafoetida"]),
    ("inulin", &["psyllium husk"]),
    ("sorbitol", &["table sugar", "maple syrup"]),
    ("honey", &["maple syrup"]),
];

const LACTOSE: SubstituteTable = &[
    ("milk", &["lactose-free milk", "oat milk"]),
    ("cream", &["lactose-free cream"]),
    ("cheese", &["aged hard cheese"]),
];

const KETO: SubstituteTable = &[
    ("sugar", &["erythritol", "stevia"]),
    ("flour", &["almond flour", "coconut flour"]),
    ("rice", &["cauliflower rice"]),
    ("potato", &["cauliflower", "celeriac"]),
];

const LOW_SODIUM: SubstituteTable = &[
    ("salt", &["herb blends", "potassium salt"]),
    ("soy sauce", &["coconut aminos"]),
];

const LOW_SUGAR: SubstituteTable = &[
    ("sugar", &["stevia", "monk fruit"]),
    ("syrup", &["monk fruit syrup"]),
];

fn reason_table(reason: HarmfulReason) -> Option<SubstituteTable> {
    match reason {
        HarmfulReason::Vegan => Some(VEGAN),
        HarmfulReason::Vegetarian => Some(VEGETARIAN),
        HarmfulReason::UserFlagged => None,
    }
}

fn allergy_table(tag: &ProfileTag) -> Option<SubstituteTable> {
    match tag {
        ProfileTag::PeanutAllergy => Some(PEANUT),
        ProfileTag::TreeNutAllergy => Some(TREE_NUT),
        ProfileTag::MilkAllergy => Some(MILK),
        ProfileTag::EggAllergy => Some(EGG),
        ProfileTag::SoyAllergy => Some(SOY),
        ProfileTag::WheatAllergy | ProfileTag::GlutenIntolerance => Some(GLUTEN),
        ProfileTag::FishAllergy => Some(FISH),
        ProfileTag::ShellfishAllergy => Some(SHELLFISH),
        ProfileTag::SesameAllergy => Some(SESAME),
        ProfileTag::LactoseIntolerance => Some(LACTOSE),
        _ => None,
    }
}

fn condition_table(tag: &ProfileTag) -> Option<SubstituteTable> {
    match tag {
        ProfileTag::Diabetes => Some(DIABETES),
        ProfileTag::Hypertension => Some(HYPERTENSION),
        ProfileTag::HeartDisease => Some(HEART_DISEASE),
        ProfileTag::HighCholesterol => Some(HIGH_CHOLESTEROL),
        ProfileTag::KidneyDisease => Some(KIDNEY_DISEASE),
        ProfileTag::Obesity => Some(OBESITY),
        ProfileTag::Pcos => Some(PCOS),
        ProfileTag::Ibs => Some(IBS),
        ProfileTag::GlutenIntolerance => Some(GLUTEN),
        ProfileTag::LactoseIntolerance => Some(LACTOSE),
        ProfileTag::Keto => Some(KETO),
        ProfileTag::LowSodium => Some(LOW_SODIUM),
        ProfileTag::LowSugar => Some(LOW_SUGAR),
        _ => None,
    }
}

/// Substitutes for the first keyword of `table` found in `text`.
fn lookup(table: SubstituteTable, text: &str) -> Option<Vec<String>> {
    table
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|(_, substitutes)| substitutes.iter().map(|name| name.to_string()).collect())
        .filter(|substitutes: &Vec<String>| !substitutes.is_empty())
}

fn by_reason(reason: HarmfulReason, text: &str) -> Option<Vec<String>> {
    reason_table(reason).and_then(|table| lookup(table, text))
}

fn by_allergies(allergies: &[String], text: &str) -> Option<Vec<String>> {
    allergies
        .iter()
        .filter_map(|label| allergy_table(&ProfileTag::parse(label)))
        .find_map(|table| lookup(table, text))
}

fn by_conditions(conditions: &[String], text: &str) -> Option<Vec<String>> {
    conditions
        .iter()
        .filter_map(|label| condition_table(&ProfileTag::parse(label)))
        .find_map(|table| lookup(table, text))
}

/// Suggested replacements for a harmful ingredient, or an empty list.
pub fn recommend(
    ingredient_text: &str,
    reason: HarmfulReason,
    conditions: &[String],
    allergies: &[String],
) -> Vec<String> {
    let text = ingredient_text.to_lowercase();

    by_reason(reason, &text)
        .or_else(|| by_allergies(allergies, &text))
        .or_else(|| by_conditions(conditions, &text))
        .unwrap_or_default()
}
