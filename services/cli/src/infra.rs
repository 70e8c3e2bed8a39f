use nutrilens::error::AppError;
use nutrilens::scan::{HarmfulReason, HealthProfile, ProductScan};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Profile file layout: the health profile plus the user's own flag list,
/// which the profile store keeps alongside it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub(crate) struct ProfileFile {
    #[serde(flatten)]
    pub(crate) profile: HealthProfile,
    #[serde(default)]
    pub(crate) flagged_ingredients: Vec<String>,
}

pub(crate) fn load_profile(path: &Path) -> Result<ProfileFile, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn load_product(path: &Path) -> Result<ProductScan, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(ProductScan::from_json_str(&raw)?)
}

pub(crate) fn parse_reason(raw: &str) -> Result<HarmfulReason, String> {
    HarmfulReason::parse(raw).ok_or_else(|| {
        format!("unknown reason '{raw}' (expected vegan, vegetarian or user_flagged)")
    })
}

pub(crate) fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), AppError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_file_flattens_profile_fields() {
        let file: ProfileFile = serde_json::from_str(
            r#"{
                "name": "Alex",
                "conditions": ["Diabetes"],
                "allergies": ["Peanut Allergy"],
                "flagged_ingredients": ["palm oil"]
            }"#,
        )
        .expect("profile parses");

        assert_eq!(file.profile.name, "Alex");
        assert_eq!(file.profile.conditions, vec!["Diabetes"]);
        assert!(file.profile.dietary_preferences.is_empty());
        assert_eq!(file.flagged_ingredients, vec!["palm oil"]);
    }

    #[test]
    fn reason_parser_accepts_cli_spellings() {
        assert_eq!(parse_reason("user-flagged"), Ok(HarmfulReason::UserFlagged));
        assert_eq!(parse_reason("vegetarian"), Ok(HarmfulReason::Vegetarian));
        assert!(parse_reason("keto").is_err());
    }

    #[test]
    fn missing_files_surface_io_errors() {
        let path = std::env::temp_dir().join("nutrilens-cli-missing-profile.json");
        let _ = fs::remove_file(&path);
        assert!(matches!(load_profile(&path), Err(AppError::Io(_))));
    }
}
