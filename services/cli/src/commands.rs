use crate::infra::{load_product, load_profile, parse_reason, print_json};
use clap::Args;
use nutrilens::config::AppConfig;
use nutrilens::error::AppError;
use nutrilens::scan::{
    build_thresholds, recommend, HarmfulReason, ProfileTag, ScanAnalyzer, ThresholdTable,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Product JSON (bare product object or API response envelope)
    #[arg(long)]
    pub(crate) product: PathBuf,
    /// Profile JSON with conditions, allergies, preferences and flags
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Pretty-print the JSON output
    #[arg(long)]
    pub(crate) pretty: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ThresholdsArgs {
    /// Profile tag to merge, e.g. "Diabetes" (repeatable)
    #[arg(long = "tag")]
    pub(crate) tags: Vec<String>,
    /// Pretty-print the JSON output
    #[arg(long)]
    pub(crate) pretty: bool,
}

#[derive(Args, Debug)]
pub(crate) struct SubstitutesArgs {
    /// Ingredient text as shown to the user
    #[arg(long)]
    pub(crate) ingredient: String,
    /// Why the ingredient was flagged: vegan, vegetarian or user_flagged
    #[arg(long, value_parser = parse_reason)]
    pub(crate) reason: HarmfulReason,
    /// Profile JSON whose conditions and allergies drive the lookup
    #[arg(long)]
    pub(crate) profile: PathBuf,
}

#[derive(Debug, Serialize)]
struct SubstituteReport<'a> {
    ingredient: &'a str,
    reason: HarmfulReason,
    substitutes: Vec<String>,
}

pub(crate) fn run_analyze(args: AnalyzeArgs, config: &AppConfig) -> Result<(), AppError> {
    let product = load_product(&args.product)?;
    let profile = load_profile(&args.profile)?;

    let analyzer = ScanAnalyzer::new(config.analysis);
    let analysis = analyzer.analyze(&product, &profile.profile, &profile.flagged_ingredients);
    print_json(&analysis, args.pretty)
}

pub(crate) fn run_thresholds(args: ThresholdsArgs) -> Result<(), AppError> {
    print_json(&merged_thresholds(&args.tags), args.pretty)
}

fn merged_thresholds(labels: &[String]) -> ThresholdTable {
    let tags: Vec<ProfileTag> = labels.iter().map(|label| ProfileTag::parse(label)).collect();
    for tag in tags.iter().filter(|tag| !tag.is_known()) {
        warn!(tag = %tag, "unknown profile tag contributes no overrides");
    }
    build_thresholds(&tags)
}

pub(crate) fn run_substitutes(args: SubstitutesArgs) -> Result<(), AppError> {
    let profile = load_profile(&args.profile)?.profile;
    let substitutes = recommend(
        &args.ingredient,
        args.reason,
        &profile.conditions,
        &profile.allergies,
    );

    print_json(
        &SubstituteReport {
            ingredient: &args.ingredient,
            reason: args.reason,
            substitutes,
        },
        true,
    )
}
