use crate::scan::analyzer::AnalysisConfig;
use crate::scan::insights::MAX_INSIGHTS;
use crate::scan::matching::DEFAULT_MIN_WORD_OVERLAP;
use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub analysis: AnalysisConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("NUTRILENS_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("NUTRILENS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let insight_limit = match env::var("NUTRILENS_INSIGHT_LIMIT") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|limit| (1..=MAX_INSIGHTS).contains(limit))
                .ok_or(ConfigError::InvalidInsightLimit { value: raw })?,
            Err(_) => MAX_INSIGHTS,
        };

        let min_word_overlap = match env::var("NUTRILENS_MIN_WORD_OVERLAP") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|ratio| ratio.is_finite() && *ratio > 0.0 && *ratio <= 1.0)
                .ok_or(ConfigError::InvalidWordOverlap { value: raw })?,
            Err(_) => DEFAULT_MIN_WORD_OVERLAP,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            analysis: AnalysisConfig {
                insight_limit,
                min_word_overlap,
            },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidInsightLimit { value: String },
    InvalidWordOverlap { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidInsightLimit { value } => write!(
                f,
                "NUTRILENS_INSIGHT_LIMIT must be between 1 and {MAX_INSIGHTS}, got '{value}'"
            ),
            ConfigError::InvalidWordOverlap { value } => write!(
                f,
                "NUTRILENS_MIN_WORD_OVERLAP must be a ratio in (0, 1], got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
