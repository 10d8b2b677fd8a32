use std::env;
use std::fmt;

use crate::marketplace::suggestions::DEFAULT_SUGGESTION_LIMIT;

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
    pub matching: MatchingConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let suggestion_limit = match env::var("APP_SUGGESTION_LIMIT") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidSuggestionLimit { value: raw })?,
            Err(_) => DEFAULT_SUGGESTION_LIMIT,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            matching: MatchingConfig { suggestion_limit },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Defaults applied when a caller does not ask for a specific number of suggestions.
#[derive(Debug, Clone)]
pub struct MatchingConfig {
    pub suggestion_limit: usize,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSuggestionLimit { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSuggestionLimit { value } => write!(
                f,
                "APP_SUGGESTION_LIMIT must be a non-negative integer (got '{}')",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
