//! Error types for the smoke-test CLI
//!
//! Only setup paths (configuration, plan loading, client construction)
//! return these. Failures while a scenario runs are captured as verdicts
//! instead of being propagated.

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the smoke-test CLI
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    // === Plan Errors ===
    #[error("Failed to parse test plan '{path}': {reason}")]
    PlanParse { path: String, reason: String },

    #[error("Unknown scenario '{0}'. Use 'smoke list' to see available scenarios")]
    UnknownScenario(String),

    // === HTTP Errors ===
    #[error("Unsupported HTTP method '{0}'. Supported methods: GET, POST, PUT, DELETE")]
    UnsupportedMethod(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    // === File Errors ===
    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Scenario Errors ===
    #[error("Scenario '{scenario}' aborted: {reason}")]
    ScenarioAborted { scenario: String, reason: String },
}

impl Error {
    /// Create an invalid base URL error
    pub fn invalid_base_url(url: &str, reason: impl ToString) -> Self {
        Self::InvalidBaseUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a plan parse error
    pub fn plan_parse(path: &str, reason: impl ToString) -> Self {
        Self::PlanParse {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a scenario aborted error
    pub fn scenario_aborted(scenario: &str, reason: impl ToString) -> Self {
        Self::ScenarioAborted {
            scenario: scenario.to_string(),
            reason: reason.to_string(),
        }
    }
}
