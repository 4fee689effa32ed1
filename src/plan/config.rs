//! Test plan configuration types
//!
//! Defines the data structures for deserializing YAML test plans.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// A complete test plan loaded from a YAML file
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct TestPlan {
    /// Name of the plan, used as the scenario name in the report
    pub name: String,
    /// Optional description of what the plan verifies
    pub description: Option<String>,
    /// The sequence of requests to issue
    pub steps: Vec<PlanStep>,
}

/// A single request in the plan
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct PlanStep {
    /// Test case name shown in the report
    pub name: String,
    /// HTTP method, checked when the step runs
    pub method: String,
    /// Path relative to the base URL; may contain `{{artifact}}` placeholders
    #[serde(default)]
    pub path: String,
    /// JSON body; string values may contain `{{artifact}}` placeholders
    pub body: Option<Value>,
    /// Role whose stored token authenticates the request
    pub auth: Option<String>,
    /// Literal bearer token, for negative-authorization checks
    pub auth_raw: Option<String>,
    /// Artifacts that must exist before the step is attempted
    #[serde(default)]
    pub requires: Vec<String>,
    /// Expected response
    #[serde(default)]
    pub expect: Expectation,
    /// Values to store when the step passes
    pub capture: Option<Capture>,
}

/// Expectations for a response
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct Expectation {
    /// Expected status code (default: 200)
    #[serde(default = "default_status")]
    pub status: u16,
    /// Further status codes that also count as success
    #[serde(default)]
    pub also: Vec<u16>,
    /// Top-level fields the JSON response must contain
    #[serde(default)]
    pub fields: Vec<String>,
}

impl Default for Expectation {
    fn default() -> Self {
        Self {
            status: default_status(),
            also: Vec::new(),
            fields: Vec::new(),
        }
    }
}

fn default_status() -> u16 {
    200
}

/// Values harvested from a passing response
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct Capture {
    /// Store a response field as the token for a role
    pub token: Option<TokenCapture>,
    /// Artifact name -> top-level response field
    #[serde(default)]
    pub artifacts: BTreeMap<String, String>,
}

/// Where to find a token in the response
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct TokenCapture {
    pub role: String,
    #[serde(default = "default_token_field")]
    pub field: String,
}

fn default_token_field() -> String {
    "access_token".to_string()
}
