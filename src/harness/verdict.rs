//! Recorded results of individual test cases

use serde::Serialize;

/// How a test case ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Passed,
    Failed,
    /// Not attempted because a prerequisite was missing
    Skipped,
}

/// Outcome of one test case
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    /// Scenario the case ran in
    pub scenario: String,
    pub name: String,
    pub status: Status,
    pub detail: String,
}

impl Verdict {
    pub fn passed(scenario: &str, name: &str, detail: impl Into<String>) -> Self {
        Self::new(scenario, name, Status::Passed, detail)
    }

    pub fn failed(scenario: &str, name: &str, detail: impl Into<String>) -> Self {
        Self::new(scenario, name, Status::Failed, detail)
    }

    pub fn skipped(scenario: &str, name: &str, detail: impl Into<String>) -> Self {
        Self::new(scenario, name, Status::Skipped, detail)
    }

    fn new(scenario: &str, name: &str, status: Status, detail: impl Into<String>) -> Self {
        Self {
            scenario: scenario.to_string(),
            name: name.to_string(),
            status,
            detail: detail.into(),
        }
    }

    pub fn is_passed(&self) -> bool {
        self.status == Status::Passed
    }
}
