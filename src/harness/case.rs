//! A single test case: one request plus the criteria it must meet

use crate::http::{Outcome, RequestSpec};

use super::verdict::Verdict;

/// Extra acceptance criterion; `Err` carries the reason for rejection
pub type Check<'a> = Box<dyn Fn(&Outcome) -> Result<(), String> + Send + Sync + 'a>;

/// Summarizes a passing outcome for the report
pub type Describe<'a> = Box<dyn Fn(&Outcome) -> String + Send + Sync + 'a>;

/// One logical check against the server
///
/// Passes when the status matches the request's expected status (or one of
/// the additionally accepted ones) and every custom check accepts the
/// outcome.
pub struct Case<'a> {
    name: String,
    spec: RequestSpec,
    also_accept: Vec<u16>,
    checks: Vec<Check<'a>>,
    describe: Option<Describe<'a>>,
}

impl<'a> Case<'a> {
    pub fn new(name: impl Into<String>, spec: RequestSpec) -> Self {
        Self {
            name: name.into(),
            spec,
            also_accept: Vec::new(),
            checks: Vec::new(),
            describe: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn spec(&self) -> &RequestSpec {
        &self.spec
    }

    /// Accept another status besides the expected one (e.g. 201 for 200)
    pub fn accept(mut self, status: u16) -> Self {
        self.also_accept.push(status);
        self
    }

    pub fn check(mut self, check: impl Fn(&Outcome) -> Result<(), String> + Send + Sync + 'a) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Require a non-null top-level field in the JSON response
    pub fn require_field(self, field: &'a str) -> Self {
        self.check(move |outcome| match outcome.field(field) {
            Some(value) if !value.is_null() => Ok(()),
            _ => Err(format!("response has no '{}'", field)),
        })
    }

    /// Set the detail line reported when the case passes
    pub fn describe(mut self, describe: impl Fn(&Outcome) -> String + Send + Sync + 'a) -> Self {
        self.describe = Some(Box::new(describe));
        self
    }

    fn status_accepted(&self, status: u16) -> bool {
        status == self.spec.expected_status || self.also_accept.contains(&status)
    }

    fn expected_label(&self) -> String {
        std::iter::once(self.spec.expected_status)
            .chain(self.also_accept.iter().copied())
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Judge an outcome that has already been obtained
    pub fn judge(&self, scenario: &str, outcome: &Outcome) -> Verdict {
        let status = match outcome.status() {
            Some(status) if self.status_accepted(status) => status,
            _ => {
                return Verdict::failed(
                    scenario,
                    &self.name,
                    format!("{}: expected status {}, got {}", self.spec, self.expected_label(), outcome),
                );
            }
        };

        for check in &self.checks {
            if let Err(reason) = check(outcome) {
                return Verdict::failed(scenario, &self.name, format!("{}: {}; {}", self.spec, reason, outcome));
            }
        }

        let detail = match &self.describe {
            Some(describe) => describe(outcome),
            None => format!("status {}", status),
        };
        Verdict::passed(scenario, &self.name, detail)
    }
}
