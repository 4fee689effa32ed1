//! Ordered execution of scenarios
//!
//! Scenarios run one after another in the order they were added. A
//! scenario that fails, errors or panics never stops the ones after it.

use async_trait::async_trait;
use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;

use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::http::{Executor, Outcome};
use crate::session::{ArtifactKey, Missing, Role, Session, Token};

use super::case::Case;
use super::report::Report;
use super::verdict::Verdict;

/// A named group of dependent test cases
#[async_trait]
pub trait Scenario: Send + Sync {
    fn name(&self) -> &str;

    /// Run every case of the scenario, recording verdicts into `ctx`
    ///
    /// Returning `Err` records the scenario as aborted; the run goes on.
    async fn run(&self, ctx: &mut Context<'_>) -> Result<()>;
}

/// Result of a case run through [`Context::run`]
#[derive(Debug)]
pub struct Checked {
    pub passed: bool,
    pub outcome: Outcome,
}

impl Checked {
    /// The outcome, but only when the case passed
    pub fn on_pass(&self) -> Option<&Outcome> {
        self.passed.then_some(&self.outcome)
    }
}

/// State threaded through every scenario of a run
pub struct Context<'a> {
    executor: &'a dyn Executor,
    config: &'a Config,
    session: Session,
    report: Report,
    scenario: String,
}

impl<'a> Context<'a> {
    pub fn new(executor: &'a dyn Executor, config: &'a Config) -> Self {
        Self {
            executor,
            config,
            session: Session::new(),
            report: Report::new(),
            scenario: String::new(),
        }
    }

    pub fn config(&self) -> &Config {
        self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Execute a case, record its verdict and hand back the outcome
    pub async fn run(&mut self, case: Case<'_>) -> Checked {
        let outcome = self.executor.execute(case.spec()).await;
        self.judge(&case, outcome)
    }

    /// Record the verdict for an outcome obtained elsewhere
    pub fn judge(&mut self, case: &Case<'_>, outcome: Outcome) -> Checked {
        let verdict = case.judge(&self.scenario, &outcome);
        let passed = verdict.is_passed();
        self.report.record(verdict);
        Checked { passed, outcome }
    }

    pub fn fail(&mut self, name: &str, detail: impl Into<String>) {
        let verdict = Verdict::failed(&self.scenario, name, detail);
        self.report.record(verdict);
    }

    pub fn skip(&mut self, name: &str, missing: Missing) {
        let verdict = Verdict::skipped(&self.scenario, name, missing.to_string());
        self.report.record(verdict);
    }

    /// Token for `role`, or a skipped verdict for `name` if there is none
    pub fn token_or_skip(&mut self, name: &str, role: &Role) -> Option<Token> {
        match self.session.require_token(role) {
            Ok(token) => Some(token),
            Err(missing) => {
                self.skip(name, missing);
                None
            }
        }
    }

    /// Artifact text for `key`, or a skipped verdict for `name` if there is none
    pub fn artifact_or_skip(&mut self, name: &str, key: &ArtifactKey) -> Option<String> {
        match self.session.require_artifact(key) {
            Ok(value) => Some(value),
            Err(missing) => {
                self.skip(name, missing);
                None
            }
        }
    }

    pub fn into_report(self) -> Report {
        self.report
    }
}

/// Fixed-order list of scenarios
pub struct Sequencer {
    title: String,
    scenarios: Vec<Box<dyn Scenario>>,
}

impl Sequencer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            scenarios: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn push(&mut self, scenario: impl Scenario + 'static) {
        self.scenarios.push(Box::new(scenario));
    }

    pub fn with(mut self, scenario: impl Scenario + 'static) -> Self {
        self.push(scenario);
        self
    }

    /// Scenario names in execution order
    pub fn names(&self) -> Vec<&str> {
        self.scenarios.iter().map(|s| s.name()).collect()
    }

    /// Keep only the named scenarios, preserving execution order
    ///
    /// Names match case-insensitively. An empty list keeps everything.
    pub fn retain(mut self, only: &[String]) -> Result<Self> {
        if only.is_empty() {
            return Ok(self);
        }

        for wanted in only {
            if !self.scenarios.iter().any(|s| s.name().eq_ignore_ascii_case(wanted)) {
                return Err(Error::UnknownScenario(wanted.clone()));
            }
        }

        self.scenarios
            .retain(|s| only.iter().any(|wanted| s.name().eq_ignore_ascii_case(wanted)));
        Ok(self)
    }

    /// Run every scenario in order and return the collected verdicts
    pub async fn run(&self, executor: &dyn Executor, config: &Config) -> Report {
        let mut ctx = Context::new(executor, config);

        for scenario in &self.scenarios {
            let name = scenario.name().to_string();
            ctx.scenario = name.clone();
            tracing::info!(scenario = %name, "running scenario");

            let result = AssertUnwindSafe(scenario.run(&mut ctx)).catch_unwind().await;

            let reason = match result {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => e.to_string(),
                Err(panic) => format!("panicked: {}", panic_message(panic.as_ref())),
            };

            tracing::error!(scenario = %name, "scenario aborted: {}", reason);
            let err = Error::scenario_aborted(&name, &reason);
            ctx.fail(&format!("{} aborted", name), err.to_string());
        }

        ctx.into_report()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
