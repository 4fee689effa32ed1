//! Test plan runner
//!
//! Turns each plan step into a test case run through the regular harness,
//! so plans get the same token handling, skipping and reporting as the
//! built-in suite.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::Path;

use crate::common::{Error, Result};
use crate::harness::{Case, Context, Scenario, Sequencer};
use crate::http::{Method, Outcome, RequestSpec};
use crate::session::{ArtifactKey, Missing, Role, Session, Token};

use super::config::{Capture, PlanStep, TestPlan};

/// Load and parse a test plan from a YAML file
pub fn load_plan(path: &Path) -> Result<TestPlan> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.display().to_string(),
        error: e.to_string(),
    })?;

    parse_plan(&content, &path.display().to_string())
}

/// Parse a test plan; `origin` names the source in error messages
pub fn parse_plan(content: &str, origin: &str) -> Result<TestPlan> {
    let plan: TestPlan =
        serde_yaml::from_str(content).map_err(|e| Error::plan_parse(origin, e))?;

    if plan.name.trim().is_empty() {
        return Err(Error::plan_parse(origin, "plan name is empty"));
    }
    if plan.steps.is_empty() {
        return Err(Error::plan_parse(origin, "plan has no steps"));
    }

    Ok(plan)
}

/// A loaded plan, runnable as a single scenario
pub struct PlanScenario {
    plan: TestPlan,
}

impl PlanScenario {
    pub fn new(plan: TestPlan) -> Self {
        Self { plan }
    }

    /// Wrap the plan in a sequencer of its own
    pub fn into_sequencer(self) -> Sequencer {
        Sequencer::new(format!("Test plan: {}", self.plan.name)).with(self)
    }
}

#[async_trait]
impl Scenario for PlanScenario {
    fn name(&self) -> &str {
        &self.plan.name
    }

    async fn run(&self, ctx: &mut Context<'_>) -> Result<()> {
        if let Some(desc) = &self.plan.description {
            tracing::info!("{}", desc);
        }

        for step in &self.plan.steps {
            run_step(ctx, step).await;
        }

        Ok(())
    }
}

/// Execute a single plan step
async fn run_step(ctx: &mut Context<'_>, step: &PlanStep) {
    for key in &step.requires {
        if ctx.artifact_or_skip(&step.name, &ArtifactKey::from(key.as_str())).is_none() {
            return;
        }
    }

    let path = match interpolate(&step.path, ctx.session()) {
        Ok(path) => path,
        Err(missing) => return ctx.skip(&step.name, missing),
    };

    let body = match step.body.as_ref().map(|b| interpolate_value(b, ctx.session())).transpose() {
        Ok(body) => body,
        Err(missing) => return ctx.skip(&step.name, missing),
    };

    let token = if let Some(raw) = &step.auth_raw {
        Some(Token::new(raw.as_str()))
    } else if let Some(role) = &step.auth {
        match ctx.token_or_skip(&step.name, &Role::from(role.as_str())) {
            Some(token) => Some(token),
            None => return,
        }
    } else {
        None
    };

    let method: Method = match step.method.parse() {
        Ok(method) => method,
        Err(e) => {
            // Not sent: the run records it like a request that never left
            let outcome = Outcome::transport(e.to_string());
            return ctx.fail(&step.name, format!("{} /{}: {}", step.method, path, outcome));
        }
    };

    let mut spec = RequestSpec::new(method, path).expect(step.expect.status);
    if let Some(body) = body {
        spec = spec.body(body);
    }
    if let Some(token) = token {
        spec = spec.bearer(token);
    }

    let mut case = Case::new(step.name.as_str(), spec);
    for status in &step.expect.also {
        case = case.accept(*status);
    }
    for field in &step.expect.fields {
        case = case.require_field(field);
    }

    let checked = ctx.run(case).await;
    if let (Some(outcome), Some(capture)) = (checked.on_pass(), &step.capture) {
        store_captures(ctx.session_mut(), capture, outcome, &step.name);
    }
}

/// Copy captured response fields into the session
fn store_captures(session: &mut Session, capture: &Capture, outcome: &Outcome, step: &str) {
    if let Some(token_capture) = &capture.token {
        match outcome.field_str(&token_capture.field) {
            Some(token) if !token.is_empty() => {
                session.set_token(Role::from(token_capture.role.as_str()), Token::new(token))
            }
            _ => tracing::warn!(step, field = %token_capture.field, "no token to capture"),
        }
    }

    for (key, field) in &capture.artifacts {
        match outcome.field(field) {
            Some(value) if !value.is_null() => {
                session.set_artifact(ArtifactKey::from(key.as_str()), value.clone())
            }
            _ => tracing::warn!(step, %field, "no artifact to capture"),
        }
    }
}

/// Replace `{{key}}` placeholders with stored artifacts
fn interpolate(text: &str, session: &Session) -> std::result::Result<String, Missing> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("{{") {
        let Some(len) = rest[start + 2..].find("}}") else {
            break;
        };
        out.push_str(&rest[..start]);
        let key = ArtifactKey::from(rest[start + 2..start + 2 + len].trim());
        out.push_str(&session.require_artifact(&key)?);
        rest = &rest[start + 2 + len + 2..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Interpolate every string inside a JSON value
///
/// A string that is exactly one placeholder is replaced by the stored value
/// itself, so numeric ids stay numeric.
fn interpolate_value(value: &Value, session: &Session) -> std::result::Result<Value, Missing> {
    match value {
        Value::String(s) => {
            if let Some(key) = sole_placeholder(s) {
                return session
                    .artifact(&key)
                    .cloned()
                    .ok_or_else(|| Missing::artifact(&key));
            }
            interpolate(s, session).map(Value::String)
        }
        Value::Array(items) => items
            .iter()
            .map(|item| interpolate_value(item, session))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| Ok((k.clone(), interpolate_value(v, session)?)))
            .collect::<std::result::Result<Map<_, _>, _>>()
            .map(Value::Object),
        other => Ok(other.clone()),
    }
}

fn sole_placeholder(s: &str) -> Option<ArtifactKey> {
    let inner = s.trim().strip_prefix("{{")?.strip_suffix("}}")?;
    if inner.contains("{{") || inner.contains("}}") {
        return None;
    }
    Some(ArtifactKey::from(inner.trim()))
}
