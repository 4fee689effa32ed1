//! Time entry management for the employee created earlier

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime, Utc};
use serde_json::json;

use crate::common::Result;
use crate::harness::{Case, Context, Scenario};
use crate::http::RequestSpec;
use crate::session::{ArtifactKey, Role};

use super::found;

/// Length of the shift recorded by the created entry
const SHIFT_HOURS: i64 = 8;

pub struct TimeEntries;

#[async_trait]
impl Scenario for TimeEntries {
    fn name(&self) -> &str {
        "Time Entry Management"
    }

    async fn run(&self, ctx: &mut Context<'_>) -> Result<()> {
        const SKIP: &str = "Time entry tests";
        let Some(admin) = ctx.token_or_skip(SKIP, &Role::Admin) else {
            return Ok(());
        };
        if ctx.artifact_or_skip(SKIP, &ArtifactKey::EmployeeId).is_none() {
            return Ok(());
        }
        let employee_id = ctx
            .session()
            .artifact(&ArtifactKey::EmployeeId)
            .cloned()
            .unwrap_or_default();

        ctx.run(
            Case::new("Get time entries", RequestSpec::get("time-entries").bearer(admin.clone()))
                .describe(found("entries")),
        )
        .await;

        let check_in = Utc::now().naive_utc();
        let check_out = check_in + Duration::hours(SHIFT_HOURS);
        let body = json!({
            "employee_id": employee_id,
            "check_in": iso(check_in),
            "check_out": iso(check_out),
        });

        let checked = ctx
            .run(
                Case::new("Create time entry", RequestSpec::post("time-entries", body).bearer(admin))
                    .require_field("id")
                    .describe(|o| {
                        let hours = o.field("total_hours").and_then(|h| h.as_f64()).unwrap_or(0.0);
                        format!("Entry created with {:.1} hours", hours)
                    }),
            )
            .await;
        if let Some(id) = checked.on_pass().and_then(|o| o.field("id")).cloned() {
            ctx.session_mut().set_artifact(ArtifactKey::TimeEntryId, id);
        }

        Ok(())
    }
}

/// ISO-8601 without offset, microsecond precision
fn iso(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}
