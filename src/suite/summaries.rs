//! Employee summary reporting

use async_trait::async_trait;

use crate::common::Result;
use crate::harness::{Case, Context, Scenario};
use crate::http::RequestSpec;
use crate::session::{ArtifactKey, Role};

use super::found;

pub struct Summaries;

#[async_trait]
impl Scenario for Summaries {
    fn name(&self) -> &str {
        "Employee Summaries"
    }

    async fn run(&self, ctx: &mut Context<'_>) -> Result<()> {
        let Some(admin) = ctx.token_or_skip("Summary tests", &Role::Admin) else {
            return Ok(());
        };

        ctx.run(
            Case::new(
                "Employee summary",
                RequestSpec::get("employee-summary").bearer(admin.clone()),
            )
            .describe(found("employee summaries")),
        )
        .await;

        if let Some(id) = ctx.artifact_or_skip("Employee months", &ArtifactKey::EmployeeId) {
            ctx.run(
                Case::new(
                    "Employee months",
                    RequestSpec::get(format!("employee-months/{}", id)).bearer(admin),
                )
                .describe(found("months")),
            )
            .await;
        }

        Ok(())
    }
}
