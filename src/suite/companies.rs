//! Company management: owner-only

use async_trait::async_trait;
use serde_json::json;

use crate::common::{time_stamp, Result};
use crate::harness::{Case, Context, Scenario};
use crate::http::RequestSpec;
use crate::session::{ArtifactKey, Role};

use super::found;

pub struct Companies;

#[async_trait]
impl Scenario for Companies {
    fn name(&self) -> &str {
        "Company Management"
    }

    async fn run(&self, ctx: &mut Context<'_>) -> Result<()> {
        let Some(owner) = ctx.token_or_skip("Company tests", &Role::Owner) else {
            return Ok(());
        };

        ctx.run(
            Case::new("Get companies", RequestSpec::get("companies").bearer(owner.clone()))
                .describe(found("companies")),
        )
        .await;

        let name = format!("Test Company {}", time_stamp());
        let case = Case::new(
            "Create company",
            RequestSpec::post("companies", json!({ "name": name })).bearer(owner),
        )
        .accept(201)
        .require_field("id")
        .check(|o| match o.field_str("name") {
            Some(actual) if actual == name => Ok(()),
            actual => Err(format!("expected name '{}', got {:?}", name, actual)),
        })
        .describe(|o| format!("Created company: {}", o.field_str("name").unwrap_or_default()));

        let checked = ctx.run(case).await;
        if let Some(id) = checked.on_pass().and_then(|o| o.field("id")).cloned() {
            ctx.session_mut().set_artifact(ArtifactKey::CompanyId, id);
        }

        if let Some(admin) = ctx.token_or_skip("Admin company access", &Role::Admin) {
            ctx.run(
                Case::new(
                    "Admin company access",
                    RequestSpec::get("companies").bearer(admin).expect(403),
                )
                .describe(|_| "Denied with 403".to_string()),
            )
            .await;
        }

        Ok(())
    }
}
