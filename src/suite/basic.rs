//! Unauthenticated service endpoints

use async_trait::async_trait;
use serde_json::json;

use crate::common::Result;
use crate::harness::{Case, Context, Scenario};
use crate::http::RequestSpec;

use super::found;

pub struct BasicEndpoints;

#[async_trait]
impl Scenario for BasicEndpoints {
    fn name(&self) -> &str {
        "Basic Endpoints"
    }

    async fn run(&self, ctx: &mut Context<'_>) -> Result<()> {
        ctx.run(
            Case::new("Root endpoint", RequestSpec::get(""))
                .describe(|o| o.field_str("message").unwrap_or_default()),
        )
        .await;

        ctx.run(
            Case::new(
                "Create status",
                RequestSpec::post("status", json!({ "client_name": "test_client" })),
            )
            .describe(|_| "Status created".to_string()),
        )
        .await;

        ctx.run(Case::new("Get status", RequestSpec::get("status")).describe(found("status entries")))
            .await;

        Ok(())
    }
}
