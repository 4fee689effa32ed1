//! User management

use async_trait::async_trait;
use serde_json::json;

use crate::common::{time_stamp, Result};
use crate::harness::{Case, Context, Scenario};
use crate::http::RequestSpec;
use crate::session::{ArtifactKey, Role};

use super::{found, SEED_COMPANY_ID};

pub struct Users;

#[async_trait]
impl Scenario for Users {
    fn name(&self) -> &str {
        "User Management"
    }

    async fn run(&self, ctx: &mut Context<'_>) -> Result<()> {
        let Some(owner) = ctx.token_or_skip("User tests", &Role::Owner) else {
            return Ok(());
        };

        ctx.run(
            Case::new("Get users", RequestSpec::get("users").bearer(owner.clone()))
                .describe(found("users")),
        )
        .await;

        let body = json!({
            "username": format!("testuser_{}", time_stamp()),
            "password": "TestPass123!",
            "type": "user",
            "company_id": SEED_COMPANY_ID,
        });
        let checked = ctx
            .run(
                Case::new("Create user", RequestSpec::post("users", body).bearer(owner))
                    .require_field("id")
                    .describe(|o| {
                        format!("Created user: {}", o.field_str("username").unwrap_or_default())
                    }),
            )
            .await;
        if let Some(id) = checked.on_pass().and_then(|o| o.field("id")).cloned() {
            ctx.session_mut().set_artifact(ArtifactKey::UserId, id);
        }

        // Admins only see users of their own company
        if let Some(admin) = ctx.token_or_skip("Admin get users", &Role::Admin) {
            ctx.run(
                Case::new("Admin get users", RequestSpec::get("users").bearer(admin))
                    .describe(|o| format!("Admin sees {} users", o.count())),
            )
            .await;
        }

        Ok(())
    }
}
