//! Requests that must be refused
//!
//! No `Authorization` header gets 403, an unknown token gets 401 and a
//! valid token without the privilege gets 403.

use async_trait::async_trait;

use crate::common::Result;
use crate::harness::{Case, Context, Scenario};
use crate::http::RequestSpec;
use crate::session::{Role, Token};

pub struct UnauthorizedAccess;

#[async_trait]
impl Scenario for UnauthorizedAccess {
    fn name(&self) -> &str {
        "Unauthorized Access"
    }

    async fn run(&self, ctx: &mut Context<'_>) -> Result<()> {
        ctx.run(
            Case::new("No token access", RequestSpec::get("employees").expect(403))
                .describe(|_| "Denied with 403".to_string()),
        )
        .await;

        ctx.run(
            Case::new(
                "Invalid token access",
                RequestSpec::get("employees")
                    .bearer(Token::new("invalid_token"))
                    .expect(401),
            )
            .describe(|_| "Denied with 401".to_string()),
        )
        .await;

        if let Some(user) = ctx.token_or_skip("User accessing companies", &Role::User) {
            ctx.run(
                Case::new(
                    "User accessing companies",
                    RequestSpec::get("companies").bearer(user).expect(403),
                )
                .describe(|_| "Denied with 403".to_string()),
            )
            .await;
        }

        Ok(())
    }
}
