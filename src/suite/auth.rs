//! Login for every seeded role, plus a rejected login

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::common::Result;
use crate::harness::{Case, Context, Scenario};
use crate::http::{value_text, Outcome, RequestSpec};
use crate::session::{Missing, Role, Token};

pub struct Authentication;

/// Roles logged in, in order; later scenarios look their tokens up
const LOGIN_ROLES: [Role; 3] = [Role::Owner, Role::Admin, Role::User];

#[async_trait]
impl Scenario for Authentication {
    fn name(&self) -> &str {
        "Authentication"
    }

    async fn run(&self, ctx: &mut Context<'_>) -> Result<()> {
        for role in LOGIN_ROLES {
            let Some(creds) = ctx.config().credentials_for(role.as_str()) else {
                ctx.skip(
                    &format!("Login {}", role),
                    Missing::new(format!("{} credentials", role)),
                );
                continue;
            };

            let case = Case::new(
                format!("Login {}", creds.username),
                RequestSpec::post(
                    "auth/login",
                    json!({ "username": creds.username, "password": creds.password }),
                ),
            )
            .check(has_access_token)
            .describe(|o| {
                let user_type = o
                    .field("user")
                    .and_then(|user| user.get("type"))
                    .and_then(value_text)
                    .unwrap_or_else(|| "unknown".to_string());
                format!("Token received, User type: {}", user_type)
            });

            let checked = ctx.run(case).await;
            if let Some(token) = checked.on_pass().and_then(|o| o.field_str("access_token")) {
                ctx.session_mut().set_token(role, Token::new(token));
            }
        }

        ctx.run(
            Case::new(
                "Invalid login",
                RequestSpec::post(
                    "auth/login",
                    json!({ "username": "invalid", "password": "invalid" }),
                )
                .expect(401),
            )
            .describe(|_| "Rejected with 401".to_string()),
        )
        .await;

        Ok(())
    }
}

fn has_access_token(outcome: &Outcome) -> std::result::Result<(), String> {
    match outcome.field("access_token") {
        Some(Value::String(token)) if !token.is_empty() => Ok(()),
        _ => Err("response has no access_token".to_string()),
    }
}
