//! Employee management and QR code generation

use async_trait::async_trait;
use serde_json::json;

use crate::common::{time_stamp, Result};
use crate::harness::{Case, Context, Scenario};
use crate::http::RequestSpec;
use crate::session::{ArtifactKey, Role};

use super::{found, SEED_COMPANY_ID};

pub struct Employees;

#[async_trait]
impl Scenario for Employees {
    fn name(&self) -> &str {
        "Employee Management"
    }

    async fn run(&self, ctx: &mut Context<'_>) -> Result<()> {
        let Some(admin) = ctx.token_or_skip("Employee tests", &Role::Admin) else {
            return Ok(());
        };

        ctx.run(
            Case::new("Get employees", RequestSpec::get("employees").bearer(admin.clone()))
                .describe(found("employees")),
        )
        .await;

        let body = json!({
            "name": format!("Test Employee {}", time_stamp()),
            "company_id": SEED_COMPANY_ID,
        });
        let checked = ctx
            .run(
                Case::new("Create employee", RequestSpec::post("employees", body).bearer(admin.clone()))
                    .require_field("id")
                    .require_field("qr_code")
                    .describe(|o| {
                        format!(
                            "Created: {}, QR: {}",
                            o.field_str("name").unwrap_or_default(),
                            o.field_str("qr_code").unwrap_or_default()
                        )
                    }),
            )
            .await;

        if let Some(created) = checked.on_pass() {
            let id = created.field("id").cloned();
            let qr = created.field("qr_code").cloned();
            let session = ctx.session_mut();
            if let Some(id) = id {
                session.set_artifact(ArtifactKey::EmployeeId, id);
            }
            if let Some(qr) = qr {
                session.set_artifact(ArtifactKey::EmployeeQr, qr);
            }
        }

        if let Some(id) = ctx.artifact_or_skip("Generate QR code", &ArtifactKey::EmployeeId) {
            ctx.run(
                Case::new(
                    "Generate QR code",
                    RequestSpec::get(format!("employees/{}/qr", id)).bearer(admin),
                )
                .describe(|_| "QR code generated".to_string()),
            )
            .await;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::config::Config;
    use crate::harness::testing::ScriptedExecutor;
    use crate::harness::Status;
    use crate::http::{Body, Method, Outcome};
    use crate::session::Token;

    #[tokio::test]
    async fn test_created_employee_feeds_qr_generation() {
        let exec = ScriptedExecutor::new()
            .on(Method::Get, "employees", Outcome::response(200, Body::Json(json!([]))))
            .on(
                Method::Post,
                "employees",
                Outcome::response(
                    200,
                    Body::Json(json!({ "id": 12, "name": "Test Employee", "qr_code": "QR-12" })),
                ),
            )
            .on(
                Method::Get,
                "employees/12/qr",
                Outcome::response(200, Body::Json(json!({ "qr_code": "QR-12" }))),
            );
        let config = Config::default();

        let mut ctx = Context::new(&exec, &config);
        ctx.session_mut().set_token(Role::Admin, Token::new("tok-admin"));
        Employees.run(&mut ctx).await.unwrap();

        assert!(ctx.report().verdicts().iter().all(|v| v.is_passed()));
        assert_eq!(ctx.report().verdicts()[1].detail, "Created: Test Employee, QR: QR-12");
        assert_eq!(ctx.session().artifact(&ArtifactKey::EmployeeId), Some(&json!(12)));
        assert_eq!(
            ctx.session().artifact_str(&ArtifactKey::EmployeeQr).as_deref(),
            Some("QR-12")
        );
    }

    #[tokio::test]
    async fn test_failed_creation_skips_qr_generation() {
        let exec = ScriptedExecutor::new()
            .on(Method::Get, "employees", Outcome::response(200, Body::Json(json!([]))))
            .on(
                Method::Post,
                "employees",
                Outcome::response(500, Body::Raw("Internal Server Error".to_string())),
            );
        let config = Config::default();

        let mut ctx = Context::new(&exec, &config);
        ctx.session_mut().set_token(Role::Admin, Token::new("tok-admin"));
        Employees.run(&mut ctx).await.unwrap();

        let verdicts = ctx.report().verdicts();
        assert_eq!(verdicts.len(), 3);
        assert_eq!(verdicts[1].status, Status::Failed);
        assert!(verdicts[1].detail.contains("Internal Server Error"));
        assert_eq!(verdicts[2].status, Status::Skipped);
        assert_eq!(exec.requests().len(), 2);
    }
}
