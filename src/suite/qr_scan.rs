//! Check-in/check-out through a scanned employee QR code

use async_trait::async_trait;
use serde_json::json;

use crate::common::Result;
use crate::harness::{Case, Context, Scenario};
use crate::http::RequestSpec;
use crate::session::{ArtifactKey, Role};

pub struct QrScan;

#[async_trait]
impl Scenario for QrScan {
    fn name(&self) -> &str {
        "QR Code Scanning"
    }

    async fn run(&self, ctx: &mut Context<'_>) -> Result<()> {
        const SKIP: &str = "QR scan tests";
        let Some(admin) = ctx.token_or_skip(SKIP, &Role::Admin) else {
            return Ok(());
        };
        let Some(qr_code) = ctx.artifact_or_skip(SKIP, &ArtifactKey::EmployeeQr) else {
            return Ok(());
        };

        let body = json!({ "qr_code": qr_code, "user_id": "admin_user_id" });
        ctx.run(
            Case::new("QR scan", RequestSpec::post("qr-scan", body).bearer(admin))
                .require_field("action")
                .describe(|o| {
                    format!(
                        "Action: {}, Employee: {}",
                        o.field_str("action").unwrap_or_else(|| "unknown".to_string()),
                        o.field_str("employee_name").unwrap_or_else(|| "unknown".to_string())
                    )
                }),
        )
        .await;

        Ok(())
    }
}
