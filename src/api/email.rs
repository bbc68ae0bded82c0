// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Blue Bank International

//! Template-based transactional email.
//!
//! Internal side-channel surface used by backend jobs; it carries no user
//! credential. The only known template is `RECHARGE_REQUEST`.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;
use crate::templates::RechargeNotice;

pub const RECHARGE_REQUEST_TEMPLATE: &str = "RECHARGE_REQUEST";

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SendEmailRequest {
    #[serde(rename = "templateId")]
    pub template_id: Option<String>,
    pub to: Option<String>,
    #[serde(default)]
    pub data: Value,
}

/// `POST /v1/email`
#[utoipa::path(
    post,
    path = "/v1/email",
    tag = "email",
    responses(
        (status = 200, description = "Email delivered"),
        (status = 400, description = "Unknown template or missing recipient"),
        (status = 500, description = "Email provider failure"),
    )
)]
pub async fn send(
    State(state): State<AppState>,
    payload: Result<Json<SendEmailRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| ApiError::malformed_request(rejection.body_text()))?;

    let to = request
        .to
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::invalid_input("Missing 'to'"))?;
    match request.template_id.as_deref() {
        Some(RECHARGE_REQUEST_TEMPLATE) => {}
        other => {
            return Err(ApiError::invalid_input("Unknown template")
                .with_details(json!({ "templateId": other })));
        }
    }

    let notice = notice_from_data(&request.data);
    state
        .mailer
        .send_html(&to, &notice.subject(), &notice.html(), &notice.text())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, to, "template email delivery failed");
            ApiError::upstream("Email delivery failed")
        })?;

    Ok(Json(json!({ "success": true })).into_response())
}

fn notice_from_data(data: &Value) -> RechargeNotice {
    let field = |key: &str| {
        data.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    RechargeNotice {
        folio: field("folio"),
        requester_name: field("name"),
        requester_email: field("email"),
        amount: data.get("amount").and_then(Value::as_f64).unwrap_or(0.0),
        origin_account: field("origin_account"),
        destination_card: field("destination_card"),
        date: field("date"),
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, http::StatusCode, routing::post, Router};
    use tower::ServiceExt;

    use super::*;
    use crate::test_support::TestApp;

    fn router(app: &TestApp) -> Router {
        Router::new()
            .route("/v1/email", post(send))
            .with_state(app.state.clone())
    }

    async fn call(router: Router, body: Value) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::post("/v1/email")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn recharge_template_is_rendered_and_sent() {
        let app = TestApp::new();
        let (status, body) = call(
            router(&app),
            json!({
                "templateId": "RECHARGE_REQUEST",
                "to": "ops@bluebank.example",
                "data": {
                    "folio": "F-000007",
                    "name": "Ada",
                    "email": "ada@example.com",
                    "amount": 75.0,
                    "origin_account": "1111",
                    "destination_card": "2222",
                    "date": "2026-01-02",
                },
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let sent = app.mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let (to, subject, html) = &sent[0];
        assert_eq!(to, "ops@bluebank.example");
        assert_eq!(subject, "New Top Up Requested - Folio: F-000007");
        assert!(html.contains("$75.00"));
    }

    #[tokio::test]
    async fn unknown_template_is_rejected() {
        let app = TestApp::new();
        let (status, body) = call(
            router(&app),
            json!({ "templateId": "PASSWORD_RESET", "to": "a@example.com" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_code"], "invalid_input");
        assert_eq!(body["details"]["templateId"], "PASSWORD_RESET");
    }

    #[tokio::test]
    async fn missing_recipient_is_rejected() {
        let app = TestApp::new();
        let (status, _) = call(
            router(&app),
            json!({ "templateId": "RECHARGE_REQUEST" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
