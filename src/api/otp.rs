// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Blue Bank International

//! One-time-password dispatch through the email provider's template API.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use rand::Rng;
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SendOtpRequest {
    pub email: Option<String>,
    pub subject: Option<String>,
    pub template_id: Option<String>,
}

/// Six decimal digits, never with a leading zero dropped.
fn generate_otp() -> String {
    rand::rng().random_range(100_000..1_000_000).to_string()
}

/// `POST /v1/otp`
///
/// Generates a code, delivers it via the provider template and echoes it to
/// the caller, which holds it for verification.
#[utoipa::path(
    post,
    path = "/v1/otp",
    tag = "otp",
    responses(
        (status = 200, description = "OTP generated and sent"),
        (status = 400, description = "Missing email, subject or template_id"),
        (status = 500, description = "Email provider failure"),
    )
)]
pub async fn send(
    State(state): State<AppState>,
    payload: Result<Json<SendOtpRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| ApiError::malformed_request(rejection.body_text()))?;

    let email = request
        .email
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::invalid_input("Missing 'email'"))?;
    let subject = request
        .subject
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::invalid_input("Missing 'subject'"))?;
    let template_id = request
        .template_id
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::invalid_input("Missing 'template_id'"))?;

    let otp = generate_otp();
    state
        .mailer
        .send_template(
            &email,
            &template_id,
            json!({ "otp": otp, "subject": subject }),
        )
        .await
        .map_err(|e| {
            tracing::error!(error = %e, email, "otp delivery failed");
            ApiError::upstream("OTP delivery failed")
        })?;

    Ok(Json(json!({ "otp": otp })).into_response())
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, http::StatusCode, routing::post, Router};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::test_support::TestApp;

    fn router(app: &TestApp) -> Router {
        Router::new()
            .route("/v1/otp", post(send))
            .with_state(app.state.clone())
    }

    async fn call(router: Router, body: Value) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::post("/v1/otp")
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

    #[test]
    fn otp_is_six_decimal_digits() {
        for _ in 0..100 {
            let otp = generate_otp();
            assert_eq!(otp.len(), 6);
            assert!(otp.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[tokio::test]
    async fn otp_is_sent_via_template_and_echoed() {
        let app = TestApp::new();
        let (status, body) = call(
            router(&app),
            json!({
                "email": "user@example.com",
                "subject": "Your code",
                "template_id": "tmpl-otp",
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let otp = body["otp"].as_str().unwrap();
        assert_eq!(otp.len(), 6);

        let sent = app.mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let (to, template, variables) = &sent[0];
        assert_eq!(to, "user@example.com");
        assert_eq!(template, "tmpl-otp");
        assert!(variables.contains(otp));
    }

    #[tokio::test]
    async fn missing_fields_are_rejected() {
        let app = TestApp::new();
        let (status, body) = call(
            router(&app),
            json!({ "email": "user@example.com", "subject": "Your code" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_code"], "invalid_input");
    }
}
