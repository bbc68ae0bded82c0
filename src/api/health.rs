// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Blue Bank International

//! Liveness and readiness probes.

use axum::{response::IntoResponse, Json};
use serde_json::json;

use crate::config;

/// `GET /health`
///
/// Reports version and which collaborators have configuration present.
/// Presence of a variable is not proof the collaborator is reachable.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service status"))
)]
pub async fn health() -> impl IntoResponse {
    let configured = |var: &str| std::env::var(var).is_ok();
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "collaborators": {
            "backend": configured(config::BACKEND_URL_ENV),
            "mailer": configured(config::MAILER_API_KEY_ENV),
            "kyc": configured(config::KYC_APP_TOKEN_ENV),
        },
    }))
}

/// `GET /health/live`
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "health",
    responses((status = 200, description = "Process is up"))
)]
pub async fn live() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, http::StatusCode, routing::get, Router};
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn health_reports_service_and_version() {
        let router = Router::new().route("/health", get(health));
        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], env!("CARGO_PKG_NAME"));
    }

    #[tokio::test]
    async fn live_returns_ok() {
        let router = Router::new().route("/health/live", get(live));
        let response = router
            .oneshot(Request::get("/health/live").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
