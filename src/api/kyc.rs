// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Blue Bank International

//! KYC onboarding: relays signed WebSDK-link requests to the provider.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::providers::ProviderError;
use crate::state::AppState;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct AccessLinkRequest {
    #[serde(rename = "levelName")]
    pub level_name: Option<String>,
}

/// `POST /v1/kyc/access-link`
///
/// The provider's status and body are relayed verbatim, including provider
/// errors, so the frontend sees exactly what the provider said.
#[utoipa::path(
    post,
    path = "/v1/kyc/access-link",
    tag = "kyc",
    responses(
        (status = 200, description = "Provider response, relayed verbatim"),
        (status = 400, description = "Missing levelName"),
        (status = 500, description = "Provider unreachable or unconfigured"),
    )
)]
pub async fn access_link(
    State(state): State<AppState>,
    payload: Result<Json<AccessLinkRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| ApiError::malformed_request(rejection.body_text()))?;

    let level_name = request
        .level_name
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::invalid_input("Missing 'levelName'"))?;

    let (status, body) = state.kyc.websdk_link(&level_name).await.map_err(|e| {
        tracing::error!(error = %e, "websdk link request failed");
        match e {
            ProviderError::MissingConfig(var) => {
                ApiError::upstream(format!("KYC provider not configured ({var})"))
            }
            _ => ApiError::upstream("KYC provider unreachable"),
        }
    })?;

    let status = StatusCode::from_u16(status)
        .map_err(|_| ApiError::upstream("KYC provider returned an invalid status"))?;
    Ok((
        status,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}
