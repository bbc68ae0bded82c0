// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Blue Bank International

//! Client event log: audit records written by the frontend.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::auth::Auth;
use crate::error::ApiError;
use crate::models::LogEventRequest;
use crate::state::AppState;

/// First hop of `x-forwarded-for`, if present.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `POST /v1/events`
#[utoipa::path(
    post,
    path = "/v1/events",
    tag = "events",
    request_body = LogEventRequest,
    responses(
        (status = 201, description = "Event stored"),
        (status = 400, description = "Missing event_type"),
        (status = 401, description = "Missing or invalid credential"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn log_event(
    State(state): State<AppState>,
    Auth(identity): Auth,
    headers: HeaderMap,
    payload: Result<Json<LogEventRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| ApiError::malformed_request(rejection.body_text()))?;

    let event_type = request
        .event_type
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::invalid_input("Missing 'event_type'"))?;

    let record = state
        .events
        .insert_event(
            &identity.id,
            event_type,
            request.details,
            request.device_info,
            client_ip(&headers),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(record)).into_response())
}
