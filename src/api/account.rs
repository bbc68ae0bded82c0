// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Blue Bank International

//! Account manager: login, account creation and provider sync.
//!
//! Clients identify themselves with a bank-issued `logon_id` or an email
//! address; the profile directory resolves that identifier to the email the
//! identity provider knows. `sync` reconciles directory rows with provider
//! accounts: it updates the password of an existing account or creates the
//! account on the fly.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::auth::GatewayError;
use crate::error::ApiError;
use crate::models::Profile;
use crate::state::AppState;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct AuthRequest {
    pub action: Option<String>,
    /// Logon id or email, depending on the action.
    pub identifier: Option<String>,
    pub logon_id: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub phone_number: Option<String>,
}

/// `POST /v1/auth`
#[utoipa::path(
    post,
    path = "/v1/auth",
    tag = "account",
    responses(
        (status = 200, description = "Signed in / synced"),
        (status = 201, description = "Account created"),
        (status = 400, description = "Missing fields or unknown action"),
        (status = 401, description = "Unknown identifier or wrong password"),
        (status = 409, description = "Logon id already registered"),
        (status = 500, description = "Identity provider failure"),
    )
)]
pub async fn dispatch(
    State(state): State<AppState>,
    payload: Result<Json<AuthRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| ApiError::malformed_request(rejection.body_text()))?;

    match request.action.as_deref() {
        Some("login") => login(&state, request).await,
        Some("create") => create(&state, request).await,
        Some("sync") => sync(&state, request).await,
        _ => Err(ApiError::bad_request_code("action_must_be_login_or_create")),
    }
}

async fn login(state: &AppState, request: AuthRequest) -> Result<Response, ApiError> {
    let identifier = request
        .identifier
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request_code("identifier_is_required"))?;
    let password = request
        .password
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request_code("password_is_required"))?;

    let profile = state
        .profiles
        .find_profile(&identifier)
        .await?
        .ok_or_else(|| ApiError::unauthenticated("no_user_found", "No user found"))?;

    let session = state
        .gateway
        .password_sign_in(&profile.email, &password)
        .await
        .map_err(map_sign_in_error)?;

    Ok(Json(json!({
        "user": session.user,
        "session": session.session,
        "user_profile": profile,
        "message": "Login successful",
    }))
    .into_response())
}

async fn create(state: &AppState, request: AuthRequest) -> Result<Response, ApiError> {
    let email = request
        .identifier
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request_code("identifier_is_required"))?;
    let logon_id = request
        .logon_id
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request_code("logon_id_is_required"))?;
    let password = request
        .password
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request_code("password_is_required"))?;

    if state
        .profiles
        .find_profile_by_logon_id(&logon_id)
        .await?
        .is_some()
    {
        return Err(ApiError::conflict(
            "logon_id_already_exists",
            "Logon id already registered",
        ));
    }

    let identity = state
        .gateway
        .create_user(&email, &password)
        .await
        .map_err(map_provider_error)?;

    let profile = state
        .profiles
        .insert_profile(Profile {
            id: identity.id.clone(),
            created_at: Utc::now(),
            logon_id,
            name: request.name,
            email: email.clone(),
            phone_number: request.phone_number,
        })
        .await?;

    let session = state
        .gateway
        .password_sign_in(&email, &password)
        .await
        .map_err(map_sign_in_error)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "user": session.user,
            "session": session.session,
            "user_profile": profile,
            "message": "Account created",
        })),
    )
        .into_response())
}

async fn sync(state: &AppState, request: AuthRequest) -> Result<Response, ApiError> {
    let identifier = request
        .identifier
        .clone()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request_code("identifier_is_required"))?;
    let password = request
        .password
        .clone()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request_code("password_is_required"))?;

    let by_logon = match &request.logon_id {
        Some(logon_id) if !logon_id.is_empty() => {
            state.profiles.find_profile_by_logon_id(logon_id).await?
        }
        _ => None,
    };
    let existing = match by_logon {
        Some(profile) => Some(profile),
        None => state.profiles.find_profile(&identifier).await?,
    };

    let Some(profile) = existing else {
        // Unknown on both keys: fall through to account creation.
        return create(state, request).await;
    };

    state
        .gateway
        .update_password(&profile.id, &password)
        .await
        .map_err(map_provider_error)?;

    let session = state
        .gateway
        .password_sign_in(&profile.email, &password)
        .await
        .map_err(map_sign_in_error)?;

    Ok(Json(json!({
        "user": session.user,
        "session": session.session,
        "user_profile": profile,
        "message": "Account synced",
    }))
    .into_response())
}

fn map_sign_in_error(err: GatewayError) -> ApiError {
    match err {
        GatewayError::InvalidCredentials => {
            ApiError::unauthenticated("invalid_login_credentials", "Invalid login credentials")
        }
        GatewayError::Rejected(msg) | GatewayError::Transport(msg) => {
            tracing::error!(error = %msg, "identity provider sign-in failed");
            ApiError::upstream("Identity provider error")
        }
    }
}

fn map_provider_error(err: GatewayError) -> ApiError {
    match err {
        GatewayError::InvalidCredentials => {
            ApiError::unauthenticated("invalid_login_credentials", "Invalid login credentials")
        }
        GatewayError::Rejected(msg) => {
            ApiError::conflict("provider_rejected", msg)
        }
        GatewayError::Transport(msg) => {
            tracing::error!(error = %msg, "identity provider unreachable");
            ApiError::upstream("Identity provider error")
        }
    }
}
