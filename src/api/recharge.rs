// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Blue Bank International

//! Recharge (top-up) request workflow.
//!
//! A single endpoint exposes four actions through one request shape
//! `{ "action": ..., ...fields }`. Regular users create requests and list
//! their own history; admins list everything and move requests out of
//! `PENDING`. Creation triggers a background operator notice that never
//! blocks or fails the response.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::Auth;
use crate::error::ApiError;
use crate::models::{NewRecharge, RechargeStatus};
use crate::notify::spawn_recharge_notice;
use crate::state::AppState;

/// Per-action payloads. The discriminant travels in the `action` field;
/// variants own their required-field validation.
#[derive(Debug, Deserialize)]
#[serde(tag = "action")]
pub enum RechargeAction {
    #[serde(rename = "requestRecharge")]
    Request {
        origin_account: Option<Value>,
        destination_card: Option<Value>,
        amount: Option<Value>,
    },
    #[serde(rename = "getRechargeHistory")]
    History {},
    #[serde(rename = "getAllRechargeRequests")]
    ListAll {},
    #[serde(rename = "updateRechargeStatus")]
    UpdateStatus {
        id: Option<String>,
        status: Option<String>,
    },
}

const KNOWN_ACTIONS: &[&str] = &[
    "requestRecharge",
    "getRechargeHistory",
    "getAllRechargeRequests",
    "updateRechargeStatus",
];

/// `POST /v1/recharge`
///
/// Dispatches one of the recharge actions for the authenticated caller.
#[utoipa::path(
    post,
    path = "/v1/recharge",
    tag = "recharge",
    request_body = Value,
    responses(
        (status = 200, description = "Action result"),
        (status = 201, description = "Recharge request created"),
        (status = 400, description = "Malformed payload, unknown action or invalid input"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 403, description = "Admin-only action"),
        (status = 404, description = "Unknown recharge id"),
        (status = 500, description = "Store or collaborator failure"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn dispatch(
    State(state): State<AppState>,
    Auth(identity): Auth,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = payload
        .map_err(|rejection| ApiError::malformed_request(rejection.body_text()))?;

    let action = body
        .get("action")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::malformed_request("Missing 'action' field"))?;
    if !KNOWN_ACTIONS.contains(&action) {
        return Err(ApiError::unknown_action(action));
    }

    let parsed: RechargeAction = serde_json::from_value(body)
        .map_err(|e| ApiError::malformed_request(e.to_string()))?;

    match parsed {
        RechargeAction::Request {
            origin_account,
            destination_card,
            amount,
        } => {
            let new = validate_request(&identity.id, origin_account, destination_card, amount)?;
            let record = state.recharges.insert(new).await?;
            spawn_recharge_notice(state.notifier.clone(), record.clone());
            Ok((StatusCode::CREATED, Json(record)).into_response())
        }

        RechargeAction::History {} => {
            let records = state.recharges.list_by_owner(&identity.id).await?;
            Ok(Json(records).into_response())
        }

        RechargeAction::ListAll {} => {
            require_admin(&state, &identity.id).await?;
            let records = state.recharges.list_all_joined().await?;
            Ok(Json(records).into_response())
        }

        RechargeAction::UpdateStatus { id, status } => {
            require_admin(&state, &identity.id).await?;
            let (id, status) = validate_update(id, status)?;
            let record = state.recharges.update_status(&id, status).await?;
            Ok(Json(record).into_response())
        }
    }
}

async fn require_admin(state: &AppState, user_id: &str) -> Result<(), ApiError> {
    if state.gateway.is_admin(user_id).await {
        Ok(())
    } else {
        Err(ApiError::forbidden("Admin privileges required"))
    }
}

/// Field validation for `requestRecharge`. Offending fields are echoed back
/// in the error details, mirroring what the client sent.
fn validate_request(
    user_id: &str,
    origin_account: Option<Value>,
    destination_card: Option<Value>,
    amount: Option<Value>,
) -> Result<NewRecharge, ApiError> {
    let origin = origin_account
        .as_ref()
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    let destination = destination_card
        .as_ref()
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    let parsed_amount = amount.as_ref().and_then(Value::as_f64).filter(|a| *a > 0.0);

    match (origin, destination, parsed_amount) {
        (Some(origin_account), Some(destination_card), Some(amount)) => Ok(NewRecharge {
            user_id: user_id.to_string(),
            origin_account,
            destination_card,
            amount,
        }),
        (origin, destination, parsed) => {
            let mut offending = serde_json::Map::new();
            if origin.is_none() {
                offending.insert(
                    "origin_account".into(),
                    origin_account.unwrap_or(Value::Null),
                );
            }
            if destination.is_none() {
                offending.insert(
                    "destination_card".into(),
                    destination_card.unwrap_or(Value::Null),
                );
            }
            if parsed.is_none() {
                offending.insert("amount".into(), amount.unwrap_or(Value::Null));
            }
            Err(ApiError::invalid_input("Invalid recharge request data")
                .with_details(Value::Object(offending)))
        }
    }
}

/// Field validation for `updateRechargeStatus`. Only terminal statuses are
/// accepted; `PENDING` is not a valid transition target.
fn validate_update(
    id: Option<String>,
    status: Option<String>,
) -> Result<(String, RechargeStatus), ApiError> {
    let id = id
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::invalid_input("Missing 'id' field"))?;

    let status = match status.as_deref() {
        Some("PROCESSED") => RechargeStatus::Processed,
        Some("REJECTED") => RechargeStatus::Rejected,
        other => {
            return Err(ApiError::invalid_input(
                "Status must be PROCESSED or REJECTED",
            )
            .with_details(json!({ "status": other })));
        }
    };
    Ok((id, status))
}
