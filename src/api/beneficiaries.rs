// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Blue Bank International

//! Beneficiary CRUD, scoped to the authenticated caller.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::Auth;
use crate::error::ApiError;
use crate::models::CreateBeneficiaryRequest;
use crate::state::AppState;

/// `GET /v1/beneficiaries`
#[utoipa::path(
    get,
    path = "/v1/beneficiaries",
    tag = "beneficiaries",
    responses(
        (status = 200, description = "Caller's beneficiaries, newest first"),
        (status = 401, description = "Missing or invalid credential"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn list(
    State(state): State<AppState>,
    Auth(identity): Auth,
) -> Result<Response, ApiError> {
    let beneficiaries = state.beneficiaries.list_beneficiaries(&identity.id).await?;
    Ok(Json(beneficiaries).into_response())
}

/// `POST /v1/beneficiaries`
#[utoipa::path(
    post,
    path = "/v1/beneficiaries",
    tag = "beneficiaries",
    request_body = CreateBeneficiaryRequest,
    responses(
        (status = 201, description = "Beneficiary created"),
        (status = 400, description = "Missing required fields"),
        (status = 401, description = "Missing or invalid credential"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn create(
    State(state): State<AppState>,
    Auth(identity): Auth,
    payload: Result<Json<CreateBeneficiaryRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) =
        payload.map_err(|rejection| ApiError::malformed_request(rejection.body_text()))?;

    let mut missing = Vec::new();
    if request.name.as_deref().map_or(true, str::is_empty) {
        missing.push("name");
    }
    if request.kind.is_none() {
        missing.push("type");
    }
    if request
        .account_number
        .as_deref()
        .map_or(true, str::is_empty)
    {
        missing.push("account_number");
    }
    if !missing.is_empty() {
        return Err(ApiError::invalid_input("Missing required fields")
            .with_details(json!({ "missing": missing })));
    }

    let beneficiary = state
        .beneficiaries
        .insert_beneficiary(&identity.id, request)
        .await?;
    Ok((StatusCode::CREATED, Json(beneficiary)).into_response())
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id: Option<String>,
}

/// `DELETE /v1/beneficiaries`
///
/// The id travels in the `id` query parameter or, for clients that cannot
/// set one, in a JSON body `{ "id": ... }`.
#[utoipa::path(
    delete,
    path = "/v1/beneficiaries",
    tag = "beneficiaries",
    params(("id" = Option<String>, Query, description = "Beneficiary id")),
    responses(
        (status = 200, description = "Beneficiary deleted"),
        (status = 400, description = "Missing id"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 404, description = "Not found or owned by another user"),
    ),
    security(("bearer_auth" = []))
)]
pub async fn remove(
    State(state): State<AppState>,
    Auth(identity): Auth,
    Query(params): Query<DeleteParams>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let body_id = payload
        .ok()
        .and_then(|Json(body)| body.get("id").and_then(Value::as_str).map(str::to_string));
    let id = params
        .id
        .filter(|s| !s.is_empty())
        .or(body_id)
        .ok_or_else(|| ApiError::invalid_input("Missing 'id'"))?;

    state
        .beneficiaries
        .delete_beneficiary(&identity.id, &id)
        .await?;
    Ok(Json(json!({ "success": true })).into_response())
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, routing::get, Router};
    use tower::ServiceExt;

    use super::*;
    use crate::test_support::TestApp;

    fn router(app: &TestApp) -> Router {
        Router::new()
            .route("/v1/beneficiaries", get(list).post(create).delete(remove))
            .with_state(app.state.clone())
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn create_request(token: &str, body: Value) -> Request<Body> {
        Request::post("/v1/beneficiaries")
            .header("Authorization", format!("Bearer {token}"))
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn valid_body() -> Value {
        json!({
            "name": "Alice",
            "type": "bluePay",
            "account_number": "123456",
            "nickname": "Al",
        })
    }

    #[tokio::test]
    async fn create_then_list_round_trips() {
        let app = TestApp::new();
        let r = router(&app);

        let (status, created) = send(r.clone(), create_request("user-token", valid_body())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["name"], "Alice");
        assert_eq!(created["type"], "bluePay");

        let (status, listed) = send(
            r,
            Request::get("/v1/beneficiaries")
                .header("Authorization", "Bearer user-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_required_fields_are_listed() {
        let app = TestApp::new();
        let (status, body) = send(
            router(&app),
            create_request("user-token", json!({ "nickname": "Al" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let missing = body["details"]["missing"].as_array().unwrap();
        assert_eq!(missing.len(), 3);
    }

    #[tokio::test]
    async fn list_is_scoped_to_caller() {
        let app = TestApp::new();
        let r = router(&app);
        send(r.clone(), create_request("user-token", valid_body())).await;

        let (_, listed) = send(
            r,
            Request::get("/v1/beneficiaries")
                .header("Authorization", "Bearer other-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert!(listed.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_by_query_param() {
        let app = TestApp::new();
        let r = router(&app);
        let (_, created) = send(r.clone(), create_request("user-token", valid_body())).await;
        let id = created["id"].as_str().unwrap();

        let (status, body) = send(
            r,
            Request::delete(format!("/v1/beneficiaries?id={id}"))
                .header("Authorization", "Bearer user-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn delete_someone_elses_beneficiary_is_not_found() {
        let app = TestApp::new();
        let r = router(&app);
        let (_, created) = send(r.clone(), create_request("user-token", valid_body())).await;
        let id = created["id"].as_str().unwrap();

        let (status, _) = send(
            r,
            Request::delete(format!("/v1/beneficiaries?id={id}"))
                .header("Authorization", "Bearer other-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_without_id_is_invalid() {
        let app = TestApp::new();
        let (status, body) = send(
            router(&app),
            Request::delete("/v1/beneficiaries")
                .header("Authorization", "Bearer user-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_code"], "invalid_input");
    }

    #[tokio::test]
    async fn unauthenticated_access_is_rejected() {
        let app = TestApp::new();
        let (status, _) = send(
            router(&app),
            Request::get("/v1/beneficiaries").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
