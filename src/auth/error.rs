// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Blue Bank International

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Authentication failure, produced by the `Auth` extractor before any
/// payload parsing or store access happens.
#[derive(Debug)]
pub enum AuthError {
    /// No authorization header present
    MissingCredential,
    /// Authorization header is not `Bearer <token>`
    InvalidAuthHeader,
    /// The identity provider rejected the credential
    Unauthenticated,
    /// The identity provider could not be reached
    GatewayUnavailable(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "missing_credential",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::Unauthenticated => "unauthenticated",
            AuthError::GatewayUnavailable(_) => "gateway_unavailable",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredential
            | AuthError::InvalidAuthHeader
            | AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthError::GatewayUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingCredential => write!(f, "Authorization header is required"),
            AuthError::InvalidAuthHeader => {
                write!(
                    f,
                    "Invalid authorization header format (expected 'Bearer <token>')"
                )
            }
            AuthError::Unauthenticated => write!(f, "Invalid or expired credential"),
            AuthError::GatewayUnavailable(msg) => {
                write!(f, "Identity provider unavailable: {msg}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
