// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Blue Bank International

//! Axum extractor that authenticates requests via the identity gateway.

use axum::{extract::FromRequestParts, http::request::Parts};

use super::{AuthError, Identity};
use crate::state::AppState;

/// Extractor yielding the verified caller. Rejects with 401 before the
/// handler body runs.
///
/// ```ignore
/// async fn handler(Auth(identity): Auth) -> impl IntoResponse {
///     format!("hello {}", identity.id)
/// }
/// ```
pub struct Auth(pub Identity);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .ok_or(AuthError::MissingCredential)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthHeader)?;
        if token.is_empty() {
            return Err(AuthError::InvalidAuthHeader);
        }

        let identity = state.gateway.verify(token).await?;
        Ok(Auth(identity))
    }
}
