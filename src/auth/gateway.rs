// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Blue Bank International

//! Identity gateway: the managed auth provider behind a narrow trait.
//!
//! The provider owns credentials end to end (issuing, format, expiry); this
//! service never inspects tokens locally. Verification is a forwarded call
//! to the provider's user endpoint, and admin membership is a lookup in the
//! privileged `admins` table keyed by the verified user id.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::AuthError;
use crate::config::{BACKEND_ANON_KEY_ENV, BACKEND_SERVICE_KEY_ENV, BACKEND_URL_ENV};

/// A verified caller identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Result of a password sign-in: the provider's session blob is relayed to
/// the client untouched.
#[derive(Debug, Clone)]
pub struct SignInSession {
    pub user: Identity,
    pub session: Value,
}

/// Failures from provider-management operations (sign-in, user creation,
/// password updates). Credential *verification* failures use [`AuthError`].
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("provider rejected the request: {0}")]
    Rejected(String),

    #[error("provider unreachable: {0}")]
    Transport(String),
}

#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Verify a bearer credential and yield the caller's identity.
    async fn verify(&self, credential: &str) -> Result<Identity, AuthError>;

    /// Privileged-membership check. Fails closed: lookup errors deny.
    async fn is_admin(&self, user_id: &str) -> bool;

    /// Password sign-in, returning the provider session verbatim.
    async fn password_sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignInSession, GatewayError>;

    /// Create a provider user with a pre-confirmed email.
    async fn create_user(&self, email: &str, password: &str) -> Result<Identity, GatewayError>;

    /// Replace the password of an existing provider user.
    async fn update_password(&self, user_id: &str, password: &str) -> Result<(), GatewayError>;
}

/// HTTP implementation speaking the managed provider's auth dialect.
pub struct HttpIdentityGateway {
    base_url: String,
    anon_key: String,
    service_key: String,
    http: Client,
}

impl HttpIdentityGateway {
    pub fn new(
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        service_key: impl Into<String>,
    ) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            service_key: service_key.into(),
            http,
        }
    }

    pub fn from_env() -> Result<Self, GatewayError> {
        let base_url = env_required(BACKEND_URL_ENV)?;
        let anon_key = env_required(BACKEND_ANON_KEY_ENV)?;
        let service_key = env_required(BACKEND_SERVICE_KEY_ENV)?;
        Ok(Self::new(base_url, anon_key, service_key))
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn parse_session(value: Value) -> Result<SignInSession, GatewayError> {
        let user: Identity = serde_json::from_value(value["user"].clone())
            .map_err(|e| GatewayError::Rejected(format!("sign-in response missing user: {e}")))?;
        Ok(SignInSession {
            user,
            session: value,
        })
    }
}

fn env_required(name: &str) -> Result<String, GatewayError> {
    std::env::var(name).map_err(|_| GatewayError::Transport(format!("{name} is not set")))
}

#[async_trait]
impl IdentityGateway for HttpIdentityGateway {
    async fn verify(&self, credential: &str) -> Result<Identity, AuthError> {
        let response = self
            .http
            .get(self.auth_url("user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(credential)
            .send()
            .await
            .map_err(|e| AuthError::GatewayUnavailable(e.to_string()))?;

        match response.status() {
            status if status.is_success() => response
                .json::<Identity>()
                .await
                .map_err(|e| AuthError::GatewayUnavailable(e.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AuthError::Unauthenticated),
            status => Err(AuthError::GatewayUnavailable(format!(
                "provider returned {status}"
            ))),
        }
    }

    async fn is_admin(&self, user_id: &str) -> bool {
        let response = self
            .http
            .get(format!("{}/rest/v1/admins", self.base_url))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .query(&[
                ("select", "id"),
                ("id", &format!("eq.{user_id}")),
                ("limit", "1"),
            ])
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => resp
                .json::<Vec<Value>>()
                .await
                .map(|rows| !rows.is_empty())
                .unwrap_or(false),
            Ok(resp) => {
                tracing::warn!(status = %resp.status(), user_id, "admin lookup failed, denying");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, user_id, "admin lookup unreachable, denying");
                false
            }
        }
    }

    async fn password_sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignInSession, GatewayError> {
        let response = self
            .http
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            return Err(GatewayError::InvalidCredentials);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected(format!("{status}: {body}")));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Self::parse_session(value)
    }

    async fn create_user(&self, email: &str, password: &str) -> Result<Identity, GatewayError> {
        let response = self
            .http
            .post(self.auth_url("admin/users"))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "email_confirm": true,
            }))
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected(format!("{status}: {body}")));
        }

        response
            .json::<Identity>()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))
    }

    async fn update_password(&self, user_id: &str, password: &str) -> Result<(), GatewayError> {
        let response = self
            .http
            .put(self.auth_url(&format!("admin/users/{user_id}")))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .json(&serde_json::json!({ "password": password }))
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected(format!("{status}: {body}")));
        }
        Ok(())
    }
}
