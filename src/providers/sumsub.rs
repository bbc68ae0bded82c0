// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Blue Bank International

//! Signing proxy for the KYC provider's WebSDK link endpoint.
//!
//! Every request to the provider must carry an HMAC-SHA256 signature over
//! `{timestamp}{method}{path}{body}` computed with the account secret. The
//! secret never leaves this service, so browser clients obtain their
//! onboarding links through this proxy instead of calling the provider
//! directly.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde_json::json;
use sha2::Sha256;

use super::ProviderError;
use crate::config::{KYC_APP_TOKEN_ENV, KYC_SECRET_KEY_ENV};

const API_BASE: &str = "https://api.sumsub.com";
const WEBSDK_PATH: &str = "/resources/sdkIntegrations/levels/-/websdkLink";
const LINK_TTL_SECS: u32 = 1800;

type HmacSha256 = Hmac<Sha256>;

/// KYC onboarding seam. Returns the provider's status and raw body so the
/// handler can relay both verbatim.
#[async_trait]
pub trait KycProvider: Send + Sync {
    async fn websdk_link(&self, level_name: &str) -> Result<(u16, String), ProviderError>;
}

pub struct SumsubClient {
    base_url: String,
    app_token: String,
    secret_key: String,
    http: Client,
}

impl SumsubClient {
    pub fn new(
        base_url: impl Into<String>,
        app_token: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            app_token: app_token.into(),
            secret_key: secret_key.into(),
            http,
        }
    }

    pub fn from_env() -> Result<Self, ProviderError> {
        let app_token = std::env::var(KYC_APP_TOKEN_ENV)
            .map_err(|_| ProviderError::MissingConfig(KYC_APP_TOKEN_ENV))?;
        let secret_key = std::env::var(KYC_SECRET_KEY_ENV)
            .map_err(|_| ProviderError::MissingConfig(KYC_SECRET_KEY_ENV))?;
        Ok(Self::new(API_BASE, app_token, secret_key))
    }

    /// Hex HMAC-SHA256 over `{ts}{method}{path}{body}`.
    fn sign(secret: &str, ts: u64, method: &str, path: &str, body: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(format!("{ts}{method}{path}{body}").as_bytes());
        let digest = mac.finalize().into_bytes();
        digest.iter().map(|b| format!("{b:02x}")).collect()
    }
}

#[async_trait]
impl KycProvider for SumsubClient {
    async fn websdk_link(&self, level_name: &str) -> Result<(u16, String), ProviderError> {
        let body = json!({ "ttlInSecs": LINK_TTL_SECS, "levelName": level_name }).to_string();
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| ProviderError::Transport(e.to_string()))?
            .as_secs();
        let signature = Self::sign(&self.secret_key, ts, "POST", WEBSDK_PATH, &body);

        let response = self
            .http
            .post(format!("{}{}", self.base_url, WEBSDK_PATH))
            .header("X-App-Token", &self.app_token)
            .header("X-App-Access-Ts", ts.to_string())
            .header("X-App-Access-Sig", signature)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        Ok((status, body))
    }
}

/// Stand-in when the provider is not configured.
pub struct UnconfiguredKyc {
    pub missing: &'static str,
}

#[async_trait]
impl KycProvider for UnconfiguredKyc {
    async fn websdk_link(&self, _: &str) -> Result<(u16, String), ProviderError> {
        Err(ProviderError::MissingConfig(self.missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_is_lowercase_hex_and_deterministic() {
        let sig = SumsubClient::sign("secret", 1_700_000_000, "POST", "/path", "{}");
        assert_eq!(sig.len(), 64);
        assert!(sig
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        assert_eq!(
            sig,
            SumsubClient::sign("secret", 1_700_000_000, "POST", "/path", "{}")
        );
    }

    #[test]
    fn signature_depends_on_every_input() {
        let base = SumsubClient::sign("secret", 1, "POST", "/path", "{}");
        assert_ne!(base, SumsubClient::sign("other", 1, "POST", "/path", "{}"));
        assert_ne!(base, SumsubClient::sign("secret", 2, "POST", "/path", "{}"));
        assert_ne!(base, SumsubClient::sign("secret", 1, "GET", "/path", "{}"));
        assert_ne!(base, SumsubClient::sign("secret", 1, "POST", "/other", "{}"));
        assert_ne!(base, SumsubClient::sign("secret", 1, "POST", "/path", "[]"));
    }
}
