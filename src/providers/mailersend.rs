// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Blue Bank International

//! Transactional email via the MailerSend HTTP API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::{MAILER_API_KEY_ENV, MAILER_API_URL_ENV, MAILER_SENDER_ENV};

const DEFAULT_API_URL: &str = "https://api.mailersend.com/v1/email";

/// Outbound provider failure.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0} is not set")]
    MissingConfig(&'static str),

    #[error("provider returned {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("provider unreachable: {0}")]
    Transport(String),
}

/// Email delivery seam. Handlers and the notification sender depend on this
/// trait, never on the concrete HTTP client.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send a single HTML email.
    async fn send_html(
        &self,
        to: &str,
        subject: &str,
        html: &str,
        text: &str,
    ) -> Result<(), ProviderError>;

    /// Send using a provider-hosted template with substitution variables.
    async fn send_template(
        &self,
        to: &str,
        template_id: &str,
        variables: Value,
    ) -> Result<(), ProviderError>;
}

pub struct MailerSendClient {
    api_url: String,
    api_key: String,
    sender: String,
    http: Client,
}

impl MailerSendClient {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        sender: impl Into<String>,
    ) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            sender: sender.into(),
            http,
        }
    }

    pub fn from_env() -> Result<Self, ProviderError> {
        let api_url =
            std::env::var(MAILER_API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_key = std::env::var(MAILER_API_KEY_ENV)
            .map_err(|_| ProviderError::MissingConfig(MAILER_API_KEY_ENV))?;
        let sender = std::env::var(MAILER_SENDER_ENV)
            .map_err(|_| ProviderError::MissingConfig(MAILER_SENDER_ENV))?;
        Ok(Self::new(api_url, api_key, sender))
    }

    async fn post(&self, payload: Value) -> Result<(), ProviderError> {
        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Mailer for MailerSendClient {
    async fn send_html(
        &self,
        to: &str,
        subject: &str,
        html: &str,
        text: &str,
    ) -> Result<(), ProviderError> {
        self.post(json!({
            "from": { "email": self.sender },
            "to": [{ "email": to }],
            "subject": subject,
            "html": html,
            "text": text,
        }))
        .await
    }

    async fn send_template(
        &self,
        to: &str,
        template_id: &str,
        variables: Value,
    ) -> Result<(), ProviderError> {
        self.post(json!({
            "from": { "email": self.sender },
            "to": [{ "email": to }],
            "template_id": template_id,
            "personalization": [{
                "email": to,
                "data": variables,
            }],
        }))
        .await
    }
}

/// Stand-in when delivery is not configured; every send fails with the
/// missing variable name so callers surface a clean 500.
pub struct UnconfiguredMailer {
    pub missing: &'static str,
}

#[async_trait]
impl Mailer for UnconfiguredMailer {
    async fn send_html(&self, _: &str, _: &str, _: &str, _: &str) -> Result<(), ProviderError> {
        Err(ProviderError::MissingConfig(self.missing))
    }

    async fn send_template(&self, _: &str, _: &str, _: Value) -> Result<(), ProviderError> {
        Err(ProviderError::MissingConfig(self.missing))
    }
}
