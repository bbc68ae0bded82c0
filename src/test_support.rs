// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Blue Bank International

//! Shared fixtures for handler tests: a mock identity gateway with two
//! well-known tokens, recording provider doubles, and an `AppState` wired
//! over a single in-memory store.
//!
//! Token map: `user-token` → `user-1` (regular), `admin-token` → `admin-1`
//! (admin), `other-token` → `user-2` (regular).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};

use crate::auth::{AuthError, GatewayError, Identity, IdentityGateway, SignInSession};
use crate::models::{Profile, RechargeRecord};
use crate::notify::NotificationSender;
use crate::providers::{KycProvider, Mailer, ProviderError};
use crate::state::AppState;
use crate::store::memory::InMemoryStore;

pub struct MockGateway {
    tokens: HashMap<String, Identity>,
    admins: Vec<String>,
    accounts: Mutex<HashMap<String, (String, String)>>,
}

impl MockGateway {
    pub fn new() -> Self {
        let mut tokens = HashMap::new();
        tokens.insert(
            "user-token".to_string(),
            Identity {
                id: "user-1".into(),
                email: Some("user1@example.com".into()),
            },
        );
        tokens.insert(
            "other-token".to_string(),
            Identity {
                id: "user-2".into(),
                email: Some("user2@example.com".into()),
            },
        );
        tokens.insert(
            "admin-token".to_string(),
            Identity {
                id: "admin-1".into(),
                email: Some("admin@example.com".into()),
            },
        );

        let mut accounts = HashMap::new();
        accounts.insert(
            "user1@example.com".to_string(),
            ("hunter2".to_string(), "user-1".to_string()),
        );

        Self {
            tokens,
            admins: vec!["admin-1".into()],
            accounts: Mutex::new(accounts),
        }
    }
}

#[async_trait]
impl IdentityGateway for MockGateway {
    async fn verify(&self, credential: &str) -> Result<Identity, AuthError> {
        self.tokens
            .get(credential)
            .cloned()
            .ok_or(AuthError::Unauthenticated)
    }

    async fn is_admin(&self, user_id: &str) -> bool {
        self.admins.iter().any(|id| id == user_id)
    }

    async fn password_sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignInSession, GatewayError> {
        let accounts = self.accounts.lock().unwrap();
        match accounts.get(email) {
            Some((stored, user_id)) if stored == password => Ok(SignInSession {
                user: Identity {
                    id: user_id.clone(),
                    email: Some(email.to_string()),
                },
                session: json!({
                    "access_token": format!("token-for-{user_id}"),
                    "token_type": "bearer",
                    "user": { "id": user_id, "email": email },
                }),
            }),
            _ => Err(GatewayError::InvalidCredentials),
        }
    }

    async fn create_user(&self, email: &str, password: &str) -> Result<Identity, GatewayError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(email) {
            return Err(GatewayError::Rejected("email already registered".into()));
        }
        let id = format!("user-{}", accounts.len() + 1);
        accounts.insert(email.to_string(), (password.to_string(), id.clone()));
        Ok(Identity {
            id,
            email: Some(email.to_string()),
        })
    }

    async fn update_password(&self, user_id: &str, password: &str) -> Result<(), GatewayError> {
        let mut accounts = self.accounts.lock().unwrap();
        for (stored, id) in accounts.values_mut() {
            if id == user_id {
                *stored = password.to_string();
                return Ok(());
            }
        }
        Err(GatewayError::Rejected("unknown user".into()))
    }
}

#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_html(
        &self,
        to: &str,
        subject: &str,
        html: &str,
        _text: &str,
    ) -> Result<(), ProviderError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.into(), subject.into(), html.into()));
        Ok(())
    }

    async fn send_template(
        &self,
        to: &str,
        template_id: &str,
        variables: Value,
    ) -> Result<(), ProviderError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.into(), template_id.into(), variables.to_string()));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<RechargeRecord>>,
}

#[async_trait]
impl NotificationSender for RecordingNotifier {
    async fn send_recharge_notice(&self, record: &RechargeRecord) -> Result<(), ProviderError> {
        self.notices.lock().unwrap().push(record.clone());
        Ok(())
    }
}

pub struct StaticKyc;

#[async_trait]
impl KycProvider for StaticKyc {
    async fn websdk_link(&self, level_name: &str) -> Result<(u16, String), ProviderError> {
        Ok((
            200,
            json!({ "url": format!("https://kyc.example/{level_name}") }).to_string(),
        ))
    }
}

/// Fully wired state over an in-memory store, with handles to the doubles
/// so tests can assert on side effects.
pub struct TestApp {
    pub state: AppState,
    pub store: Arc<InMemoryStore>,
    pub mailer: Arc<RecordingMailer>,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let mailer = Arc::new(RecordingMailer::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let state = AppState {
            gateway: Arc::new(MockGateway::new()),
            recharges: store.clone(),
            beneficiaries: store.clone(),
            events: store.clone(),
            profiles: store.clone(),
            notifier: notifier.clone(),
            mailer: mailer.clone(),
            kyc: Arc::new(StaticKyc),
        };
        Self {
            state,
            store,
            mailer,
            notifier,
        }
    }

    /// Seed a profile row for one of the well-known identities.
    pub async fn seed_profile(&self, id: &str, name: &str, email: &str) {
        use crate::store::ProfileStore;
        self.store
            .insert_profile(Profile {
                id: id.to_string(),
                created_at: Utc::now(),
                logon_id: format!("logon_{id}"),
                name: Some(name.to_string()),
                email: email.to_string(),
                phone_number: None,
            })
            .await
            .expect("seed profile");
    }
}
