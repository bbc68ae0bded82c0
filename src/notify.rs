// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Blue Bank International

//! Operator notification for new recharge requests.
//!
//! Delivery is fire-and-forget: the HTTP response to the requester never
//! waits on the email provider, and a delivery failure is logged rather
//! than surfaced. The recharge record is already persisted by the time a
//! notice is attempted.

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::RechargeRecord;
use crate::providers::{Mailer, ProviderError};
use crate::store::ProfileStore;
use crate::templates;

/// Notification seam for the recharge flow.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Deliver an operator notice for a newly created recharge.
    async fn send_recharge_notice(&self, record: &RechargeRecord) -> Result<(), ProviderError>;
}

/// Emails the operator inbox via the configured mail provider, resolving
/// the requester's display name from the profile store.
pub struct EmailNotificationSender {
    mailer: Arc<dyn Mailer>,
    profiles: Arc<dyn ProfileStore>,
    operator_email: String,
}

impl EmailNotificationSender {
    pub fn new(
        mailer: Arc<dyn Mailer>,
        profiles: Arc<dyn ProfileStore>,
        operator_email: impl Into<String>,
    ) -> Self {
        Self {
            mailer,
            profiles,
            operator_email: operator_email.into(),
        }
    }
}

#[async_trait]
impl NotificationSender for EmailNotificationSender {
    async fn send_recharge_notice(&self, record: &RechargeRecord) -> Result<(), ProviderError> {
        let (name, email) = match self.profiles.find_profile_by_id(&record.user_id).await {
            Ok(Some(profile)) => (
                profile.name.unwrap_or_else(|| record.user_id.clone()),
                profile.email,
            ),
            Ok(None) => (record.user_id.clone(), String::new()),
            Err(e) => {
                tracing::warn!(error = %e, user_id = %record.user_id,
                    "requester profile unavailable for notice");
                (record.user_id.clone(), String::new())
            }
        };

        let notice = templates::RechargeNotice::from_record(record, &name, &email);
        self.mailer
            .send_html(&self.operator_email, &notice.subject(), &notice.html(), &notice.text())
            .await
    }
}

/// Spawn a background delivery of the operator notice. Failures are logged
/// with the folio so the operator can reconcile from the request list.
pub fn spawn_recharge_notice(sender: Arc<dyn NotificationSender>, record: RechargeRecord) {
    tokio::spawn(async move {
        if let Err(e) = sender.send_recharge_notice(&record).await {
            tracing::error!(error = %e, folio = %record.folio,
                "recharge notice delivery failed");
        }
    });
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use std::sync::Mutex;

    use super::*;
    use crate::models::{NewRecharge, RechargeStatus};
    use crate::store::{memory::InMemoryStore, RechargeStore};
    use serde_json::Value;

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<(String, String, String)>>,
        fail: bool,
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
            if self.fail {
                return Err(ProviderError::Transport("connection reset".into()));
            }
            self.sent
                .lock()
                .unwrap()
                .push((to.into(), subject.into(), html.into()));
            Ok(())
        }

        async fn send_template(
            &self,
            _to: &str,
            _template_id: &str,
            _variables: Value,
        ) -> Result<(), ProviderError> {
            unimplemented!("not used by notices")
        }
    }

    fn record() -> RechargeRecord {
        RechargeRecord {
            id: "r-1".into(),
            user_id: "user-1".into(),
            origin_account: "ACC-001".into(),
            destination_card: "4111111111111111".into(),
            amount: 99.0,
            status: RechargeStatus::Pending,
            folio: "F-000001".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            profiles: None,
        }
    }

    #[tokio::test]
    async fn notice_goes_to_operator_with_folio_subject() {
        let mailer = Arc::new(RecordingMailer::default());
        let store = Arc::new(InMemoryStore::new());
        let sender = EmailNotificationSender::new(
            mailer.clone(),
            store.clone(),
            "ops@bluebank.example",
        );

        sender.send_recharge_notice(&record()).await.unwrap();

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let (to, subject, _) = &sent[0];
        assert_eq!(to, "ops@bluebank.example");
        assert_eq!(subject, "New Top Up Requested - Folio: F-000001");
    }

    #[tokio::test]
    async fn missing_profile_does_not_block_delivery() {
        let mailer = Arc::new(RecordingMailer::default());
        let store = Arc::new(InMemoryStore::new());
        let sender =
            EmailNotificationSender::new(mailer.clone(), store, "ops@bluebank.example");

        // No profile seeded for user-1; the notice falls back to the id.
        sender.send_recharge_notice(&record()).await.unwrap();

        let sent = mailer.sent.lock().unwrap();
        assert!(sent[0].2.contains("user-1"));
    }

    #[tokio::test]
    async fn spawn_failure_does_not_affect_caller() {
        let mailer = Arc::new(RecordingMailer {
            sent: Mutex::new(Vec::new()),
            fail: true,
        });
        let store = Arc::new(InMemoryStore::new());
        let stored = store
            .insert(NewRecharge {
                user_id: "user-1".into(),
                origin_account: "ACC-001".into(),
                destination_card: "4111111111111111".into(),
                amount: 10.0,
            })
            .await
            .unwrap();
        let sender: Arc<dyn NotificationSender> = Arc::new(EmailNotificationSender::new(
            mailer,
            store,
            "ops@bluebank.example",
        ));

        spawn_recharge_notice(sender, stored);
        // Let the spawned task run to completion; no panic propagates.
        tokio::task::yield_now().await;
    }
}
