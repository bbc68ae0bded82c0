// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Blue Bank International

//! Shared application state.

use std::sync::Arc;

use crate::auth::IdentityGateway;
use crate::notify::NotificationSender;
use crate::providers::{KycProvider, Mailer};
use crate::store::{BeneficiaryStore, EventLogStore, ProfileStore, RechargeStore};

/// Handler-facing view of every collaborator. Cloned per request by axum;
/// all members are shared behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn IdentityGateway>,
    pub recharges: Arc<dyn RechargeStore>,
    pub beneficiaries: Arc<dyn BeneficiaryStore>,
    pub events: Arc<dyn EventLogStore>,
    pub profiles: Arc<dyn ProfileStore>,
    pub notifier: Arc<dyn NotificationSender>,
    pub mailer: Arc<dyn Mailer>,
    pub kyc: Arc<dyn KycProvider>,
}
