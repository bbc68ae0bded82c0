// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Blue Bank International

//! Persistence seam over the managed relational backend.
//!
//! The backend itself is a capability service; this module only defines the
//! narrow interfaces the handlers consume, plus the two implementations:
//!
//! - [`rest::RestStore`] speaks the backend's REST dialect over HTTPS
//! - [`memory::InMemoryStore`] backs tests and local development
//!
//! Every trait method performs at most one logical read or write.

pub mod memory;
pub mod rest;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    Beneficiary, CreateBeneficiaryRequest, EventLogRecord, NewRecharge, Profile, RechargeRecord,
    RechargeStatus,
};

/// Store failure, reduced to what the API layer needs to know.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("backend error: {0}")]
    Backend(String),
}

/// Recharge request persistence.
#[async_trait]
pub trait RechargeStore: Send + Sync {
    /// Insert a new request with status `PENDING`. The store assigns `id`,
    /// `folio` and both timestamps.
    async fn insert(&self, new: NewRecharge) -> Result<RechargeRecord, StoreError>;

    /// All requests owned by `user_id`, newest first.
    async fn list_by_owner(&self, user_id: &str) -> Result<Vec<RechargeRecord>, StoreError>;

    /// All requests across all owners, each joined with the owner's profile,
    /// newest first.
    async fn list_all_joined(&self) -> Result<Vec<RechargeRecord>, StoreError>;

    /// Set the status of an existing request and refresh `updated_at`.
    /// Returns the updated record with the owner's profile joined.
    async fn update_status(
        &self,
        id: &str,
        status: RechargeStatus,
    ) -> Result<RechargeRecord, StoreError>;
}

/// Beneficiary persistence.
#[async_trait]
pub trait BeneficiaryStore: Send + Sync {
    async fn insert_beneficiary(
        &self,
        user_id: &str,
        request: CreateBeneficiaryRequest,
    ) -> Result<Beneficiary, StoreError>;

    /// Beneficiaries owned by `user_id`, newest first.
    async fn list_beneficiaries(&self, user_id: &str) -> Result<Vec<Beneficiary>, StoreError>;

    /// Delete a beneficiary, scoped to its owner.
    async fn delete_beneficiary(&self, user_id: &str, id: &str) -> Result<(), StoreError>;
}

/// Client event log persistence.
#[async_trait]
pub trait EventLogStore: Send + Sync {
    async fn insert_event(
        &self,
        user_id: &str,
        event_type: String,
        details: Option<serde_json::Value>,
        device_info: Option<serde_json::Value>,
        ip_address: Option<String>,
    ) -> Result<EventLogRecord, StoreError>;
}

/// User profile directory.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Look up a profile by logon id OR email (the account manager's
    /// `identifier` resolution).
    async fn find_profile(&self, identifier: &str) -> Result<Option<Profile>, StoreError>;

    async fn find_profile_by_logon_id(
        &self,
        logon_id: &str,
    ) -> Result<Option<Profile>, StoreError>;

    async fn find_profile_by_id(&self, user_id: &str) -> Result<Option<Profile>, StoreError>;

    async fn insert_profile(&self, profile: Profile) -> Result<Profile, StoreError>;
}
