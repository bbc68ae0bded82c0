// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Blue Bank International

//! In-memory store used by tests and local development.
//!
//! Mechanically mirrors the managed backend: ids are UUIDs, folios are
//! sequential, timestamps are store-managed, listings come back newest
//! first. No validation happens here; the handlers own that.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{BeneficiaryStore, EventLogStore, ProfileStore, RechargeStore, StoreError};
use crate::models::{
    Beneficiary, CreateBeneficiaryRequest, EventLogRecord, NewRecharge, Profile, RechargeRecord,
    RechargeStatus,
};

#[derive(Default)]
struct Tables {
    recharges: HashMap<String, RechargeRecord>,
    beneficiaries: HashMap<String, Beneficiary>,
    events: Vec<EventLogRecord>,
    profiles: HashMap<String, Profile>,
    folio_seq: u64,
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables
            .write()
            .map_err(|_| StoreError::Backend("store lock poisoned".into()))
    }

    fn joined(tables: &Tables, mut record: RechargeRecord) -> RechargeRecord {
        record.profiles = tables
            .profiles
            .get(&record.user_id)
            .map(|profile| profile.requester());
        record
    }
}

#[async_trait]
impl RechargeStore for InMemoryStore {
    async fn insert(&self, new: NewRecharge) -> Result<RechargeRecord, StoreError> {
        let mut tables = self.lock()?;
        tables.folio_seq += 1;
        let now = Utc::now();
        let record = RechargeRecord {
            id: Uuid::new_v4().to_string(),
            user_id: new.user_id,
            origin_account: new.origin_account,
            destination_card: new.destination_card,
            amount: new.amount,
            status: RechargeStatus::Pending,
            folio: format!("F-{:06}", tables.folio_seq),
            created_at: now,
            updated_at: now,
            profiles: None,
        };
        tables.recharges.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn list_by_owner(&self, user_id: &str) -> Result<Vec<RechargeRecord>, StoreError> {
        let tables = self.lock()?;
        let mut records: Vec<RechargeRecord> = tables
            .recharges
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        // Folio is the tiebreaker for same-instant inserts.
        records.sort_by(|a, b| (&b.created_at, &b.folio).cmp(&(&a.created_at, &a.folio)));
        Ok(records)
    }

    async fn list_all_joined(&self) -> Result<Vec<RechargeRecord>, StoreError> {
        let tables = self.lock()?;
        let mut records: Vec<RechargeRecord> = tables
            .recharges
            .values()
            .cloned()
            .map(|r| Self::joined(&tables, r))
            .collect();
        records.sort_by(|a, b| (&b.created_at, &b.folio).cmp(&(&a.created_at, &a.folio)));
        Ok(records)
    }

    async fn update_status(
        &self,
        id: &str,
        status: RechargeStatus,
    ) -> Result<RechargeRecord, StoreError> {
        let mut tables = self.lock()?;
        let record = tables
            .recharges
            .get_mut(id)
            .ok_or(StoreError::NotFound)?;
        record.status = status;
        record.updated_at = Utc::now();
        let record = record.clone();
        Ok(Self::joined(&tables, record))
    }
}

#[async_trait]
impl BeneficiaryStore for InMemoryStore {
    async fn insert_beneficiary(
        &self,
        user_id: &str,
        request: CreateBeneficiaryRequest,
    ) -> Result<Beneficiary, StoreError> {
        let mut tables = self.lock()?;
        let beneficiary = Beneficiary {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: request.name.unwrap_or_default(),
            nickname: request.nickname,
            kind: request
                .kind
                .ok_or_else(|| StoreError::Backend("beneficiary type missing".into()))?,
            account_number: request.account_number.unwrap_or_default(),
            bank_name: request.bank_name,
            swift_code: request.swift_code,
            address: request.address,
            country: request.country,
            currency: request.currency,
            bank_address: request.bank_address,
            bank_code_type: request.bank_code_type,
            created_at: Utc::now(),
        };
        tables
            .beneficiaries
            .insert(beneficiary.id.clone(), beneficiary.clone());
        Ok(beneficiary)
    }

    async fn list_beneficiaries(&self, user_id: &str) -> Result<Vec<Beneficiary>, StoreError> {
        let tables = self.lock()?;
        let mut list: Vec<Beneficiary> = tables
            .beneficiaries
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| (&b.created_at, &b.id).cmp(&(&a.created_at, &a.id)));
        Ok(list)
    }

    async fn delete_beneficiary(&self, user_id: &str, id: &str) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        match tables.beneficiaries.get(id) {
            Some(b) if b.user_id == user_id => {
                tables.beneficiaries.remove(id);
                Ok(())
            }
            _ => Err(StoreError::NotFound),
        }
    }
}

#[async_trait]
impl EventLogStore for InMemoryStore {
    async fn insert_event(
        &self,
        user_id: &str,
        event_type: String,
        details: Option<serde_json::Value>,
        device_info: Option<serde_json::Value>,
        ip_address: Option<String>,
    ) -> Result<EventLogRecord, StoreError> {
        let mut tables = self.lock()?;
        let record = EventLogRecord {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            event_type,
            details,
            device_info,
            ip_address,
            created_at: Utc::now(),
        };
        tables.events.push(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl ProfileStore for InMemoryStore {
    async fn find_profile(&self, identifier: &str) -> Result<Option<Profile>, StoreError> {
        let tables = self.lock()?;
        Ok(tables
            .profiles
            .values()
            .find(|p| p.logon_id == identifier || p.email == identifier)
            .cloned())
    }

    async fn find_profile_by_logon_id(
        &self,
        logon_id: &str,
    ) -> Result<Option<Profile>, StoreError> {
        let tables = self.lock()?;
        Ok(tables
            .profiles
            .values()
            .find(|p| p.logon_id == logon_id)
            .cloned())
    }

    async fn find_profile_by_id(&self, user_id: &str) -> Result<Option<Profile>, StoreError> {
        let tables = self.lock()?;
        Ok(tables.profiles.get(user_id).cloned())
    }

    async fn insert_profile(&self, profile: Profile) -> Result<Profile, StoreError> {
        let mut tables = self.lock()?;
        tables.profiles.insert(profile.id.clone(), profile.clone());
        Ok(profile)
    }
}
