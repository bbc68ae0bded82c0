// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Blue Bank International

//! REST client for the managed relational backend.
//!
//! The backend exposes its tables over a PostgREST-style dialect:
//! `?column=eq.value` filters, `order=created_at.desc`, embedded joins via
//! `select=*,profiles:user_id(name,email)` and `Prefer:
//! return=representation` to get mutated rows back. Ids, folios and
//! timestamps are assigned by the backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::{json, Value};

use super::{BeneficiaryStore, EventLogStore, ProfileStore, RechargeStore, StoreError};
use crate::config::{BACKEND_SERVICE_KEY_ENV, BACKEND_URL_ENV};
use crate::models::{
    Beneficiary, CreateBeneficiaryRequest, EventLogRecord, NewRecharge, Profile, RechargeRecord,
    RechargeStatus,
};

const RECHARGE_JOIN_SELECT: &str = "*,profiles:user_id(name,email)";

pub struct RestStore {
    base_url: String,
    service_key: String,
    http: Client,
}

impl RestStore {
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
            http,
        }
    }

    pub fn from_env() -> Result<Self, StoreError> {
        let base_url = std::env::var(BACKEND_URL_ENV)
            .map_err(|_| StoreError::Backend(format!("{BACKEND_URL_ENV} is not set")))?;
        let service_key = std::env::var(BACKEND_SERVICE_KEY_ENV)
            .map_err(|_| StoreError::Backend(format!("{BACKEND_SERVICE_KEY_ENV} is not set")))?;
        Ok(Self::new(base_url, service_key))
    }

    fn table(&self, name: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, name)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    /// Run a request that is expected to return a JSON array of rows.
    async fn rows(request: RequestBuilder) -> Result<Vec<Value>, StoreError> {
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Backend(format!("request failed: {e}")))?;
        Self::decode_rows(response).await
    }

    async fn decode_rows(response: Response) -> Result<Vec<Value>, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Backend(format!(
                "backend returned {status}: {body}"
            )));
        }
        response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| StoreError::Backend(format!("invalid backend response: {e}")))
    }

    fn parse_recharge(row: Value) -> Result<RechargeRecord, StoreError> {
        serde_json::from_value(normalize_profile_join(row))
            .map_err(|e| StoreError::Backend(format!("malformed recharge row: {e}")))
    }

    fn parse<T: serde::de::DeserializeOwned>(row: Value) -> Result<T, StoreError> {
        serde_json::from_value(row)
            .map_err(|e| StoreError::Backend(format!("malformed backend row: {e}")))
    }
}

/// The embedded owner join is declared one-to-one; if the backend hands back
/// an array anyway, the first element wins.
fn normalize_profile_join(mut row: Value) -> Value {
    if let Some(profiles) = row.get_mut("profiles") {
        if let Value::Array(items) = profiles {
            let first = items.drain(..).next().unwrap_or(Value::Null);
            *profiles = first;
        }
        if profiles.is_null() {
            if let Some(obj) = row.as_object_mut() {
                obj.remove("profiles");
            }
        }
    }
    row
}

#[async_trait]
impl RechargeStore for RestStore {
    async fn insert(&self, new: NewRecharge) -> Result<RechargeRecord, StoreError> {
        let request = self
            .authed(self.http.post(self.table("recharge_requests")))
            .header("Prefer", "return=representation")
            .json(&json!({
                "user_id": new.user_id,
                "origin_account": new.origin_account,
                "destination_card": new.destination_card,
                "amount": new.amount,
                "status": RechargeStatus::Pending,
            }));
        let mut rows = Self::rows(request).await?;
        if rows.is_empty() {
            return Err(StoreError::Backend("insert returned no row".into()));
        }
        Self::parse_recharge(rows.remove(0))
    }

    async fn list_by_owner(&self, user_id: &str) -> Result<Vec<RechargeRecord>, StoreError> {
        let request = self
            .authed(self.http.get(self.table("recharge_requests")))
            .query(&[
                ("select", "*"),
                ("user_id", &format!("eq.{user_id}")),
                ("order", "created_at.desc"),
            ]);
        Self::rows(request)
            .await?
            .into_iter()
            .map(Self::parse_recharge)
            .collect()
    }

    async fn list_all_joined(&self) -> Result<Vec<RechargeRecord>, StoreError> {
        let request = self
            .authed(self.http.get(self.table("recharge_requests")))
            .query(&[
                ("select", RECHARGE_JOIN_SELECT),
                ("order", "created_at.desc"),
            ]);
        Self::rows(request)
            .await?
            .into_iter()
            .map(Self::parse_recharge)
            .collect()
    }

    async fn update_status(
        &self,
        id: &str,
        status: RechargeStatus,
    ) -> Result<RechargeRecord, StoreError> {
        let request = self
            .authed(self.http.patch(self.table("recharge_requests")))
            .header("Prefer", "return=representation")
            .query(&[
                ("id", format!("eq.{id}").as_str()),
                ("select", RECHARGE_JOIN_SELECT),
            ])
            .json(&json!({
                "status": status,
                "updated_at": chrono::Utc::now(),
            }));
        let mut rows = Self::rows(request).await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound);
        }
        Self::parse_recharge(rows.remove(0))
    }
}

#[async_trait]
impl BeneficiaryStore for RestStore {
    async fn insert_beneficiary(
        &self,
        user_id: &str,
        request: CreateBeneficiaryRequest,
    ) -> Result<Beneficiary, StoreError> {
        let body = json!({
            "user_id": user_id,
            "name": request.name,
            "nickname": request.nickname,
            "type": request.kind,
            "account_number": request.account_number,
            "bank_name": request.bank_name,
            "swift_code": request.swift_code,
            "address": request.address,
            "country": request.country,
            "currency": request.currency,
            "bank_address": request.bank_address,
            "bank_code_type": request.bank_code_type,
        });
        let request = self
            .authed(self.http.post(self.table("beneficiaries")))
            .header("Prefer", "return=representation")
            .json(&body);
        let mut rows = Self::rows(request).await?;
        if rows.is_empty() {
            return Err(StoreError::Backend("insert returned no row".into()));
        }
        Self::parse(rows.remove(0))
    }

    async fn list_beneficiaries(&self, user_id: &str) -> Result<Vec<Beneficiary>, StoreError> {
        let request = self
            .authed(self.http.get(self.table("beneficiaries")))
            .query(&[
                ("select", "*"),
                ("user_id", &format!("eq.{user_id}")),
                ("order", "created_at.desc"),
            ]);
        Self::rows(request)
            .await?
            .into_iter()
            .map(Self::parse)
            .collect()
    }

    async fn delete_beneficiary(&self, user_id: &str, id: &str) -> Result<(), StoreError> {
        let request = self
            .authed(self.http.delete(self.table("beneficiaries")))
            .header("Prefer", "return=representation")
            .query(&[
                ("id", format!("eq.{id}").as_str()),
                ("user_id", format!("eq.{user_id}").as_str()),
            ]);
        let rows = Self::rows(request).await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl EventLogStore for RestStore {
    async fn insert_event(
        &self,
        user_id: &str,
        event_type: String,
        details: Option<Value>,
        device_info: Option<Value>,
        ip_address: Option<String>,
    ) -> Result<EventLogRecord, StoreError> {
        let request = self
            .authed(self.http.post(self.table("user_logs")))
            .header("Prefer", "return=representation")
            .json(&json!({
                "user_id": user_id,
                "event_type": event_type,
                "details": details,
                "device_info": device_info,
                "ip_address": ip_address,
            }));
        let mut rows = Self::rows(request).await?;
        if rows.is_empty() {
            return Err(StoreError::Backend("insert returned no row".into()));
        }
        Self::parse(rows.remove(0))
    }
}

#[async_trait]
impl ProfileStore for RestStore {
    async fn find_profile(&self, identifier: &str) -> Result<Option<Profile>, StoreError> {
        let request = self
            .authed(self.http.get(self.table("profiles")))
            .query(&[
                ("select", "*"),
                (
                    "or",
                    &format!("(logon_id.eq.{identifier},email.eq.{identifier})"),
                ),
                ("limit", "1"),
            ]);
        let mut rows = Self::rows(request).await?;
        if rows.is_empty() {
            return Ok(None);
        }
        Self::parse(rows.remove(0)).map(Some)
    }

    async fn find_profile_by_logon_id(
        &self,
        logon_id: &str,
    ) -> Result<Option<Profile>, StoreError> {
        let request = self
            .authed(self.http.get(self.table("profiles")))
            .query(&[
                ("select", "*"),
                ("logon_id", &format!("eq.{logon_id}")),
                ("limit", "1"),
            ]);
        let mut rows = Self::rows(request).await?;
        if rows.is_empty() {
            return Ok(None);
        }
        Self::parse(rows.remove(0)).map(Some)
    }

    async fn find_profile_by_id(&self, user_id: &str) -> Result<Option<Profile>, StoreError> {
        let request = self
            .authed(self.http.get(self.table("profiles")))
            .query(&[
                ("select", "*"),
                ("id", &format!("eq.{user_id}")),
                ("limit", "1"),
            ]);
        let mut rows = Self::rows(request).await?;
        if rows.is_empty() {
            return Ok(None);
        }
        Self::parse(rows.remove(0)).map(Some)
    }

    async fn insert_profile(&self, profile: Profile) -> Result<Profile, StoreError> {
        let request = self
            .authed(self.http.post(self.table("profiles")))
            .header("Prefer", "return=representation")
            .json(&json!({
                "id": profile.id,
                "email": profile.email,
                "logon_id": profile.logon_id,
                "name": profile.name,
                "phone_number": profile.phone_number,
            }));
        let mut rows = Self::rows(request).await?;
        if rows.is_empty() {
            return Err(StoreError::Backend("insert returned no row".into()));
        }
        Self::parse(rows.remove(0))
    }
}
