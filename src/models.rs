// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Blue Bank International

//! # API Data Models
//!
//! Request and response data structures used by the REST API. All types
//! derive `Serialize`/`Deserialize` and `ToSchema` for JSON handling and
//! OpenAPI documentation.
//!
//! ## Model Categories
//!
//! - **Recharge**: top-up requests tracked through a PENDING → terminal
//!   status lifecycle, identified by a store-assigned folio
//! - **Profiles**: user directory rows maintained by the account manager
//! - **Beneficiaries**: saved transfer destinations
//! - **Event logs**: per-user client event records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Recharge Models
// =============================================================================

/// Lifecycle status of a recharge request.
///
/// A request starts `PENDING` and is moved by an admin to exactly one of the
/// terminal statuses. The store does not guard against a second admin
/// overwrite; last write wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RechargeStatus {
    Pending,
    Processed,
    Rejected,
}

impl RechargeStatus {
    /// Statuses an admin may transition a request to.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RechargeStatus::Processed | RechargeStatus::Rejected)
    }
}

impl std::fmt::Display for RechargeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RechargeStatus::Pending => write!(f, "PENDING"),
            RechargeStatus::Processed => write!(f, "PROCESSED"),
            RechargeStatus::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// A stored recharge (top-up) request.
///
/// `id`, `folio` and both timestamps are assigned by the store. `user_id`
/// always equals the authenticated creator; it is never taken from the
/// request payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RechargeRecord {
    /// Store-assigned unique identifier.
    pub id: String,
    /// Owner (authenticated creator).
    pub user_id: String,
    /// Masked origin account reference (last 4).
    pub origin_account: String,
    /// Masked destination card reference (last 4).
    pub destination_card: String,
    /// Requested amount, currency unit implicit. Positive; never mutated.
    pub amount: f64,
    /// Lifecycle status.
    pub status: RechargeStatus,
    /// Human-facing sequential reference, assigned once at insert.
    pub folio: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Owning user's profile, present on admin listings and status updates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiles: Option<RequesterProfile>,
}

/// Read-only projection of the owning user, joined for display and
/// notification purposes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RequesterProfile {
    pub name: String,
    pub email: String,
}

/// Fields accepted when creating a recharge request. The owner and the
/// initial `PENDING` status are supplied by the caller's identity and the
/// store, never by the wire payload.
#[derive(Debug, Clone)]
pub struct NewRecharge {
    pub user_id: String,
    pub origin_account: String,
    pub destination_card: String,
    pub amount: f64,
}

// =============================================================================
// Profile Models
// =============================================================================

/// A user directory row, keyed by the identity provider's user id.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Profile {
    pub id: String,
    pub created_at: DateTime<Utc>,
    /// Bank-issued logon identifier, unique across profiles.
    pub logon_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl Profile {
    pub fn requester(&self) -> RequesterProfile {
        RequesterProfile {
            name: self.name.clone().unwrap_or_default(),
            email: self.email.clone(),
        }
    }
}

// =============================================================================
// Beneficiary Models
// =============================================================================

/// Transfer rail for a beneficiary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum BeneficiaryType {
    #[serde(rename = "bluePay")]
    BluePay,
    #[serde(rename = "wireTransfer")]
    WireTransfer,
}

/// A saved transfer destination owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Beneficiary {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(rename = "type")]
    pub kind: BeneficiaryType,
    pub account_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swift_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_code_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request body to create a beneficiary.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBeneficiaryRequest {
    pub name: Option<String>,
    pub nickname: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<BeneficiaryType>,
    pub account_number: Option<String>,
    pub bank_name: Option<String>,
    pub swift_code: Option<String>,
    pub address: Option<String>,
    pub country: Option<String>,
    pub currency: Option<String>,
    pub bank_address: Option<String>,
    pub bank_code_type: Option<String>,
}

// =============================================================================
// Event Log Models
// =============================================================================

/// A stored client event record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct EventLogRecord {
    pub id: String,
    pub user_id: String,
    pub event_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_info: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /v1/events`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LogEventRequest {
    pub event_type: Option<String>,
    pub details: Option<serde_json::Value>,
    pub device_info: Option<serde_json::Value>,
}
