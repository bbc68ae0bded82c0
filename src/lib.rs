// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Blue Bank International

//! Blue Bank Edge API
//!
//! Stateless HTTP handlers for a banking application: account login/sync,
//! the recharge (top-up) request workflow, beneficiary management, client
//! event logging, transactional email, OTP dispatch and a signed KYC proxy.
//! State lives in a managed relational backend; identities in a managed
//! auth provider.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Credential verification and the identity gateway
//! - `store` - Trait seams over the relational backend
//! - `providers` - Outbound clients (email, KYC)
//! - `notify` - Fire-and-forget operator notices

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod providers;
pub mod state;
pub mod store;
pub mod templates;

#[cfg(test)]
mod test_support;
