// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Blue Bank International

//! # Authentication Module
//!
//! Credential verification for the Blue Bank edge API.
//!
//! ## Auth Flow
//!
//! 1. The frontend authenticates against the managed identity provider
//! 2. The frontend sends `Authorization: Bearer <access token>`
//! 3. This service forwards the token to the provider's user endpoint; the
//!    provider owns the credential format and its validation
//! 4. Admin membership is a separate privileged-table lookup keyed by the
//!    verified user id
//!
//! ## Security
//!
//! - Every core endpoint requires authentication; absence of the header is
//!   rejected before the request body is read
//! - Admin-gated actions always fail closed: a membership lookup error is a
//!   denial, never a degraded view

pub mod error;
pub mod extractor;
pub mod gateway;

pub use error::AuthError;
pub use extractor::Auth;
pub use gateway::{GatewayError, HttpIdentityGateway, Identity, IdentityGateway, SignInSession};
