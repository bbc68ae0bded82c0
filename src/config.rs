// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Blue Bank International

//! # Runtime Configuration Constants
//!
//! Environment variable names and defaults used throughout the application.
//! Configuration is loaded from the environment at startup; each outbound
//! client exposes a `from_env()` constructor reading the variables below.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `BACKEND_URL` | Base URL of the managed relational/auth backend | Required |
//! | `BACKEND_ANON_KEY` | Public API key, sent alongside user credentials | Required |
//! | `BACKEND_SERVICE_KEY` | Privileged API key for server-side table access | Required |
//! | `MAILER_API_URL` | Email provider endpoint | MailerSend v1 |
//! | `MAILER_API_KEY` | Email provider API key | Required for delivery |
//! | `MAILER_SENDER` | From address for outbound mail | Required for delivery |
//! | `OPERATOR_EMAIL` | Fixed recipient of recharge notices | Required for notices |
//! | `KYC_APP_TOKEN` | KYC provider application token | Required for KYC |
//! | `KYC_SECRET_KEY` | KYC provider HMAC secret | Required for KYC |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

/// Base URL of the managed backend (identity provider + relational REST).
pub const BACKEND_URL_ENV: &str = "BACKEND_URL";

/// Public (anon) API key; accompanies end-user bearer credentials.
pub const BACKEND_ANON_KEY_ENV: &str = "BACKEND_ANON_KEY";

/// Privileged service key for server-side table access and admin auth ops.
pub const BACKEND_SERVICE_KEY_ENV: &str = "BACKEND_SERVICE_KEY";

/// Email provider endpoint.
pub const MAILER_API_URL_ENV: &str = "MAILER_API_URL";

/// Email provider API key.
pub const MAILER_API_KEY_ENV: &str = "MAILER_API_KEY";

/// From address for outbound mail.
pub const MAILER_SENDER_ENV: &str = "MAILER_SENDER";

/// Fixed operator address receiving recharge notices.
pub const OPERATOR_EMAIL_ENV: &str = "OPERATOR_EMAIL";

/// KYC provider application token.
pub const KYC_APP_TOKEN_ENV: &str = "KYC_APP_TOKEN";

/// KYC provider HMAC signing secret.
pub const KYC_SECRET_KEY_ENV: &str = "KYC_SECRET_KEY";
