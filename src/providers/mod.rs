// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Blue Bank International

//! Outbound provider clients: transactional email and KYC onboarding.

pub mod mailersend;
pub mod sumsub;

pub use mailersend::{Mailer, MailerSendClient, ProviderError, UnconfiguredMailer};
pub use sumsub::{KycProvider, SumsubClient, UnconfiguredKyc};
