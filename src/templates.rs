// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Blue Bank International

//! Inline HTML templates for operator-facing notices.

use crate::models::RechargeRecord;

/// Subject line for a new recharge notice.
pub fn recharge_subject(folio: &str) -> String {
    format!("New Top Up Requested - Folio: {folio}")
}

/// Field set rendered into the recharge notice. Built either from a stored
/// record or from a raw template-request payload.
pub struct RechargeNotice {
    pub folio: String,
    pub requester_name: String,
    pub requester_email: String,
    pub amount: f64,
    pub origin_account: String,
    pub destination_card: String,
    pub date: String,
}

impl RechargeNotice {
    pub fn from_record(record: &RechargeRecord, name: &str, email: &str) -> Self {
        Self {
            folio: record.folio.clone(),
            requester_name: name.to_string(),
            requester_email: email.to_string(),
            amount: record.amount,
            origin_account: record.origin_account.clone(),
            destination_card: record.destination_card.clone(),
            date: record.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        }
    }

    pub fn subject(&self) -> String {
        recharge_subject(&self.folio)
    }

    pub fn html(&self) -> String {
        format!(
            concat!(
                "<html><body style=\"font-family: Arial, sans-serif; color: #1a1a2e;\">",
                "<h2>New Top Up Request</h2>",
                "<p>A new account top up has been requested and is awaiting review.</p>",
                "<table cellpadding=\"6\" style=\"border-collapse: collapse;\">",
                "<tr><td><strong>Folio</strong></td><td>{folio}</td></tr>",
                "<tr><td><strong>Requested by</strong></td><td>{name} ({email})</td></tr>",
                "<tr><td><strong>Amount</strong></td><td>${amount:.2}</td></tr>",
                "<tr><td><strong>Origin account</strong></td><td>{origin}</td></tr>",
                "<tr><td><strong>Destination card</strong></td><td>{destination}</td></tr>",
                "<tr><td><strong>Date</strong></td><td>{date}</td></tr>",
                "</table>",
                "</body></html>",
            ),
            folio = self.folio,
            name = self.requester_name,
            email = self.requester_email,
            amount = self.amount,
            origin = self.origin_account,
            destination = self.destination_card,
            date = self.date,
        )
    }

    pub fn text(&self) -> String {
        format!(
            "New top up requested.\n\
             Folio: {}\n\
             Requested by: {} ({})\n\
             Amount: ${:.2}\n\
             Origin account: {}\n\
             Destination card: {}\n\
             Date: {}\n",
            self.folio,
            self.requester_name,
            self.requester_email,
            self.amount,
            self.origin_account,
            self.destination_card,
            self.date,
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::RechargeStatus;

    fn record() -> RechargeRecord {
        RechargeRecord {
            id: "r-1".into(),
            user_id: "user-1".into(),
            origin_account: "ACC-001".into(),
            destination_card: "4111111111111111".into(),
            amount: 150.5,
            status: RechargeStatus::Pending,
            folio: "F-000042".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            profiles: None,
        }
    }

    #[test]
    fn subject_carries_the_folio() {
        assert_eq!(
            recharge_subject("F-000042"),
            "New Top Up Requested - Folio: F-000042"
        );
    }

    #[test]
    fn html_notice_includes_folio_amount_and_accounts() {
        let notice = RechargeNotice::from_record(&record(), "Ada Lovelace", "ada@example.com");
        let html = notice.html();
        assert!(html.contains("F-000042"));
        assert!(html.contains("Ada Lovelace"));
        assert!(html.contains("ada@example.com"));
        assert!(html.contains("$150.50"));
        assert!(html.contains("ACC-001"));
        assert!(html.contains("4111111111111111"));
    }

    #[test]
    fn text_notice_formats_amount_with_two_decimals() {
        let notice = RechargeNotice::from_record(&record(), "Ada Lovelace", "ada@example.com");
        assert!(notice.text().contains("Amount: $150.50"));
    }
}
