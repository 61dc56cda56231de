//! Wire representation of the persisted purchase document.
//!
//! The stored layout is `{ "purchases": [...] }` with camelCase purchase
//! fields, an ISO-8601 `date` and flattened installment fields.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{Category, DomainError, InstallmentPlan, Purchase};

/// Root of the persisted document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseDocument {
    #[serde(default)]
    pub purchases: Vec<Purchase>,
}

/// Flat, serde-facing shape of a [`Purchase`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    pub id: String,
    pub name: String,
    pub value: f64,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installment_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_installment: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_installments: Option<u32>,
}

impl TryFrom<PurchaseRecord> for Purchase {
    type Error = DomainError;

    fn try_from(record: PurchaseRecord) -> Result<Self, Self::Error> {
        let date = parse_purchase_date(&record.date)?;
        // Stray installment fields on other categories are dropped; the stored
        // installmentValue is always recomputed from value and total.
        let installments = if record.category.requires_installments() {
            let total = record
                .total_installments
                .ok_or_else(|| DomainError::MissingInstallments(record.category.to_string()))?;
            Some(InstallmentPlan::new(
                record.current_installment.unwrap_or(1),
                total,
            )?)
        } else {
            None
        };
        let description = record.description.filter(|text| !text.trim().is_empty());
        Ok(Purchase::from_parts(
            record.id,
            record.name,
            record.value,
            record.category,
            date,
            installments,
        )?
        .with_description(description))
    }
}

impl From<Purchase> for PurchaseRecord {
    fn from(purchase: Purchase) -> Self {
        let installment_value = purchase.installment_value();
        let plan = purchase.installments().copied();
        Self {
            value: purchase.value(),
            category: purchase.category(),
            date: format_purchase_date(purchase.date),
            installment_value,
            current_installment: plan.map(|plan| plan.current()),
            total_installments: plan.map(|plan| plan.total()),
            id: purchase.id,
            name: purchase.name,
            description: purchase.description,
        }
    }
}

/// Renders a purchase date the way the document stores it (UTC midnight).
pub fn format_purchase_date(date: NaiveDate) -> String {
    format!("{}T00:00:00.000Z", date.format("%Y-%m-%d"))
}

/// Parses an RFC 3339 date-time, a naive date-time or a plain `YYYY-MM-DD`.
///
/// For offset-carrying timestamps the calendar date as written is kept, so
/// `2024-03-11T23:30:00-03:00` is the 11th.
pub fn parse_purchase_date(raw: &str) -> Result<NaiveDate, DomainError> {
    let value = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.date_naive());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.date());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidDate(value.to_string()))
}
