//! Builds validated purchases from user-entered drafts.

use ccard_domain::{Category, InstallmentPlan, Purchase};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::CoreError;

/// Raw purchase fields as entered by the user, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseDraft {
    pub name: String,
    pub value: f64,
    pub category: Category,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub current_installment: Option<u32>,
    pub total_installments: Option<u32>,
}

impl PurchaseDraft {
    pub fn new(name: impl Into<String>, value: f64, category: Category, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            value,
            category,
            description: None,
            date,
            current_installment: None,
            total_installments: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_installments(mut self, current: u32, total: u32) -> Self {
        self.current_installment = Some(current);
        self.total_installments = Some(total);
        self
    }
}

impl From<&Purchase> for PurchaseDraft {
    /// Pre-fills a draft with an existing purchase for editing.
    fn from(purchase: &Purchase) -> Self {
        let plan = purchase.installments();
        Self {
            name: purchase.name.clone(),
            value: purchase.value(),
            category: purchase.category(),
            description: purchase.description.clone(),
            date: purchase.date,
            current_installment: plan.map(|plan| plan.current()),
            total_installments: plan.map(|plan| plan.total()),
        }
    }
}

pub struct PurchaseService;

impl PurchaseService {
    /// Generates a fresh purchase identifier.
    pub fn new_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Validates a draft and assigns it a new id.
    pub fn create(draft: PurchaseDraft) -> Result<Purchase, CoreError> {
        Self::build(Self::new_id(), draft)
    }

    /// Validates a draft as a replacement for `existing`, keeping its id.
    pub fn revise(existing: &Purchase, draft: PurchaseDraft) -> Result<Purchase, CoreError> {
        Self::build(existing.id.clone(), draft)
    }

    pub fn build(id: impl Into<String>, draft: PurchaseDraft) -> Result<Purchase, CoreError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(CoreError::Validation("purchase id is required".into()));
        }
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("purchase name is required".into()));
        }
        if !draft.value.is_finite() || draft.value < 0.0 {
            return Err(CoreError::Validation(
                "purchase value must be zero or more".into(),
            ));
        }

        let installments = if draft.category.requires_installments() {
            Some(InstallmentPlan::new(
                draft.current_installment.unwrap_or(1),
                draft.total_installments.unwrap_or(1),
            )?)
        } else if draft.current_installment.is_some() || draft.total_installments.is_some() {
            return Err(CoreError::Validation(format!(
                "installments only apply to {}",
                Category::Installments
            )));
        } else {
            None
        };

        let description = draft
            .description
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        let purchase = Purchase::from_parts(
            id,
            name,
            draft.value,
            draft.category,
            draft.date,
            installments,
        )?;
        Ok(purchase.with_description(description))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 12).unwrap()
    }

    #[test]
    fn create_assigns_unique_ids() {
        let a = PurchaseService::create(PurchaseDraft::new("a", 1.0, Category::Food, today()))
            .unwrap();
        let b = PurchaseService::create(PurchaseDraft::new("b", 1.0, Category::Food, today()))
            .unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn installment_defaults_to_single_plan() {
        let draft = PurchaseDraft::new("Fridge", 900.0, Category::Installments, today());
        let purchase = PurchaseService::build("f", draft).unwrap();
        let plan = purchase.installments().unwrap();
        assert_eq!((plan.current(), plan.total()), (1, 1));
        assert_eq!(purchase.installment_value(), Some(900.0));
    }

    #[test]
    fn installment_value_is_derived_from_total() {
        let draft = PurchaseDraft::new("TV", 300.0, Category::Installments, today())
            .with_installments(1, 3);
        let purchase = PurchaseService::build("tv", draft).unwrap();
        assert_eq!(purchase.installment_value(), Some(100.0));
    }

    #[test]
    fn rejects_blank_names_and_negative_values() {
        let blank = PurchaseDraft::new("   ", 1.0, Category::Food, today());
        assert!(matches!(
            PurchaseService::build("x", blank),
            Err(CoreError::Validation(_))
        ));
        let negative = PurchaseDraft::new("x", -5.0, Category::Food, today());
        assert!(matches!(
            PurchaseService::build("x", negative),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn rejects_installments_outside_installment_category() {
        let draft =
            PurchaseDraft::new("Bus", 5.0, Category::Transport, today()).with_installments(1, 2);
        assert!(matches!(
            PurchaseService::build("x", draft),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn rejects_current_past_total() {
        let draft = PurchaseDraft::new("TV", 300.0, Category::Installments, today())
            .with_installments(4, 3);
        assert!(matches!(
            PurchaseService::build("x", draft),
            Err(CoreError::Domain(_))
        ));
    }

    #[test]
    fn blank_description_is_dropped_and_names_trimmed() {
        let draft = PurchaseDraft::new("  Cinema ", 30.0, Category::Leisure, today())
            .with_description("  ");
        let purchase = PurchaseService::build("c", draft).unwrap();
        assert_eq!(purchase.name, "Cinema");
        assert!(purchase.description.is_none());
    }

    #[test]
    fn revise_keeps_id_and_prefills_from_existing() {
        let original = PurchaseService::build(
            "keep-me",
            PurchaseDraft::new("Vet", 80.0, Category::Pet, today()).with_description("checkup"),
        )
        .unwrap();
        let mut draft = PurchaseDraft::from(&original);
        assert_eq!(draft.description.as_deref(), Some("checkup"));
        draft.value = 95.0;

        let revised = PurchaseService::revise(&original, draft).unwrap();
        assert_eq!(revised.id, "keep-me");
        assert_eq!(revised.value(), 95.0);
    }
}
