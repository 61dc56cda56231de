//! Domain model for card purchases and installment plans.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{common::*, Category, DomainError, PurchaseRecord, StatementPeriod};

/// A single card purchase.
///
/// The installment plan is present if and only if the category is
/// [`Category::Installments`]; every constructor and mutator keeps it that way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PurchaseRecord", into = "PurchaseRecord")]
pub struct Purchase {
    pub id: String,
    pub name: String,
    value: f64,
    category: Category,
    pub description: Option<String>,
    pub date: NaiveDate,
    installments: Option<InstallmentPlan>,
}

impl Purchase {
    /// Creates a purchase in any category that does not take installments.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        value: f64,
        category: Category,
        date: NaiveDate,
    ) -> Result<Self, DomainError> {
        if category.requires_installments() {
            return Err(DomainError::MissingInstallments(category.to_string()));
        }
        Ok(Self {
            id: id.into(),
            name: name.into(),
            value: checked_value(value)?,
            category,
            description: None,
            date,
            installments: None,
        })
    }

    /// Creates an [`Category::Installments`] purchase with its plan.
    pub fn installment(
        id: impl Into<String>,
        name: impl Into<String>,
        value: f64,
        date: NaiveDate,
        plan: InstallmentPlan,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            id: id.into(),
            name: name.into(),
            value: checked_value(value)?,
            category: Category::Installments,
            description: None,
            date,
            installments: Some(plan),
        })
    }

    /// Assembles a purchase from loose parts, validating the installment invariant.
    pub fn from_parts(
        id: impl Into<String>,
        name: impl Into<String>,
        value: f64,
        category: Category,
        date: NaiveDate,
        installments: Option<InstallmentPlan>,
    ) -> Result<Self, DomainError> {
        match (category.requires_installments(), installments) {
            (true, Some(plan)) => Self::installment(id, name, value, date, plan),
            (true, None) => Err(DomainError::MissingInstallments(category.to_string())),
            (false, None) => Self::new(id, name, value, category, date),
            (false, Some(_)) => Err(DomainError::UnexpectedInstallments(category.to_string())),
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn installments(&self) -> Option<&InstallmentPlan> {
        self.installments.as_ref()
    }

    pub fn set_value(&mut self, value: f64) -> Result<(), DomainError> {
        self.value = checked_value(value)?;
        Ok(())
    }

    /// Moves the purchase to another category together with the plan it requires.
    pub fn set_category(
        &mut self,
        category: Category,
        installments: Option<InstallmentPlan>,
    ) -> Result<(), DomainError> {
        match (category.requires_installments(), installments.is_some()) {
            (true, false) => Err(DomainError::MissingInstallments(category.to_string())),
            (false, true) => Err(DomainError::UnexpectedInstallments(category.to_string())),
            _ => {
                self.category = category;
                self.installments = installments;
                Ok(())
            }
        }
    }

    /// Value billed per installment, derived from the total value.
    pub fn installment_value(&self) -> Option<f64> {
        self.installments
            .as_ref()
            .map(|plan| plan.per_installment(self.value))
    }

    /// Statement this purchase is billed on.
    pub fn statement_period(&self) -> StatementPeriod {
        StatementPeriod::containing(self.date)
    }
}

impl Identifiable for Purchase {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Valued for Purchase {
    fn value(&self) -> f64 {
        self.value
    }
}

/// Position of a purchase within its installment sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallmentPlan {
    current: u32,
    total: u32,
}

impl InstallmentPlan {
    pub fn new(current: u32, total: u32) -> Result<Self, DomainError> {
        if current == 0 || total == 0 {
            return Err(DomainError::InvalidInstallments(
                "installment numbers start at 1".into(),
            ));
        }
        if current > total {
            return Err(DomainError::InvalidInstallments(format!(
                "current installment {current} exceeds total {total}"
            )));
        }
        Ok(Self { current, total })
    }

    /// A single-installment plan.
    pub fn single() -> Self {
        Self {
            current: 1,
            total: 1,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Installments still to be billed, counting the current one.
    pub fn remaining(&self) -> u32 {
        self.total - self.current + 1
    }

    pub fn per_installment(&self, value: f64) -> f64 {
        value / self.total as f64
    }
}

impl std::fmt::Display for InstallmentPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.current, self.total)
    }
}

fn checked_value(value: f64) -> Result<f64, DomainError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(DomainError::InvalidValue(value))
    }
}
