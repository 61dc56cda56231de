//! The closed set of purchase categories.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Categorises card purchases for statement summaries.
///
/// The set is closed: aggregation always reports every variant, in
/// declaration order, even when a category has no purchases.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    #[serde(alias = "Transporte")]
    Transport,
    #[serde(alias = "Alimentação")]
    Food,
    #[serde(alias = "Diversão")]
    Leisure,
    #[serde(alias = "PET")]
    Pet,
    #[serde(rename = "Installment Purchases", alias = "Compras Parceladas")]
    Installments,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Transport,
        Category::Food,
        Category::Leisure,
        Category::Pet,
        Category::Installments,
    ];

    /// Label used on the wire and in English output.
    pub fn label(self) -> &'static str {
        match self {
            Category::Transport => "Transport",
            Category::Food => "Food",
            Category::Leisure => "Leisure",
            Category::Pet => "Pet",
            Category::Installments => "Installment Purchases",
        }
    }

    /// Short lowercase keyword accepted by the CLI.
    pub fn keyword(self) -> &'static str {
        match self {
            Category::Transport => "transport",
            Category::Food => "food",
            Category::Leisure => "leisure",
            Category::Pet => "pet",
            Category::Installments => "installments",
        }
    }

    /// Returns `true` when purchases in this category carry an installment plan.
    pub fn requires_installments(self) -> bool {
        matches!(self, Category::Installments)
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Category::Transport => &["transporte"],
            Category::Food => &["alimentação", "alimentacao"],
            Category::Leisure => &["diversão", "diversao"],
            Category::Pet => &[],
            Category::Installments => &[
                "installment purchases",
                "installment",
                "compras parceladas",
                "parcelado",
            ],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| {
                category.keyword() == needle
                    || category.label().to_lowercase() == needle
                    || category.aliases().contains(&needle.as_str())
            })
            .ok_or_else(|| DomainError::UnknownCategory(value.trim().to_string()))
    }
}
