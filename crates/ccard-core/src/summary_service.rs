//! Per-category reductions over purchase lists.

use std::{cmp::Ordering, collections::BTreeMap};

use ccard_domain::{Category, Purchase, Valued};

/// Sum of purchase values for every category in [`Category::ALL`].
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotals {
    totals: BTreeMap<Category, f64>,
}

impl CategoryTotals {
    fn zeroed() -> Self {
        Self {
            totals: Category::ALL.into_iter().map(|c| (c, 0.0)).collect(),
        }
    }

    pub fn get(&self, category: Category) -> f64 {
        self.totals.get(&category).copied().unwrap_or(0.0)
    }

    /// Every category with its total, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.totals.iter().map(|(category, total)| (*category, *total))
    }

    pub fn sum(&self) -> f64 {
        self.totals.values().sum()
    }
}

/// A category's slice of a statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: Category,
    pub total: f64,
    /// Percentage of the grand total, 0..=100.
    pub share: f64,
}

/// Everything needed to render a statement summary.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementSummary {
    pub totals: CategoryTotals,
    pub grand_total: f64,
    pub ranked: Vec<CategoryShare>,
}

pub struct SummaryService;

impl SummaryService {
    pub fn total_by_category(purchases: &[Purchase]) -> CategoryTotals {
        let mut totals = CategoryTotals::zeroed();
        for purchase in purchases {
            *totals.totals.entry(purchase.category()).or_insert(0.0) += purchase.value();
        }
        totals
    }

    /// Partitions purchases per category, preserving their relative order.
    pub fn group_by_category(purchases: &[Purchase]) -> BTreeMap<Category, Vec<&Purchase>> {
        let mut groups: BTreeMap<Category, Vec<&Purchase>> =
            Category::ALL.into_iter().map(|c| (c, Vec::new())).collect();
        for purchase in purchases {
            groups.entry(purchase.category()).or_default().push(purchase);
        }
        groups
    }

    pub fn grand_total<T: Valued>(items: &[T]) -> f64 {
        items.iter().map(Valued::value).sum()
    }

    /// Each category's percentage of the grand total; all zero when nothing was spent.
    pub fn percentage_shares(totals: &CategoryTotals) -> BTreeMap<Category, f64> {
        let grand_total = totals.sum();
        totals
            .iter()
            .map(|(category, total)| {
                let share = if grand_total > 0.0 {
                    total / grand_total * 100.0
                } else {
                    0.0
                };
                (category, share)
            })
            .collect()
    }

    /// Non-empty categories sorted by total, largest first.
    pub fn ranked(totals: &CategoryTotals) -> Vec<CategoryShare> {
        let shares = Self::percentage_shares(totals);
        let mut ranked: Vec<CategoryShare> = totals
            .iter()
            .filter(|(_, total)| *total > 0.0)
            .map(|(category, total)| CategoryShare {
                category,
                total,
                share: shares.get(&category).copied().unwrap_or(0.0),
            })
            .collect();
        ranked.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));
        ranked
    }

    pub fn summarize(purchases: &[Purchase]) -> StatementSummary {
        let totals = Self::total_by_category(purchases);
        let ranked = Self::ranked(&totals);
        StatementSummary {
            grand_total: Self::grand_total(purchases),
            totals,
            ranked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccard_domain::InstallmentPlan;
    use chrono::NaiveDate;

    fn purchase(id: &str, value: f64, category: Category) -> Purchase {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        if category.requires_installments() {
            Purchase::installment(id, id, value, date, InstallmentPlan::new(1, 2).unwrap())
                .unwrap()
        } else {
            Purchase::new(id, id, value, category, date).unwrap()
        }
    }

    fn sample() -> Vec<Purchase> {
        vec![
            purchase("bus", 4.5, Category::Transport),
            purchase("lunch", 30.0, Category::Food),
            purchase("dinner", 45.5, Category::Food),
            purchase("tv", 120.0, Category::Installments),
        ]
    }

    #[test]
    fn totals_report_every_category() {
        let totals = SummaryService::total_by_category(&sample());
        assert_eq!(totals.iter().count(), Category::ALL.len());
        assert_eq!(totals.get(Category::Food), 75.5);
        assert_eq!(totals.get(Category::Pet), 0.0);
        assert_eq!(totals.get(Category::Leisure), 0.0);
    }

    #[test]
    fn category_totals_sum_to_grand_total() {
        let purchases = sample();
        let totals = SummaryService::total_by_category(&purchases);
        let grand = SummaryService::grand_total(&purchases);
        assert!((totals.sum() - grand).abs() < 1e-9);
        assert_eq!(grand, 200.0);
    }

    #[test]
    fn groups_keep_relative_order() {
        let purchases = sample();
        let groups = SummaryService::group_by_category(&purchases);
        let food: Vec<_> = groups[&Category::Food].iter().map(|p| p.id.as_str()).collect();
        assert_eq!(food, vec!["lunch", "dinner"]);
        assert!(groups[&Category::Pet].is_empty());
        assert_eq!(groups.len(), Category::ALL.len());
    }

    #[test]
    fn shares_sum_to_one_hundred() {
        let totals = SummaryService::total_by_category(&sample());
        let shares = SummaryService::percentage_shares(&totals);
        let sum: f64 = shares.values().sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert!((shares[&Category::Installments] - 60.0).abs() < 1e-9);
    }

    #[test]
    fn shares_are_zero_without_spending() {
        let totals = SummaryService::total_by_category(&[]);
        let shares = SummaryService::percentage_shares(&totals);
        assert!(shares.values().all(|share| *share == 0.0));

        let zero = vec![purchase("free", 0.0, Category::Leisure)];
        let shares = SummaryService::percentage_shares(&SummaryService::total_by_category(&zero));
        assert!(shares.values().all(|share| *share == 0.0));
    }

    #[test]
    fn ranked_drops_empty_categories_and_sorts_descending() {
        let summary = SummaryService::summarize(&sample());
        let order: Vec<_> = summary.ranked.iter().map(|s| s.category).collect();
        assert_eq!(
            order,
            vec![Category::Installments, Category::Food, Category::Transport]
        );
        assert_eq!(summary.grand_total, 200.0);
    }
}
