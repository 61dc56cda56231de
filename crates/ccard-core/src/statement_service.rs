//! Statement assignment over purchase lists.

use ccard_domain::{MonthlyStatement, Purchase, StatementPeriod};

/// The selected statement together with the one that follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementPair {
    pub current: MonthlyStatement,
    pub next: MonthlyStatement,
}

/// One future (or current) installment of an installment purchase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstallmentSlot {
    pub period: StatementPeriod,
    pub number: u32,
    pub total: u32,
    pub amount: f64,
}

pub struct StatementService;

impl StatementService {
    /// Filters `purchases` down to those billed on `period`, keeping their order.
    pub fn statement_for(purchases: &[Purchase], period: StatementPeriod) -> MonthlyStatement {
        let selected = purchases
            .iter()
            .filter(|purchase| period.includes(purchase.date))
            .cloned()
            .collect();
        MonthlyStatement::new(period, selected)
    }

    pub fn current_and_next(purchases: &[Purchase], period: StatementPeriod) -> StatementPair {
        StatementPair {
            current: Self::statement_for(purchases, period),
            next: Self::statement_for(purchases, period.next()),
        }
    }

    /// Periods of the installments still to be billed, starting at the
    /// purchase's own statement with its current installment number.
    ///
    /// Empty for purchases without an installment plan.
    pub fn installment_schedule(purchase: &Purchase) -> Vec<InstallmentSlot> {
        let (Some(plan), Some(amount)) = (purchase.installments(), purchase.installment_value())
        else {
            return Vec::new();
        };
        let start = purchase.statement_period();
        (plan.current()..=plan.total())
            .enumerate()
            .map(|(offset, number)| InstallmentSlot {
                period: start.shift(offset as i32),
                number,
                total: plan.total(),
                amount,
            })
            .collect()
    }
}
