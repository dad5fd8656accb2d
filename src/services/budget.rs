//! Budget derivation
//!
//! Attaches spending to configured limits and computes the overview totals
//! shown above the per-category budgets.

use log::debug;
use serde::Serialize;

use crate::error::{FinboardError, FinboardResult};
use crate::models::{Budget, BudgetLimit, BudgetThresholds, Money, Transaction};

/// Build budgets from limits, deriving `spent` from `transactions`
pub fn derive_budgets(limits: &[BudgetLimit], transactions: &[Transaction]) -> Vec<Budget> {
    let budgets: Vec<Budget> = limits
        .iter()
        .map(|l| Budget::from_transactions(l.category, l.limit, transactions))
        .collect();
    debug!(
        "derive_budgets: {} budgets from {} transactions",
        budgets.len(),
        transactions.len()
    );
    budgets
}

/// Re-derive `spent` on existing budgets in place
pub fn recompute_all(budgets: &mut [Budget], transactions: &[Transaction]) {
    for budget in budgets.iter_mut() {
        budget.recompute(transactions);
    }
}

/// Totals across every budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BudgetTotals {
    pub total_limit: Money,
    pub total_spent: Money,
}

impl BudgetTotals {
    pub fn of(budgets: &[Budget]) -> Self {
        Self {
            total_limit: budgets.iter().map(|b| b.limit).sum(),
            total_spent: budgets.iter().map(|b| b.spent()).sum(),
        }
    }

    pub fn remaining(&self) -> Money {
        self.total_limit - self.total_spent
    }

    /// Total spent as a percentage of the total limit
    pub fn percent_used(&self) -> FinboardResult<f64> {
        if !self.total_limit.is_positive() {
            return Err(FinboardError::NonPositiveLimit {
                category: "all budgets".into(),
                limit: self.total_limit,
            });
        }
        Ok(self.total_spent.cents() as f64 / self.total_limit.cents() as f64 * 100.0)
    }
}

/// Budgets whose status is nearing or over the limit, in input order
pub fn alerts<'a>(budgets: &'a [Budget], thresholds: &BudgetThresholds) -> Vec<&'a Budget> {
    budgets
        .iter()
        .filter(|b| b.status(thresholds).is_alert())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetStatus, Category};
    use chrono::NaiveDate;

    fn spend(day: u32, cents: i64, category: Category) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2023, 6, day).unwrap(),
            "test",
            Money::from_cents(cents),
            category,
        )
    }

    #[test]
    fn test_derive_budgets() {
        let limits = vec![
            BudgetLimit::new(Category::Food, Money::from_cents(50000)),
            BudgetLimit::new(Category::Health, Money::from_cents(10000)),
        ];
        let txns = vec![
            spend(1, -7550, Category::Food),
            spend(5, -8500, Category::Food),
            spend(2, 300000, Category::Income),
        ];
        let budgets = derive_budgets(&limits, &txns);
        assert_eq!(budgets.len(), 2);
        assert_eq!(budgets[0].spent(), Money::from_cents(16050));
        assert!(budgets[1].spent().is_zero());
    }

    #[test]
    fn test_recompute_all() {
        let mut budgets = vec![Budget::tracked(
            Category::Food,
            Money::from_cents(50000),
            Money::from_cents(35000),
        )];
        recompute_all(&mut budgets, &[spend(1, -7550, Category::Food)]);
        assert_eq!(budgets[0].spent(), Money::from_cents(7550));
    }

    #[test]
    fn test_totals() {
        let budgets = vec![
            Budget::tracked(Category::Food, Money::from_cents(50000), Money::from_cents(35000)),
            Budget::tracked(Category::Health, Money::from_cents(10000), Money::from_cents(5000)),
        ];
        let totals = BudgetTotals::of(&budgets);
        assert_eq!(totals.total_limit, Money::from_cents(60000));
        assert_eq!(totals.total_spent, Money::from_cents(40000));
        assert_eq!(totals.remaining(), Money::from_cents(20000));
        let pct = totals.percent_used().unwrap();
        assert!((pct - 40000.0 / 60000.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_totals_of_nothing_is_domain_error() {
        let totals = BudgetTotals::of(&[]);
        assert!(totals.percent_used().unwrap_err().is_domain());
    }

    #[test]
    fn test_alerts() {
        let budgets = vec![
            Budget::tracked(Category::Utilities, Money::from_cents(30000), Money::from_cents(28000)),
            Budget::tracked(Category::Food, Money::from_cents(50000), Money::from_cents(35000)),
            Budget::tracked(Category::Shopping, Money::from_cents(25000), Money::from_cents(26000)),
        ];
        let thresholds = BudgetThresholds::default();
        let flagged: Vec<_> = alerts(&budgets, &thresholds)
            .iter()
            .map(|b| (b.category, b.status(&thresholds)))
            .collect();
        assert_eq!(
            flagged,
            vec![
                (Category::Utilities, BudgetStatus::NearingLimit),
                (Category::Shopping, BudgetStatus::OverBudget)
            ]
        );
    }
}
