//! Budget model
//!
//! A budget is a spending limit for one category. `spent` is either the
//! tracked value supplied by the data source or derived from transactions;
//! it has no setter, so the only way to change it is [`Budget::recompute`].

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

use super::category::Category;
use super::money::Money;
use super::transaction::Transaction;
use crate::error::{FinboardError, FinboardResult};

/// Usage ratio above which a budget is reported as nearing its limit
pub const DEFAULT_NEARING_LIMIT_RATIO: f64 = 0.9;

/// Thresholds the budget status is computed against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetThresholds {
    /// `spent / limit` strictly above this is "nearing limit"
    pub nearing_limit_ratio: f64,
}

impl BudgetThresholds {
    /// Create thresholds, rejecting ratios outside (0, 1]
    pub fn new(nearing_limit_ratio: f64) -> FinboardResult<Self> {
        if !(nearing_limit_ratio > 0.0 && nearing_limit_ratio <= 1.0) {
            return Err(FinboardError::Config(format!(
                "nearing limit ratio must be in (0, 1], got {}",
                nearing_limit_ratio
            )));
        }
        Ok(Self {
            nearing_limit_ratio,
        })
    }
}

impl Default for BudgetThresholds {
    fn default() -> Self {
        Self {
            nearing_limit_ratio: DEFAULT_NEARING_LIMIT_RATIO,
        }
    }
}

/// Where a budget stands against its limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    OnTrack,
    NearingLimit,
    OverBudget,
}

impl BudgetStatus {
    pub fn is_alert(&self) -> bool {
        !matches!(self, Self::OnTrack)
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::OnTrack => "On track",
            Self::NearingLimit => "Nearing budget limit",
            Self::OverBudget => "Over budget",
        };
        f.pad(label)
    }
}

/// A configured limit, before spending is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLimit {
    pub category: Category,
    pub limit: Money,
}

impl BudgetLimit {
    pub fn new(category: Category, limit: Money) -> Self {
        Self { category, limit }
    }
}

/// A category budget with its spending
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub category: Category,

    /// Spending limit for the period
    pub limit: Money,

    /// Amount spent, as a non-negative magnitude
    #[serde(default, deserialize_with = "magnitude")]
    spent: Money,
}

/// Data sources may record spending as a negative outflow
fn magnitude<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
    let spent = Money::deserialize(deserializer)?;
    spent
        .checked_abs()
        .ok_or_else(|| de::Error::custom(format!("spent amount {} is out of range", spent.cents())))
}

impl Budget {
    /// A budget whose spending is tracked by the data source
    pub fn tracked(category: Category, limit: Money, spent: Money) -> Self {
        Self {
            category,
            limit,
            spent: spent.abs(),
        }
    }

    /// A budget whose spending is derived from `transactions`
    pub fn from_transactions(
        category: Category,
        limit: Money,
        transactions: &[Transaction],
    ) -> Self {
        let mut budget = Self {
            category,
            limit,
            spent: Money::zero(),
        };
        budget.recompute(transactions);
        budget
    }

    /// Re-derive `spent` from the outflows of this budget's category
    ///
    /// Inflows in the category (refunds) do not reduce spending.
    pub fn recompute(&mut self, transactions: &[Transaction]) {
        self.spent = transactions
            .iter()
            .filter(|t| t.category == self.category && t.is_outflow())
            .map(|t| t.amount.abs())
            .sum();
    }

    pub fn spent(&self) -> Money {
        self.spent
    }

    /// Limit minus spending (negative when over budget)
    pub fn remaining(&self) -> Money {
        self.limit - self.spent
    }

    /// `spent / limit` as a fraction
    ///
    /// Fails with [`FinboardError::NonPositiveLimit`] when the limit is zero
    /// or negative instead of returning infinity or NaN.
    pub fn usage_ratio(&self) -> FinboardResult<f64> {
        percent_of_limit(self.spent, self.limit, self.category).map(|p| p / 100.0)
    }

    /// `spent / limit` in percent
    pub fn percent_used(&self) -> FinboardResult<f64> {
        percent_of_limit(self.spent, self.limit, self.category)
    }

    /// Threshold comparison for display
    ///
    /// `spent > limit` is over budget; `spent > ratio * limit` is nearing
    /// the limit. The comparisons are multiplicative, so a zero limit never
    /// divides.
    pub fn status(&self, thresholds: &BudgetThresholds) -> BudgetStatus {
        if self.is_over_budget() {
            BudgetStatus::OverBudget
        } else if self.spent.as_f64() > self.limit.as_f64() * thresholds.nearing_limit_ratio
        {
            BudgetStatus::NearingLimit
        } else {
            BudgetStatus::OnTrack
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.spent > self.limit
    }

    /// Nearing the limit but not yet over it
    pub fn is_nearing_limit(&self, thresholds: &BudgetThresholds) -> bool {
        self.status(thresholds) == BudgetStatus::NearingLimit
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} of {} spent",
            self.category.label(),
            self.spent,
            self.limit
        )
    }
}

/// Percentage of `limit` that `amount` represents, using magnitudes
///
/// Shared by budgets and the aggregator's `percent_of_budget`.
pub(crate) fn percent_of_limit(
    amount: Money,
    limit: Money,
    category: Category,
) -> FinboardResult<f64> {
    if !limit.is_positive() {
        return Err(FinboardError::NonPositiveLimit {
            category: category.label().to_string(),
            limit,
        });
    }
    Ok(amount.abs().cents() as f64 / limit.cents() as f64 * 100.0)
}
