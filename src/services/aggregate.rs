//! Aggregator
//!
//! Reduces a transaction collection into per-group totals. Grouping is by
//! category or by calendar month/year; the result map iterates in registry
//! order for categories and chronologically for periods.

use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::FinboardResult;
use crate::models::budget::percent_of_limit;
use crate::models::{Budget, Category, Granularity, Money, Period, Transaction};

/// How to group transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupBy {
    #[default]
    Category,
    Month,
    Year,
}

impl From<Granularity> for GroupBy {
    fn from(granularity: Granularity) -> Self {
        match granularity {
            Granularity::Month => Self::Month,
            Granularity::Year => Self::Year,
        }
    }
}

/// Key of one aggregate group
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum GroupKey {
    Category(Category),
    Period(Period),
}

impl GroupKey {
    fn of(txn: &Transaction, group_by: GroupBy) -> Self {
        match group_by {
            GroupBy::Category => Self::Category(txn.category),
            GroupBy::Month => Self::Period(Period::of(txn.date, Granularity::Month)),
            GroupBy::Year => Self::Period(Period::of(txn.date, Granularity::Year)),
        }
    }

    /// Human-readable label ("Food & Dining", "Jun 2023")
    pub fn label(&self) -> String {
        match self {
            Self::Category(c) => c.label().to_string(),
            Self::Period(p) => p.label(),
        }
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            Self::Category(c) => Some(*c),
            Self::Period(_) => None,
        }
    }

    pub fn period(&self) -> Option<Period> {
        match self {
            Self::Category(_) => None,
            Self::Period(p) => Some(*p),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category(c) => f.pad(c.key()),
            Self::Period(p) => fmt::Display::fmt(p, f),
        }
    }
}

/// Totals for one group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Aggregate {
    /// Signed sum of every amount
    pub total: Money,
    pub count: usize,
    /// Sum of positive amounts
    pub inflow: Money,
    /// Sum of negative amounts (zero or negative)
    pub outflow: Money,
}

impl Aggregate {
    fn add(&mut self, amount: Money) {
        self.total += amount;
        self.count += 1;
        if amount.is_positive() {
            self.inflow += amount;
        } else if amount.is_negative() {
            self.outflow += amount;
        }
    }

    /// Inflow plus outflow
    pub fn net_savings(&self) -> Money {
        self.inflow + self.outflow
    }

    /// Outflow as a non-negative magnitude
    pub fn spending(&self) -> Money {
        self.outflow.abs()
    }

    /// Aggregate a slice without grouping
    pub fn of(transactions: &[Transaction]) -> Self {
        let mut agg = Self::default();
        for txn in transactions {
            agg.add(txn.amount);
        }
        agg
    }
}

/// Group `transactions` and total each group
///
/// Only groups with at least one transaction appear; use
/// [`with_all_categories`] when zero rows are wanted.
pub fn aggregate(
    transactions: &[Transaction],
    group_by: GroupBy,
) -> BTreeMap<GroupKey, Aggregate> {
    let mut groups: BTreeMap<GroupKey, Aggregate> = BTreeMap::new();
    for txn in transactions {
        groups
            .entry(GroupKey::of(txn, group_by))
            .or_default()
            .add(txn.amount);
    }
    debug!(
        "aggregate: {} transactions into {} groups by {:?}",
        transactions.len(),
        groups.len(),
        group_by
    );
    groups
}

/// Sum of inflows plus sum of outflows
pub fn net_savings(transactions: &[Transaction]) -> Money {
    let inflow: Money = transactions
        .iter()
        .filter(|t| t.is_inflow())
        .map(|t| t.amount)
        .sum();
    let outflow: Money = transactions
        .iter()
        .filter(|t| t.is_outflow())
        .map(|t| t.amount)
        .sum();
    inflow + outflow
}

/// Union of a category aggregation with the whole registry at zero
pub fn with_all_categories(
    mut groups: BTreeMap<GroupKey, Aggregate>,
) -> BTreeMap<GroupKey, Aggregate> {
    for category in Category::all() {
        groups.entry(GroupKey::Category(*category)).or_default();
    }
    groups
}

/// What percentage of a budget's limit `total` represents
///
/// `total` is compared by magnitude, so a negative outflow total can be
/// passed directly. Fails when the limit is zero or negative.
pub fn percent_of_budget(total: Money, budget: &Budget) -> FinboardResult<f64> {
    percent_of_limit(total, budget.limit, budget.category)
}
