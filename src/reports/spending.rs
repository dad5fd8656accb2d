//! Spending Report
//!
//! Spending by category over a filtered set of transactions, with each
//! category's share of total spending and, where a budget exists, its share
//! of that budget.

use log::warn;
use std::io::Write;

use crate::display::report::{format_bar, format_money, format_percentage};
use crate::error::{FinboardError, FinboardResult};
use crate::models::{Budget, Category, Money, Transaction};
use crate::services::aggregate::{aggregate, percent_of_budget, GroupBy};
use crate::services::filter::{filter, FilterCriteria};

/// Spending in one category
#[derive(Debug, Clone)]
pub struct SpendingByCategory {
    pub category: Category,
    /// Sum of outflows, as a positive magnitude
    pub spending: Money,
    /// Number of outflow transactions
    pub transaction_count: usize,
    /// Share of total spending
    pub percentage: f64,
    /// Share of the category budget, when one with a positive limit exists
    pub budget_percentage: Option<f64>,
}

/// Spending Report
#[derive(Debug, Clone)]
pub struct SpendingReport {
    /// Categories with spending, largest first
    pub categories: Vec<SpendingByCategory>,
    pub total_spending: Money,
    pub total_income: Money,
    /// Transactions that passed the filter
    pub total_transactions: usize,
}

impl SpendingReport {
    /// Generate a spending report over the transactions matching `criteria`
    pub fn generate(
        transactions: &[Transaction],
        budgets: &[Budget],
        criteria: &FilterCriteria,
    ) -> Self {
        let matched = filter(transactions, criteria);
        let outflows: Vec<Transaction> = matched.iter().filter(|t| t.is_outflow()).cloned().collect();

        let groups = aggregate(&outflows, GroupBy::Category);
        let total_spending: Money = groups.values().map(|a| a.spending()).sum();
        let total_income: Money = matched
            .iter()
            .filter(|t| t.is_inflow())
            .map(|t| t.amount)
            .sum();

        let mut categories: Vec<SpendingByCategory> = groups
            .iter()
            .filter_map(|(key, agg)| {
                let category = key.category()?;
                let spending = agg.spending();
                let percentage = if total_spending.is_zero() {
                    0.0
                } else {
                    spending.cents() as f64 / total_spending.cents() as f64 * 100.0
                };
                let budget_percentage = budgets
                    .iter()
                    .find(|b| b.category == category)
                    .and_then(|b| match percent_of_budget(spending, b) {
                        Ok(pct) => Some(pct),
                        Err(e) => {
                            warn!("{}", e);
                            None
                        }
                    });
                Some(SpendingByCategory {
                    category,
                    spending,
                    transaction_count: agg.count,
                    percentage,
                    budget_percentage,
                })
            })
            .collect();

        // Largest first; ties keep registry order
        categories.sort_by(|a, b| b.spending.cmp(&a.spending));

        Self {
            categories,
            total_spending,
            total_income,
            total_transactions: matched.len(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Spending Report\n");
        output.push_str(&"=".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "Total Spending: {}\n",
            format_money(self.total_spending, symbol)
        ));
        output.push_str(&format!(
            "Total Income: {}\n",
            format_money(self.total_income, symbol)
        ));
        output.push_str(&format!(
            "Total Transactions: {}\n\n",
            self.total_transactions
        ));

        if self.categories.is_empty() {
            output.push_str("No spending found.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<18} {:>12} {:>6} {:>7} {:<20} {:>8}\n",
            "Category", "Amount", "Count", "%", "", "Budget"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        let max = self
            .categories
            .first()
            .map(|c| c.spending.as_f64())
            .unwrap_or(0.0);
        for row in &self.categories {
            output.push_str(&format!(
                "{:<18} {:>12} {:>6} {:>7} {:<20} {:>8}\n",
                row.category.label(),
                format_money(row.spending, symbol),
                row.transaction_count,
                format_percentage(row.percentage),
                format_bar(row.spending.as_f64(), max, 20),
                row.budget_percentage
                    .map(format_percentage)
                    .unwrap_or_else(|| "-".into()),
            ));
        }

        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "{:<18} {:>12}\n",
            "TOTAL SPENDING",
            format_money(self.total_spending, symbol)
        ));
        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FinboardResult<()> {
        writeln!(writer, "Category,Label,Amount,Transaction Count,Percentage,Budget Percentage")
            .map_err(|e| FinboardError::Export(e.to_string()))?;

        for row in &self.categories {
            writeln!(
                writer,
                "{},{},{},{},{:.2},{}",
                row.category.key(),
                row.category.label(),
                row.spending.to_decimal_string(),
                row.transaction_count,
                row.percentage,
                row.budget_percentage
                    .map(|p| format!("{:.2}", p))
                    .unwrap_or_default()
            )
            .map_err(|e| FinboardError::Export(e.to_string()))?;
        }

        writeln!(
            writer,
            "TOTAL,,{},{},100.00,",
            self.total_spending.to_decimal_string(),
            self.categories.iter().map(|c| c.transaction_count).sum::<usize>()
        )
        .map_err(|e| FinboardError::Export(e.to_string()))?;

        Ok(())
    }

    /// The `limit` categories with the most spending
    pub fn top_categories(&self, limit: usize) -> &[SpendingByCategory] {
        &self.categories[..limit.min(self.categories.len())]
    }
}
