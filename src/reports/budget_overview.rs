//! Budget Overview Report
//!
//! Every budget with its limit, spending, remaining amount and status,
//! plus the totals card and the list of alerts.

use std::io::Write;

use crate::display::report::{format_bar, format_money, format_percentage, status_marker};
use crate::error::{FinboardError, FinboardResult};
use crate::models::{Budget, BudgetStatus, BudgetThresholds, Category, Money};
use crate::services::budget::BudgetTotals;

/// A row in the budget report for a single category
#[derive(Debug, Clone)]
pub struct BudgetReportRow {
    pub category: Category,
    pub limit: Money,
    pub spent: Money,
    pub remaining: Money,
    /// `None` when the limit is zero or negative
    pub percent_used: Option<f64>,
    pub status: BudgetStatus,
}

impl BudgetReportRow {
    fn from_budget(budget: &Budget, thresholds: &BudgetThresholds) -> Self {
        Self {
            category: budget.category,
            limit: budget.limit,
            spent: budget.spent(),
            remaining: budget.remaining(),
            percent_used: budget.percent_used().ok(),
            status: budget.status(thresholds),
        }
    }
}

/// Budget Overview Report
#[derive(Debug, Clone)]
pub struct BudgetOverviewReport {
    pub rows: Vec<BudgetReportRow>,
    pub totals: BudgetTotals,
    pub thresholds: BudgetThresholds,
}

impl BudgetOverviewReport {
    /// Rows keep the input order of `budgets`
    pub fn generate(budgets: &[Budget], thresholds: BudgetThresholds) -> Self {
        Self {
            rows: budgets
                .iter()
                .map(|b| BudgetReportRow::from_budget(b, &thresholds))
                .collect(),
            totals: BudgetTotals::of(budgets),
            thresholds,
        }
    }

    /// Rows nearing or over their limit
    pub fn alerts(&self) -> Vec<&BudgetReportRow> {
        self.rows.iter().filter(|r| r.status.is_alert()).collect()
    }

    pub fn over_budget_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.status == BudgetStatus::OverBudget)
            .count()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Budget Overview\n");
        output.push_str(&"=".repeat(84));
        output.push('\n');

        output.push_str(&format!(
            "Total Budget: {:>14}\n",
            format_money(self.totals.total_limit, symbol)
        ));
        output.push_str(&format!(
            "Total Spent:  {:>14}\n",
            format_money(self.totals.total_spent, symbol)
        ));
        output.push_str(&format!(
            "Remaining:    {:>14}\n",
            format_money(self.totals.remaining(), symbol)
        ));
        if let Ok(pct) = self.totals.percent_used() {
            output.push_str(&format!("Used:         {:>14}\n", format_percentage(pct)));
        }
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No budgets configured.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<18} {:>11} {:>11} {:>11} {:>6} {:<16} {}\n",
            "Category", "Budget", "Spent", "Remaining", "%", "", "Status"
        ));
        output.push_str(&"-".repeat(84));
        output.push('\n');

        for row in &self.rows {
            let pct = row
                .percent_used
                .map(format_percentage)
                .unwrap_or_else(|| "-".into());
            let bar = format_bar(row.spent.as_f64(), row.limit.as_f64(), 16);
            output.push_str(&format!(
                "{:<18} {:>11} {:>11} {:>11} {:>6} {:<16} {}{}\n",
                row.category.label(),
                format_money(row.limit, symbol),
                format_money(row.spent, symbol),
                format_money(row.remaining, symbol),
                pct,
                bar,
                status_marker(row.status),
                row.status
            ));
        }

        let alerts = self.alerts();
        if !alerts.is_empty() {
            output.push('\n');
            for row in alerts {
                output.push_str(&format!(
                    "Warning: {}: {} of {} spent ({})\n",
                    row.category.label(),
                    format_money(row.spent, symbol),
                    format_money(row.limit, symbol),
                    row.status
                ));
            }
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FinboardResult<()> {
        writeln!(writer, "Category,Budget,Spent,Remaining,Percent Used,Status")
            .map_err(|e| FinboardError::Export(e.to_string()))?;

        for row in &self.rows {
            writeln!(
                writer,
                "{},{},{},{},{},{}",
                row.category.key(),
                row.limit.to_decimal_string(),
                row.spent.to_decimal_string(),
                row.remaining.to_decimal_string(),
                row.percent_used
                    .map(|p| format!("{:.2}", p))
                    .unwrap_or_default(),
                row.status
            )
            .map_err(|e| FinboardError::Export(e.to_string()))?;
        }

        writeln!(
            writer,
            "TOTAL,{},{},{},{},",
            self.totals.total_limit.to_decimal_string(),
            self.totals.total_spent.to_decimal_string(),
            self.totals.remaining().to_decimal_string(),
            self.totals
                .percent_used()
                .map(|p| format!("{:.2}", p))
                .unwrap_or_default()
        )
        .map_err(|e| FinboardError::Export(e.to_string()))?;

        Ok(())
    }
}
