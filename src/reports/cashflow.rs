//! Cash Flow Report
//!
//! Income against expenses per month or year. Periods run contiguously from
//! the first to the last period with activity; quiet periods show as zero
//! rows.

use std::io::Write;

use crate::display::report::{format_bar, format_money};
use crate::error::{FinboardError, FinboardResult};
use crate::models::{Granularity, Money, Period, Transaction};
use crate::services::aggregate::{aggregate, Aggregate, GroupBy, GroupKey};

/// One period of income and expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashflowRow {
    pub period: Period,
    pub income: Money,
    /// Outflows as a positive magnitude
    pub expenses: Money,
    pub transaction_count: usize,
}

impl CashflowRow {
    fn new(period: Period, agg: &Aggregate) -> Self {
        Self {
            period,
            income: agg.inflow,
            expenses: agg.spending(),
            transaction_count: agg.count,
        }
    }

    /// Income minus expenses
    pub fn net(&self) -> Money {
        self.income - self.expenses
    }
}

/// Cash Flow Report
#[derive(Debug, Clone)]
pub struct CashflowReport {
    pub granularity: Granularity,
    /// Chronological, gap-free
    pub rows: Vec<CashflowRow>,
    pub total_income: Money,
    pub total_expenses: Money,
}

impl CashflowReport {
    pub fn generate(transactions: &[Transaction], granularity: Granularity) -> Self {
        let groups = aggregate(transactions, GroupBy::from(granularity));

        let mut rows = Vec::new();
        let bounds = groups
            .keys()
            .next()
            .zip(groups.keys().next_back())
            .and_then(|(first, last)| first.period().zip(last.period()));
        if let Some((first, last)) = bounds {
            let empty = Aggregate::default();
            let mut period = first;
            while period <= last {
                let agg = groups.get(&GroupKey::Period(period)).unwrap_or(&empty);
                rows.push(CashflowRow::new(period, agg));
                period = period.next();
            }
        }

        Self {
            granularity,
            total_income: rows.iter().map(|r| r.income).sum(),
            total_expenses: rows.iter().map(|r| r.expenses).sum(),
            rows,
        }
    }

    /// Net savings across every period
    pub fn net_savings(&self) -> Money {
        self.total_income - self.total_expenses
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        let title = match self.granularity {
            Granularity::Month => "Monthly",
            Granularity::Year => "Yearly",
        };
        output.push_str(&format!("{} Income vs Expenses\n", title));
        output.push_str(&"=".repeat(72));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No transactions found.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<10} {:>12} {:>12} {:>12}  {}\n",
            "Period", "Income", "Expenses", "Net", "Expenses / Income"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<10} {:>12} {:>12} {:>12}  {}\n",
                row.period.label(),
                format_money(row.income, symbol),
                format_money(row.expenses, symbol),
                format_money(row.net(), symbol),
                format_bar(row.expenses.as_f64(), row.income.as_f64(), 20)
            ));
        }

        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:>12} {:>12} {:>12}\n",
            "TOTAL",
            format_money(self.total_income, symbol),
            format_money(self.total_expenses, symbol),
            format_money(self.net_savings(), symbol)
        ));
        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FinboardResult<()> {
        writeln!(writer, "Period,Income,Expenses,Net,Transaction Count")
            .map_err(|e| FinboardError::Export(e.to_string()))?;

        for row in &self.rows {
            writeln!(
                writer,
                "{},{},{},{},{}",
                row.period,
                row.income.to_decimal_string(),
                row.expenses.to_decimal_string(),
                row.net().to_decimal_string(),
                row.transaction_count
            )
            .map_err(|e| FinboardError::Export(e.to_string()))?;
        }

        Ok(())
    }
}
