//! Transaction register formatting

use crate::models::Transaction;

use super::report::{format_money, truncate};

/// Formatting options taken from the user's settings
#[derive(Debug, Clone)]
pub struct RegisterStyle<'a> {
    pub date_format: &'a str,
    pub currency_symbol: &'a str,
}

impl Default for RegisterStyle<'_> {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d",
            currency_symbol: "$",
        }
    }
}

/// Format a single transaction as a register row
pub fn format_transaction_row(txn: &Transaction, style: &RegisterStyle<'_>) -> String {
    let marker = if txn.is_inflow() { "+" } else { " " };
    format!(
        "{} {:12} {:10} {:24} {:16} {:>12}",
        marker,
        txn.id.to_string(),
        txn.date.format(style.date_format).to_string(),
        truncate(&txn.description, 24),
        txn.category.label(),
        format_money(txn.amount, style.currency_symbol)
    )
}

/// Format transactions as a register, followed by a count line
///
/// `total` is the number of matches before any row limit was applied.
pub fn format_transaction_register(
    transactions: &[&Transaction],
    total: usize,
    style: &RegisterStyle<'_>,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "  {:12} {:10} {:24} {:16} {:>12}\n",
        "ID", "Date", "Description", "Category", "Amount"
    ));
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, style));
        output.push('\n');
    }

    if total > transactions.len() {
        output.push_str(&format!(
            "\nShowing {} of {} transactions\n",
            transactions.len(),
            total
        ));
    } else {
        output.push_str(&format!("\n{} transaction(s)\n", total));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, TransactionId};
    use chrono::NaiveDate;

    fn salary() -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2023, 6, 2).unwrap(),
            "Salary Deposit",
            Money::from_cents(300000),
            Category::Income,
        )
        .with_id(TransactionId::from_seq(2))
    }

    #[test]
    fn test_format_transaction_row() {
        let row = format_transaction_row(&salary(), &RegisterStyle::default());
        assert!(row.starts_with('+'));
        assert!(row.contains("txn-00000002"));
        assert!(row.contains("2023-06-02"));
        assert!(row.contains("Salary Deposit"));
        assert!(row.contains("$3000.00"));
    }

    #[test]
    fn test_custom_style() {
        let style = RegisterStyle {
            date_format: "%d/%m/%Y",
            currency_symbol: "€",
        };
        let row = format_transaction_row(&salary(), &style);
        assert!(row.contains("02/06/2023"));
        assert!(row.contains("€3000.00"));
    }

    #[test]
    fn test_format_empty_register() {
        let output = format_transaction_register(&[], 0, &RegisterStyle::default());
        assert_eq!(output, "No transactions found.\n");
    }

    #[test]
    fn test_limited_register_reports_total() {
        let txn = salary();
        let output = format_transaction_register(&[&txn], 5, &RegisterStyle::default());
        assert!(output.contains("Showing 1 of 5 transactions"));
    }
}
