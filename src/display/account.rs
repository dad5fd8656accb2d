//! Account display formatting

use crate::models::{Account, Money};
use crate::services::account::total_balance;

use super::report::format_money;

/// Format accounts as a table with a total row
pub fn format_account_list(accounts: &[&Account], symbol: &str) -> String {
    if accounts.is_empty() {
        return "No accounts found.\n".to_string();
    }

    let name_width = accounts
        .iter()
        .map(|a| a.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(5);
    let institution_width = accounts
        .iter()
        .map(|a| a.institution.chars().count())
        .max()
        .unwrap_or(11)
        .max(11);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<institution_width$}  {:<12}  {:>14}\n",
        "Name",
        "Institution",
        "Type",
        "Balance",
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:-<institution_width$}  {:-<12}  {:->14}\n",
        "", "", "", "",
    ));

    for account in accounts {
        output.push_str(&format!(
            "{:<name_width$}  {:<institution_width$}  {:<12}  {:>14}\n",
            account.name,
            account.institution,
            account.kind,
            format_money(account.balance, symbol),
        ));
    }

    let total: Money = total_balance(accounts.iter().copied());
    output.push_str(&format!(
        "{:<name_width$}  {:<institution_width$}  {:<12}  {:>14}\n",
        "Total",
        "",
        "",
        format_money(total, symbol),
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountKind;

    #[test]
    fn test_format_account_list() {
        let checking = Account::new(
            "Main Checking",
            "Bank of America",
            AccountKind::Bank,
            Money::from_cents(500000),
        );
        let card = Account::new("Credit Card", "Chase", AccountKind::Credit, Money::from_cents(-150000));
        let output = format_account_list(&[&checking, &card], "$");

        assert!(output.contains("Main Checking"));
        assert!(output.contains("Credit Card"));
        assert!(output.contains("-$1500.00"));
        assert!(output.contains("$3500.00"));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_account_list(&[], "$"), "No accounts found.\n");
    }
}
