//! Net Worth Report
//!
//! Account balances grouped by kind, with assets, liabilities and net worth.

use std::io::Write;

use crate::display::report::format_money;
use crate::error::{FinboardError, FinboardResult};
use crate::models::{Account, AccountKind, Money};

/// Accounts of one kind
#[derive(Debug, Clone)]
pub struct AccountGroup {
    pub kind: AccountKind,
    pub accounts: Vec<Account>,
    pub total: Money,
}

/// Net worth summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetWorthSummary {
    /// Sum of positive balances
    pub total_assets: Money,
    /// Sum of negative balances (zero or negative)
    pub total_liabilities: Money,
    pub net_worth: Money,
}

/// Net Worth Report
#[derive(Debug, Clone)]
pub struct NetWorthReport {
    /// Non-empty groups in `AccountKind::all()` order
    pub groups: Vec<AccountGroup>,
    pub summary: NetWorthSummary,
}

impl NetWorthReport {
    pub fn generate(accounts: &[Account]) -> Self {
        let groups: Vec<AccountGroup> = AccountKind::all()
            .iter()
            .filter_map(|kind| {
                let members: Vec<Account> = accounts
                    .iter()
                    .filter(|a| a.kind == *kind)
                    .cloned()
                    .collect();
                if members.is_empty() {
                    return None;
                }
                Some(AccountGroup {
                    kind: *kind,
                    total: members.iter().map(|a| a.balance).sum(),
                    accounts: members,
                })
            })
            .collect();

        let total_assets: Money = accounts
            .iter()
            .filter(|a| a.balance.is_positive())
            .map(|a| a.balance)
            .sum();
        let total_liabilities: Money = accounts
            .iter()
            .filter(|a| a.balance.is_negative())
            .map(|a| a.balance)
            .sum();

        Self {
            groups,
            summary: NetWorthSummary {
                total_assets,
                total_liabilities,
                net_worth: total_assets + total_liabilities,
            },
        }
    }

    pub fn account_count(&self) -> usize {
        self.groups.iter().map(|g| g.accounts.len()).sum()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Net Worth Report\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');

        output.push_str(&format!(
            "Total Assets:      {:>15}\n",
            format_money(self.summary.total_assets, symbol)
        ));
        output.push_str(&format!(
            "Total Liabilities: {:>15}\n",
            format_money(self.summary.total_liabilities.abs(), symbol)
        ));
        output.push_str(&"-".repeat(35));
        output.push('\n');
        output.push_str(&format!(
            "Net Worth:         {:>15}\n\n",
            format_money(self.summary.net_worth, symbol)
        ));

        if self.groups.is_empty() {
            output.push_str("No accounts found.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<24} {:<18} {:>15}\n",
            "Account", "Institution", "Balance"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for group in &self.groups {
            output.push_str(&format!("\n{}\n", group.kind.to_string().to_uppercase()));
            for account in &group.accounts {
                output.push_str(&format!(
                    "  {:<22} {:<18} {:>15}\n",
                    account.name,
                    account.institution,
                    format_money(account.balance, symbol)
                ));
            }
            output.push_str(&format!(
                "  {:<22} {:<18} {:>15}\n",
                "Subtotal:",
                "",
                format_money(group.total, symbol)
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FinboardResult<()> {
        writeln!(writer, "Account Type,Account Name,Institution,Balance")
            .map_err(|e| FinboardError::Export(e.to_string()))?;

        for group in &self.groups {
            for account in &group.accounts {
                writeln!(
                    writer,
                    "{},{},{},{}",
                    group.kind,
                    account.name,
                    account.institution,
                    account.balance.to_decimal_string()
                )
                .map_err(|e| FinboardError::Export(e.to_string()))?;
            }
        }

        for (label, amount) in [
            ("Total Assets", self.summary.total_assets),
            ("Total Liabilities", self.summary.total_liabilities),
            ("Net Worth", self.summary.net_worth),
        ] {
            writeln!(writer, "SUMMARY,{},,{}", label, amount.to_decimal_string())
                .map_err(|e| FinboardError::Export(e.to_string()))?;
        }

        Ok(())
    }
}
