//! Built-in sample data
//!
//! Ten June-2023 transactions, four accounts and seven tracked budgets.
//! Ids are deterministic so output is reproducible between runs.

use chrono::NaiveDate;

use crate::models::{
    Account, AccountId, AccountKind, Budget, Category, Money, Transaction, TransactionId,
};

use super::dataset::Dataset;

fn june(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 6, day).unwrap_or(NaiveDate::MIN)
}

fn dollars(amount: i64) -> Money {
    Money::from_cents(amount * 100)
}

pub(super) fn transactions() -> Vec<Transaction> {
    let rows: [(u32, &str, Money, Category); 10] = [
        (1, "Grocery Store", Money::from_cents(-7550), Category::Food),
        (2, "Salary Deposit", dollars(3000), Category::Income),
        (3, "Electric Bill", dollars(-120), Category::Utilities),
        (4, "Online Purchase", Money::from_cents(-4999), Category::Shopping),
        (5, "Restaurant", dollars(-85), Category::Food),
        (6, "Gas Station", dollars(-40), Category::Transportation),
        (7, "Movie Tickets", dollars(-30), Category::Entertainment),
        (8, "Gym Membership", dollars(-50), Category::Health),
        (9, "Freelance Payment", dollars(500), Category::Income),
        (10, "Phone Bill", dollars(-80), Category::Utilities),
    ];

    rows.into_iter()
        .map(|(day, description, amount, category)| {
            Transaction::new(june(day), description, amount, category)
                .with_id(TransactionId::from_seq(u128::from(day)))
        })
        .collect()
}

pub(super) fn accounts() -> Vec<Account> {
    let rows = [
        ("Main Checking", "Bank of America", AccountKind::Bank, 5000),
        ("Savings", "Wells Fargo", AccountKind::Bank, 10000),
        ("Credit Card", "Chase", AccountKind::Credit, -1500),
        ("Investment", "Vanguard", AccountKind::Investment, 25000),
    ];

    rows.into_iter()
        .zip(1u128..)
        .map(|((name, institution, kind, balance), seq)| {
            Account::new(name, institution, kind, dollars(balance))
                .with_id(AccountId::from_seq(seq))
        })
        .collect()
}

/// Tracked budgets; `spent` comes from the data source, not the sample
/// transactions
pub(super) fn budgets() -> Vec<Budget> {
    [
        (Category::Food, 500, 350),
        (Category::Entertainment, 200, 180),
        (Category::Utilities, 300, 280),
        (Category::Transportation, 150, 100),
        (Category::Shopping, 250, 200),
        (Category::Health, 100, 50),
        (Category::Other, 200, 150),
    ]
    .into_iter()
    .map(|(category, limit, spent)| Budget::tracked(category, dollars(limit), dollars(spent)))
    .collect()
}

pub(super) fn dataset() -> Dataset {
    Dataset {
        accounts: accounts(),
        transactions: transactions(),
        budgets: budgets(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::net_savings;

    #[test]
    fn test_sample_shape() {
        let data = dataset();
        assert_eq!(data.transactions.len(), 10);
        assert_eq!(data.accounts.len(), 4);
        assert_eq!(data.budgets.len(), 7);
    }

    #[test]
    fn test_sample_ids_are_unique_and_stable() {
        let txns = transactions();
        assert_eq!(txns[0].id, TransactionId::from_seq(1));
        assert_eq!(txns[9].id.to_string(), "txn-0000000a");
        let mut ids: Vec<_> = txns.iter().map(|t| t.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_sample_totals() {
        // 3500 in, 530.49 out
        assert_eq!(net_savings(&transactions()), Money::from_cents(296951));
    }

    #[test]
    fn test_every_sample_transaction_is_valid() {
        assert!(transactions().iter().all(|t| t.validate().is_ok()));
    }
}
