//! Properties the filter and aggregator guarantee for any input

use chrono::NaiveDate;
use finboard::models::{Budget, BudgetStatus, BudgetThresholds, Category, Money, Period, Transaction};
use finboard::services::aggregate::percent_of_budget;
use finboard::services::{aggregate, filter, net_savings, FilterCriteria, GroupBy, GroupKey};
use finboard::storage::Dataset;

fn txn(y: i32, m: u32, d: u32, desc: &str, cents: i64, category: Category) -> Transaction {
    Transaction::new(
        NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        desc,
        Money::from_cents(cents),
        category,
    )
}

/// Sample data plus a few records in other months and years
fn corpus() -> Vec<Transaction> {
    let mut all = Dataset::sample().transactions;
    all.push(txn(2023, 7, 1, "July Rent", -150000, Category::Housing));
    all.push(txn(2022, 12, 24, "Gift Store", -6000, Category::Shopping));
    all.push(txn(2023, 7, 15, "Refund from store", 1200, Category::Shopping));
    all
}

fn criteria_pool() -> Vec<FilterCriteria> {
    let june1 = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
    vec![
        FilterCriteria::new(),
        FilterCriteria::new().date(june1),
        FilterCriteria::new().category(Category::Food),
        FilterCriteria::new().category(Category::Shopping),
        FilterCriteria::new().search("store"),
        FilterCriteria::new().search("BILL"),
        FilterCriteria::new().min_amount(Money::zero()),
        FilterCriteria::new().max_amount(Money::from_cents(-5000)),
        FilterCriteria::new()
            .min_amount(Money::from_cents(-10000))
            .max_amount(Money::from_cents(-3000)),
        FilterCriteria::new().period(Period::month(2023, 6).unwrap()),
        FilterCriteria::new().period(Period::year(2023).unwrap()),
    ]
}

/// `sub` appears in `all` in the same relative order
fn is_ordered_subset(sub: &[Transaction], all: &[Transaction]) -> bool {
    let mut rest = all.iter();
    sub.iter().all(|s| rest.any(|a| a == s))
}

#[test]
fn filter_is_an_order_preserving_subset() {
    let all = corpus();
    for criteria in criteria_pool() {
        let result = filter(&all, &criteria);
        assert!(is_ordered_subset(&result, &all), "criteria {:?}", criteria);
        assert!(result.iter().all(|t| criteria.matches(t)));
    }
}

#[test]
fn empty_criteria_is_identity() {
    let all = corpus();
    assert_eq!(filter(&all, &FilterCriteria::new()), all);
}

#[test]
fn filtering_twice_equals_filtering_by_the_conjunction() {
    let all = corpus();
    let pool = criteria_pool();
    for c1 in &pool {
        for c2 in &pool {
            let chained = filter(&filter(&all, c1), c2);
            match c1.and(c2) {
                Some(both) => assert_eq!(chained, filter(&all, &both), "{:?} and {:?}", c1, c2),
                None => assert!(chained.is_empty(), "{:?} and {:?}", c1, c2),
            }
        }
    }
}

#[test]
fn group_totals_sum_to_input_total() {
    let all = corpus();
    let direct: Money = all.iter().map(|t| t.amount).sum();
    for group_by in [GroupBy::Category, GroupBy::Month, GroupBy::Year] {
        let grouped: Money = aggregate(&all, group_by).values().map(|a| a.total).sum();
        assert_eq!(grouped, direct, "{:?}", group_by);
        let counted: usize = aggregate(&all, group_by).values().map(|a| a.count).sum();
        assert_eq!(counted, all.len());
    }
}

#[test]
fn three_transaction_example() {
    let txns = vec![
        txn(2023, 6, 1, "Grocery Store", -7550, Category::Food),
        txn(2023, 6, 2, "Salary Deposit", 300000, Category::Income),
        txn(2023, 6, 3, "Electric Bill", -12000, Category::Utilities),
    ];

    let groups = aggregate(&txns, GroupBy::Category);
    let totals: Vec<(GroupKey, Money)> = groups.iter().map(|(k, a)| (*k, a.total)).collect();
    assert_eq!(
        totals,
        vec![
            (GroupKey::Category(Category::Food), Money::from_cents(-7550)),
            (GroupKey::Category(Category::Utilities), Money::from_cents(-12000)),
            (GroupKey::Category(Category::Income), Money::from_cents(300000)),
        ]
    );
    assert_eq!(net_savings(&txns), Money::from_cents(280450));

    let income_only = filter(&txns, &FilterCriteria::new().min_amount(Money::zero()));
    assert_eq!(income_only.len(), 1);
    assert_eq!(income_only[0].description, "Salary Deposit");
}

#[test]
fn budget_thresholds() {
    let thresholds = BudgetThresholds::default();
    let nearing = Budget::tracked(Category::Utilities, Money::from_cents(30000), Money::from_cents(28000));
    let over = Budget::tracked(Category::Utilities, Money::from_cents(30000), Money::from_cents(31000));
    assert_eq!(nearing.status(&thresholds), BudgetStatus::NearingLimit);
    assert_eq!(over.status(&thresholds), BudgetStatus::OverBudget);
}

#[test]
fn percentage_of_zero_limit_is_a_domain_error() {
    let zero = Budget::tracked(Category::Food, Money::zero(), Money::from_cents(500));
    let err = percent_of_budget(Money::from_cents(-500), &zero).unwrap_err();
    assert!(err.is_domain());
    assert!(zero.percent_used().unwrap_err().is_domain());
}

#[test]
fn time_groups_are_chronological() {
    let groups = aggregate(&corpus(), GroupBy::Month);
    let periods: Vec<Period> = groups.keys().filter_map(|k| k.period()).collect();
    let mut sorted = periods.clone();
    sorted.sort();
    assert_eq!(periods, sorted);
    assert_eq!(periods.first(), Some(&Period::month(2022, 12).unwrap()));
}
