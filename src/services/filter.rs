//! Transaction filter
//!
//! Narrows a transaction collection to the records matching every set
//! criterion. Unset criteria match everything, the output keeps the input
//! order, and "no matches" is an empty vector rather than an error.

use chrono::NaiveDate;
use log::debug;

use crate::error::{FinboardError, FinboardResult};
use crate::models::{AccountId, CategoryFilter, Money, Period, Transaction};

/// Options for filtering transactions
///
/// Built with the chained setters:
///
/// ```
/// use finboard::models::{Category, Money};
/// use finboard::services::FilterCriteria;
///
/// let criteria = FilterCriteria::new()
///     .category(Category::Food)
///     .search("store")
///     .min_amount(Money::from_cents(-10000));
/// assert!(!criteria.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Exact day
    pub date: Option<NaiveDate>,
    pub category: CategoryFilter,
    /// Case-insensitive description substrings; all must match
    pub search_terms: Vec<String>,
    /// Inclusive lower bound on the signed amount
    pub min_amount: Option<Money>,
    /// Inclusive upper bound on the signed amount
    pub max_amount: Option<Money>,
    /// Month or year containing the date
    pub period: Option<Period>,
    pub account_id: Option<AccountId>,
}

impl FilterCriteria {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by exact date
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    /// Add a description search term; empty terms are ignored
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        if !term.is_empty() {
            self.search_terms.push(term);
        }
        self
    }

    pub fn min_amount(mut self, min: Money) -> Self {
        self.min_amount = Some(min);
        self
    }

    pub fn max_amount(mut self, max: Money) -> Self {
        self.max_amount = Some(max);
        self
    }

    /// Filter by calendar month or year
    pub fn period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn account(mut self, account_id: AccountId) -> Self {
        self.account_id = Some(account_id);
        self
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.category.is_all()
            && self.search_terms.is_empty()
            && self.min_amount.is_none()
            && self.max_amount.is_none()
            && self.period.is_none()
            && self.account_id.is_none()
    }

    /// Check a single transaction against every set criterion
    pub fn matches(&self, txn: &Transaction) -> bool {
        Matcher::new(self).matches(txn)
    }

    /// Conjunction of two criteria sets
    ///
    /// Returns `None` when no transaction can satisfy both: two different
    /// exact dates, categories, accounts, or non-overlapping periods.
    /// Search terms accumulate and amount bounds tighten.
    pub fn and(&self, other: &FilterCriteria) -> Option<FilterCriteria> {
        let date = merge_equal(self.date, other.date)?;

        let category = match (self.category, other.category) {
            (CategoryFilter::Only(a), CategoryFilter::Only(b)) if a != b => return None,
            (CategoryFilter::All, c) | (c, CategoryFilter::All) => c,
            (c, _) => c,
        };

        let period = match (self.period, other.period) {
            (Some(a), Some(b)) => Some(narrower_period(a, b)?),
            (a, b) => a.or(b),
        };

        if let (Some(date), Some(period)) = (date, period) {
            if !period.contains(date) {
                return None;
            }
        }

        let account_id = merge_equal(self.account_id, other.account_id)?;

        let min_amount = match (self.min_amount, other.min_amount) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        let max_amount = match (self.max_amount, other.max_amount) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };

        let mut search_terms = self.search_terms.clone();
        search_terms.extend(other.search_terms.iter().cloned());

        Some(FilterCriteria {
            date,
            category,
            search_terms,
            min_amount,
            max_amount,
            period,
            account_id,
        })
    }
}

/// Both unset, one set, or both set to the same value
fn merge_equal<T: PartialEq + Copy>(a: Option<T>, b: Option<T>) -> Option<Option<T>> {
    match (a, b) {
        (Some(a), Some(b)) if a != b => None,
        (a, b) => Some(a.or(b)),
    }
}

/// The smaller of two nested periods, or `None` when they are disjoint
fn narrower_period(a: Period, b: Period) -> Option<Period> {
    if a == b {
        return Some(a);
    }
    match (a, b) {
        (Period::Year { year }, Period::Month { year: y, .. }) if year == y => Some(b),
        (Period::Month { year: y, .. }, Period::Year { year }) if year == y => Some(a),
        _ => None,
    }
}

/// Criteria with search terms lowercased once per filter call
struct Matcher<'a> {
    criteria: &'a FilterCriteria,
    needles: Vec<String>,
}

impl<'a> Matcher<'a> {
    fn new(criteria: &'a FilterCriteria) -> Self {
        Self {
            criteria,
            needles: criteria
                .search_terms
                .iter()
                .map(|t| t.to_lowercase())
                .collect(),
        }
    }

    fn matches(&self, txn: &Transaction) -> bool {
        let c = self.criteria;

        if let Some(date) = c.date {
            if txn.date != date {
                return false;
            }
        }

        if !c.category.matches(txn.category) {
            return false;
        }

        if !self.needles.is_empty() {
            let haystack = txn.description.to_lowercase();
            if !self.needles.iter().all(|n| haystack.contains(n.as_str())) {
                return false;
            }
        }

        // Bounds compare the signed amount
        if let Some(min) = c.min_amount {
            if txn.amount < min {
                return false;
            }
        }
        if let Some(max) = c.max_amount {
            if txn.amount > max {
                return false;
            }
        }

        if let Some(period) = c.period {
            if !period.contains(txn.date) {
                return false;
            }
        }

        if let Some(account_id) = c.account_id {
            if txn.account_id != Some(account_id) {
                return false;
            }
        }

        true
    }
}

/// Return the transactions matching `criteria`, in input order
pub fn filter(transactions: &[Transaction], criteria: &FilterCriteria) -> Vec<Transaction> {
    filter_refs(transactions, criteria)
        .into_iter()
        .cloned()
        .collect()
}

/// Borrowing variant of [`filter`]
pub fn filter_refs<'a>(
    transactions: &'a [Transaction],
    criteria: &FilterCriteria,
) -> Vec<&'a Transaction> {
    let matcher = Matcher::new(criteria);
    let matched: Vec<&Transaction> = transactions.iter().filter(|t| matcher.matches(t)).collect();
    debug!(
        "filter: {} of {} transactions matched {:?}",
        matched.len(),
        transactions.len(),
        criteria
    );
    matched
}

/// Raw filter input as typed by a user
///
/// This is the validation layer in front of [`FilterCriteria`]: empty
/// strings mean "unset", `"all"` means every category, and anything that
/// does not parse is rejected with [`FinboardError::Validation`] instead of
/// being coerced.
#[derive(Debug, Clone, Default)]
pub struct CriteriaInput {
    pub date: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub min_amount: Option<String>,
    pub max_amount: Option<String>,
    pub period: Option<String>,
}

impl CriteriaInput {
    pub fn parse(&self) -> FinboardResult<FilterCriteria> {
        let mut criteria = FilterCriteria::new();

        if let Some(date) = non_empty(&self.date) {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
                FinboardError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", date))
            })?;
            criteria = criteria.date(date);
        }

        if let Some(category) = non_empty(&self.category) {
            criteria = criteria.category(category.parse::<CategoryFilter>()?);
        }

        if let Some(search) = self.search.as_deref() {
            criteria = criteria.search(search);
        }

        if let Some(min) = non_empty(&self.min_amount) {
            criteria = criteria.min_amount(parse_bound("minimum", min)?);
        }

        if let Some(max) = non_empty(&self.max_amount) {
            criteria = criteria.max_amount(parse_bound("maximum", max)?);
        }

        if let Some(period) = non_empty(&self.period) {
            criteria = criteria.period(period.parse::<Period>()?);
        }

        Ok(criteria)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_bound(which: &str, raw: &str) -> FinboardResult<Money> {
    Money::parse(raw).map_err(|_| {
        FinboardError::Validation(format!("Invalid {} amount '{}': not a number", which, raw))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, day).unwrap()
    }

    fn txn(day: u32, desc: &str, cents: i64, category: Category) -> Transaction {
        Transaction::new(june(day), desc, Money::from_cents(cents), category)
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn(1, "Grocery Store", -7550, Category::Food),
            txn(2, "Salary Deposit", 300000, Category::Income),
            txn(3, "Electric Bill", -12000, Category::Utilities),
            txn(4, "Online Purchase", -4999, Category::Shopping),
            txn(5, "Restaurant", -8500, Category::Food),
        ]
    }

    fn descriptions(txns: &[Transaction]) -> Vec<&str> {
        txns.iter().map(|t| t.description.as_str()).collect()
    }

    #[test]
    fn test_empty_criteria_returns_everything() {
        let all = sample();
        let criteria = FilterCriteria::new();
        assert!(criteria.is_empty());
        assert_eq!(filter(&all, &criteria), all);
    }

    #[test]
    fn test_exact_date() {
        let result = filter(&sample(), &FilterCriteria::new().date(june(3)));
        assert_eq!(descriptions(&result), vec!["Electric Bill"]);
    }

    #[test]
    fn test_category() {
        let result = filter(&sample(), &FilterCriteria::new().category(Category::Food));
        assert_eq!(descriptions(&result), vec!["Grocery Store", "Restaurant"]);

        let all = filter(&sample(), &FilterCriteria::new().category(CategoryFilter::All));
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let result = filter(&sample(), &FilterCriteria::new().search("STORE"));
        assert_eq!(descriptions(&result), vec!["Grocery Store"]);
    }

    #[test]
    fn test_empty_search_matches_all() {
        let criteria = FilterCriteria::new().search("");
        assert!(criteria.is_empty());
        assert_eq!(filter(&sample(), &criteria).len(), 5);
    }

    #[test]
    fn test_amount_bounds_are_inclusive_and_signed() {
        let income_only = filter(&sample(), &FilterCriteria::new().min_amount(Money::zero()));
        assert_eq!(descriptions(&income_only), vec!["Salary Deposit"]);

        let criteria = FilterCriteria::new()
            .min_amount(Money::from_cents(-8500))
            .max_amount(Money::from_cents(-4999));
        let result = filter(&sample(), &criteria);
        assert_eq!(
            descriptions(&result),
            vec!["Grocery Store", "Online Purchase", "Restaurant"]
        );
    }

    #[test]
    fn test_all_criteria_are_anded() {
        let criteria = FilterCriteria::new()
            .category(Category::Food)
            .max_amount(Money::from_cents(-8000));
        assert_eq!(descriptions(&filter(&sample(), &criteria)), vec!["Restaurant"]);
    }

    #[test]
    fn test_period() {
        let mut all = sample();
        all.push(Transaction::new(
            NaiveDate::from_ymd_opt(2023, 7, 1).unwrap(),
            "July Rent",
            Money::from_cents(-150000),
            Category::Housing,
        ));
        let june_only = filter(&all, &FilterCriteria::new().period(Period::month(2023, 6).unwrap()));
        assert_eq!(june_only.len(), 5);
        let year = filter(&all, &FilterCriteria::new().period(Period::year(2023).unwrap()));
        assert_eq!(year.len(), 6);
    }

    #[test]
    fn test_no_matches_is_empty_not_error() {
        let result = filter(&sample(), &FilterCriteria::new().search("zzz"));
        assert!(result.is_empty());
        assert!(filter(&[], &FilterCriteria::new()).is_empty());
    }

    #[test]
    fn test_filter_refs_preserves_order() {
        let all = sample();
        let refs = filter_refs(&all, &FilterCriteria::new().max_amount(Money::zero()));
        let ids: Vec<_> = refs.iter().map(|t| t.id).collect();
        let expected: Vec<_> = all.iter().filter(|t| t.is_outflow()).map(|t| t.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_and_composes() {
        let all = sample();
        let c1 = FilterCriteria::new().category(Category::Food);
        let c2 = FilterCriteria::new().search("rest");
        let both = c1.and(&c2).unwrap();
        assert_eq!(filter(&filter(&all, &c1), &c2), filter(&all, &both));
    }

    #[test]
    fn test_and_tightens_bounds() {
        let a = FilterCriteria::new().min_amount(Money::from_cents(-10000));
        let b = FilterCriteria::new()
            .min_amount(Money::from_cents(-5000))
            .max_amount(Money::zero());
        let merged = a.and(&b).unwrap();
        assert_eq!(merged.min_amount, Some(Money::from_cents(-5000)));
        assert_eq!(merged.max_amount, Some(Money::zero()));
    }

    #[test]
    fn test_and_unsatisfiable() {
        let food = FilterCriteria::new().category(Category::Food);
        let income = FilterCriteria::new().category(Category::Income);
        assert!(food.and(&income).is_none());

        let d1 = FilterCriteria::new().date(june(1));
        let d2 = FilterCriteria::new().date(june(2));
        assert!(d1.and(&d2).is_none());

        let july = FilterCriteria::new().period(Period::month(2023, 7).unwrap());
        assert!(d1.and(&july).is_none());

        let year = FilterCriteria::new().period(Period::year(2023).unwrap());
        assert_eq!(
            july.and(&year).unwrap().period,
            Some(Period::month(2023, 7).unwrap())
        );
    }

    #[test]
    fn test_criteria_input_parses() {
        let input = CriteriaInput {
            date: Some("2023-06-01".into()),
            category: Some("all".into()),
            search: Some("store".into()),
            min_amount: Some("-100".into()),
            max_amount: Some("".into()),
            period: None,
        };
        let criteria = input.parse().unwrap();
        assert_eq!(criteria.date, Some(june(1)));
        assert!(criteria.category.is_all());
        assert_eq!(criteria.search_terms, vec!["store".to_string()]);
        assert_eq!(criteria.min_amount, Some(Money::from_cents(-10000)));
        assert_eq!(criteria.max_amount, None);
    }

    #[test]
    fn test_criteria_input_rejects_malformed_bounds() {
        let input = CriteriaInput {
            min_amount: Some("ten".into()),
            ..Default::default()
        };
        let err = input.parse().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("minimum"));

        let input = CriteriaInput {
            min_amount: Some("49.999".into()),
            ..Default::default()
        };
        assert!(input.parse().unwrap_err().is_validation());

        let input = CriteriaInput {
            date: Some("06/01/2023".into()),
            ..Default::default()
        };
        assert!(input.parse().unwrap_err().is_validation());

        let input = CriteriaInput {
            category: Some("groceries".into()),
            ..Default::default()
        };
        assert!(input.parse().unwrap_err().is_validation());
    }
}
