//! finboard - personal finance dashboard core
//!
//! Filters and aggregates transactions for a personal-finance dashboard:
//! spending by category, income against expenses over time, budget usage
//! with nearing/over-limit flags, and account net worth.
//!
//! # Architecture
//!
//! - `models`: records and value types (money, categories, periods, ...)
//! - `services`: the transaction filter, the aggregator, budget and
//!   account helpers; stateless functions over borrowed slices
//! - `reports`: report generation, terminal rendering and CSV export
//! - `storage`: dataset loading (JSON, YAML, CSV) and the built-in sample
//! - `config`: paths and user settings
//! - `display`, `cli`: the terminal front end
//!
//! # Example
//!
//! ```
//! use finboard::models::Category;
//! use finboard::services::{aggregate, filter, net_savings, FilterCriteria, GroupBy};
//! use finboard::storage::Dataset;
//!
//! let data = Dataset::sample();
//! let food = filter(&data.transactions, &FilterCriteria::new().category(Category::Food));
//! assert_eq!(food.len(), 2);
//!
//! let by_category = aggregate(&data.transactions, GroupBy::Category);
//! let total: i64 = by_category.values().map(|a| a.total.cents()).sum();
//! assert_eq!(total, net_savings(&data.transactions).cents());
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FinboardError, FinboardResult};
