//! Category registry
//!
//! Transactions carry one tag from a fixed category set. The registry maps
//! each tag to its stable key, display label and icon; the aggregation
//! reports use it to turn group keys into human labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FinboardError;

/// A transaction category
///
/// Declaration order is the registry order, which is also the `Ord` order
/// used when category groups are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    #[serde(alias = "transport")]
    Transportation,
    Housing,
    Utilities,
    Entertainment,
    Shopping,
    Health,
    Travel,
    Education,
    Personal,
    Income,
    Other,
}

impl Category {
    /// Every category in registry order
    pub fn all() -> &'static [Self] {
        &[
            Self::Food,
            Self::Transportation,
            Self::Housing,
            Self::Utilities,
            Self::Entertainment,
            Self::Shopping,
            Self::Health,
            Self::Travel,
            Self::Education,
            Self::Personal,
            Self::Income,
            Self::Other,
        ]
    }

    /// Stable lowercase key, as stored in datasets
    pub fn key(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Transportation => "transportation",
            Self::Housing => "housing",
            Self::Utilities => "utilities",
            Self::Entertainment => "entertainment",
            Self::Shopping => "shopping",
            Self::Health => "health",
            Self::Travel => "travel",
            Self::Education => "education",
            Self::Personal => "personal",
            Self::Income => "income",
            Self::Other => "other",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Food => "Food & Dining",
            Self::Transportation => "Transportation",
            Self::Housing => "Housing",
            Self::Utilities => "Utilities",
            Self::Entertainment => "Entertainment",
            Self::Shopping => "Shopping",
            Self::Health => "Health",
            Self::Travel => "Travel",
            Self::Education => "Education",
            Self::Personal => "Personal",
            Self::Income => "Income",
            Self::Other => "Other",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Food => "🍽️",
            Self::Transportation => "🚗",
            Self::Housing => "🏠",
            Self::Utilities => "💡",
            Self::Entertainment => "🎭",
            Self::Shopping => "🛍️",
            Self::Health => "🏥",
            Self::Travel => "✈️",
            Self::Education => "📚",
            Self::Personal => "👤",
            Self::Income => "💰",
            Self::Other => "📦",
        }
    }

    /// Whether this is the income category
    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    /// Parse a category from its key or label, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        if needle == "transport" {
            return Ok(Self::Transportation);
        }
        Self::all()
            .iter()
            .copied()
            .find(|c| c.key() == needle || c.label().to_lowercase() == needle)
            .ok_or_else(|| CategoryParseError::Unknown(s.trim().to_string()))
    }
}

/// Category criterion: everything, or exactly one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == category,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        Self::Only(category)
    }
}

impl FromStr for CategoryFilter {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            trimmed.parse().map(Self::Only)
        }
    }
}

/// Error type for category parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryParseError {
    Unknown(String),
}

impl fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(s) => write!(f, "Unknown category: '{}'", s),
        }
    }
}

impl std::error::Error for CategoryParseError {}

impl From<CategoryParseError> for FinboardError {
    fn from(err: CategoryParseError) -> Self {
        FinboardError::Validation(err.to_string())
    }
}
