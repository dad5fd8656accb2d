//! Calendar periods used as time-bucket keys
//!
//! A period is a truncated calendar month or year. Periods order
//! chronologically, so a `BTreeMap<Period, _>` iterates oldest first.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::FinboardError;

/// Size of a time bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Month,
    Year,
}

impl FromStr for Granularity {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "month" | "monthly" => Ok(Self::Month),
            "year" | "yearly" => Ok(Self::Year),
            other => Err(PeriodParseError::InvalidFormat(other.to_string())),
        }
    }
}

/// A calendar month or year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Period {
    /// Monthly period (e.g., "2023-06")
    Month { year: i32, month: u32 },

    /// Calendar year (e.g., "2023")
    Year { year: i32 },
}

impl Period {
    /// Create a monthly period, rejecting months outside 1-12
    pub fn month(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        check_year(year)?;
        Ok(Self::Month { year, month })
    }

    /// Create a yearly period, rejecting years chrono cannot represent
    pub fn year(year: i32) -> Result<Self, PeriodParseError> {
        check_year(year)?;
        Ok(Self::Year { year })
    }

    /// Truncate a date to the period containing it
    pub fn of(date: NaiveDate, granularity: Granularity) -> Self {
        match granularity {
            Granularity::Month => Self::Month {
                year: date.year(),
                month: date.month(),
            },
            Granularity::Year => Self::Year { year: date.year() },
        }
    }

    pub fn granularity(&self) -> Granularity {
        match self {
            Self::Month { .. } => Granularity::Month,
            Self::Year { .. } => Granularity::Year,
        }
    }

    /// First day of the period
    pub fn start_date(&self) -> NaiveDate {
        let (year, month) = match self {
            Self::Month { year, month } => (*year, *month),
            Self::Year { year } => (*year, 1),
        };
        NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the period (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        let (year, month) = match self.next() {
            Self::Month { year, month } => (year, month),
            Self::Year { year } => (year, 1),
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Check if a date falls within this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            Self::Month { year, month } => date.year() == *year && date.month() == *month,
            Self::Year { year } => date.year() == *year,
        }
    }

    /// The period immediately after this one
    pub fn next(&self) -> Self {
        match self {
            Self::Month { year, month: 12 } => Self::Month {
                year: *year + 1,
                month: 1,
            },
            Self::Month { year, month } => Self::Month {
                year: *year,
                month: *month + 1,
            },
            Self::Year { year } => Self::Year { year: *year + 1 },
        }
    }

    /// Short human label ("Jun 2023", "2023")
    pub fn label(&self) -> String {
        match self {
            Self::Month { .. } => self.start_date().format("%b %Y").to_string(),
            Self::Year { year } => year.to_string(),
        }
    }

    /// Parse a period string
    ///
    /// Formats:
    /// - Monthly: "2023-06"
    /// - Yearly: "2023"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let invalid = || PeriodParseError::InvalidFormat(s.to_string());

        match s.split_once('-') {
            Some((year, month)) => {
                let year: i32 = year.parse().map_err(|_| invalid())?;
                let month: u32 = month.parse().map_err(|_| invalid())?;
                Self::month(year, month)
            }
            None => {
                if s.len() != 4 {
                    return Err(invalid());
                }
                let year: i32 = s.parse().map_err(|_| invalid())?;
                Self::year(year)
            }
        }
    }
}

fn check_year(year: i32) -> Result<(), PeriodParseError> {
    match NaiveDate::from_ymd_opt(year, 1, 1) {
        Some(_) => Ok(()),
        None => Err(PeriodParseError::YearOutOfRange(year)),
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = match self {
            Self::Month { year, month } => format!("{:04}-{:02}", year, month),
            Self::Year { year } => format!("{:04}", year),
        };
        f.pad(&rendered)
    }
}

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> Ordering {
        // A year sorts before the months it contains; month 0 stands for the year
        let key = |p: &Period| match *p {
            Period::Year { year } => (year, 0),
            Period::Month { year, month } => (year, month),
        };
        key(self).cmp(&key(other))
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    YearOutOfRange(i32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: '{}'", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            PeriodParseError::YearOutOfRange(y) => write!(f, "Year out of range: {}", y),
        }
    }
}

impl std::error::Error for PeriodParseError {}

impl From<PeriodParseError> for FinboardError {
    fn from(err: PeriodParseError) -> Self {
        FinboardError::Validation(err.to_string())
    }
}
