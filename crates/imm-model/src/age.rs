//! Age quantities shared by the normalizer, the recommender and the CLI.
//!
//! Two kinds of age live here:
//!
//! - [`DayCount`]: the normalized position of a schedule age on the day
//!   timeline. Unparseable or open-ended ages become [`DayCount::Never`],
//!   which orders above every finite count and behaves as +infinity in
//!   window comparisons.
//! - [`AgeInput`]: a child's age as entered by a user, validated up front.
//!
//! A month is always 30 days and a year 365 days.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AgeInputError, Result};

pub const DAYS_PER_WEEK: u32 = 7;
pub const DAYS_PER_MONTH: u32 = 30;
pub const DAYS_PER_YEAR: u32 = 365;

/// Position of an age expression on the linear day scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayCount {
    Finite(u32),
    /// No finite day: never due, or no upper bound.
    Never,
}

impl DayCount {
    pub const BIRTH: DayCount = DayCount::Finite(0);

    /// Day value with `Never` mapped to +infinity.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Finite(days) => f64::from(days),
            Self::Never => f64::INFINITY,
        }
    }

    /// Shift a finite count forward, saturating at `u32::MAX`; `Never` stays `Never`.
    #[must_use]
    pub fn plus_days(self, days: u32) -> Self {
        match self {
            Self::Finite(start) => Self::Finite(start.saturating_add(days)),
            Self::Never => Self::Never,
        }
    }

    /// Compare against a (possibly fractional) child age in days.
    pub fn cmp_age(self, age_days: f64) -> Ordering {
        self.as_f64()
            .partial_cmp(&age_days)
            .unwrap_or(Ordering::Greater)
    }
}

impl fmt::Display for DayCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(days) => write!(f, "{days} days"),
            Self::Never => f.write_str("never"),
        }
    }
}

/// Which schedule's age notation an expression is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeDialect {
    /// Prose ages: "6 weeks", "at birth", "within 24 hours".
    Nip,
    /// Compact column tokens: "6w", "9m", "5y".
    Iap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeUnit {
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl AgeUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hours => "hours",
            Self::Days => "days",
            Self::Weeks => "weeks",
            Self::Months => "months",
            Self::Years => "years",
        }
    }

    pub fn to_days(self, value: f64) -> f64 {
        match self {
            Self::Hours => value / 24.0,
            Self::Days => value,
            Self::Weeks => value * f64::from(DAYS_PER_WEEK),
            Self::Months => value * f64::from(DAYS_PER_MONTH),
            Self::Years => value * f64::from(DAYS_PER_YEAR),
        }
    }
}

impl FromStr for AgeUnit {
    type Err = AgeInputError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "hour" | "hours" => Ok(Self::Hours),
            "day" | "days" => Ok(Self::Days),
            "week" | "weeks" => Ok(Self::Weeks),
            "month" | "months" => Ok(Self::Months),
            "year" | "years" => Ok(Self::Years),
            _ => Err(AgeInputError::UnknownUnit(raw.trim().to_string())),
        }
    }
}

impl fmt::Display for AgeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated child age.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeInput {
    value: f64,
    unit: AgeUnit,
}

impl AgeInput {
    /// Validate a numeric value; non-finite and negative values are rejected.
    pub fn new(value: f64, unit: AgeUnit) -> Result<Self> {
        if !value.is_finite() {
            return Err(AgeInputError::NotANumber(value.to_string()));
        }
        if value < 0.0 {
            return Err(AgeInputError::Negative);
        }
        Ok(Self { value, unit })
    }

    /// Parse the raw value and unit strings of a form submission.
    pub fn parse(value: &str, unit: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AgeInputError::Empty);
        }
        let number: f64 = trimmed
            .parse()
            .map_err(|_| AgeInputError::NotANumber(trimmed.to_string()))?;
        let unit = unit.parse()?;
        Self::new(number, unit)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> AgeUnit {
        self.unit
    }

    pub fn to_days(&self) -> f64 {
        self.unit.to_days(self.value)
    }
}

impl fmt::Display for AgeInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}
