//! Human-readable expiration durations
//!
//! `"<amount> <unit>"`, e.g. `"2 minutes"` or `"1 Day"`.
//! Month and year are fixed lengths (30 and 365 days), not calendar-aware.

use crate::error::ClientError;
use crate::Result;

const SECOND_MS: i64 = 1_000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;
const WEEK_MS: i64 = 7 * DAY_MS;
const MONTH_MS: i64 = 30 * DAY_MS;
const YEAR_MS: i64 = 365 * DAY_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl TimeUnit {
    pub fn as_millis(&self) -> i64 {
        match self {
            TimeUnit::Second => SECOND_MS,
            TimeUnit::Minute => MINUTE_MS,
            TimeUnit::Hour => HOUR_MS,
            TimeUnit::Day => DAY_MS,
            TimeUnit::Week => WEEK_MS,
            TimeUnit::Month => MONTH_MS,
            TimeUnit::Year => YEAR_MS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Second => "second",
            TimeUnit::Minute => "minute",
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
            TimeUnit::Week => "week",
            TimeUnit::Month => "month",
            TimeUnit::Year => "year",
        }
    }
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TimeUnit {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_lowercase();
        // Plural forms drop a single trailing "s"
        let singular = lower.strip_suffix('s').unwrap_or(&lower);

        match singular {
            "second" => Ok(TimeUnit::Second),
            "minute" => Ok(TimeUnit::Minute),
            "hour" => Ok(TimeUnit::Hour),
            "day" => Ok(TimeUnit::Day),
            "week" => Ok(TimeUnit::Week),
            "month" => Ok(TimeUnit::Month),
            "year" => Ok(TimeUnit::Year),
            _ => Err(ClientError::InvalidDuration(format!("unknown time unit: {}", s))),
        }
    }
}

/// A parsed `"<amount> <unit>"` duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiresIn {
    pub amount: u32,
    pub unit: TimeUnit,
}

impl ExpiresIn {
    pub fn new(amount: u32, unit: TimeUnit) -> Self {
        Self { amount, unit }
    }

    /// `None` when the length does not fit in an `i64` of milliseconds
    pub fn as_millis(&self) -> Option<i64> {
        i64::from(self.amount).checked_mul(self.unit.as_millis())
    }

    /// Absolute expiration instant relative to `now_millis`
    pub fn expires_at(&self, now_millis: i64) -> Result<i64> {
        self.as_millis()
            .and_then(|millis| now_millis.checked_add(millis))
            .ok_or_else(|| ClientError::InvalidDuration(format!("{} overflows", self)))
    }
}

impl std::fmt::Display for ExpiresIn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.unit)
    }
}

impl std::str::FromStr for ExpiresIn {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();

        let (Some(amount), Some(unit), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ClientError::InvalidDuration(format!(
                "expected \"<amount> <unit>\", got {:?}",
                s
            )));
        };

        let amount = amount.parse::<u32>().map_err(|_| {
            ClientError::InvalidDuration(format!("invalid amount {:?} in {:?}", amount, s))
        })?;

        Ok(Self::new(amount, unit.parse()?))
    }
}

/// Parse `duration` and add it to `now_millis`.
pub fn calculate_expiration_timestamp(duration: &str, now_millis: i64) -> Result<i64> {
    duration.parse::<ExpiresIn>()?.expires_at(now_millis)
}
