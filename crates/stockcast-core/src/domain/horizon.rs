use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Requested forecast length, expressed in trading days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForecastHorizon {
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "1y")]
    OneYear,
}

impl ForecastHorizon {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneWeek => "1w",
            Self::OneMonth => "1m",
            Self::OneYear => "1y",
        }
    }

    /// Number of business days forecast for this horizon.
    pub const fn steps(self) -> usize {
        match self {
            Self::OneWeek => 5,
            Self::OneMonth => 21,
            Self::OneYear => 252,
        }
    }

    /// Exact, case-sensitive lookup; `None` for anything but `1w`, `1m`, `1y`.
    pub fn lookup(code: &str) -> Option<Self> {
        match code {
            "1w" => Some(Self::OneWeek),
            "1m" => Some(Self::OneMonth),
            "1y" => Some(Self::OneYear),
            _ => None,
        }
    }

    /// Lenient lookup used for inbound requests: unknown codes forecast one week.
    pub fn from_code(code: &str) -> Self {
        Self::lookup(code).unwrap_or(Self::OneWeek)
    }
}

impl Display for ForecastHorizon {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trailing window of daily history requested from a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistoryPeriod {
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "10y")]
    TenYears,
    #[serde(rename = "max")]
    Max,
}

impl HistoryPeriod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneYear => "1y",
            Self::TwoYears => "2y",
            Self::FiveYears => "5y",
            Self::TenYears => "10y",
            Self::Max => "max",
        }
    }

    /// Approximate number of trading days covered, used by offline sources.
    pub const fn approx_trading_days(self) -> usize {
        match self {
            Self::OneYear => 252,
            Self::TwoYears => 504,
            Self::FiveYears => 1_260,
            Self::TenYears => 2_520,
            Self::Max => 5_040,
        }
    }
}

impl Default for HistoryPeriod {
    fn default() -> Self {
        Self::FiveYears
    }
}

impl Display for HistoryPeriod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryPeriod {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1y" => Ok(Self::OneYear),
            "2y" => Ok(Self::TwoYears),
            "5y" => Ok(Self::FiveYears),
            "10y" => Ok(Self::TenYears),
            "max" => Ok(Self::Max),
            other => Err(ValidationError::InvalidPeriod {
                value: other.to_owned(),
            }),
        }
    }
}
