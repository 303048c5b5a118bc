//! # Domain Models
//!
//! Canonical domain types for stockcast.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated ticker symbol |
//! | [`DailyBar`] | One trading day of OHLCV data |
//! | [`PriceHistory`] | Date-ordered bars for one symbol |
//! | [`Feature`] | Tracked feature columns and their fixed order |
//! | [`ForecastHorizon`] | Requested forecast length (1w, 1m, 1y) |
//! | [`HistoryPeriod`] | Trailing history window requested from a provider |
//!
//! All models validate their invariants at construction time:
//!
//! ```rust
//! use stockcast_core::{DailyBar, ValidationError};
//! use time::macros::date;
//!
//! let invalid = DailyBar::new(date!(2024 - 01 - 02), 100.0, 95.0, 105.0, 102.0, 1_000.0);
//! assert!(matches!(invalid, Err(ValidationError::InvalidBarRange)));
//! ```

mod bar;
mod horizon;
mod symbol;

pub use bar::{DailyBar, Feature, PriceHistory};
pub use horizon::{ForecastHorizon, HistoryPeriod};
pub use symbol::Symbol;
