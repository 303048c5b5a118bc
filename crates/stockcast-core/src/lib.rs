//! # Stockcast Core
//!
//! Core contracts and domain types shared by the stockcast forecasting
//! pipeline.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (Yahoo Finance) |
//! | [`data_source`] | History source trait and request/error types |
//! | [`domain`] | Domain models (Symbol, DailyBar, PriceHistory, ForecastHorizon) |
//! | [`error`] | Validation errors |
//! | [`http_client`] | HTTP client abstraction |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stockcast_core::{HistoryPeriod, HistoryRequest, HistorySource, Symbol, YahooAdapter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Offline adapter: deterministic synthetic history, no network.
//!     let adapter = YahooAdapter::default();
//!
//!     let request = HistoryRequest::new(Symbol::parse("AAPL")?, HistoryPeriod::FiveYears);
//!     let history = adapter.daily_history(request).await?;
//!
//!     if let Some(bar) = history.last() {
//!         println!("{} close on {}: {:.2}", history.symbol(), bar.date, bar.close);
//!     }
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;

pub use adapters::YahooAdapter;

pub use data_source::{HistoryRequest, HistorySource, SourceError, SourceErrorKind};

pub use domain::{DailyBar, Feature, ForecastHorizon, HistoryPeriod, PriceHistory, Symbol};

pub use error::ValidationError;

pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient,
};
