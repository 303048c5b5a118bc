//! Autoregressive closing-price forecasting on top of `stockcast-core`.
//!
//! | Module | Responsibility |
//! |---|---|
//! | [`scaler`] | Feature matrix and per-column min-max transforms |
//! | [`window`] | Fixed-length model input windows |
//! | [`model`] | Sequence model contract, JSON artifact, lazy model cache |
//! | [`forecaster`] | Multi-step autoregressive rollout |
//! | [`postprocess`] | Inverse scaling, forecast dates, range and growth |
//! | [`pipeline`] | The stages above composed over one history |
//! | [`service`] | Request validation and error mapping |
//!
//! ```ignore
//! let config = ForecastConfig::from_env()?;
//! let service = ForecastService::from_config(&config, Arc::new(YahooAdapter::default()));
//! let response = service.predict(&PredictRequest::new("AAPL", "1m")).await?;
//! ```

pub mod config;
pub mod error;
pub mod forecaster;
pub mod model;
pub mod narrative;
pub mod pipeline;
pub mod postprocess;
pub mod scaler;
pub mod service;
pub mod window;

use stockcast_core::Feature;

/// Number of trailing observations fed to the model per prediction.
pub const TIME_STEP: usize = 60;
/// Width of every observation row.
pub const FEATURE_COUNT: usize = Feature::COUNT;

pub use config::ForecastConfig;
pub use error::{error_chain, ForecastError, ModelError};
pub use forecaster::forecast;
pub use model::{DenseReadoutModel, ModelCache, SequenceModel};
pub use narrative::{NarrativeSource, TemplateNarrative, PREDICTION_ACCURACY_LABEL};
pub use pipeline::forecast_history;
pub use postprocess::{Annotations, ForecastPoint, ForecastSummary};
pub use scaler::{fit_and_scale, FeatureMatrix, MinMaxTransform, ScaledFeatures};
pub use service::{ApiError, ForecastSeries, ForecastService, PredictRequest, PredictResponse};
pub use window::{window, InputWindow};
