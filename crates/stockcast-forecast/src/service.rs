//! Request boundary: validation, orchestration and error reporting.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use stockcast_core::{ForecastHorizon, HistoryPeriod, HistoryRequest, HistorySource, Symbol};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::ForecastConfig;
use crate::error::{error_chain, ForecastError};
use crate::model::ModelCache;
use crate::narrative::{NarrativeSource, TemplateNarrative, PREDICTION_ACCURACY_LABEL};
use crate::pipeline::forecast_history;
use crate::postprocess::{Annotations, ForecastSummary};

pub const MISSING_FIELDS_MESSAGE: &str = "Ticker and duration are required.";
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred.";

/// Inbound forecast request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

impl PredictRequest {
    pub fn new(ticker: impl Into<String>, duration: impl Into<String>) -> Self {
        Self {
            ticker: Some(ticker.into()),
            duration: Some(duration.into()),
        }
    }

    /// Checks required fields and resolves the ticker and horizon.
    ///
    /// Duration codes match exactly; anything else falls back to one week.
    pub fn validate(&self) -> Result<(Symbol, ForecastHorizon), ForecastError> {
        let present = |field: &Option<String>| {
            field
                .as_deref()
                .filter(|value| !value.trim().is_empty())
                .map(str::to_owned)
        };
        let (Some(ticker), Some(duration)) = (present(&self.ticker), present(&self.duration))
        else {
            return Err(ForecastError::Validation(String::from(MISSING_FIELDS_MESSAGE)));
        };

        let symbol = Symbol::parse(&ticker)?;
        let horizon = ForecastHorizon::from_code(&duration);
        if horizon.as_str() != duration {
            warn!(duration = %duration, "unknown duration, forecasting one week");
        }

        Ok((symbol, horizon))
    }
}

/// Dates and prices of a forecast, index-aligned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub dates: Vec<String>,
    pub prices: Vec<f64>,
}

/// Successful response payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub ticker: String,
    pub forecast: ForecastSeries,
    pub historical_high: f64,
    pub historical_low: f64,
    pub growth_percentage: String,
    pub news_analysis: String,
    pub prediction_accuracy: String,
}

impl From<ForecastSummary> for PredictResponse {
    fn from(summary: ForecastSummary) -> Self {
        let (dates, prices) = summary
            .forecast
            .iter()
            .map(|point| (point.date.to_string(), point.predicted_close))
            .unzip();

        Self {
            ticker: summary.ticker.into(),
            forecast: ForecastSeries { dates, prices },
            historical_high: summary.historical_high,
            historical_low: summary.historical_low,
            growth_percentage: summary.growth_percentage,
            news_analysis: summary.narrative_text,
            prediction_accuracy: summary.accuracy_label,
        }
    }
}

/// Failure response: a status code and a caller-safe message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{error}")]
pub struct ApiError {
    #[serde(skip)]
    pub status: u16,
    pub error: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: 400,
            error: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self {
            status: 500,
            error: String::from(INTERNAL_ERROR_MESSAGE),
        }
    }

    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }
}

impl From<&ForecastError> for ApiError {
    fn from(error: &ForecastError) -> Self {
        if error.is_client_error() {
            Self::bad_request(error.to_string())
        } else {
            Self::internal()
        }
    }
}

/// Forecast service shared by every request of the process.
pub struct ForecastService {
    source: Arc<dyn HistorySource>,
    models: Arc<ModelCache>,
    narrative: Arc<dyn NarrativeSource>,
    period: HistoryPeriod,
}

impl ForecastService {
    pub fn new(source: Arc<dyn HistorySource>, models: Arc<ModelCache>) -> Self {
        Self {
            source,
            models,
            narrative: Arc::new(TemplateNarrative),
            period: HistoryPeriod::default(),
        }
    }

    /// Service reading the model artifact and history period from `config`.
    pub fn from_config(config: &ForecastConfig, source: Arc<dyn HistorySource>) -> Self {
        Self::new(source, Arc::new(ModelCache::from_path(config.model_path())))
            .with_history_period(config.history_period)
    }

    pub fn with_narrative(mut self, narrative: Arc<dyn NarrativeSource>) -> Self {
        self.narrative = narrative;
        self
    }

    pub fn with_history_period(mut self, period: HistoryPeriod) -> Self {
        self.period = period;
        self
    }

    pub fn models(&self) -> &ModelCache {
        &self.models
    }

    /// Runs the pipeline for an already validated ticker and horizon.
    pub async fn forecast(
        &self,
        symbol: &Symbol,
        horizon: ForecastHorizon,
    ) -> Result<ForecastSummary, ForecastError> {
        let model = self.models.get().await?;

        let history = self
            .source
            .daily_history(HistoryRequest::new(symbol.clone(), self.period))
            .await?;

        let annotations = Annotations {
            narrative: self.narrative.analyze(symbol),
            accuracy_label: String::from(PREDICTION_ACCURACY_LABEL),
        };

        forecast_history(model.as_ref(), &history, horizon.steps(), annotations)
    }

    /// Handles one inbound request. All-or-nothing: no partial forecast is
    /// ever returned.
    pub async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, ApiError> {
        let started = Instant::now();

        let result = match request.validate() {
            Ok((symbol, horizon)) => self
                .forecast(&symbol, horizon)
                .await
                .map(PredictResponse::from),
            Err(error) => Err(error),
        };

        match result {
            Ok(response) => {
                info!(
                    ticker = %response.ticker,
                    steps = response.forecast.prices.len(),
                    source = self.source.id(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "forecast completed"
                );
                Ok(response)
            }
            Err(error) if error.is_client_error() => {
                warn!(error = %error, "rejected forecast request");
                Err(ApiError::from(&error))
            }
            Err(error) => {
                error!(
                    ticker = request.ticker.as_deref().unwrap_or_default(),
                    code = error.code(),
                    error = %error_chain(&error),
                    debug = ?error,
                    "forecast request failed"
                );
                Err(ApiError::from(&error))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_fields_are_validation_errors() {
        let cases = [
            PredictRequest::default(),
            PredictRequest {
                ticker: Some(String::from("AAPL")),
                duration: None,
            },
            PredictRequest::new("  ", "1m"),
        ];
        for request in cases {
            let err = request.validate().expect_err("must fail");
            assert_eq!(err.to_string(), MISSING_FIELDS_MESSAGE);
        }
    }

    #[test]
    fn unknown_duration_falls_back_to_one_week() {
        let (symbol, horizon) = PredictRequest::new("aapl", "6m").validate().expect("valid");
        assert_eq!(symbol.as_str(), "AAPL");
        assert_eq!(horizon.steps(), 5);
    }

    #[test]
    fn duration_codes_are_not_trimmed_or_case_folded() {
        for code in ["1Y", "1M", " 1m "] {
            let (_, horizon) = PredictRequest::new("AAPL", code).validate().expect("valid");
            assert_eq!(horizon.steps(), 5, "{code:?}");
        }
        let (_, horizon) = PredictRequest::new("AAPL", "1y").validate().expect("valid");
        assert_eq!(horizon.steps(), 252);
    }

    #[test]
    fn malformed_ticker_is_a_validation_error() {
        let err = PredictRequest::new("AA PL", "1w").validate().expect_err("must fail");
        assert!(err.is_client_error());
        assert!(err.to_string().contains("invalid character"));
    }

    #[test]
    fn request_deserializes_with_missing_fields() {
        let request: PredictRequest =
            serde_json::from_str(r#"{"ticker":"TSLA"}"#).expect("valid json");
        assert_eq!(request.duration, None);
    }

    #[test]
    fn internal_errors_hide_details() {
        let error = ForecastError::InsufficientHistory {
            required: 60,
            actual: 3,
        };
        let api_error = ApiError::from(&error);
        assert_eq!(api_error.status, 500);
        assert_eq!(api_error.error, INTERNAL_ERROR_MESSAGE);
        assert_eq!(
            serde_json::to_value(&api_error).expect("json"),
            serde_json::json!({"error": INTERNAL_ERROR_MESSAGE})
        );
    }
}
