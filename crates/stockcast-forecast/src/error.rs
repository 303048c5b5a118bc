use std::path::PathBuf;

use stockcast_core::{SourceError, ValidationError};
use thiserror::Error;

/// Failures loading or invoking the sequence model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode model artifact")]
    Decode(#[from] serde_json::Error),

    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    Shape {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("model produced a non-finite prediction: {value}")]
    NonFinite { value: f64 },

    #[error("model initialisation failed: {0}")]
    Initialization(String),
}

/// Error taxonomy of a single forecast request.
///
/// Only [`ForecastError::Validation`] is meant to reach the caller verbatim;
/// everything else is logged and reported generically.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("{0}")]
    Validation(String),

    #[error("insufficient history: {required} rows required, {actual} available")]
    InsufficientHistory { required: usize, actual: usize },

    #[error("historical data unavailable")]
    Upstream(#[from] SourceError),

    #[error("model inference failed")]
    ModelInference(#[from] ModelError),

    #[error("internal forecast error: {0}")]
    Internal(String),
}

impl ForecastError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "forecast.validation",
            Self::InsufficientHistory { .. } => "forecast.insufficient_history",
            Self::Upstream(_) => "forecast.upstream",
            Self::ModelInference(_) => "forecast.model_inference",
            Self::Internal(_) => "forecast.internal",
        }
    }
}

impl From<ValidationError> for ForecastError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value.to_string())
    }
}

/// Renders an error and all of its sources as `outer: inner: root`.
pub fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}
