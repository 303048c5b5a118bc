use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] stockcast_core::ValidationError),

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("forecast failed: {0}")]
    Forecast(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) | Self::Rejected(_) => 2,
            Self::Forecast(_) => 3,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}

impl From<stockcast_forecast::ApiError> for CliError {
    fn from(error: stockcast_forecast::ApiError) -> Self {
        if error.is_client_error() {
            Self::Rejected(error.error)
        } else {
            Self::Forecast(error.error)
        }
    }
}
