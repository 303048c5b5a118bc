use std::sync::Arc;

use stockcast_core::HistorySource;
use stockcast_forecast::{ForecastConfig, ForecastService, PredictRequest};
use tracing::debug;

use crate::cli::PredictArgs;
use crate::error::CliError;
use crate::output;

/// Runs one forecast request. Failures still print the `{"error": ...}` body
/// before surfacing as a non-zero exit code.
pub async fn run(
    args: &PredictArgs,
    config: &ForecastConfig,
    source: Arc<dyn HistorySource>,
    pretty: bool,
) -> Result<(), CliError> {
    debug!(
        model = %config.model_path().display(),
        period = %config.history_period,
        "resolved configuration"
    );

    let service = ForecastService::from_config(config, source);
    let request = PredictRequest::new(args.ticker.as_str(), args.duration.as_str());

    match service.predict(&request).await {
        Ok(response) => output::render(&response, pretty),
        Err(error) => {
            output::render(&error, pretty)?;
            Err(CliError::from(error))
        }
    }
}
