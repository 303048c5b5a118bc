mod predict;

use std::sync::Arc;

use stockcast_core::{HistorySource, ReqwestHttpClient, YahooAdapter};
use stockcast_forecast::ForecastConfig;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    let config = resolve_config(cli, ForecastConfig::from_env()?);
    let source = history_source(cli);

    match &cli.command {
        Command::Predict(args) => predict::run(args, &config, source, cli.pretty).await,
    }
}

/// Applies CLI flags on top of the environment-derived config.
fn resolve_config(cli: &Cli, mut config: ForecastConfig) -> ForecastConfig {
    if let Some(base_dir) = &cli.base_dir {
        config.base_dir = base_dir.clone();
    }
    if let Some(model_file) = &cli.model_file {
        config.model_file = model_file.clone();
    }
    if let Some(period) = cli.period {
        config.history_period = period;
    }
    config
}

fn history_source(cli: &Cli) -> Arc<dyn HistorySource> {
    if cli.offline {
        return Arc::new(YahooAdapter::default());
    }
    Arc::new(
        YahooAdapter::with_http_client(Arc::new(ReqwestHttpClient::new()))
            .with_timeout_ms(cli.timeout_ms),
    )
}
