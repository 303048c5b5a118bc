//! End-to-end composition of the forecasting stages for one history.

use stockcast_core::PriceHistory;
use tracing::debug;

use crate::error::ForecastError;
use crate::forecaster::forecast;
use crate::model::SequenceModel;
use crate::postprocess::{postprocess, Annotations, ForecastSummary};
use crate::scaler::{fit_and_scale, FeatureMatrix};
use crate::window::window;
use crate::TIME_STEP;

/// Scales `history`, seeds a window from its tail, rolls `model` forward
/// `n_steps` business days and summarizes the result.
pub fn forecast_history<M>(
    model: &M,
    history: &PriceHistory,
    n_steps: usize,
    annotations: Annotations,
) -> Result<ForecastSummary, ForecastError>
where
    M: SequenceModel + ?Sized,
{
    let matrix = FeatureMatrix::from_history(history);
    let scaled = fit_and_scale(&matrix)?;
    debug!(rows = matrix.rows(), "fitted feature scalers");

    let input = window(scaled.scaled.view(), TIME_STEP)?;
    let predictions = forecast(model, &input, n_steps)?;

    postprocess(&predictions, &scaled.close, history, annotations)
}

#[cfg(test)]
mod tests {
    use stockcast_core::{DailyBar, Symbol};
    use time::macros::date;

    use super::*;
    use crate::error::ModelError;
    use crate::postprocess::business_days_after;
    use crate::window::InputWindow;

    struct ConstantModel(f64);

    impl SequenceModel for ConstantModel {
        fn predict(&self, _window: &InputWindow) -> Result<f64, ModelError> {
            Ok(self.0)
        }
    }

    fn rising_history(rows: usize) -> PriceHistory {
        let dates = business_days_after(date!(2023 - 01 - 01), rows).expect("dates");
        let bars = dates
            .into_iter()
            .enumerate()
            .map(|(i, date)| {
                let close = 100.0 + i as f64;
                DailyBar::new(date, close - 0.5, close + 1.0, close - 1.0, close, 5_000.0)
                    .expect("valid bar")
            })
            .collect();
        PriceHistory::new(Symbol::parse("MSFT").expect("symbol"), bars).expect("ordered")
    }

    fn annotations() -> Annotations {
        Annotations {
            narrative: String::new(),
            accuracy_label: String::from("87.5%"),
        }
    }

    #[test]
    fn inverts_predictions_against_full_history_bounds() {
        let history = rising_history(80);
        let summary =
            forecast_history(&ConstantModel(1.0), &history, 5, annotations()).expect("forecast");

        // close spans 100..=179, so a scaled 1.0 is the historical max close.
        assert!(summary
            .forecast
            .iter()
            .all(|point| (point.predicted_close - 179.0).abs() < 1e-9));
        assert_eq!(summary.growth_percentage, "0.00%");
    }

    #[test]
    fn rejects_history_shorter_than_window() {
        let history = rising_history(TIME_STEP - 1);
        let err = forecast_history(&ConstantModel(0.5), &history, 5, annotations())
            .expect_err("must fail");
        assert!(matches!(
            err,
            ForecastError::InsufficientHistory {
                required: TIME_STEP,
                ..
            }
        ));
    }
}
