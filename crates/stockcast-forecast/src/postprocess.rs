//! Converts scaled predictions into a dated, real-unit forecast summary.

use stockcast_core::{PriceHistory, Symbol};
use time::{Date, Weekday};

use crate::error::ForecastError;
use crate::scaler::MinMaxTransform;

/// One forecast business day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastPoint {
    pub date: Date,
    pub predicted_close: f64,
}

/// Opaque strings embedded into the summary as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotations {
    pub narrative: String,
    pub accuracy_label: String,
}

/// Result of one forecast request.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSummary {
    pub ticker: Symbol,
    pub forecast: Vec<ForecastPoint>,
    /// Highest `high` over the trailing horizon-length slice of *history*.
    pub historical_high: f64,
    /// Lowest `low` over the trailing horizon-length slice of *history*.
    pub historical_low: f64,
    pub growth_percentage: String,
    pub narrative_text: String,
    pub accuracy_label: String,
}

/// Inverse-scales predictions, labels them with business days and computes
/// the summary statistics.
///
/// The high/low range deliberately describes the last `n` observed days,
/// not the forecast itself.
pub fn postprocess(
    scaled_predictions: &[f64],
    close_transform: &MinMaxTransform,
    history: &PriceHistory,
    annotations: Annotations,
) -> Result<ForecastSummary, ForecastError> {
    let last_bar = history
        .last()
        .ok_or_else(|| ForecastError::internal("cannot post-process an empty history"))?;

    let prices = close_transform.inverse(scaled_predictions)?;
    let final_price = *prices
        .last()
        .ok_or_else(|| ForecastError::internal("forecast produced no predictions"))?;

    let dates = business_days_after(last_bar.date, prices.len())?;
    let forecast = dates
        .into_iter()
        .zip(prices)
        .map(|(date, predicted_close)| ForecastPoint {
            date,
            predicted_close,
        })
        .collect::<Vec<_>>();

    let (historical_high, historical_low) = recent_range(history, forecast.len());
    let growth_percentage = format_growth(last_bar.close, final_price)?;

    Ok(ForecastSummary {
        ticker: history.symbol().clone(),
        forecast,
        historical_high,
        historical_low,
        growth_percentage,
        narrative_text: annotations.narrative,
        accuracy_label: annotations.accuracy_label,
    })
}

/// `count` consecutive Monday-Friday dates strictly after `last`. No holiday calendar.
pub fn business_days_after(last: Date, count: usize) -> Result<Vec<Date>, ForecastError> {
    let mut dates = Vec::with_capacity(count);
    let mut cursor = last;
    while dates.len() < count {
        cursor = cursor
            .next_day()
            .ok_or_else(|| ForecastError::internal("forecast dates overflow the calendar"))?;
        if !matches!(cursor.weekday(), Weekday::Saturday | Weekday::Sunday) {
            dates.push(cursor);
        }
    }
    Ok(dates)
}

/// Max `high` and min `low` over the trailing `n` bars (all bars if fewer).
pub fn recent_range(history: &PriceHistory, n: usize) -> (f64, f64) {
    history.tail(n).iter().fold(
        (f64::NEG_INFINITY, f64::INFINITY),
        |(high, low), bar| (high.max(bar.high), low.min(bar.low)),
    )
}

/// `(final - last) / last * 100` with two decimals and a percent sign.
pub fn format_growth(last_close: f64, final_price: f64) -> Result<String, ForecastError> {
    if last_close <= 0.0 {
        return Err(ForecastError::internal(format!(
            "cannot compute growth from a last close of {last_close}"
        )));
    }
    let growth = (final_price - last_close) / last_close * 100.0;
    Ok(format!("{growth:.2}%"))
}
