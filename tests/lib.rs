//! Shared fixtures for the behaviour tests: stub models, canned histories
//! and in-memory history sources.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};

pub use std::sync::Arc;

use stockcast_core::{DailyBar, HistoryRequest, HistorySource, PriceHistory, SourceError, Symbol};
use stockcast_forecast::{InputWindow, ModelError, SequenceModel, TIME_STEP};
use time::{Date, Weekday};

/// Always predicts the same scaled value.
pub struct ConstantModel(pub f64);

impl SequenceModel for ConstantModel {
    fn predict(&self, _window: &InputWindow) -> Result<f64, ModelError> {
        Ok(self.0)
    }
}

/// Predicts the newest scaled close plus `step`, so each prediction depends
/// on the one fed back before it.
pub struct DriftModel {
    pub step: f64,
}

impl SequenceModel for DriftModel {
    fn predict(&self, window: &InputWindow) -> Result<f64, ModelError> {
        let steps = window.steps();
        Ok(steps[[steps.nrows() - 1, 0]] + self.step)
    }
}

/// `count` weekdays ending on `last` (inclusive), oldest first.
pub fn weekdays_ending(last: Date, count: usize) -> Vec<Date> {
    let mut dates = Vec::with_capacity(count);
    let mut cursor = last;
    while dates.len() < count {
        if !matches!(cursor.weekday(), Weekday::Saturday | Weekday::Sunday) {
            dates.push(cursor);
        }
        cursor = cursor.previous_day().expect("date within calendar range");
    }
    dates.reverse();
    dates
}

/// History whose bars are flat at each given close (open = high = low = close).
pub fn history_from_closes(ticker: &str, last: Date, closes: &[f64]) -> PriceHistory {
    let bars = weekdays_ending(last, closes.len())
        .into_iter()
        .zip(closes)
        .map(|(date, &close)| {
            DailyBar::new(date, close, close, close, close, 1_000_000.0).expect("valid bar")
        })
        .collect();
    PriceHistory::new(Symbol::parse(ticker).expect("valid symbol"), bars).expect("ordered bars")
}

/// A full model window of constant closes.
pub fn flat_history(ticker: &str, last: Date, close: f64) -> PriceHistory {
    history_from_closes(ticker, last, &vec![close; TIME_STEP])
}

/// Serves a fixed history and counts how often it was asked.
pub struct StaticSource {
    history: PriceHistory,
    calls: AtomicUsize,
}

impl StaticSource {
    pub fn new(history: PriceHistory) -> Self {
        Self {
            history,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HistorySource for StaticSource {
    fn id(&self) -> &'static str {
        "static"
    }

    fn daily_history<'a>(
        &'a self,
        _req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceHistory, SourceError>> + Send + 'a>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let history = self.history.clone();
        Box::pin(async move { Ok(history) })
    }
}

/// Fails every fetch with the given error.
pub struct FailingSource(pub SourceError);

impl HistorySource for FailingSource {
    fn id(&self) -> &'static str {
        "failing"
    }

    fn daily_history<'a>(
        &'a self,
        _req: HistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceHistory, SourceError>> + Send + 'a>> {
        let error = self.0.clone();
        Box::pin(async move { Err(error) })
    }
}

/// Writes a dense read-out artifact with constant weights and bias.
pub fn dense_artifact_json(weight: f64, bias: f64) -> String {
    let row = vec![weight; stockcast_forecast::FEATURE_COUNT];
    serde_json::json!({
        "time_steps": TIME_STEP,
        "features": stockcast_forecast::FEATURE_COUNT,
        "weights": vec![row; TIME_STEP],
        "bias": bias,
    })
    .to_string()
}
