//! Autoregressive rollout of the sequence model.

use stockcast_core::Feature;
use tracing::debug;

use crate::error::{ForecastError, ModelError};
use crate::model::SequenceModel;
use crate::window::InputWindow;
use crate::FEATURE_COUNT;

/// Observation fed back into the window after each step.
///
/// The model only predicts `close`; open, high, low and volume of future days
/// are zero-filled.
pub fn placeholder_observation(predicted_close: f64) -> [f64; FEATURE_COUNT] {
    let mut observation = [0.0; FEATURE_COUNT];
    observation[Feature::Close.index()] = predicted_close;
    observation
}

/// Rolls `model` forward `n_steps` times from `initial`.
///
/// Each prediction is appended to a private copy of the window (oldest row
/// dropped) before the next call, so steps are strictly sequential. The first
/// failing step aborts the whole forecast.
pub fn forecast<M>(
    model: &M,
    initial: &InputWindow,
    n_steps: usize,
) -> Result<Vec<f64>, ForecastError>
where
    M: SequenceModel + ?Sized,
{
    let mut current = initial.clone();
    let mut predictions = Vec::with_capacity(n_steps);

    for step in 0..n_steps {
        let next = model.predict(&current).map_err(|e| {
            debug!(step, error = %e, "model prediction failed");
            e
        })?;
        if !next.is_finite() {
            debug!(step, value = next, "model produced a non-finite prediction");
            return Err(ModelError::NonFinite { value: next }.into());
        }

        predictions.push(next);
        current.push(&placeholder_observation(next));
    }

    debug!(steps = n_steps, "autoregressive rollout complete");
    Ok(predictions)
}
