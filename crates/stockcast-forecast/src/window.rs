//! Fixed-length model input windows.

use ndarray::{s, Array3, ArrayView1, ArrayView2, ArrayView3, Axis};

use crate::error::ForecastError;
use crate::FEATURE_COUNT;

/// A single-sequence batch of scaled observations, shape `(1, length, 5)`.
#[derive(Debug, Clone, PartialEq)]
pub struct InputWindow {
    values: Array3<f64>,
}

impl InputWindow {
    /// Wraps an existing `(1, length, 5)` array.
    pub fn from_array(values: Array3<f64>) -> Result<Self, ForecastError> {
        let (batch, length, features) = values.dim();
        if batch != 1 || length == 0 || features != FEATURE_COUNT {
            return Err(ForecastError::internal(format!(
                "input window must have shape (1, n, {FEATURE_COUNT}), got {:?}",
                values.shape()
            )));
        }
        Ok(Self { values })
    }

    pub fn shape(&self) -> [usize; 3] {
        let (batch, length, features) = self.values.dim();
        [batch, length, features]
    }

    /// Number of time steps in the sequence.
    pub fn len(&self) -> usize {
        self.values.len_of(Axis(1))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn values(&self) -> ArrayView3<'_, f64> {
        self.values.view()
    }

    /// The sequence without its batch axis, shape `(length, 5)`.
    pub fn steps(&self) -> ArrayView2<'_, f64> {
        self.values.index_axis(Axis(0), 0)
    }

    /// Drops the oldest observation and appends `observation` as the newest.
    pub fn push(&mut self, observation: &[f64; FEATURE_COUNT]) {
        let length = self.len();
        let shifted = self.values.slice(s![.., 1.., ..]).to_owned();
        self.values
            .slice_mut(s![.., ..length - 1, ..])
            .assign(&shifted);
        self.values
            .slice_mut(s![0, length - 1, ..])
            .assign(&ArrayView1::from(&observation[..]));
    }
}

/// Takes the last `length` rows of `scaled` as a `(1, length, 5)` window.
pub fn window(scaled: ArrayView2<'_, f64>, length: usize) -> Result<InputWindow, ForecastError> {
    if length == 0 {
        return Err(ForecastError::internal("window length must be positive"));
    }
    if scaled.nrows() < length {
        return Err(ForecastError::InsufficientHistory {
            required: length,
            actual: scaled.nrows(),
        });
    }

    let start = scaled.nrows() - length;
    let tail = scaled.slice(s![start.., ..]).to_owned().insert_axis(Axis(0));
    InputWindow::from_array(tail)
}
