//! Min-max feature scaling.
//!
//! Two transforms are fitted from the same history: one over every feature
//! column (the forward pipeline) and one over `close` alone (to invert model
//! outputs). Both come from [`fit_and_scale`] over the same rows.

use ndarray::{Array2, ArrayView2, Axis};
use stockcast_core::{Feature, PriceHistory};

use crate::error::ForecastError;
use crate::{FEATURE_COUNT, TIME_STEP};

/// `L x 5` matrix of raw feature rows in [`Feature::ORDER`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix(Array2<f64>);

impl FeatureMatrix {
    pub fn from_history(history: &PriceHistory) -> Self {
        let mut matrix = Array2::zeros((history.len(), FEATURE_COUNT));
        for (mut row, values) in matrix.rows_mut().into_iter().zip(history.feature_rows()) {
            for (slot, value) in row.iter_mut().zip(values) {
                *slot = value;
            }
        }
        Self(matrix)
    }

    pub fn from_array(values: Array2<f64>) -> Result<Self, ForecastError> {
        if values.ncols() != FEATURE_COUNT {
            return Err(ForecastError::internal(format!(
                "feature matrix must have {FEATURE_COUNT} columns, got {}",
                values.ncols()
            )));
        }
        Ok(Self(values))
    }

    pub fn rows(&self) -> usize {
        self.0.nrows()
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.0.view()
    }
}

/// Per-column `(min, max)` bounds mapping raw values onto `[0, 1]`.
///
/// A constant column (`max == min`) scales to `0.0` and inverts to `min`.
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxTransform {
    min: Vec<f64>,
    max: Vec<f64>,
}

impl MinMaxTransform {
    pub fn fit(values: ArrayView2<'_, f64>) -> Result<Self, ForecastError> {
        if values.nrows() == 0 {
            return Err(ForecastError::internal("cannot fit scaler on an empty matrix"));
        }

        let mut min = Vec::with_capacity(values.ncols());
        let mut max = Vec::with_capacity(values.ncols());
        for column in values.axis_iter(Axis(1)) {
            let (lo, hi) = column
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                    (lo.min(v), hi.max(v))
                });
            if !lo.is_finite() || !hi.is_finite() {
                return Err(ForecastError::internal("cannot fit scaler on non-finite values"));
            }
            min.push(lo);
            max.push(hi);
        }

        Ok(Self { min, max })
    }

    pub fn width(&self) -> usize {
        self.min.len()
    }

    pub fn bounds(&self, column: usize) -> Option<(f64, f64)> {
        Some((*self.min.get(column)?, *self.max.get(column)?))
    }

    pub fn transform(&self, values: ArrayView2<'_, f64>) -> Result<Array2<f64>, ForecastError> {
        self.check_width(values.ncols())?;
        let mut scaled = values.to_owned();
        for (index, mut column) in scaled.axis_iter_mut(Axis(1)).enumerate() {
            let (lo, hi) = (self.min[index], self.max[index]);
            let range = hi - lo;
            column.mapv_inplace(|v| if range > 0.0 { (v - lo) / range } else { 0.0 });
        }
        Ok(scaled)
    }

    /// Maps scaled values of a single-feature transform back to real units.
    pub fn inverse(&self, scaled: &[f64]) -> Result<Vec<f64>, ForecastError> {
        self.check_width(1)?;
        Ok(scaled.iter().map(|&v| self.inverse_value(0, v)).collect())
    }

    fn inverse_value(&self, column: usize, value: f64) -> f64 {
        let (lo, hi) = (self.min[column], self.max[column]);
        let range = hi - lo;
        if range > 0.0 {
            value * range + lo
        } else {
            lo
        }
    }

    fn check_width(&self, actual: usize) -> Result<(), ForecastError> {
        if actual != self.width() {
            return Err(ForecastError::internal(format!(
                "scaler fitted on {} columns applied to {actual}",
                self.width()
            )));
        }
        Ok(())
    }
}

/// Scaled matrix plus the two transforms fitted from it.
#[derive(Debug, Clone)]
pub struct ScaledFeatures {
    pub scaled: Array2<f64>,
    pub all_features: MinMaxTransform,
    pub close: MinMaxTransform,
}

/// Fits both transforms on `matrix` and scales every feature into `[0, 1]`.
///
/// Fails with [`ForecastError::InsufficientHistory`] below [`TIME_STEP`] rows.
pub fn fit_and_scale(matrix: &FeatureMatrix) -> Result<ScaledFeatures, ForecastError> {
    if matrix.rows() < TIME_STEP {
        return Err(ForecastError::InsufficientHistory {
            required: TIME_STEP,
            actual: matrix.rows(),
        });
    }

    let all_features = MinMaxTransform::fit(matrix.view())?;
    let scaled = all_features.transform(matrix.view())?;

    let close_index = Feature::Close.index();
    let close_column = matrix.view().slice_move(ndarray::s![.., close_index..=close_index]);
    let close = MinMaxTransform::fit(close_column)?;

    Ok(ScaledFeatures {
        scaled,
        all_features,
        close,
    })
}
