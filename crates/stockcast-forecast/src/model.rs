//! Sequence model capability and its process-wide cache.
//!
//! The trained model is opaque: anything mapping a `(1, 60, 5)` window to a
//! single scaled `close` prediction can implement [`SequenceModel`]. The
//! persisted artifact shipped with the service is a dense read-out over the
//! whole window, loaded by [`DenseReadoutModel::load`].

use std::fmt::{Debug, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ndarray::Array2;
use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::info;

use crate::error::ModelError;
use crate::window::InputWindow;
use crate::{FEATURE_COUNT, TIME_STEP};

/// Inference contract of the trained model.
///
/// Implementations must be read-only at inference time; one instance serves
/// concurrent requests.
pub trait SequenceModel: Send + Sync {
    /// Predicts the next scaled `close` value for `window`.
    fn predict(&self, window: &InputWindow) -> Result<f64, ModelError>;
}

#[derive(Debug, Deserialize)]
struct DenseReadoutArtifact {
    time_steps: usize,
    features: usize,
    weights: Vec<Vec<f64>>,
    bias: f64,
}

/// Linear read-out over a full input window: `bias + sum(weights * window)`.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseReadoutModel {
    weights: Array2<f64>,
    bias: f64,
}

impl DenseReadoutModel {
    pub fn new(weights: Array2<f64>, bias: f64) -> Result<Self, ModelError> {
        let expected = [TIME_STEP, FEATURE_COUNT];
        if weights.shape() != expected {
            return Err(ModelError::Shape {
                expected: expected.to_vec(),
                actual: weights.shape().to_vec(),
            });
        }
        if !bias.is_finite() || weights.iter().any(|w| !w.is_finite()) {
            return Err(ModelError::Initialization(String::from(
                "model parameters must be finite",
            )));
        }
        Ok(Self { weights, bias })
    }

    pub fn from_json(body: &str) -> Result<Self, ModelError> {
        let artifact: DenseReadoutArtifact = serde_json::from_str(body)?;
        if artifact.time_steps != TIME_STEP || artifact.features != FEATURE_COUNT {
            return Err(ModelError::Shape {
                expected: vec![TIME_STEP, FEATURE_COUNT],
                actual: vec![artifact.time_steps, artifact.features],
            });
        }

        let rows = artifact.weights.len();
        let flat: Vec<f64> = artifact.weights.into_iter().flatten().collect();
        if flat.len() != TIME_STEP * FEATURE_COUNT {
            return Err(ModelError::Shape {
                expected: vec![TIME_STEP, FEATURE_COUNT],
                actual: vec![rows, flat.len() / rows.max(1)],
            });
        }
        let weights = Array2::from_shape_vec((TIME_STEP, FEATURE_COUNT), flat).map_err(|e| {
            ModelError::Initialization(format!("invalid weight layout: {e}"))
        })?;

        Self::new(weights, artifact.bias)
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let body = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&body)
    }
}

impl SequenceModel for DenseReadoutModel {
    fn predict(&self, window: &InputWindow) -> Result<f64, ModelError> {
        let expected = [1, TIME_STEP, FEATURE_COUNT];
        if window.shape() != expected {
            return Err(ModelError::Shape {
                expected: expected.to_vec(),
                actual: window.shape().to_vec(),
            });
        }
        Ok((&window.steps() * &self.weights).sum() + self.bias)
    }
}

type ModelLoader = dyn Fn() -> Result<Arc<dyn SequenceModel>, ModelError> + Send + Sync;

/// Initialise-once holder for the process-wide model.
///
/// Concurrent first callers wait on a single load; afterwards every caller
/// gets the same instance. A failed load leaves the cache empty so a later
/// request can try again. There is no reload or invalidation.
pub struct ModelCache {
    cell: OnceCell<Arc<dyn SequenceModel>>,
    loader: Arc<ModelLoader>,
}

impl ModelCache {
    /// Cache that loads a [`DenseReadoutModel`] artifact from `path` on first use.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::with_loader(move || {
            let model = DenseReadoutModel::load(&path)?;
            info!(path = %path.display(), "loaded model artifact");
            Ok(Arc::new(model) as Arc<dyn SequenceModel>)
        })
    }

    /// Cache that calls `loader` on first use.
    pub fn with_loader<F>(loader: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn SequenceModel>, ModelError> + Send + Sync + 'static,
    {
        Self {
            cell: OnceCell::new(),
            loader: Arc::new(loader),
        }
    }

    /// Cache already holding `model`.
    pub fn preloaded(model: Arc<dyn SequenceModel>) -> Self {
        Self {
            cell: OnceCell::new_with(Some(model)),
            loader: Arc::new(|| -> Result<Arc<dyn SequenceModel>, ModelError> {
                Err(ModelError::Initialization(String::from(
                    "preloaded cache has no loader",
                )))
            }),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Returns the cached model, loading it on the first call.
    pub async fn get(&self) -> Result<Arc<dyn SequenceModel>, ModelError> {
        let model = self
            .cell
            .get_or_try_init(|| async {
                let loader = Arc::clone(&self.loader);
                match tokio::task::spawn_blocking(move || loader()).await {
                    Ok(loaded) => loaded,
                    Err(e) => Err(ModelError::Initialization(format!(
                        "model loader did not complete: {e}"
                    ))),
                }
            })
            .await?;
        Ok(Arc::clone(model))
    }
}

impl Debug for ModelCache {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelCache")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
