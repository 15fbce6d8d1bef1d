//! Random-forest backend: one smartcore forest per target, stored as a
//! JSON artifact that also records the column order it was fitted with.

use std::{fmt, fs, path::Path};

use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::error::{ModelError, PredictError};
use crate::predictor::{Predictor, RawPrediction};
use crate::vectorize::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};

type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Fewest rows a forest can be fitted on.
pub const MIN_TRAINING_ROWS: usize = 2;

/// Forest size and stopping rules, shared by both targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_trees: usize,
    pub max_depth: u16,
    pub min_samples_leaf: usize,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 50,
            max_depth: 10,
            min_samples_leaf: 5,
            seed: 42,
        }
    }
}

impl ForestParams {
    fn to_smartcore(self) -> RandomForestRegressorParameters {
        RandomForestRegressorParameters::default()
            .with_n_trees(self.n_trees as _)
            .with_max_depth(self.max_depth as _)
            .with_min_samples_leaf(self.min_samples_leaf as _)
            .with_seed(self.seed)
    }
}

#[derive(Serialize, Deserialize)]
pub struct ForestModel {
    /// Column order the model was fitted with
    pub feature_names: Vec<String>,
    pub params: ForestParams,
    fuel_l: Forest,
    co2_kg: Forest,
}

impl fmt::Debug for ForestModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForestModel")
            .field("feature_names", &self.feature_names)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

fn matrix(x: &[FeatureVector]) -> DenseMatrix<f64> {
    DenseMatrix::from_2d_vec(&x.iter().map(|row| row.to_vec()).collect())
}

// serde_json writes NaN as null, which would not load back
fn ensure_finite(p: RawPrediction) -> Result<(), ModelError> {
    if p.is_finite() {
        Ok(())
    } else {
        Err(ModelError::NonFiniteOutput)
    }
}

fn backend_error(e: impl fmt::Display) -> ModelError {
    ModelError::Backend(e.to_string())
}

impl ForestModel {
    /// Fit one forest for fuel_l and one for co2_kg.
    ///
    /// Every feature and target must be finite.
    pub fn fit(
        x: &[FeatureVector],
        y: &[RawPrediction],
        params: ForestParams,
    ) -> Result<Self, ModelError> {
        if x.len() != y.len() {
            return Err(ModelError::RowCountMismatch {
                features: x.len(),
                targets: y.len(),
            });
        }
        if x.len() < MIN_TRAINING_ROWS {
            return Err(ModelError::NotEnoughRows {
                got: x.len(),
                need: MIN_TRAINING_ROWS,
            });
        }
        if let Some(row) = x
            .iter()
            .zip(y)
            .position(|(r, t)| !(r.iter().all(|v| v.is_finite()) && t.is_finite()))
        {
            return Err(ModelError::NonFinite { row });
        }

        let inputs = matrix(x);
        let fuel: Vec<f64> = y.iter().map(|t| t.fuel_l).collect();
        let co2: Vec<f64> = y.iter().map(|t| t.co2_kg).collect();

        let fuel_l = RandomForestRegressor::fit(&inputs, &fuel, params.to_smartcore())
            .map_err(backend_error)?;
        let co2_kg = RandomForestRegressor::fit(&inputs, &co2, params.to_smartcore())
            .map_err(backend_error)?;

        Ok(Self {
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            params,
            fuel_l,
            co2_kg,
        })
    }

    /// Predict many rows at once, one forest pass per target.
    pub fn predict_batch(
        &self,
        x: &[FeatureVector],
    ) -> Result<Vec<RawPrediction>, PredictError> {
        let inputs = matrix(x);
        let fuel = self
            .fuel_l
            .predict(&inputs)
            .map_err(|e| PredictError::Backend(e.to_string()))?;
        let co2 = self
            .co2_kg
            .predict(&inputs)
            .map_err(|e| PredictError::Backend(e.to_string()))?;
        if fuel.len() != x.len() || co2.len() != x.len() {
            return Err(PredictError::OutputShape(vec![
                fuel.len() as i64,
                co2.len() as i64,
            ]));
        }
        Ok(fuel
            .into_iter()
            .zip(co2)
            .map(|(f, c)| RawPrediction::new(f, c))
            .collect())
    }

    /// Coefficient of determination averaged uniformly over both targets.
    pub fn r2_score(
        &self,
        x: &[FeatureVector],
        y: &[RawPrediction],
    ) -> Result<f64, PredictError> {
        let predicted = self.predict_batch(x)?;
        let split = |rows: &[RawPrediction]| -> (Vec<f64>, Vec<f64>) {
            rows.iter().map(|t| (t.fuel_l, t.co2_kg)).unzip()
        };
        let (fuel_true, co2_true) = split(y);
        let (fuel_pred, co2_pred) = split(&predicted);
        let fuel = smartcore::metrics::r2(&fuel_true, &fuel_pred) as f64;
        let co2 = smartcore::metrics::r2(&co2_true, &co2_pred) as f64;
        Ok((fuel + co2) / 2.0)
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::Missing(path.to_path_buf()));
        }
        let txt = fs::read_to_string(path).map_err(|source| ModelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let model: ForestModel =
            serde_json::from_str(&txt).map_err(|source| ModelError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        model.validate()?;
        Ok(model)
    }

    /// Write the artifact. A model with non-finite output is refused.
    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        let sample = self
            .predict(&[0.0; FEATURE_COUNT])
            .map_err(|e| ModelError::Backend(e.to_string()))?;
        ensure_finite(sample)?;
        let txt = serde_json::to_string(self)?;
        fs::write(path, txt).map_err(|source| ModelError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reject artifacts whose column order differs from the serving vectorizer.
    fn validate(&self) -> Result<(), ModelError> {
        if self.feature_names.iter().map(String::as_str).ne(FEATURE_NAMES) {
            return Err(ModelError::FeatureMismatch {
                found: self.feature_names.clone(),
                expected: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            });
        }
        Ok(())
    }
}

impl Predictor for ForestModel {
    fn predict(&self, x: &FeatureVector) -> Result<RawPrediction, PredictError> {
        self.predict_batch(std::slice::from_ref(x))?
            .pop()
            .ok_or(PredictError::OutputShape(vec![0]))
    }

    fn name(&self) -> &str {
        "random_forest"
    }
}
