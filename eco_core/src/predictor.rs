use serde::{Deserialize, Serialize};

use crate::error::PredictError;
use crate::vectorize::FeatureVector;

/// The regressor's direct output, before any domain adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPrediction {
    pub fuel_l: f64,
    pub co2_kg: f64,
}

impl RawPrediction {
    pub fn new(fuel_l: f64, co2_kg: f64) -> Self {
        Self { fuel_l, co2_kg }
    }

    pub fn is_finite(&self) -> bool {
        self.fuel_l.is_finite() && self.co2_kg.is_finite()
    }
}

/// A loaded regression model. Implementations are shared read-only
/// across concurrent requests.
pub trait Predictor: Send + Sync {
    /// Raw `(fuel_l, co2_kg)` for one feature vector. Outputs are not clamped.
    fn predict(&self, x: &FeatureVector) -> Result<RawPrediction, PredictError>;

    /// Short backend name for logs and health checks.
    fn name(&self) -> &str;
}
