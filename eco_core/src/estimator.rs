use std::sync::Arc;

use crate::adjust::adjust;
use crate::error::PredictError;
use crate::features::TripFeatures;
use crate::predictor::Predictor;
use crate::profile::ProfileRegistry;
use crate::result::PredictionResult;
use crate::vectorize::vectorize;

/// Full pipeline: resolve vehicle, vectorize, predict, adjust, assemble.
///
/// Holds only read-only state, so one instance serves all requests.
#[derive(Clone)]
pub struct EcoEstimator {
    registry: Arc<ProfileRegistry>,
    predictor: Arc<dyn Predictor>,
}

impl EcoEstimator {
    pub fn new(registry: Arc<ProfileRegistry>, predictor: Arc<dyn Predictor>) -> Self {
        Self {
            registry,
            predictor,
        }
    }

    pub fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    pub fn model_name(&self) -> &str {
        self.predictor.name()
    }

    pub fn estimate(&self, features: &TripFeatures) -> Result<PredictionResult, PredictError> {
        let vehicle = features.resolve_vehicle(&self.registry);
        let x = vectorize(features, &vehicle.profile);
        let raw = self.predictor.predict(&x)?;
        tracing::trace!(
            vehicle = %vehicle.class,
            route = %features.route(),
            raw_fuel = raw.fuel_l,
            raw_co2 = raw.co2_kg,
            "raw prediction"
        );
        Ok(adjust(raw, features, &vehicle).into())
    }
}
