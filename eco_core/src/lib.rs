//! Fuel and CO2 estimation for planned routes.
//!
//! Trip features are turned into a fixed-order vector for a black-box
//! regressor, and its raw output is rescaled by vehicle class, energy
//! mode and route style.

pub mod adjust;
pub mod error;
pub mod estimator;
pub mod features;
pub mod forest;
pub mod predictor;
pub mod profile;
pub mod result;
pub mod route;
pub mod vectorize;

pub use adjust::{adjust, Adjusted};
pub use error::{ModelError, PredictError};
pub use estimator::EcoEstimator;
pub use features::TripFeatures;
pub use forest::{ForestModel, ForestParams};
pub use predictor::{Predictor, RawPrediction};
pub use profile::{EnergyMode, ProfileRegistry, ResolvedVehicle, VehicleClass, VehicleProfile};
pub use result::PredictionResult;
pub use route::RouteType;
pub use vectorize::{vectorize, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
