use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use eco_core::{
    vectorize, EcoEstimator, PredictionResult, TripFeatures, VehicleClass, VehicleProfile,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

// ---------- Server state ----------

#[derive(Clone)]
pub struct AppState {
    estimator: Arc<EcoEstimator>,
    log_predictions: bool,
}

impl AppState {
    pub fn new(estimator: EcoEstimator, log_predictions: bool) -> Self {
        Self {
            estimator: Arc::new(estimator),
            log_predictions,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .route("/health", get(health))
        .route("/vehicles", get(vehicles))
        .with_state(state)
}

// ---------- Handlers ----------

type ApiError = (StatusCode, Json<Value>);

async fn predict(
    State(state): State<AppState>,
    Json(feat): Json<TripFeatures>,
) -> Result<Json<PredictionResult>, ApiError> {
    if state.log_predictions {
        log_request(&state, &feat);
    }

    let out = state
        .estimator
        .estimate(&feat)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": e.to_string() }))))?;

    if state.log_predictions {
        tracing::info!(
            "result vehicle={} fuel_l={:.3} energy_kwh={:?} co2_kg={:.3}",
            feat.vehicle,
            out.fuel_l,
            out.energy_kwh,
            out.co2_kg
        );
    }
    Ok(Json(out))
}

// Debug signal so a misbehaving client sending all-zeros is easy to spot
fn log_request(state: &AppState, feat: &TripFeatures) {
    let vehicle = feat.resolve_vehicle(state.estimator.registry());
    let x = vectorize(feat, &vehicle.profile);
    let nz = x.iter().filter(|v| **v != 0.0).count();
    let mean = x.iter().sum::<f64>() / x.len() as f64;
    tracing::info!(
        "recv vehicle={} (as {}) route={} (as {}) nonzero={} mean={:.3} x={:?}",
        feat.vehicle,
        vehicle.class,
        feat.route_type,
        feat.route(),
        nz,
        mean,
        x
    );
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "status": "ok", "model": state.estimator.model_name() }))
}

#[derive(Serialize)]
struct VehicleEntry {
    vehicle: VehicleClass,
    #[serde(flatten)]
    profile: VehicleProfile,
}

async fn vehicles(State(state): State<AppState>) -> Json<Vec<VehicleEntry>> {
    Json(
        state
            .estimator
            .registry()
            .iter()
            .map(|(vehicle, profile)| VehicleEntry {
                vehicle,
                profile: *profile,
            })
            .collect(),
    )
}
