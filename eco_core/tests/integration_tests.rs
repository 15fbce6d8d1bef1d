/// Integration tests for the estimation pipeline
///
/// Run with: cargo test -p eco_core --test integration_tests -- --nocapture
use std::sync::{Arc, Mutex};

use eco_core::{
    EcoEstimator, EnergyMode, FeatureVector, PredictError, Predictor, ProfileRegistry,
    RawPrediction, TripFeatures,
};

/// Returns a fixed raw prediction and remembers the last vector it saw.
struct StubPredictor {
    raw: RawPrediction,
    seen: Mutex<Option<FeatureVector>>,
}

impl StubPredictor {
    fn new(fuel_l: f64, co2_kg: f64) -> Arc<Self> {
        Arc::new(Self {
            raw: RawPrediction::new(fuel_l, co2_kg),
            seen: Mutex::new(None),
        })
    }

    fn last_input(&self) -> Option<FeatureVector> {
        *self.seen.lock().unwrap()
    }
}

impl Predictor for StubPredictor {
    fn predict(&self, x: &FeatureVector) -> Result<RawPrediction, PredictError> {
        *self.seen.lock().unwrap() = Some(*x);
        Ok(self.raw)
    }

    fn name(&self) -> &str {
        "stub"
    }
}

struct FailingPredictor;

impl Predictor for FailingPredictor {
    fn predict(&self, _x: &FeatureVector) -> Result<RawPrediction, PredictError> {
        Err(PredictError::Backend("tensor exploded".into()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

fn estimator(stub: Arc<StubPredictor>) -> EcoEstimator {
    EcoEstimator::new(Arc::new(ProfileRegistry::builtin()), stub)
}

#[test]
fn test_car_fast_scenario() {
    println!("\n=== Test: car / fast ===");
    let stub = StubPredictor::new(10.0, 23.1);
    let est = estimator(stub.clone());

    let r = est
        .estimate(&TripFeatures::new(120.0).with_vehicle("car").with_route_type("fast"))
        .unwrap();

    assert_eq!(r.fuel_l, 10.0);
    assert_eq!(r.co2_kg, 23.1);
    assert_eq!(r.energy_kwh, None);
    println!("✓ fuel={:.2}L co2={:.2}kg", r.fuel_l, r.co2_kg);
}

#[test]
fn test_cargo_ship_eco_scenario() {
    println!("\n=== Test: cargo_ship / eco ===");
    let est = estimator(StubPredictor::new(100.0, 200.0));

    let r = est
        .estimate(&TripFeatures::new(800.0).with_vehicle("cargo_ship").with_route_type("eco"))
        .unwrap();

    assert!((r.fuel_l - 340.0).abs() < 1e-9, "fuel_l was {}", r.fuel_l);
    assert!((r.co2_kg - 1360.0).abs() < 1e-9, "co2_kg was {}", r.co2_kg);
    assert_eq!(r.energy_mode(), EnergyMode::Fuel);
    println!("✓ fuel={:.2}L co2={:.2}kg", r.fuel_l, r.co2_kg);
}

#[test]
fn test_ev_scenario() {
    println!("\n=== Test: ev ===");
    let est = estimator(StubPredictor::new(7.5, 17.3));

    let r = est
        .estimate(&TripFeatures::new(50.0).with_vehicle("ev").with_route_type("safe"))
        .unwrap();

    assert_eq!(r.fuel_l, 0.0);
    assert_eq!(r.energy_kwh, Some(10.0));
    assert_eq!(r.co2_kg, 0.0);
    assert_eq!(r.energy_mode(), EnergyMode::Electric);
    println!("✓ energy={:.2}kWh", r.energy_kwh.unwrap_or_default());
}

#[test]
fn test_model_sees_profile_weight_and_route_code() {
    println!("\n=== Test: vector handed to the model ===");
    let stub = StubPredictor::new(1.0, 1.0);
    let est = estimator(stub.clone());

    let mut f = TripFeatures::new(42.0).with_vehicle("tanker").with_route_type("safe");
    f.weight_kg = 5.0;
    f.turns = 7;
    est.estimate(&f).unwrap();

    let x = stub.last_input().expect("predictor was not called");
    assert_eq!(x, [42.0, 0.0, 50.0, 7.0, 0.0, 700_000.0, 1.0, 2.0]);
    println!("✓ vector {:?}", x);
}

#[test]
fn test_unknown_inputs_degrade_to_car_fast() {
    println!("\n=== Test: unknown vehicle and route ===");
    let stub = StubPredictor::new(10.0, 20.0);
    let est = estimator(stub.clone());

    let odd = est
        .estimate(&TripFeatures::new(10.0).with_vehicle("hovercraft").with_route_type("scenic"))
        .unwrap();
    let odd_x = stub.last_input().unwrap();
    let plain = est.estimate(&TripFeatures::new(10.0)).unwrap();
    let plain_x = stub.last_input().unwrap();

    assert_eq!(odd, plain);
    assert_eq!(odd_x, plain_x);
    println!("✓ fell back to car/fast");
}

#[test]
fn test_predictor_failure_propagates() {
    let est = EcoEstimator::new(Arc::new(ProfileRegistry::builtin()), Arc::new(FailingPredictor));
    let err = est.estimate(&TripFeatures::new(1.0)).unwrap_err();
    assert!(err.to_string().contains("tensor exploded"));
}
