//! Physics-inspired synthetic trips for fitting the fuel/CO2 regressor.
//!
//! Rows are built through the same registry and vectorizer the service
//! uses, so training and serving cannot disagree on column meaning.

use eco_core::{
    vectorize, EnergyMode, FeatureVector, ProfileRegistry, RawPrediction, RouteType, TripFeatures,
    VehicleClass,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const DEFAULT_SEED: u64 = 42;

/// Litres of fuel per km before vehicle and route effects.
const BASE_KM_PER_L: f64 = 12.0;
/// Extra litres per tonne of reference weight.
const LITRES_PER_TONNE: f64 = 0.5;
/// kg of CO2 per litre of fuel.
const CO2_PER_LITRE: f64 = 2.31;

/// One generated example: model inputs plus both targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingRow {
    pub x: FeatureVector,
    pub y: RawPrediction,
}

pub struct SyntheticGenerator {
    rng: ChaCha8Rng,
    registry: ProfileRegistry,
}

impl SyntheticGenerator {
    pub fn new(seed: u64, registry: ProfileRegistry) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            registry,
        }
    }

    pub fn generate(&mut self, n: usize) -> Vec<TrainingRow> {
        (0..n).map(|_| self.next_row()).collect()
    }

    pub fn next_row(&mut self) -> TrainingRow {
        let rng = &mut self.rng;
        let mut trip = TripFeatures::new(rng.gen_range(5.0..2000.0));
        trip.elevation_gain_m = rng.gen_range(0.0..1000.0);
        trip.avg_speed_kph = rng.gen_range(10.0..120.0);
        trip.turns = rng.gen_range(0..200);
        trip.humps = rng.gen_range(0..50);
        trip.traffic_index = rng.gen_range(0.5..2.0);

        let class = VehicleClass::ALL[rng.gen_range(0..VehicleClass::ALL.len())];
        let route = RouteType::ALL[rng.gen_range(0..RouteType::ALL.len())];
        trip.vehicle = class.as_str().to_string();
        trip.route_type = route.as_str().to_string();

        let profile = *self.registry.get(class);
        let mut fuel = trip.distance_km / BASE_KM_PER_L
            + profile.reference_weight_kg / 1000.0 * LITRES_PER_TONNE;
        let mut co2 = fuel * CO2_PER_LITRE;

        // independent jitter on each target
        let (center, spread) = match route {
            RouteType::Eco => (0.9, 0.05),
            RouteType::Safe => (1.2, 0.1),
            RouteType::Fast => (1.05, 0.05),
        };
        fuel *= center + rng.gen_range(-spread..spread);
        co2 *= center + rng.gen_range(-spread..spread);

        if profile.energy_mode == EnergyMode::Electric {
            fuel *= 0.5;
        }
        co2 *= profile.co2_factor;

        TrainingRow {
            x: vectorize(&trip, &profile),
            y: RawPrediction::new(fuel, co2),
        }
    }
}
