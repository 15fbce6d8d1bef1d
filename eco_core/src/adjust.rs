use crate::features::TripFeatures;
use crate::predictor::RawPrediction;
use crate::profile::{EnergyMode, ResolvedVehicle};

/// Grid energy drawn per kilometre by electric vehicles.
pub const ELECTRIC_KWH_PER_KM: f64 = 0.2;

/// Outcome of the adjustment rules, split by energy mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjusted {
    Fuel { fuel_l: f64, co2_kg: f64 },
    Electric { energy_kwh: f64, co2_kg: f64 },
}

/// Fuel multiplier for a class; never below 1.0 so light vehicles keep the raw estimate.
pub fn fuel_multiplier(co2_factor: f64) -> f64 {
    (co2_factor / 2.0).max(1.0)
}

/// Rescale a raw prediction by vehicle class, energy mode and (for vessels) route style.
///
/// Electric vehicles short-circuit before the marine rules, so an electric
/// vessel would never get route scaling.
pub fn adjust(raw: RawPrediction, features: &TripFeatures, vehicle: &ResolvedVehicle) -> Adjusted {
    let profile = &vehicle.profile;
    let mut co2 = raw.co2_kg * profile.co2_factor;
    let mut fuel = raw.fuel_l * fuel_multiplier(profile.co2_factor);

    if profile.energy_mode == EnergyMode::Electric {
        return Adjusted::Electric {
            energy_kwh: features.distance_km * ELECTRIC_KWH_PER_KM,
            co2_kg: co2,
        };
    }

    if vehicle.class.is_marine() {
        let k = features.route().marine_factor();
        fuel *= k;
        co2 *= k;
    }

    Adjusted::Fuel { fuel_l: fuel, co2_kg: co2 }
}
