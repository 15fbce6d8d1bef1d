use crate::features::TripFeatures;
use crate::profile::VehicleProfile;

pub const FEATURE_COUNT: usize = 8;

/// Model input columns, in the exact order used at training time.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "distance_km",
    "elevation_gain_m",
    "avg_speed_kph",
    "turns",
    "humps",
    "weight_kg",
    "traffic_index",
    "route_type",
];

/// Column of `FEATURE_NAMES` that carries the vehicle mass.
pub const WEIGHT_INDEX: usize = 5;

pub type FeatureVector = [f64; FEATURE_COUNT];

/// Build the model input for a trip.
///
/// The caller's `weight_kg` is ignored: vehicle class determines mass.
/// Values are passed through unchecked.
pub fn vectorize(features: &TripFeatures, profile: &VehicleProfile) -> FeatureVector {
    [
        features.distance_km,
        features.elevation_gain_m,
        features.avg_speed_kph,
        features.turns as f64,
        features.humps as f64,
        profile.reference_weight_kg,
        features.traffic_index,
        features.route().code() as f64,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileRegistry;

    #[test]
    fn test_field_order() {
        let reg = ProfileRegistry::builtin();
        let mut f = TripFeatures::new(120.0).with_vehicle("van").with_route_type("safe");
        f.elevation_gain_m = 300.0;
        f.avg_speed_kph = 80.0;
        f.turns = 14;
        f.humps = 3;
        f.traffic_index = 1.5;

        let v = vectorize(&f, &reg.lookup(&f.vehicle).profile);
        assert_eq!(v, [120.0, 300.0, 80.0, 14.0, 3.0, 2500.0, 1.5, 2.0]);
    }

    #[test]
    fn test_weight_comes_from_profile() {
        let reg = ProfileRegistry::builtin();
        for (class, profile) in reg.iter() {
            let mut f = TripFeatures::new(10.0).with_vehicle(class.as_str());
            f.weight_kg = 42.0;
            let v = vectorize(&f, profile);
            assert_eq!(v.len(), FEATURE_COUNT);
            assert_eq!(v[WEIGHT_INDEX], profile.reference_weight_kg);
        }
    }

    #[test]
    fn test_out_of_range_values_pass_through() {
        let reg = ProfileRegistry::builtin();
        let mut f = TripFeatures::new(-5.0).with_route_type("bogus");
        f.traffic_index = 0.0;
        let v = vectorize(&f, reg.get(crate::profile::VehicleClass::Car));
        assert_eq!(v[0], -5.0);
        assert_eq!(v[6], 0.0);
        assert_eq!(v[7], 0.0);
    }
}
