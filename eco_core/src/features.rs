use serde::{de, Deserialize, Deserializer, Serialize};

use crate::profile::{ProfileRegistry, ResolvedVehicle};
use crate::route::RouteType;

/// Trip characteristics for a single estimate request.
///
/// `route_type` and `vehicle` stay raw strings; unknown values are resolved
/// to their defaults when the request is evaluated, never rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripFeatures {
    pub distance_km: f64,
    #[serde(default)]
    pub elevation_gain_m: f64,
    #[serde(default = "default_avg_speed_kph")]
    pub avg_speed_kph: f64,
    #[serde(default, deserialize_with = "whole_count")]
    pub turns: u32,
    #[serde(default, deserialize_with = "whole_count")]
    pub humps: u32,
    // accepted for compatibility; the vehicle's reference weight is used instead
    #[serde(default = "default_weight_kg")]
    pub weight_kg: f64,
    #[serde(default = "default_traffic_index")]
    pub traffic_index: f64,
    #[serde(default = "default_route_type")]
    pub route_type: String,
    #[serde(default = "default_vehicle")]
    pub vehicle: String,
}

/// Counts arrive as JSON numbers; `3` and `3.0` are both accepted,
/// fractional or negative values are not.
fn whole_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let v = f64::deserialize(deserializer)?;
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 {
        Ok(v as u32)
    } else {
        Err(de::Error::custom(format!(
            "expected a non-negative whole number, got {}",
            v
        )))
    }
}

fn default_avg_speed_kph() -> f64 {
    50.0
}

fn default_weight_kg() -> f64 {
    1000.0
}

fn default_traffic_index() -> f64 {
    1.0
}

fn default_route_type() -> String {
    RouteType::Fast.as_str().to_string()
}

fn default_vehicle() -> String {
    "car".to_string()
}

impl TripFeatures {
    /// A trip of `distance_km` with every other field at its default.
    pub fn new(distance_km: f64) -> Self {
        Self {
            distance_km,
            elevation_gain_m: 0.0,
            avg_speed_kph: default_avg_speed_kph(),
            turns: 0,
            humps: 0,
            weight_kg: default_weight_kg(),
            traffic_index: default_traffic_index(),
            route_type: default_route_type(),
            vehicle: default_vehicle(),
        }
    }

    pub fn with_vehicle(mut self, vehicle: impl Into<String>) -> Self {
        self.vehicle = vehicle.into();
        self
    }

    pub fn with_route_type(mut self, route_type: impl Into<String>) -> Self {
        self.route_type = route_type.into();
        self
    }

    pub fn route(&self) -> RouteType {
        RouteType::from_id(&self.route_type)
    }

    pub fn resolve_vehicle(&self, registry: &ProfileRegistry) -> ResolvedVehicle {
        registry.lookup(&self.vehicle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_minimal_json() {
        let f: TripFeatures = serde_json::from_str(r#"{"distance_km": 12.5}"#).unwrap();
        assert_eq!(f, TripFeatures::new(12.5));
        assert_eq!(f.avg_speed_kph, 50.0);
        assert_eq!(f.weight_kg, 1000.0);
        assert_eq!(f.traffic_index, 1.0);
        assert_eq!(f.route_type, "fast");
        assert_eq!(f.vehicle, "car");
    }

    #[test]
    fn test_distance_is_required() {
        let r: Result<TripFeatures, _> = serde_json::from_str(r#"{"vehicle": "van"}"#);
        assert!(r.is_err());
    }

    #[test]
    fn test_unknown_strings_survive_deserialization() {
        let f: TripFeatures = serde_json::from_str(
            r#"{"distance_km": 1, "route_type": "scenic", "vehicle": "zeppelin"}"#,
        )
        .unwrap();
        assert_eq!(f.route_type, "scenic");
        assert_eq!(f.route(), RouteType::Fast);
        assert_eq!(f.resolve_vehicle(&ProfileRegistry::builtin()).class.as_str(), "car");
    }

    #[test]
    fn test_counts_accept_whole_floats() {
        let f: TripFeatures =
            serde_json::from_str(r#"{"distance_km": 3, "turns": 3.0, "humps": 12}"#).unwrap();
        assert_eq!(f.turns, 3);
        assert_eq!(f.humps, 12);
    }

    #[test]
    fn test_counts_reject_fractions_and_negatives() {
        for body in [
            r#"{"distance_km": 3, "turns": 2.5}"#,
            r#"{"distance_km": 3, "humps": -1}"#,
            r#"{"distance_km": 3, "turns": "many"}"#,
        ] {
            let r: Result<TripFeatures, _> = serde_json::from_str(body);
            assert!(r.is_err(), "{} should be rejected", body);
        }
    }
}
