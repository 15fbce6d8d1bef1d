use serde::{Deserialize, Serialize};

/// Multiplier for marine fuel and CO2 on eco routes (slow steaming, current-optimized).
pub const MARINE_ECO_FACTOR: f64 = 0.85;
/// Multiplier for marine fuel and CO2 on safe routes (storm-avoidance detour).
pub const MARINE_SAFE_FACTOR: f64 = 1.2;

/// Route style requested by the caller.
///
/// The discriminants are the ordinal codes the model was trained with
/// and must not change without retraining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteType {
    Fast = 0,
    Eco = 1,
    Safe = 2,
}

impl RouteType {
    pub const ALL: [RouteType; 3] = [RouteType::Fast, RouteType::Eco, RouteType::Safe];

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteType::Fast => "fast",
            RouteType::Eco => "eco",
            RouteType::Safe => "safe",
        }
    }

    /// Unrecognized route strings are treated as `Fast`.
    pub fn from_id(id: &str) -> Self {
        match id {
            "eco" => RouteType::Eco,
            "safe" => RouteType::Safe,
            _ => RouteType::Fast,
        }
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Post-prediction scaling applied to marine vessels only.
    pub fn marine_factor(&self) -> f64 {
        match self {
            RouteType::Fast => 1.0,
            RouteType::Eco => MARINE_ECO_FACTOR,
            RouteType::Safe => MARINE_SAFE_FACTOR,
        }
    }
}

impl std::fmt::Display for RouteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_codes() {
        assert_eq!(RouteType::from_id("fast").code(), 0);
        assert_eq!(RouteType::from_id("eco").code(), 1);
        assert_eq!(RouteType::from_id("safe").code(), 2);
    }

    #[test]
    fn test_unknown_route_maps_to_fast() {
        for id in ["", "scenic", "Eco", "SAFE"] {
            assert_eq!(RouteType::from_id(id), RouteType::Fast);
            assert_eq!(RouteType::from_id(id).code(), 0);
        }
    }

    #[test]
    fn test_marine_factors() {
        assert_eq!(RouteType::Fast.marine_factor(), 1.0);
        assert_eq!(RouteType::Eco.marine_factor(), 0.85);
        assert_eq!(RouteType::Safe.marine_factor(), 1.2);
    }
}
