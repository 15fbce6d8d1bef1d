use serde::{Deserialize, Serialize};

use crate::adjust::Adjusted;
use crate::profile::EnergyMode;

/// Final estimate returned to callers.
///
/// `energy_kwh` is present only for electric vehicles; its absence
/// is how callers tell a fuel-mode result apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub fuel_l: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_kwh: Option<f64>,
    pub co2_kg: f64,
}

impl PredictionResult {
    pub fn energy_mode(&self) -> EnergyMode {
        if self.energy_kwh.is_some() {
            EnergyMode::Electric
        } else {
            EnergyMode::Fuel
        }
    }
}

impl From<Adjusted> for PredictionResult {
    fn from(a: Adjusted) -> Self {
        match a {
            Adjusted::Fuel { fuel_l, co2_kg } => Self {
                fuel_l,
                energy_kwh: None,
                co2_kg,
            },
            Adjusted::Electric { energy_kwh, co2_kg } => Self {
                fuel_l: 0.0,
                energy_kwh: Some(energy_kwh),
                co2_kg,
            },
        }
    }
}
