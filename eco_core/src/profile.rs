use serde::{Deserialize, Serialize};

/// What a vehicle burns: liquid fuel, or grid electricity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyMode {
    Fuel,
    Electric,
}

/// Every vehicle/vessel class the model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleClass {
    Car,
    Van,
    Bike,
    Ev,
    CargoShip,
    Tanker,
    Ferry,
}

impl VehicleClass {
    pub const ALL: [VehicleClass; 7] = [
        VehicleClass::Car,
        VehicleClass::Van,
        VehicleClass::Bike,
        VehicleClass::Ev,
        VehicleClass::CargoShip,
        VehicleClass::Tanker,
        VehicleClass::Ferry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleClass::Car => "car",
            VehicleClass::Van => "van",
            VehicleClass::Bike => "bike",
            VehicleClass::Ev => "ev",
            VehicleClass::CargoShip => "cargo_ship",
            VehicleClass::Tanker => "tanker",
            VehicleClass::Ferry => "ferry",
        }
    }

    /// Resolve a caller-supplied identifier. Unknown identifiers become `Car`.
    pub fn from_id(id: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == id)
            .unwrap_or(VehicleClass::Car)
    }

    /// Ocean-going vessels get route-style post-scaling.
    pub fn is_marine(&self) -> bool {
        matches!(
            self,
            VehicleClass::CargoShip | VehicleClass::Tanker | VehicleClass::Ferry
        )
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static physical characteristics of a vehicle class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleProfile {
    /// Mass fed to the model in place of the caller's weight
    pub reference_weight_kg: f64,
    /// Ordinal size/inefficiency proxy; multiplies CO2 and (above 2.0) fuel
    pub co2_factor: f64,
    pub energy_mode: EnergyMode,
}

/// A profile together with the class it was resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedVehicle {
    pub class: VehicleClass,
    pub profile: VehicleProfile,
}

/// Read-only table of vehicle profiles, built once and shared by the
/// trainer and the service so both agree on weights and factors.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: [VehicleProfile; 7],
}

impl ProfileRegistry {
    pub fn builtin() -> Self {
        let fuel = |reference_weight_kg, co2_factor| VehicleProfile {
            reference_weight_kg,
            co2_factor,
            energy_mode: EnergyMode::Fuel,
        };
        Self {
            // order follows VehicleClass::ALL
            profiles: [
                fuel(1200.0, 1.0),
                fuel(2500.0, 1.4),
                fuel(200.0, 0.2),
                VehicleProfile {
                    reference_weight_kg: 1800.0,
                    co2_factor: 0.0,
                    energy_mode: EnergyMode::Electric,
                },
                fuel(500_000.0, 8.0),
                fuel(700_000.0, 10.0),
                fuel(100_000.0, 5.0),
            ],
        }
    }

    pub fn get(&self, class: VehicleClass) -> &VehicleProfile {
        &self.profiles[class.index()]
    }

    /// Never fails: unknown identifiers resolve to the car profile.
    pub fn lookup(&self, vehicle_id: &str) -> ResolvedVehicle {
        let class = VehicleClass::from_id(vehicle_id);
        ResolvedVehicle {
            class,
            profile: *self.get(class),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (VehicleClass, &VehicleProfile)> + '_ {
        VehicleClass::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
