//! Core data models: navigational points and aircraft.

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::spatial::Position;

/// Kilometers per nautical mile; converts knots to km/h.
pub const KM_PER_NAUTICAL_MILE: f64 = 1.852;

/// Classification of aircraft fuel requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FuelKind {
    /// Aviation gasoline for piston engines.
    Avgas,
    /// Jet-A kerosene for turbine engines.
    JetA,
}

/// What an airport's fuel farm carries. Zero, one, or both kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuelStock {
    #[serde(default)]
    pub avgas: bool,
    #[serde(default)]
    pub jet_a: bool,
}

impl FuelStock {
    pub fn carries(&self, kind: FuelKind) -> bool {
        match kind {
            FuelKind::Avgas => self.avgas,
            FuelKind::JetA => self.jet_a,
        }
    }
}

/// Families of radio navigation aids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BeaconKind {
    Vor,
    Vortac,
    Ndb,
    Loran,
}

/// Variant payload of a [`Point`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PointKind {
    Airport {
        #[serde(default)]
        fuel: FuelStock,
        #[serde(default)]
        elevation_ft: f64,
    },
    Beacon {
        kind: BeaconKind,
    },
}

/// A navigational reference usable as a graph vertex.
///
/// Points are plain immutable data: adjacency belongs to the working
/// subgraph and search state to [`crate::search::ShortestPaths`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Stable ICAO-style identifier; the graph key.
    pub ident: String,
    /// Display name used in stopover reasons.
    pub name: String,
    pub position: Position,
    #[serde(flatten)]
    pub kind: PointKind,
}

impl Point {
    pub fn airport(ident: &str, name: &str, position: Position, fuel: FuelStock) -> Self {
        Self {
            ident: ident.to_string(),
            name: name.to_string(),
            position,
            kind: PointKind::Airport {
                fuel,
                elevation_ft: 0.0,
            },
        }
    }

    pub fn beacon(ident: &str, name: &str, position: Position, kind: BeaconKind) -> Self {
        Self {
            ident: ident.to_string(),
            name: name.to_string(),
            position,
            kind: PointKind::Beacon { kind },
        }
    }

    pub fn is_airport(&self) -> bool {
        matches!(self.kind, PointKind::Airport { .. })
    }

    /// Whether an aircraft burning `kind` can refuel here.
    ///
    /// Beacons never refuel; an airport refuels only when its stock carries
    /// the requested kind.
    pub fn refuels(&self, kind: FuelKind) -> bool {
        match &self.kind {
            PointKind::Airport { fuel, .. } => fuel.carries(kind),
            PointKind::Beacon { .. } => false,
        }
    }
}

/// Powerplant class; dictates the required fuel kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AircraftClass {
    Jet,
    Prop,
    TurboProp,
}

impl AircraftClass {
    /// Pistons take avgas; jets and turboprops take Jet-A.
    pub fn required_fuel(&self) -> FuelKind {
        match self {
            AircraftClass::Prop => FuelKind::Avgas,
            AircraftClass::Jet | AircraftClass::TurboProp => FuelKind::JetA,
        }
    }
}

/// An aircraft's planning-relevant performance numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    pub make: String,
    pub model: String,
    pub class: AircraftClass,
    /// Fuel tank size in liters.
    pub tank_size_l: f64,
    /// Cruise fuel burn in liters per hour.
    pub burn_rate_lph: f64,
    /// Cruise speed in knots.
    pub cruise_speed_kt: f64,
}

impl Aircraft {
    pub fn required_fuel(&self) -> FuelKind {
        self.class.required_fuel()
    }

    pub fn cruise_speed_kmh(&self) -> f64 {
        self.cruise_speed_kt * KM_PER_NAUTICAL_MILE
    }

    /// Still-air range in kilometers: endurance (tank size over burn rate)
    /// flown at cruise speed.
    pub fn range_km(&self) -> f64 {
        KM_PER_NAUTICAL_MILE * self.tank_size_l * self.cruise_speed_kt / self.burn_rate_lph
    }

    /// Rejects performance numbers that would make planning meaningless
    /// before any computation starts.
    pub fn validate(&self) -> Result<(), PlanError> {
        let checks = [
            ("tank size", self.tank_size_l),
            ("burn rate", self.burn_rate_lph),
            ("cruise speed", self.cruise_speed_kt),
        ];
        for (label, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlanError::InvalidAircraft {
                    reason: format!("{label} must be positive, got {value}"),
                });
            }
        }
        Ok(())
    }

    /// Catalog key: make and model joined with a space.
    pub fn designation(&self) -> String {
        format!("{} {}", self.make, self.model)
    }
}
