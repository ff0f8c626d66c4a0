//! In-memory catalog of navigational points and aircraft.
//!
//! The catalog owns no file I/O and no interactive validation; it is the
//! lookup surface the composer consumes. It serializes to and from a flat
//! point/aircraft listing so callers can load one with serde.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::models::{Aircraft, FuelKind, Point};

/// Flat serde representation of a catalog.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    points: Vec<Point>,
    aircraft: Vec<Aircraft>,
}

/// Lookup tables for points and aircraft.
///
/// Points are keyed by ident and aircraft by their make/model designation;
/// both maps are ordered so enumeration is deterministic. Idents are
/// unique: inserting a duplicate is an error rather than a silent
/// replacement.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(try_from = "CatalogFile", into = "CatalogFile")]
pub struct Catalog {
    points: BTreeMap<String, Point>,
    aircraft: BTreeMap<String, Aircraft>,
}

impl TryFrom<CatalogFile> for Catalog {
    type Error = PlanError;

    fn try_from(file: CatalogFile) -> Result<Self, Self::Error> {
        let mut catalog = Catalog::new();
        for point in file.points {
            catalog.add_point(point)?;
        }
        for aircraft in file.aircraft {
            catalog.add_aircraft(aircraft)?;
        }
        Ok(catalog)
    }
}

impl From<Catalog> for CatalogFile {
    fn from(catalog: Catalog) -> Self {
        Self {
            points: catalog.points.into_values().collect(),
            aircraft: catalog.aircraft.into_values().collect(),
        }
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a point; fails on a duplicate ident.
    pub fn add_point(&mut self, point: Point) -> Result<(), PlanError> {
        if self.points.contains_key(&point.ident) {
            return Err(PlanError::DuplicateIdent {
                ident: point.ident.clone(),
            });
        }
        self.points.insert(point.ident.clone(), point);
        Ok(())
    }

    /// Adds an aircraft; fails on a duplicate make/model designation.
    pub fn add_aircraft(&mut self, aircraft: Aircraft) -> Result<(), PlanError> {
        let designation = aircraft.designation();
        if self.aircraft.contains_key(&designation) {
            return Err(PlanError::DuplicateIdent { ident: designation });
        }
        self.aircraft.insert(designation, aircraft);
        Ok(())
    }

    pub fn point(&self, ident: &str) -> Option<&Point> {
        self.points.get(ident)
    }

    /// Aircraft by its make/model designation, e.g. `"Cessna 172"`.
    pub fn aircraft(&self, designation: &str) -> Option<&Aircraft> {
        self.aircraft.get(designation)
    }

    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.points.values()
    }

    /// All airports whose fuel stock carries `kind`, in ident order.
    pub fn airports_with(&self, kind: FuelKind) -> Vec<&Point> {
        self.points
            .values()
            .filter(|point| point.refuels(kind))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AircraftClass, BeaconKind, FuelStock};
    use crate::spatial::Position;

    fn sample() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .add_point(Point::airport(
                "KSNA",
                "John Wayne",
                Position::new(33.67, -117.86).unwrap(),
                FuelStock {
                    avgas: true,
                    jet_a: true,
                },
            ))
            .unwrap();
        catalog
            .add_point(Point::airport(
                "KFUL",
                "Fullerton",
                Position::new(33.87, -117.98).unwrap(),
                FuelStock {
                    avgas: true,
                    jet_a: false,
                },
            ))
            .unwrap();
        catalog
            .add_point(Point::beacon(
                "SLI",
                "Seal Beach",
                Position::new(33.78, -118.05).unwrap(),
                BeaconKind::Vortac,
            ))
            .unwrap();
        catalog
            .add_aircraft(Aircraft {
                make: "Cessna".to_string(),
                model: "172".to_string(),
                class: AircraftClass::Prop,
                tank_size_l: 200.0,
                burn_rate_lph: 32.0,
                cruise_speed_kt: 120.0,
            })
            .unwrap();
        catalog
    }

    #[test]
    fn fuel_filter_skips_beacons_and_dry_airports() {
        let catalog = sample();
        let jet_a: Vec<&str> = catalog
            .airports_with(FuelKind::JetA)
            .iter()
            .map(|point| point.ident.as_str())
            .collect();
        assert_eq!(jet_a, vec!["KSNA"]);

        let avgas: Vec<&str> = catalog
            .airports_with(FuelKind::Avgas)
            .iter()
            .map(|point| point.ident.as_str())
            .collect();
        assert_eq!(avgas, vec!["KFUL", "KSNA"]);
    }

    #[test]
    fn duplicate_idents_are_rejected() {
        let mut catalog = sample();
        let err = catalog
            .add_point(Point::beacon(
                "SLI",
                "Seal Beach Again",
                Position::new(0.0, 0.0).unwrap(),
                BeaconKind::Vor,
            ))
            .expect_err("duplicate ident must not be replaced");
        assert_eq!(
            err,
            PlanError::DuplicateIdent {
                ident: "SLI".to_string()
            }
        );
    }

    #[test]
    fn aircraft_lookup_uses_the_designation() {
        let catalog = sample();
        assert!(catalog.aircraft("Cessna 172").is_some());
        assert!(catalog.aircraft("Cessna 182").is_none());
    }

    #[test]
    fn serde_round_trip_preserves_the_catalog() {
        let catalog = sample();
        let json = serde_json::to_string(&catalog).unwrap();
        let reloaded: Catalog = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded.points().count(), 3);
        assert!(reloaded.point("KSNA").is_some());
        assert!(reloaded.aircraft("Cessna 172").is_some());
    }

    #[test]
    fn duplicate_idents_fail_deserialization_too() {
        let json = r#"{
            "points": [
                {"ident": "AAAA", "name": "Alpha", "position": {"lat": 0.0, "lon": 0.0},
                 "type": "airport", "fuel": {"avgas": true}},
                {"ident": "AAAA", "name": "Alpha Again", "position": {"lat": 1.0, "lon": 1.0},
                 "type": "airport"}
            ],
            "aircraft": []
        }"#;
        assert!(serde_json::from_str::<Catalog>(json).is_err());
    }
}
