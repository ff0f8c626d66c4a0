//! The working subgraph: range-gated legs over catalog points.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Aircraft, Point};
use crate::spatial::{leg_weight_km, Heading, Position};

/// A directed weighted connection between two points.
///
/// Immutable after construction. Heading and traversal time are derived on
/// demand; the weight is the planar distance and doubles as the Dijkstra
/// edge cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub from: String,
    pub to: String,
    /// Planar distance in kilometers.
    pub weight_km: f64,
    pub from_position: Position,
    pub to_position: Position,
}

impl Leg {
    /// Computes the leg between two points. Each direction is computed
    /// independently; the weights come out equal because the magnitude of
    /// the coordinate delta does not depend on direction.
    pub fn between(from: &Point, to: &Point) -> Self {
        Self {
            from: from.ident.clone(),
            to: to.ident.clone(),
            weight_km: leg_weight_km(from.position, to.position),
            from_position: from.position,
            to_position: to.position,
        }
    }

    /// Initial bearing of the leg with its compass-quadrant label.
    pub fn heading(&self) -> Heading {
        Heading::between(self.from_position, self.to_position)
    }

    /// Hours to traverse this leg at the aircraft's cruise speed.
    pub fn time_hours(&self, aircraft: &Aircraft) -> f64 {
        self.weight_km / aircraft.cruise_speed_kmh()
    }
}

/// Adjacency for one planning session.
///
/// Rebuilt from scratch per request and never mutated once the composer has
/// finished wiring legs; search state lives in
/// [`crate::search::ShortestPaths`], not here.
#[derive(Debug, Default)]
pub struct Subgraph {
    adjacency: HashMap<String, HashMap<String, Leg>>,
}

impl Subgraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connects `from` to `to` if the aircraft can fly the hop on full
    /// tanks. A leg beyond range is silently left out: absence is the
    /// signal, not an error. Returns whether the leg was admitted.
    pub fn add_leg(&mut self, from: &Point, to: &Point, aircraft: &Aircraft) -> bool {
        let leg = Leg::between(from, to);
        if leg.weight_km > aircraft.range_km() {
            return false;
        }
        self.adjacency
            .entry(from.ident.clone())
            .or_default()
            .insert(to.ident.clone(), leg);
        true
    }

    /// Connects both directions, each weight computed independently.
    pub fn connect(&mut self, a: &Point, b: &Point, aircraft: &Aircraft) {
        self.add_leg(a, b, aircraft);
        self.add_leg(b, a, aircraft);
    }

    pub fn leg(&self, from: &str, to: &str) -> Option<&Leg> {
        self.adjacency.get(from)?.get(to)
    }

    /// Outgoing legs of a point; empty if the point has none.
    pub fn legs_from<'a>(&'a self, from: &str) -> impl Iterator<Item = &'a Leg> {
        self.adjacency
            .get(from)
            .into_iter()
            .flat_map(|neighbors| neighbors.values())
    }

    pub fn leg_count(&self) -> usize {
        self.adjacency.values().map(|neighbors| neighbors.len()).sum()
    }
}
