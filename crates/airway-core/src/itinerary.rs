//! Stopovers, itineraries, and the fragment walk that annotates them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::PlanError;
use crate::graph::{Leg, Subgraph};
use crate::models::{Aircraft, Point, PointKind};
use crate::search::ShortestPaths;

/// Why a point is visited on a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Reason {
    Landing { name: String },
    Refueling,
    Overflying { name: String },
    BeginningFlight,
    EndingFlight,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::Landing { name } => write!(f, "landing at {name}"),
            Reason::Refueling => f.write_str("refueling"),
            Reason::Overflying { name } => write!(f, "flying over {name}"),
            Reason::BeginningFlight => f.write_str("beginning the flight"),
            Reason::EndingFlight => f.write_str("ending the flight"),
        }
    }
}

/// A visited point with the reasons for the visit.
///
/// Reasons are non-empty once a stopover leaves the fragment walk: every
/// visited airport gets at least a landing reason and every beacon an
/// overflight reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stopover {
    pub ident: String,
    pub name: String,
    pub reasons: Vec<Reason>,
}

impl Stopover {
    pub fn has_reason(&self, reason: &Reason) -> bool {
        self.reasons.contains(reason)
    }
}

/// Distance and time accumulators for one planning request.
///
/// The composer owns one of these per request and threads it mutably
/// through every fragment; no accumulator state outlives the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteAccumulator {
    /// Kilometers flown since the last refueling stop.
    pub km_since_refuel: f64,
    pub total_km: f64,
    pub total_hours: f64,
}

/// A forward-ordered slice of a route: the stopovers from the search source
/// to one target and the legs between them.
#[derive(Debug, Clone)]
pub struct Fragment {
    pub stopovers: Vec<Stopover>,
    pub legs: Vec<Leg>,
}

/// Walks the predecessor chain from `target` back to the search source,
/// producing the forward-ordered fragment.
///
/// Each visited airport is annotated with a landing reason, plus a
/// refueling reason (and a reset of the since-refuel counter) when it
/// stocks the aircraft's required fuel; beacons get an overflight reason
/// only. Every traversed leg adds its weight to the since-refuel counter,
/// and the walk fails eagerly with [`PlanError::RangeExceeded`] the moment
/// the counter passes the aircraft's range, not at the end of the walk.
///
/// A target with no settled weight is reported as
/// [`PlanError::Unreachable`], which callers must treat as a no-path
/// condition distinct from range infeasibility.
pub fn route_fragment(
    catalog: &Catalog,
    graph: &Subgraph,
    paths: &ShortestPaths,
    target: &str,
    aircraft: &Aircraft,
    acc: &mut RouteAccumulator,
) -> Result<Fragment, PlanError> {
    let target_point = catalog.point(target).ok_or_else(|| PlanError::UnknownPoint {
        ident: target.to_string(),
    })?;

    if target != paths.source() && paths.distance_to(target).is_none() {
        return Err(PlanError::Unreachable {
            ident: target.to_string(),
        });
    }

    let mut stopovers = vec![annotate(target_point, aircraft, acc)];
    let mut legs: Vec<Leg> = Vec::new();
    let mut current = target;

    while let Some(previous) = paths.predecessor(current) {
        let Some(leg) = graph.leg(previous, current) else {
            // A predecessor without its leg means the chain does not trace
            // back through the subgraph.
            return Err(PlanError::Unreachable {
                ident: current.to_string(),
            });
        };

        acc.km_since_refuel += leg.weight_km;
        if acc.km_since_refuel > aircraft.range_km() {
            return Err(PlanError::RangeExceeded);
        }
        acc.total_km += leg.weight_km;
        acc.total_hours += leg.time_hours(aircraft);

        let previous_point =
            catalog
                .point(previous)
                .ok_or_else(|| PlanError::UnknownPoint {
                    ident: previous.to_string(),
                })?;
        stopovers.push(annotate(previous_point, aircraft, acc));
        legs.push(leg.clone());
        current = previous;
    }

    stopovers.reverse();
    legs.reverse();
    Ok(Fragment { stopovers, legs })
}

fn annotate(point: &Point, aircraft: &Aircraft, acc: &mut RouteAccumulator) -> Stopover {
    let mut reasons = Vec::new();
    match &point.kind {
        PointKind::Airport { .. } => {
            reasons.push(Reason::Landing {
                name: point.name.clone(),
            });
            if point.refuels(aircraft.required_fuel()) {
                reasons.push(Reason::Refueling);
                acc.km_since_refuel = 0.0;
            }
        }
        PointKind::Beacon { .. } => {
            reasons.push(Reason::Overflying {
                name: point.name.clone(),
            });
        }
    }
    Stopover {
        ident: point.ident.clone(),
        name: point.name.clone(),
        reasons,
    }
}

/// The complete ordered route: stopovers, the legs connecting consecutive
/// stopovers, and the aggregate distance and time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itinerary {
    pub stopovers: Vec<Stopover>,
    pub legs: Vec<Leg>,
    /// Sum of the constituent leg weights, kilometers.
    pub total_km: f64,
    /// Sum of the per-leg times at the aircraft's cruise speed, hours.
    pub total_hours: f64,
    pub planned_at: DateTime<Utc>,
}
