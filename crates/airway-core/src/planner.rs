//! Route composition: subgraph assembly, greedy waypoint ordering, and
//! itinerary stitching.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::error::PlanError;
use crate::graph::{Leg, Subgraph};
use crate::itinerary::{route_fragment, Fragment, Itinerary, Reason, RouteAccumulator, Stopover};
use crate::models::{Aircraft, Point};
use crate::search::{FloatOrd, ShortestPaths};

/// Plans a refueling-feasible route from `departure` to `arrival`, visiting
/// every ident in `waypoints` along the way.
///
/// The working subgraph connects the endpoints, the waypoints, and every
/// airport stocking the aircraft's required fuel, with each leg admitted
/// only if the aircraft can fly it in one hop. Waypoints are visited
/// nearest-first by the weight of the direct leg from the departure. That
/// is a greedy heuristic, not a shortest multi-stop tour; it can and does
/// produce non-minimal orderings.
///
/// Any fragment failure aborts the whole composition; no partial itinerary
/// is returned. An unreachable target is reported as
/// [`PlanError::RangeExceeded`]: every leg of the subgraph was range-gated
/// at construction, so a missing path is a fuel-range infeasibility rather
/// than a topology problem.
pub fn plan_route(
    catalog: &Catalog,
    departure: &str,
    arrival: &str,
    waypoints: &[&str],
    aircraft: &Aircraft,
) -> Result<Itinerary, PlanError> {
    aircraft.validate()?;
    let departure = resolve_airport(catalog, departure)?;
    let arrival = resolve_airport(catalog, arrival)?;
    let extra: Vec<&Point> = waypoints
        .iter()
        .map(|ident| {
            catalog.point(ident).ok_or_else(|| PlanError::UnknownPoint {
                ident: ident.to_string(),
            })
        })
        .collect::<Result<_, _>>()?;

    let fuel = aircraft.required_fuel();
    let candidates = catalog.airports_with(fuel);

    // Wire the session subgraph: endpoints and waypoints to every candidate
    // refueling stop, and the candidates pairwise (index order avoids
    // duplicate pairs). Every leg is range-gated on insertion.
    let mut graph = Subgraph::new();
    for (index, candidate) in candidates.iter().enumerate() {
        graph.connect(candidate, departure, aircraft);
        graph.connect(candidate, arrival, aircraft);
        for waypoint in &extra {
            graph.connect(candidate, waypoint, aircraft);
        }
        for later in &candidates[index..] {
            graph.connect(candidate, later, aircraft);
        }
    }
    debug!(
        candidates = candidates.len(),
        legs = graph.leg_count(),
        range_km = aircraft.range_km(),
        "working subgraph assembled"
    );

    let mut paths = ShortestPaths::compute(&graph, &departure.ident);
    let mut acc = RouteAccumulator::default();
    let mut stopovers: Vec<Stopover> = Vec::new();
    let mut legs: Vec<Leg> = Vec::new();

    // Waypoints ordered by the weight of the direct departure leg, nearest
    // first. A waypoint with no direct leg from the departure orders last.
    let mut queue: BinaryHeap<Reverse<(FloatOrd, String)>> = BinaryHeap::new();
    for waypoint in &extra {
        let direct = graph
            .leg(&departure.ident, &waypoint.ident)
            .map_or(f64::INFINITY, |leg| leg.weight_km);
        queue.push(Reverse((FloatOrd(direct), waypoint.ident.clone())));
    }

    while let Some(Reverse((_, waypoint))) = queue.pop() {
        let fragment = route_fragment(catalog, &graph, &paths, &waypoint, aircraft, &mut acc)
            .map_err(range_gate)?;
        append_fragment(&mut stopovers, &mut legs, fragment);
        // The just-reached waypoint becomes the source for the next leg of
        // the composition.
        paths = ShortestPaths::compute(&graph, &waypoint);
    }

    let fragment = route_fragment(catalog, &graph, &paths, &arrival.ident, aircraft, &mut acc)
        .map_err(range_gate)?;
    append_fragment(&mut stopovers, &mut legs, fragment);

    if let Some(first) = stopovers.first_mut() {
        first.reasons.push(Reason::BeginningFlight);
    }
    if let Some(last) = stopovers.last_mut() {
        last.reasons.push(Reason::EndingFlight);
    }

    info!(
        stopovers = stopovers.len(),
        total_km = acc.total_km,
        total_hours = acc.total_hours,
        "route planned"
    );

    Ok(Itinerary {
        stopovers,
        legs,
        total_km: acc.total_km,
        total_hours: acc.total_hours,
        planned_at: Utc::now(),
    })
}

fn resolve_airport<'a>(catalog: &'a Catalog, ident: &str) -> Result<&'a Point, PlanError> {
    let point = catalog.point(ident).ok_or_else(|| PlanError::UnknownPoint {
        ident: ident.to_string(),
    })?;
    if !point.is_airport() {
        return Err(PlanError::NotAnAirport {
            ident: ident.to_string(),
        });
    }
    Ok(point)
}

/// In a range-gated subgraph a missing path is a fuel-range infeasibility;
/// other errors pass through untouched.
fn range_gate(err: PlanError) -> PlanError {
    match err {
        PlanError::Unreachable { ident } => {
            warn!(%ident, "target unreachable in range-gated subgraph");
            PlanError::RangeExceeded
        }
        other => other,
    }
}

/// Appends a fragment, merging the seam stopover.
///
/// A fragment's first stopover is the previous fragment's last (both are
/// the composition source), so its reasons fold into the existing stopover
/// instead of duplicating it. This keeps legs.len() == stopovers.len() - 1.
fn append_fragment(stopovers: &mut Vec<Stopover>, legs: &mut Vec<Leg>, fragment: Fragment) {
    let Fragment {
        stopovers: mut fragment_stopovers,
        legs: fragment_legs,
    } = fragment;

    if let Some(last) = stopovers.last_mut() {
        let seam = fragment_stopovers
            .first()
            .is_some_and(|first| first.ident == last.ident);
        if seam {
            let first = fragment_stopovers.remove(0);
            for reason in first.reasons {
                if !last.reasons.contains(&reason) {
                    last.reasons.push(reason);
                }
            }
        }
    }

    stopovers.extend(fragment_stopovers);
    legs.extend(fragment_legs);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AircraftClass, BeaconKind, FuelStock, Point};
    use crate::spatial::{Position, DEG_TO_KM};

    fn airport(ident: &str, name: &str, lat: f64, lon: f64, avgas: bool) -> Point {
        Point::airport(
            ident,
            name,
            Position::new(lat, lon).unwrap(),
            FuelStock {
                avgas,
                jet_a: false,
            },
        )
    }

    fn prop_with_range_km(range_km: f64) -> Aircraft {
        Aircraft {
            make: "Test".to_string(),
            model: "Prop".to_string(),
            class: AircraftClass::Prop,
            tank_size_l: range_km / 1.852,
            burn_rate_lph: 100.0,
            cruise_speed_kt: 100.0,
        }
    }

    /// Three airports on a meridian, consecutive spacing of 100 km.
    fn line_catalog() -> Catalog {
        let spacing_deg = 100.0 / DEG_TO_KM;
        let mut catalog = Catalog::new();
        catalog
            .add_point(airport("AAAA", "Alpha", 0.0, 0.0, true))
            .unwrap();
        catalog
            .add_point(airport("MMMM", "Midfield", spacing_deg, 0.0, true))
            .unwrap();
        catalog
            .add_point(airport("BBBB", "Bravo", 2.0 * spacing_deg, 0.0, true))
            .unwrap();
        catalog
    }

    #[test]
    fn line_route_within_range_totals_two_hundred_km() {
        let catalog = line_catalog();
        let aircraft = prop_with_range_km(250.0);

        let itinerary = plan_route(&catalog, "AAAA", "BBBB", &[], &aircraft).unwrap();
        assert!((itinerary.total_km - 200.0).abs() < 1e-6);
        assert_eq!(itinerary.stopovers.len(), itinerary.legs.len() + 1);
        assert!(itinerary.stopovers[0].has_reason(&Reason::BeginningFlight));
        assert!(itinerary
            .stopovers
            .last()
            .unwrap()
            .has_reason(&Reason::EndingFlight));

        let leg_sum: f64 = itinerary.legs.iter().map(|leg| leg.weight_km).sum();
        assert!((itinerary.total_km - leg_sum).abs() < 1e-9);
        let hour_sum: f64 = itinerary
            .legs
            .iter()
            .map(|leg| leg.time_hours(&aircraft))
            .sum();
        assert!((itinerary.total_hours - hour_sum).abs() < 1e-9);
    }

    #[test]
    fn line_route_beyond_range_is_range_exceeded() {
        let catalog = line_catalog();
        let aircraft = prop_with_range_km(90.0);

        let err = plan_route(&catalog, "AAAA", "BBBB", &[], &aircraft)
            .expect_err("no 100 km hop fits a 90 km range");
        assert_eq!(err, PlanError::RangeExceeded);
    }

    #[test]
    fn beacon_waypoint_is_overflown_without_refueling() {
        let mut catalog = line_catalog();
        catalog
            .add_point(Point::beacon(
                "SLI",
                "Seal Beach",
                Position::new(50.0 / DEG_TO_KM, 0.1).unwrap(),
                BeaconKind::Vortac,
            ))
            .unwrap();
        let aircraft = prop_with_range_km(300.0);

        let itinerary = plan_route(&catalog, "AAAA", "BBBB", &["SLI"], &aircraft).unwrap();
        let beacon_stop = itinerary
            .stopovers
            .iter()
            .find(|stop| stop.ident == "SLI")
            .expect("waypoint must be visited");
        assert!(beacon_stop.has_reason(&Reason::Overflying {
            name: "Seal Beach".to_string()
        }));
        assert!(!beacon_stop.has_reason(&Reason::Refueling));
        assert!(!beacon_stop
            .reasons
            .iter()
            .any(|reason| matches!(reason, Reason::Landing { .. })));
    }

    #[test]
    fn departure_equal_to_arrival_is_a_single_stopover() {
        let catalog = line_catalog();
        let aircraft = prop_with_range_km(250.0);

        let itinerary = plan_route(&catalog, "AAAA", "AAAA", &[], &aircraft).unwrap();
        assert_eq!(itinerary.stopovers.len(), 1);
        assert!(itinerary.legs.is_empty());
        assert_eq!(itinerary.total_km, 0.0);
        assert_eq!(itinerary.total_hours, 0.0);

        let only = &itinerary.stopovers[0];
        assert!(only.has_reason(&Reason::BeginningFlight));
        assert!(only.has_reason(&Reason::EndingFlight));
    }

    #[test]
    fn waypoint_input_order_does_not_change_the_visited_set() {
        let mut catalog = line_catalog();
        catalog
            .add_point(airport("CCCC", "Charlie", 0.0, 100.0 / DEG_TO_KM, true))
            .unwrap();
        catalog
            .add_point(airport("DDDD", "Delta", 0.0, -100.0 / DEG_TO_KM, true))
            .unwrap();
        let aircraft = prop_with_range_km(400.0);

        let forward = plan_route(&catalog, "AAAA", "BBBB", &["CCCC", "DDDD"], &aircraft).unwrap();
        let backward = plan_route(&catalog, "AAAA", "BBBB", &["DDDD", "CCCC"], &aircraft).unwrap();

        let visited = |itinerary: &Itinerary| {
            let mut idents: Vec<String> = itinerary
                .stopovers
                .iter()
                .map(|stop| stop.ident.clone())
                .collect();
            idents.sort();
            idents.dedup();
            idents
        };
        assert_eq!(visited(&forward), visited(&backward));
        assert_eq!(forward.stopovers.len(), backward.stopovers.len());
        assert!((forward.total_km - backward.total_km).abs() < 1e-9);
    }

    #[test]
    fn invalid_inputs_are_rejected_before_any_computation() {
        let catalog = line_catalog();
        let aircraft = prop_with_range_km(250.0);

        let err = plan_route(&catalog, "XXXX", "BBBB", &[], &aircraft).unwrap_err();
        assert_eq!(
            err,
            PlanError::UnknownPoint {
                ident: "XXXX".to_string()
            }
        );

        let mut with_beacon = line_catalog();
        with_beacon
            .add_point(Point::beacon(
                "SLI",
                "Seal Beach",
                Position::new(0.5, 0.5).unwrap(),
                BeaconKind::Vor,
            ))
            .unwrap();
        let err = plan_route(&with_beacon, "SLI", "BBBB", &[], &aircraft).unwrap_err();
        assert_eq!(
            err,
            PlanError::NotAnAirport {
                ident: "SLI".to_string()
            }
        );

        let mut broken = aircraft.clone();
        broken.cruise_speed_kt = 0.0;
        assert!(matches!(
            plan_route(&catalog, "AAAA", "BBBB", &[], &broken),
            Err(PlanError::InvalidAircraft { .. })
        ));
    }

    #[test]
    fn refueling_recorded_only_where_the_fuel_kind_matches() {
        // Midfield stocks no avgas, so a prop lands there without refueling.
        let spacing_deg = 100.0 / DEG_TO_KM;
        let mut catalog = Catalog::new();
        catalog
            .add_point(airport("AAAA", "Alpha", 0.0, 0.0, true))
            .unwrap();
        catalog
            .add_point(airport("MMMM", "Midfield", spacing_deg, 0.0, false))
            .unwrap();
        catalog
            .add_point(airport("BBBB", "Bravo", 2.0 * spacing_deg, 0.0, true))
            .unwrap();
        let aircraft = prop_with_range_km(250.0);

        let itinerary = plan_route(&catalog, "AAAA", "BBBB", &["MMMM"], &aircraft).unwrap();
        let mid = itinerary
            .stopovers
            .iter()
            .find(|stop| stop.ident == "MMMM")
            .unwrap();
        assert!(mid.has_reason(&Reason::Landing {
            name: "Midfield".to_string()
        }));
        assert!(!mid.has_reason(&Reason::Refueling));
    }
}
