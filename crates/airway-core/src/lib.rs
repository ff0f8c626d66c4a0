//! Routing engine for refueling-feasible flight planning.
//!
//! A catalog of airports and NAV beacons becomes, per planning request, a
//! range-gated working subgraph; Dijkstra's algorithm settles shortest
//! paths over it; and the composer stitches per-target fragments into an
//! itinerary of annotated stopovers with aggregate distance and time.

pub mod catalog;
pub mod error;
pub mod graph;
pub mod itinerary;
pub mod models;
pub mod planner;
pub mod search;
pub mod spatial;

pub use catalog::Catalog;
pub use error::PlanError;
pub use graph::{Leg, Subgraph};
pub use itinerary::{
    route_fragment, Fragment, Itinerary, Reason, RouteAccumulator, Stopover,
};
pub use models::{
    Aircraft, AircraftClass, BeaconKind, FuelKind, FuelStock, Point, PointKind,
};
pub use planner::plan_route;
pub use search::ShortestPaths;
pub use spatial::{bearing_deg, leg_weight_km, CompassQuadrant, Heading, Position, DEG_TO_KM};
