//! Error taxonomy for the planning core.

use thiserror::Error;

/// Failures surfaced by the routing engine and composer.
///
/// Nothing in this crate catches and retries; every failure propagates to
/// the caller, which owns whatever retry or re-prompt behavior it wants.
/// Note that a single hop beyond the aircraft's range is *not* an error:
/// the leg is silently left out of the working subgraph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// The cumulative unrefueled distance exceeded the aircraft's range.
    #[error("due to lack of refueling facilities, this trip is impossible")]
    RangeExceeded,

    /// The predecessor chain never reaches the search source.
    #[error("no path to {ident} from the current search source")]
    Unreachable { ident: String },

    /// A route endpoint or waypoint ident is not in the catalog.
    #[error("unknown point: {ident}")]
    UnknownPoint { ident: String },

    /// Departures and arrivals must be airports, not beacons.
    #[error("{ident} is not an airport")]
    NotAnAirport { ident: String },

    /// Aircraft performance numbers that make planning meaningless.
    #[error("invalid aircraft: {reason}")]
    InvalidAircraft { reason: String },

    /// Latitude or longitude outside [-180, 180].
    #[error("coordinate out of range: {value}")]
    InvalidPosition { value: String },

    /// Catalog idents are unique; inserts never overwrite silently.
    #[error("ident already in catalog: {ident}")]
    DuplicateIdent { ident: String },
}
