//! Spatial math for leg weights and headings.
//!
//! The distance model is deliberately planar: the (lat, lon) delta between
//! two points is treated as a 2-D vector and its magnitude scaled by a fixed
//! degrees-to-kilometers constant. Headings use the standard initial-bearing
//! formula. Neither makes geodesic-accuracy claims.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// Kilometers per degree of arc: 40,000 km of circumference over 360.
pub const DEG_TO_KM: f64 = 111.1;

/// A latitude/longitude pair in decimal degrees.
///
/// Equality is exact: two positions are equal iff both components match
/// bit-for-bit. There is no epsilon tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPosition")]
pub struct Position {
    lat: f64,
    lon: f64,
}

/// Unvalidated mirror of [`Position`] for serde input.
#[derive(Debug, Clone, Copy, Deserialize)]
struct RawPosition {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawPosition> for Position {
    type Error = PlanError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Position::new(raw.lat, raw.lon)
    }
}

impl Position {
    /// Builds a position, validating both components into [-180, 180].
    pub fn new(lat: f64, lon: f64) -> Result<Self, PlanError> {
        for value in [lat, lon] {
            if !value.is_finite() || !(-180.0..=180.0).contains(&value) {
                return Err(PlanError::InvalidPosition {
                    value: value.to_string(),
                });
            }
        }
        Ok(Self { lat, lon })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

/// Planar leg weight between two positions, in kilometers.
///
/// The magnitude of the coordinate delta is direction-independent, so
/// `leg_weight_km(a, b) == leg_weight_km(b, a)` even though callers compute
/// each direction separately.
pub fn leg_weight_km(a: Position, b: Position) -> f64 {
    let dlat = b.lat() - a.lat();
    let dlon = b.lon() - a.lon();
    (dlat * dlat + dlon * dlon).sqrt() * DEG_TO_KM
}

/// Initial bearing from `a` to `b` in degrees clockwise from true north,
/// normalized to [0, 360).
pub fn bearing_deg(a: Position, b: Position) -> f64 {
    let phi1 = a.lat().to_radians();
    let phi2 = b.lat().to_radians();
    let delta_lambda = (b.lon() - a.lon()).to_radians();

    let x = delta_lambda.sin() * phi2.cos();
    let y = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    let degrees = x.atan2(y).to_degrees();
    if degrees < 0.0 {
        degrees + 360.0
    } else {
        degrees
    }
}

/// Quarter of the compass rose a bearing falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompassQuadrant {
    NorthEast,
    SouthEast,
    SouthWest,
    NorthWest,
}

impl CompassQuadrant {
    /// Classifies a bearing in degrees. The four cardinal headings fold into
    /// the quadrant clockwise of them, so due north reads as north-east.
    pub fn from_bearing(degrees: f64) -> Self {
        let degrees = degrees.rem_euclid(360.0);
        if degrees < 90.0 {
            CompassQuadrant::NorthEast
        } else if degrees < 180.0 {
            CompassQuadrant::SouthEast
        } else if degrees < 270.0 {
            CompassQuadrant::SouthWest
        } else {
            CompassQuadrant::NorthWest
        }
    }
}

impl fmt::Display for CompassQuadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CompassQuadrant::NorthEast => "north-east",
            CompassQuadrant::SouthEast => "south-east",
            CompassQuadrant::SouthWest => "south-west",
            CompassQuadrant::NorthWest => "north-west",
        };
        f.write_str(label)
    }
}

/// A leg bearing: degrees clockwise from true north plus the quadrant label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub degrees: f64,
    pub quadrant: CompassQuadrant,
}

impl Heading {
    pub fn between(a: Position, b: Position) -> Self {
        let degrees = bearing_deg(a, b);
        Self {
            degrees,
            quadrant: CompassQuadrant::from_bearing(degrees),
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} degrees {}", self.degrees, self.quadrant)
    }
}
