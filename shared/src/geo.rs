use serde::{Deserialize, Serialize};

/// Fraction of the endpoint delta used to push the curve control point
/// sideways.
pub const CURVE_OFFSET: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn interpolate(self, other: Self, t: f64) -> Self {
        Self {
            lat: self.lat + (other.lat - self.lat) * t,
            lon: self.lon + (other.lon - self.lon) * t,
        }
    }

    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Control point for a route arc between `a` and `b`.
///
/// This is a visual heuristic, not a geodesic: the arithmetic midpoint is
/// pushed perpendicular to the `a -> b` vector by [`CURVE_OFFSET`] of its
/// length, so the arc always bows to the left of the direction of travel.
pub fn biased_midpoint(a: Coordinate, b: Coordinate) -> Coordinate {
    biased_midpoint_with(a, b, CURVE_OFFSET)
}

/// [`biased_midpoint`] with an explicit offset fraction.
pub fn biased_midpoint_with(a: Coordinate, b: Coordinate, offset: f64) -> Coordinate {
    let mid = a.interpolate(b, 0.5);
    let d_lat = b.lat - a.lat;
    let d_lon = b.lon - a.lon;
    // (lon, lat) rotated a quarter turn: deltas swap axes, one changes sign.
    Coordinate {
        lat: mid.lat + d_lon * offset,
        lon: mid.lon - d_lat * offset,
    }
}
