//! Target-independent types shared by the route visualizer.
//!
//! Everything here is pure data and math so it can be tested natively,
//! without a browser or a map library.

pub mod base;
pub mod curve;
pub mod geo;
pub mod projection;

pub use base::{LocationRecord, normalize_key};
pub use curve::{CurvePath, PixelBounds, PixelPoint, QuadraticCurve};
pub use geo::{CURVE_OFFSET, Coordinate, biased_midpoint, biased_midpoint_with};
pub use projection::{TILE_SIZE, Viewport};
