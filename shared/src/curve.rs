use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// A position in map-container pixels (origin top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelBounds {
    pub min: PixelPoint,
    pub max: PixelPoint,
}

impl PixelBounds {
    pub fn from_point(point: PixelPoint) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    pub fn extend(&mut self, point: PixelPoint) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> PixelPoint {
        self.min.lerp(self.max, 0.5)
    }

    pub fn contains(&self, point: PixelPoint) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y)
    }
}

/// Quadratic Bézier `M start Q control end` in container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadraticCurve {
    pub start: PixelPoint,
    pub control: PixelPoint,
    pub end: PixelPoint,
}

impl QuadraticCurve {
    pub fn new(start: PixelPoint, control: PixelPoint, end: PixelPoint) -> Self {
        Self {
            start,
            control,
            end,
        }
    }

    pub fn point_at(&self, t: f64) -> PixelPoint {
        let a = self.start.lerp(self.control, t);
        let b = self.control.lerp(self.end, t);
        a.lerp(b, t)
    }

    /// Tight bounding box of the drawn arc.
    ///
    /// The control point itself is usually off the curve, so the box is
    /// built from the endpoints plus the per-axis extremum of the curve.
    pub fn bounds(&self) -> PixelBounds {
        let mut bounds = PixelBounds::from_point(self.start);
        bounds.extend(self.end);

        let axes = [
            (self.start.x, self.control.x, self.end.x),
            (self.start.y, self.control.y, self.end.y),
        ];
        for (p0, p1, p2) in axes {
            let denom = p0 - 2.0 * p1 + p2;
            if denom.abs() > f64::EPSILON {
                let t = (p0 - p1) / denom;
                if t > 0.0 && t < 1.0 {
                    bounds.extend(self.point_at(t));
                }
            }
        }
        bounds
    }

    pub fn sample(&self, segments: usize) -> Vec<PixelPoint> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.point_at(i as f64 / segments as f64))
            .collect()
    }
}

/// The same arc expressed in geographic control points, ready to hand to the
/// map library.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePath {
    pub start: Coordinate,
    pub control: Coordinate,
    pub end: Coordinate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let curve = QuadraticCurve::new(
            PixelPoint::new(0.0, 0.0),
            PixelPoint::new(50.0, -100.0),
            PixelPoint::new(100.0, 0.0),
        );
        assert_eq!(curve.point_at(0.0), curve.start);
        assert_eq!(curve.point_at(1.0), curve.end);
    }

    #[test]
    fn test_bounds_reach_apex_not_control_point() {
        let curve = QuadraticCurve::new(
            PixelPoint::new(0.0, 0.0),
            PixelPoint::new(50.0, -100.0),
            PixelPoint::new(100.0, 0.0),
        );
        let bounds = curve.bounds();
        assert_eq!(bounds.min.x, 0.0);
        assert_eq!(bounds.max.x, 100.0);
        // apex of a symmetric quadratic sits halfway to the control point
        assert!((bounds.min.y + 50.0).abs() < 1e-9);
        assert_eq!(bounds.max.y, 0.0);
    }

    #[test]
    fn test_straight_curve_bounds() {
        let curve = QuadraticCurve::new(
            PixelPoint::new(10.0, 10.0),
            PixelPoint::new(20.0, 20.0),
            PixelPoint::new(30.0, 30.0),
        );
        let bounds = curve.bounds();
        assert_eq!(bounds.min, PixelPoint::new(10.0, 10.0));
        assert_eq!(bounds.max, PixelPoint::new(30.0, 30.0));
        assert_eq!(bounds.center(), PixelPoint::new(20.0, 20.0));
    }

    #[test]
    fn test_sample_count() {
        let curve = QuadraticCurve::new(
            PixelPoint::new(0.0, 0.0),
            PixelPoint::new(1.0, 1.0),
            PixelPoint::new(2.0, 0.0),
        );
        assert_eq!(curve.sample(8).len(), 9);
        assert_eq!(curve.sample(0).len(), 2);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn pixel() -> impl Strategy<Value = PixelPoint> {
            (-2000.0..2000.0, -2000.0..2000.0).prop_map(|(x, y)| PixelPoint::new(x, y))
        }

        proptest! {
            #[test]
            fn prop_bounds_contain_every_sample(
                start in pixel(),
                control in pixel(),
                end in pixel()
            ) {
                let curve = QuadraticCurve::new(start, control, end);
                let bounds = curve.bounds();
                let slack = PixelBounds {
                    min: PixelPoint::new(bounds.min.x - 1e-6, bounds.min.y - 1e-6),
                    max: PixelPoint::new(bounds.max.x + 1e-6, bounds.max.y + 1e-6),
                };
                for point in curve.sample(64) {
                    prop_assert!(slack.contains(point));
                }
            }

            #[test]
            fn prop_bounds_never_exceed_control_hull(
                start in pixel(),
                control in pixel(),
                end in pixel()
            ) {
                let curve = QuadraticCurve::new(start, control, end);
                let mut hull = PixelBounds::from_point(start);
                hull.extend(control);
                hull.extend(end);
                let bounds = curve.bounds();
                prop_assert!(bounds.min.x >= hull.min.x - 1e-9);
                prop_assert!(bounds.min.y >= hull.min.y - 1e-9);
                prop_assert!(bounds.max.x <= hull.max.x + 1e-9);
                prop_assert!(bounds.max.y <= hull.max.y + 1e-9);
            }
        }
    }
}
