//! Spherical Web Mercator (EPSG:3857) as the map widget uses it.
//!
//! A [`Viewport`] mirrors the map's view state (center, zoom, container
//! size) so that container-pixel positions can be computed without asking
//! the browser.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::curve::{PixelBounds, PixelPoint};
use crate::geo::Coordinate;

/// Side of one map tile in pixels; the world is `TILE_SIZE * 2^zoom` wide.
pub const TILE_SIZE: f64 = 256.0;

const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: Coordinate,
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(center: Coordinate, zoom: f64, width: f64, height: f64) -> Self {
        Self {
            center,
            zoom,
            width,
            height,
        }
    }

    pub fn with_view(self, center: Coordinate, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            ..self
        }
    }

    pub fn with_size(self, width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..self
        }
    }

    /// Container position of `coord` under this view.
    pub fn container_point(&self, coord: Coordinate) -> PixelPoint {
        let point = project(coord, self.zoom);
        let origin = self.pixel_origin();
        PixelPoint::new(point.x - origin.x, point.y - origin.y)
    }

    /// Inverse of [`Viewport::container_point`].
    pub fn coordinate_at(&self, point: PixelPoint) -> Coordinate {
        let origin = self.pixel_origin();
        unproject(PixelPoint::new(point.x + origin.x, point.y + origin.y), self.zoom)
    }

    /// View that shows `bounds` (container pixels of this view) as large as
    /// possible, snapped down to a whole zoom level within `[0, max_zoom]`.
    pub fn fit_pixel_bounds(&self, bounds: PixelBounds, padding: f64, max_zoom: f64) -> Viewport {
        let center = self.coordinate_at(bounds.center());
        let avail_w = (self.width - 2.0 * padding).max(1.0);
        let avail_h = (self.height - 2.0 * padding).max(1.0);

        let scale = (avail_w / bounds.width()).min(avail_h / bounds.height());
        let zoom = if scale.is_finite() {
            (self.zoom + scale.log2()).floor()
        } else {
            max_zoom
        };

        self.with_view(center, zoom.clamp(0.0, max_zoom))
    }

    fn pixel_origin(&self) -> PixelPoint {
        let center = project(self.center, self.zoom);
        PixelPoint::new(center.x - self.width / 2.0, center.y - self.height / 2.0)
    }
}

fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * zoom.exp2()
}

/// Absolute world pixel of `coord` at `zoom`.
fn project(coord: Coordinate, zoom: f64) -> PixelPoint {
    let size = world_size(zoom);
    let lat = coord.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (coord.lon + 180.0) / 360.0;
    let y = 0.5 - (PI / 4.0 + lat / 2.0).tan().ln() / (2.0 * PI);
    PixelPoint::new(x * size, y * size)
}

fn unproject(point: PixelPoint, zoom: f64) -> Coordinate {
    let size = world_size(zoom);
    let x = point.x / size;
    let y = point.y / size;
    let lon = x * 360.0 - 180.0;
    let lat = (2.0 * ((0.5 - y) * 2.0 * PI).exp().atan() - PI / 2.0).to_degrees();
    Coordinate::new(lat, lon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::QuadraticCurve;

    fn overview() -> Viewport {
        Viewport::new(Coordinate::new(37.8, -96.0), 4.0, 800.0, 600.0)
    }

    #[test]
    fn test_center_projects_to_container_middle() {
        let view = overview();
        let point = view.container_point(view.center);
        assert!((point.x - 400.0).abs() < 1e-9);
        assert!((point.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_equator_and_meridian_at_zoom_zero() {
        let view = Viewport::new(Coordinate::new(0.0, 0.0), 0.0, 256.0, 256.0);
        let point = view.container_point(Coordinate::new(0.0, 180.0));
        assert!((point.x - 256.0).abs() < 1e-9);
        assert!((point.y - 128.0).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_in_doubles_pixel_distances() {
        let a = Coordinate::new(10.0, 20.0);
        let view = overview();
        let closer = view.with_view(view.center, view.zoom + 1.0);

        let d0 = view.container_point(a);
        let d1 = closer.container_point(a);
        assert!(((d1.x - 400.0) - 2.0 * (d0.x - 400.0)).abs() < 1e-6);
        assert!(((d1.y - 300.0) - 2.0 * (d0.y - 300.0)).abs() < 1e-6);
    }

    #[test]
    fn test_north_is_up() {
        let view = overview();
        let north = view.container_point(Coordinate::new(45.0, -96.0));
        let south = view.container_point(Coordinate::new(30.0, -96.0));
        assert!(north.y < south.y);
    }

    #[test]
    fn test_polar_latitudes_are_clamped() {
        let view = overview();
        let pole = view.container_point(Coordinate::new(90.0, 0.0));
        assert!(pole.y.is_finite());
    }

    #[test]
    fn test_fit_keeps_curve_inside_view() {
        let view = overview();
        let curve = QuadraticCurve::new(
            view.container_point(Coordinate::new(10.0, 20.0)),
            view.container_point(Coordinate::new(32.0, 18.0)),
            view.container_point(Coordinate::new(30.0, 40.0)),
        );
        let fitted = view.fit_pixel_bounds(curve.bounds(), 20.0, 19.0);
        assert_eq!(fitted.zoom, fitted.zoom.floor());

        for point in curve.sample(32) {
            let geo = view.coordinate_at(point);
            let refit = fitted.container_point(geo);
            assert!(refit.x >= -1e-6 && refit.x <= fitted.width + 1e-6);
            assert!(refit.y >= -1e-6 && refit.y <= fitted.height + 1e-6);
        }
    }

    #[test]
    fn test_fit_degenerate_bounds_uses_max_zoom() {
        let view = overview();
        let point = view.container_point(Coordinate::new(38.0, -77.0));
        let fitted = view.fit_pixel_bounds(PixelBounds::from_point(point), 0.0, 19.0);
        assert_eq!(fitted.zoom, 19.0);
        assert!((fitted.center.lat - 38.0).abs() < 1e-9);
        assert!((fitted.center.lon + 77.0).abs() < 1e-9);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn valid_coord() -> impl Strategy<Value = Coordinate> {
            (-80.0..=80.0, -179.0..=179.0).prop_map(|(lat, lon)| Coordinate { lat, lon })
        }

        proptest! {
            #[test]
            fn prop_container_point_round_trips(
                center in valid_coord(),
                coord in valid_coord(),
                zoom in 0.0..12.0f64
            ) {
                let view = Viewport::new(center, zoom, 1024.0, 768.0);
                let back = view.coordinate_at(view.container_point(coord));
                prop_assert!((back.lat - coord.lat).abs() < 1e-7);
                prop_assert!((back.lon - coord.lon).abs() < 1e-7);
            }
        }
    }
}
