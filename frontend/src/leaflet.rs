use serde::Deserialize;
use shared::{Coordinate, CurvePath};
use wasm_bindgen::prelude::{JsValue, wasm_bindgen};

use crate::config::MapConfig;
use crate::session::{LayerId, MapSurface};

#[wasm_bindgen(module = "/leaflet_map.js")]
extern "C" {
    #[wasm_bindgen(js_name = initMap)]
    fn init_map(container_id: &str, tile_url: &str, attribution: &str, max_zoom: f64);
    #[wasm_bindgen(js_name = mapSize)]
    fn map_size() -> JsValue;
    #[wasm_bindgen(js_name = setView)]
    fn set_view_js(lat: f64, lon: f64, zoom: f64);
    #[wasm_bindgen(js_name = addMarker)]
    fn add_marker_js(lat: f64, lon: f64, label: &str) -> u32;
    #[wasm_bindgen(js_name = drawCurve)]
    fn draw_curve_js(
        start_lat: f64,
        start_lon: f64,
        control_lat: f64,
        control_lon: f64,
        end_lat: f64,
        end_lon: f64,
        color: &str,
        weight: f64,
    ) -> u32;
    #[wasm_bindgen(js_name = removeLayer)]
    fn remove_layer_js(id: u32);
}

#[derive(Deserialize)]
struct SizePayload {
    x: f64,
    y: f64,
}

/// The Leaflet map living in the page's map container.
pub struct LeafletMap {
    curve_color: String,
    curve_weight: f64,
    /// Last size reported by the browser, reused if a read fails.
    fallback_size: (f64, f64),
}

impl LeafletMap {
    pub fn mount(container_id: &str, config: &MapConfig) -> Self {
        init_map(
            container_id,
            &config.tile_url,
            &config.attribution,
            config.max_zoom,
        );
        tracing::debug!("map mounted in #{container_id}");
        Self {
            curve_color: config.curve_color.clone(),
            curve_weight: config.curve_weight,
            fallback_size: (800.0, 600.0),
        }
    }
}

impl MapSurface for LeafletMap {
    fn size(&self) -> (f64, f64) {
        match serde_wasm_bindgen::from_value::<SizePayload>(map_size()) {
            Ok(size) => (size.x, size.y),
            Err(err) => {
                tracing::warn!("could not read map size: {err}");
                self.fallback_size
            }
        }
    }

    fn set_view(&mut self, center: Coordinate, zoom: f64) {
        set_view_js(center.lat, center.lon, zoom);
        if let Ok(size) = serde_wasm_bindgen::from_value::<SizePayload>(map_size()) {
            self.fallback_size = (size.x, size.y);
        }
    }

    fn add_marker(&mut self, at: Coordinate, label: &str) -> LayerId {
        LayerId(add_marker_js(at.lat, at.lon, label))
    }

    fn draw_curve(&mut self, path: &CurvePath) -> LayerId {
        LayerId(draw_curve_js(
            path.start.lat,
            path.start.lon,
            path.control.lat,
            path.control.lon,
            path.end.lat,
            path.end.lon,
            &self.curve_color,
            self.curve_weight,
        ))
    }

    fn remove_layer(&mut self, layer: LayerId) {
        remove_layer_js(layer.0);
    }
}
