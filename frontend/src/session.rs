//! Selection state, suggestions and route drawing for one page session.
//!
//! [`RouteSession`] owns everything that changes while the page is open:
//! the base directory, the two selection slots, the marker handles and the
//! single drawn route. The map itself sits behind [`MapSurface`] so the
//! session can be driven without a browser.

use shared::{
    Coordinate, CurvePath, LocationRecord, PixelPoint, QuadraticCurve, Viewport, biased_midpoint,
};
use thiserror::Error;

use crate::config::MapConfig;
use crate::directory::BaseDirectory;
use crate::search::{SearchError, is_searchable};
use crate::slot::{Slot, Slots};

/// Handle of a layer (marker or curve) living on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(pub u32);

/// Rendering side of the map.
///
/// Implementations only draw; projection and view bookkeeping happen in
/// [`RouteSession`].
pub trait MapSurface {
    /// Container size in pixels as `(width, height)`.
    fn size(&self) -> (f64, f64);
    fn set_view(&mut self, center: Coordinate, zoom: f64);
    fn add_marker(&mut self, at: Coordinate, label: &str) -> LayerId;
    fn draw_curve(&mut self, path: &CurvePath) -> LayerId;
    fn remove_layer(&mut self, layer: LayerId);
}

#[derive(Debug, Error, PartialEq)]
pub enum RouteError {
    #[error("both origin and destination bases must be selected")]
    MissingSelection,
    #[error("could not find base data for {0:?}")]
    UnknownBase(String),
    #[error("base {0:?} has no coordinates")]
    MissingCoordinates(String),
}

/// A search the caller has to run and report back with
/// [`RouteSession::suggestions_received`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub slot: Slot,
    pub id: u64,
    pub query: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawnRoute {
    pub layer: LayerId,
    pub curve: QuadraticCurve,
    /// View the curve was projected under.
    pub viewport: Viewport,
}

#[derive(Debug, Default)]
struct SlotState {
    query: String,
    suggestions: Vec<LocationRecord>,
    panel_visible: bool,
    marker: Option<LayerId>,
    /// Position of the base the marker was placed for.
    selected: Option<Coordinate>,
    latest_request: u64,
}

pub struct RouteSession<M> {
    map: M,
    config: MapConfig,
    viewport: Viewport,
    bases: BaseDirectory,
    slots: Slots<SlotState>,
    route: Option<DrawnRoute>,
    next_request: u64,
}

impl<M: MapSurface> RouteSession<M> {
    /// Takes over `map` and shows the overview.
    pub fn new(map: M, config: MapConfig) -> Self {
        let (width, height) = map.size();
        let viewport = Viewport::new(config.overview_center, config.overview_zoom, width, height);
        let mut session = Self {
            map,
            config,
            viewport,
            bases: BaseDirectory::default(),
            slots: Slots::default(),
            route: None,
            next_request: 0,
        };
        session.apply_view(session.config.overview_center, session.config.overview_zoom);
        session
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn bases(&self) -> &BaseDirectory {
        &self.bases
    }

    pub fn route(&self) -> Option<&DrawnRoute> {
        self.route.as_ref()
    }

    pub fn query(&self, slot: Slot) -> &str {
        &self.slots[slot].query
    }

    pub fn suggestions(&self, slot: Slot) -> &[LocationRecord] {
        &self.slots[slot].suggestions
    }

    pub fn panel_visible(&self, slot: Slot) -> bool {
        self.slots[slot].panel_visible
    }

    pub fn marker(&self, slot: Slot) -> Option<LayerId> {
        self.slots[slot].marker
    }

    /// Records the new search-box text and decides whether to search.
    ///
    /// Every call supersedes the slot's in-flight search, including calls
    /// that are too short to search at all.
    pub fn query_changed(&mut self, slot: Slot, text: String) -> Option<SearchRequest> {
        self.next_request += 1;
        let id = self.next_request;
        let query = text.trim().to_string();

        let state = &mut self.slots[slot];
        state.query = text;
        state.latest_request = id;

        if !is_searchable(&query) {
            state.panel_visible = false;
            return None;
        }
        Some(SearchRequest { slot, id, query })
    }

    pub fn suggestions_received(
        &mut self,
        request: &SearchRequest,
        result: Result<Vec<LocationRecord>, SearchError>,
    ) {
        let state = &mut self.slots[request.slot];
        if request.id != state.latest_request {
            tracing::debug!(
                "dropping stale suggestions for {:?} (request {}, latest {})",
                request.query,
                request.id,
                state.latest_request
            );
            return;
        }

        match result {
            Err(err) => {
                tracing::warn!("error fetching suggestions for {:?}: {err}", request.query);
                state.suggestions.clear();
                state.panel_visible = false;
            }
            Ok(records) => {
                tracing::debug!("{} suggestion(s) for {:?}", records.len(), request.query);
                self.bases.merge(&records);
                state.panel_visible = !records.is_empty();
                state.suggestions = records;
            }
        }
    }

    /// Handles a click on the `index`-th suggestion of `slot`.
    pub fn select_suggestion(&mut self, slot: Slot, index: usize) -> bool {
        let state = &mut self.slots[slot];
        let Some(record) = state.suggestions.get(index).cloned() else {
            tracing::debug!("no suggestion #{index} for {slot:?}");
            return false;
        };
        state.query = record.base_name.clone();
        state.panel_visible = false;

        self.update_marker(slot, &record);
        true
    }

    /// Replaces the marker of `slot` and redraws the route when both ends are
    /// known.
    pub fn update_marker(&mut self, slot: Slot, record: &LocationRecord) {
        let Some(at) = record.coordinate() else {
            tracing::debug!("base {:?} has no coordinates, skipping marker", record.base_name);
            return;
        };

        if let Some(previous) = self.slots[slot].marker.take() {
            self.map.remove_layer(previous);
        }
        let marker = self.map.add_marker(at, &record.base_name);
        let state = &mut self.slots[slot];
        state.marker = Some(marker);
        state.selected = Some(at);

        self.apply_view(at, self.config.close_up_zoom);

        if let Some((origin, destination)) = self.marked_endpoints() {
            self.draw_between(origin, destination);
        }
    }

    /// Draws the route curve from container pixels, replacing the current
    /// one. A missing endpoint only clears the old curve.
    pub fn create_routing_control(
        &mut self,
        start: Option<PixelPoint>,
        end: Option<PixelPoint>,
        control: PixelPoint,
    ) {
        if let Some(previous) = self.route.take() {
            self.map.remove_layer(previous.layer);
        }

        let (Some(start), Some(end)) = (start, end) else {
            tracing::info!("origin or destination not selected");
            return;
        };

        let curve = QuadraticCurve::new(start, control, end);
        let path = CurvePath {
            start: self.viewport.coordinate_at(start),
            control: self.viewport.coordinate_at(control),
            end: self.viewport.coordinate_at(end),
        };
        let layer = self.map.draw_curve(&path);
        tracing::debug!("route line created: {layer:?}");

        let drawn_under = self.viewport;
        self.route = Some(DrawnRoute {
            layer,
            curve,
            viewport: drawn_under,
        });

        let fitted = drawn_under.fit_pixel_bounds(
            curve.bounds(),
            self.config.fit_padding,
            self.config.max_zoom,
        );
        self.apply_view(fitted.center, fitted.zoom);
    }

    /// Zooms out to the overview and redraws the route from the search-box
    /// texts.
    pub fn calculate_route(&mut self) -> Result<(), RouteError> {
        self.apply_view(self.config.overview_center, self.config.overview_zoom);

        let (origin, destination) = self.slots.both();
        let (origin, destination) = (origin.query.trim(), destination.query.trim());
        if origin.is_empty() || destination.is_empty() {
            return Err(RouteError::MissingSelection);
        }

        let origin = self.resolve(origin)?;
        let destination = self.resolve(destination)?;
        tracing::info!("handling route calculation...");
        self.draw_between(origin, destination);
        Ok(())
    }

    fn resolve(&self, name: &str) -> Result<Coordinate, RouteError> {
        let record = self
            .bases
            .get(name)
            .ok_or_else(|| RouteError::UnknownBase(name.to_string()))?;
        record
            .coordinate()
            .ok_or_else(|| RouteError::MissingCoordinates(record.base_name.clone()))
    }

    /// Positions of the two selected bases, once both slots carry a marker.
    fn marked_endpoints(&self) -> Option<(Coordinate, Coordinate)> {
        let (origin, destination) = self.slots.both();
        Some((origin.selected?, destination.selected?))
    }

    fn draw_between(&mut self, origin: Coordinate, destination: Coordinate) {
        let mid = biased_midpoint(origin, destination);
        let start = self.viewport.container_point(origin);
        let end = self.viewport.container_point(destination);
        let control = self.viewport.container_point(mid);
        tracing::debug!(
            "route px: origin ({:.1}, {:.1}), destination ({:.1}, {:.1}), midpoint ({:.1}, {:.1})",
            start.x,
            start.y,
            end.x,
            end.y,
            control.x,
            control.y
        );
        self.create_routing_control(Some(start), Some(end), control);
    }

    fn apply_view(&mut self, center: Coordinate, zoom: f64) {
        self.map.set_view(center, zoom);
        let (width, height) = self.map.size();
        self.viewport = self
            .viewport
            .with_size(width, height)
            .with_view(center, zoom);
    }
}
