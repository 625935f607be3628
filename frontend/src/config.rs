use shared::Coordinate;

const DEFAULT_SEARCH_URL: &str = "http://127.0.0.1:5000/search";
const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const DEFAULT_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";
const DEFAULT_LOG_FILTER: &str = "baseroute_frontend=debug,info";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub search_url: String,
    pub log_filter: String,
    pub map: MapConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub tile_url: String,
    pub attribution: String,
    pub max_zoom: f64,
    /// View restored by the "calculate route" button.
    pub overview_center: Coordinate,
    pub overview_zoom: f64,
    /// Zoom used when centering on a freshly selected base.
    pub close_up_zoom: f64,
    /// Margin kept around the route when fitting the view, in pixels.
    pub fit_padding: f64,
    pub curve_color: String,
    pub curve_weight: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tile_url: DEFAULT_TILE_URL.to_string(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
            max_zoom: 19.0,
            // continental US
            overview_center: Coordinate::new(37.8, -96.0),
            overview_zoom: 4.0,
            close_up_zoom: 10.0,
            fit_padding: 0.0,
            curve_color: "blue".to_string(),
            curve_weight: 3.0,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            map: MapConfig::default(),
        }
    }
}

impl AppConfig {
    /// Defaults, overridden by variables set when the WASM bundle is built.
    pub fn from_build_env() -> Self {
        Self::from_overrides(
            option_env!("FRONTEND_SEARCH_URL"),
            option_env!("FRONTEND_TILE_URL"),
            option_env!("FRONTEND_LOG"),
        )
    }

    fn from_overrides(
        search_url: Option<&str>,
        tile_url: Option<&str>,
        log_filter: Option<&str>,
    ) -> Self {
        let mut config = Self::default();
        if let Some(url) = search_url.map(str::trim).filter(|url| !url.is_empty()) {
            config.search_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = tile_url.map(str::trim).filter(|url| !url.is_empty()) {
            config.map.tile_url = url.to_string();
        }
        if let Some(filter) = log_filter.map(str::trim).filter(|f| !f.is_empty()) {
            config.log_filter = filter.to_string();
        }
        config
    }
}
