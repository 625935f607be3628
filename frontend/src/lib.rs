pub mod config;
pub mod directory;
pub mod leaflet;
pub mod search;
pub mod session;
pub mod slot;
pub mod telemetry;

use seed::{prelude::*, *};
use shared::LocationRecord;

use crate::config::AppConfig;
use crate::leaflet::LeafletMap;
use crate::search::{SearchError, search_bases};
use crate::session::{RouteSession, SearchRequest};
use crate::slot::Slot;

const MAP_CONTAINER_ID: &str = "map";
const CALCULATE_BUTTON_ID: &str = "calculate-route-button";

pub struct Model {
    session: RouteSession<LeafletMap>,
    search_url: String,
}

pub enum Msg {
    QueryChanged(Slot, String),
    SuggestionsFetched(SearchRequest, Result<Vec<LocationRecord>, SearchError>),
    SuggestionPicked(Slot, usize),
    CalculateRoute,
}

pub fn init(_: Url, _: &mut impl Orders<Msg>) -> Model {
    let config = AppConfig::from_build_env();
    let map = LeafletMap::mount(MAP_CONTAINER_ID, &config.map);

    Model {
        session: RouteSession::new(map, config.map),
        search_url: config.search_url,
    }
}

pub fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::QueryChanged(slot, text) => {
            if let Some(request) = model.session.query_changed(slot, text) {
                orders.perform_cmd(fetch_suggestions(model.search_url.clone(), request));
            }
        }
        Msg::SuggestionsFetched(request, result) => {
            model.session.suggestions_received(&request, result);
        }
        Msg::SuggestionPicked(slot, index) => {
            model.session.select_suggestion(slot, index);
        }
        Msg::CalculateRoute => {
            if let Err(err) = model.session.calculate_route() {
                tracing::error!("{err}");
            }
        }
    }
}

async fn fetch_suggestions(search_url: String, request: SearchRequest) -> Msg {
    let result = search_bases(&search_url, &request.query).await;
    Msg::SuggestionsFetched(request, result)
}

pub fn view(model: &Model) -> Node<Msg> {
    div![
        C!["app-container"],
        h1!["Base route planner"],
        view_search(model, Slot::Origin),
        view_search(model, Slot::Destination),
        button![
            attrs! { At::Id => CALCULATE_BUTTON_ID },
            "Calculate route",
            ev(Ev::Click, |event| {
                event.prevent_default();
                Msg::CalculateRoute
            }),
        ],
    ]
}

fn view_search(model: &Model, slot: Slot) -> Node<Msg> {
    div![
        C!["search-field"],
        label![
            attrs! { At::For => slot.search_box_id() },
            slot.label()
        ],
        input![
            attrs! {
                At::Id => slot.search_box_id(),
                At::Value => model.session.query(slot),
                At::AutoComplete => "off",
                At::SpellCheck => "false",
                At::Placeholder => "Search bases...",
            },
            input_ev(Ev::Input, move |text| Msg::QueryChanged(slot, text)),
        ],
        view_suggestions(model, slot),
    ]
}

fn view_suggestions(model: &Model, slot: Slot) -> Node<Msg> {
    let visible = model.session.panel_visible(slot);
    let entries = model
        .session
        .suggestions(slot)
        .iter()
        .enumerate()
        .map(|(index, base)| {
            li![
                &base.base_name,
                ev(Ev::Click, move |_| Msg::SuggestionPicked(slot, index)),
            ]
        });

    div![
        attrs! { At::Id => slot.suggestions_id() },
        C!["suggestions"],
        style! { St::Display => if visible { "block" } else { "none" } },
        IF!(visible => ul![entries]),
    ]
}

#[wasm_bindgen(start)]
pub fn start() {
    telemetry::init(&AppConfig::from_build_env().log_filter);
    App::start("app", init, update, view);
}
