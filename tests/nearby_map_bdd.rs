//! Behavioural tests for the nearby boats map.

#[path = "support/runtime.rs"]
mod runtime;

use std::sync::Arc;

use boatyard::catalog::models::test_support::nearby_payload;
use boatyard::catalog::{BoatTypeFilter, Coordinates};
use boatyard::components::{MapMarker, MapPhase, NearbyMap};
use boatyard::host::FixedLocationSensor;
use boatyard::host::test_support::RecordingNotifier;
use boatyard::{CatalogError, NoopTelemetrySink};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use runtime::{SharedRuntime, ensure_runtime_and_server, gateway_for};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NEARBY_PATH: &str = "/api/boats/nearby";

#[derive(ScenarioState, Default)]
struct MapState {
    runtime: Slot<SharedRuntime>,
    server: Slot<MockServer>,
    position: Slot<Option<Coordinates>>,
    map: Slot<NearbyMap>,
    notifier: Slot<Arc<RecordingNotifier>>,
}

#[fixture]
fn map_state() -> MapState {
    MapState::default()
}

fn missing(what: &str) -> CatalogError {
    CatalogError::Io {
        message: format!("{what} not initialised"),
    }
}

fn markers(map_state: &MapState) -> Vec<MapMarker> {
    map_state
        .map
        .with_ref(|map| map.markers().to_vec())
        .unwrap_or_default()
}

/// Query strings of every nearby search the server received.
fn nearby_queries(map_state: &MapState) -> Result<Vec<String>, CatalogError> {
    let runtime = map_state.runtime.get().ok_or_else(|| missing("runtime"))?;
    let requests = map_state
        .server
        .with_ref(|server| runtime.block_on(server.received_requests()))
        .flatten()
        .ok_or_else(|| missing("request recording"))?;

    Ok(requests
        .iter()
        .filter(|request| request.url.path() == NEARBY_PATH)
        .map(|request| request.url.query().unwrap_or_default().to_owned())
        .collect())
}

// Given steps

#[given("the caller is at latitude {latitude} and longitude {longitude}")]
fn caller_position(map_state: &MapState, latitude: f64, longitude: f64) {
    map_state
        .position
        .set(Some(Coordinates::new(latitude, longitude)));
}

#[given("the caller position is unknown")]
fn caller_position_unknown(map_state: &MapState) {
    map_state.position.set(None);
}

#[given("a catalogue server with {count:usize} boats nearby")]
fn seed_nearby(map_state: &MapState, count: usize) -> Result<(), CatalogError> {
    let runtime = ensure_runtime_and_server(&map_state.runtime, &map_state.server)?;
    let names: Vec<String> = (1..=count).map(|index| format!("Boat {index}")).collect();
    let boats: Vec<(&str, f64, f64)> = names
        .iter()
        .zip([37.8, 37.7, 37.6, 37.5].into_iter().cycle())
        .map(|(name, latitude)| (name.as_str(), latitude, -122.41))
        .collect();
    let mock = Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(nearby_payload(&boats)));

    map_state
        .server
        .with_ref(|server| runtime.block_on(mock.mount(server)))
        .ok_or_else(|| missing("mock server"))
}

// When steps

#[when("the map initialises")]
fn initialise_map(map_state: &MapState) -> Result<(), CatalogError> {
    let runtime = map_state.runtime.get().ok_or_else(|| missing("runtime"))?;
    let notifier = Arc::new(RecordingNotifier::default());
    let position = map_state.position.get().flatten();
    let mut map = NearbyMap::new(
        BoatTypeFilter::All,
        Arc::new(FixedLocationSensor::new(position)),
        gateway_for(&map_state.server)?,
        notifier.clone(),
        Arc::new(NoopTelemetrySink),
    );

    if let Some(pending) = runtime.block_on(map.initialise()) {
        map.apply(runtime.block_on(pending.resolve()));
    }

    map_state.map.set(map);
    map_state.notifier.set(notifier);
    Ok(())
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[when("the boat type changes to {boat_type}")]
fn change_boat_type(map_state: &MapState, boat_type: String) -> Result<(), CatalogError> {
    let runtime = map_state.runtime.get().ok_or_else(|| missing("runtime"))?;
    map_state
        .map
        .with_mut(|map| {
            if let Some(pending) = map.set_boat_type(BoatTypeFilter::from_id(&boat_type)) {
                map.apply(runtime.block_on(pending.resolve()));
            }
        })
        .ok_or_else(|| missing("map"))
}

// Then steps

#[then("the map shows {count:usize} markers")]
fn assert_marker_count(map_state: &MapState, count: usize) {
    assert_eq!(markers(map_state).len(), count, "marker count mismatch");
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[then("the first marker is {title}")]
fn assert_first_marker(map_state: &MapState, title: String) {
    let first = markers(map_state).into_iter().next();

    assert_eq!(
        first.map(|marker| marker.title),
        Some(title.trim_matches('"').to_owned())
    );
    assert_eq!(
        map_state.map.with_ref(NearbyMap::phase),
        Some(MapPhase::MarkersReady)
    );
}

#[then("the map is not loading")]
fn assert_not_loading(map_state: &MapState) {
    assert_eq!(map_state.map.with_ref(NearbyMap::is_loading), Some(false));
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[then("an error toast titled {title} is shown")]
fn assert_error_toast(map_state: &MapState, title: String) {
    let toasts = map_state
        .notifier
        .with_ref(|notifier| notifier.toasts())
        .unwrap_or_default();

    assert_eq!(toasts.len(), 1, "expected one toast: {toasts:?}");
    assert!(
        toasts
            .iter()
            .all(|toast| toast.title == title.trim_matches('"')),
        "unexpected toasts: {toasts:?}"
    );
}

#[then("the nearby search ran {count:usize} times")]
fn assert_search_count(map_state: &MapState, count: usize) -> Result<(), CatalogError> {
    assert_eq!(nearby_queries(map_state)?.len(), count);
    Ok(())
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[then("the last nearby search asked for boat type {boat_type}")]
fn assert_last_boat_type(map_state: &MapState, boat_type: String) -> Result<(), CatalogError> {
    let queries = nearby_queries(map_state)?;
    let last = queries.last().ok_or_else(|| missing("nearby search"))?;

    assert!(
        last.contains(&format!("boatTypeId={boat_type}")),
        "unexpected query: {last}"
    );
    assert!(last.contains("latitude=37.79"), "unexpected query: {last}");
    Ok(())
}

// Scenario bindings

#[scenario(path = "tests/features/nearby_map.feature", index = 0)]
fn nearby_boats_are_shown(map_state: MapState) {
    let _ = map_state;
}

#[scenario(path = "tests/features/nearby_map.feature", index = 1)]
fn boat_type_change_searches_again(map_state: MapState) {
    let _ = map_state;
}

#[scenario(path = "tests/features/nearby_map.feature", index = 2)]
fn unknown_position_stops_map(map_state: MapState) {
    let _ = map_state;
}
