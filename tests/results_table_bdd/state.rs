//! Scenario state and server helpers for the results table BDD tests.

use std::sync::Arc;

use boatyard::CatalogError;
use boatyard::components::ResultsTable;
use boatyard::host::{BoatMessage, MessageBus};
use boatyard::host::test_support::{RecordingEventSink, RecordingNotifier};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use serde_json::{Value, json};
use tokio::sync::broadcast;
use wiremock::{Mock, MockServer};

use super::runtime::SharedRuntime;

/// State shared across steps in a results table scenario.
#[derive(ScenarioState, Default)]
pub(crate) struct TableState {
    pub(crate) runtime: Slot<SharedRuntime>,
    pub(crate) server: Slot<MockServer>,
    pub(crate) table: Slot<ResultsTable>,
    pub(crate) bus: Slot<MessageBus>,
    pub(crate) notifier: Slot<Arc<RecordingNotifier>>,
    pub(crate) events: Slot<Arc<RecordingEventSink>>,
    pub(crate) listener: Slot<broadcast::Receiver<BoatMessage>>,
}

/// Builds `count` boats with ids `B1..=Bcount`.
pub(crate) fn boat_rows(count: usize) -> Vec<Value> {
    (1..=count)
        .map(|index| {
            json!({
                "Id": format!("B{index}"),
                "Name": format!("Boat {index}"),
                "Length__c": 20.0,
                "Price__c": 150.0
            })
        })
        .collect()
}

/// Mounts a mock on the scenario's server.
pub(crate) fn mount(table_state: &TableState, mock: Mock) -> Result<(), CatalogError> {
    let runtime = table_state.runtime.get().ok_or_else(|| CatalogError::Io {
        message: "runtime not initialised".to_owned(),
    })?;
    table_state
        .server
        .with_ref(|server| runtime.block_on(mock.mount(server)))
        .ok_or_else(|| CatalogError::Io {
            message: "mock server not initialised".to_owned(),
        })
}

/// Counts the `GET /api/boats` requests the server has seen.
pub(crate) fn count_boat_requests(table_state: &TableState) -> Result<usize, CatalogError> {
    let runtime = table_state.runtime.get().ok_or_else(|| CatalogError::Io {
        message: "runtime not initialised".to_owned(),
    })?;
    let requests = table_state
        .server
        .with_ref(|server| runtime.block_on(server.received_requests()))
        .flatten()
        .ok_or_else(|| CatalogError::Io {
            message: "request recording unavailable".to_owned(),
        })?;

    Ok(requests
        .iter()
        .filter(|request| request.method.as_str() == "GET" && request.url.path() == "/api/boats")
        .count())
}
