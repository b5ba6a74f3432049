//! Support modules for the results table BDD tests.

#[path = "../support/runtime.rs"]
pub(crate) mod runtime;
pub(crate) mod state;

pub(crate) use runtime::{ensure_runtime_and_server, gateway_for};
pub(crate) use state::{TableState, boat_rows, count_boat_requests, mount};
