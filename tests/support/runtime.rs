//! Shared Tokio runtime helper for integration tests.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use boatyard::{CatalogError, HttpCatalogConfig, HttpCatalogGateway};
use rstest_bdd::Slot;
use tokio::runtime::Runtime;
use wiremock::MockServer;

/// Shared runtime wrapper that can be stored in an `rstest-bdd` Slot.
#[derive(Clone)]
pub struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    pub fn new(runtime: Runtime) -> Self {
        Self(Rc::new(RefCell::new(runtime)))
    }

    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

/// Ensures a Tokio runtime and Wiremock server are initialised.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] if the Tokio runtime cannot be created or if
/// the slots behave unexpectedly.
pub fn ensure_runtime_and_server(
    runtime: &Slot<SharedRuntime>,
    server: &Slot<MockServer>,
) -> Result<SharedRuntime, CatalogError> {
    if runtime.with_ref(|_| ()).is_none() {
        let created = Runtime::new().map_err(|error| CatalogError::Io {
            message: format!("failed to create Tokio runtime: {error}"),
        })?;
        runtime.set(SharedRuntime::new(created));
    }

    let shared_runtime = runtime.get().ok_or_else(|| CatalogError::Io {
        message: "runtime not initialised after set".to_owned(),
    })?;

    if server.with_ref(|_| ()).is_none() {
        server.set(shared_runtime.block_on(MockServer::start()));
    }

    Ok(shared_runtime)
}

/// Builds an HTTP gateway pointing at the mock server's `/api` prefix.
///
/// # Errors
///
/// Returns [`CatalogError::Configuration`] when the server has not started.
pub fn gateway_for(server: &Slot<MockServer>) -> Result<Arc<HttpCatalogGateway>, CatalogError> {
    let base = server
        .with_ref(MockServer::uri)
        .ok_or_else(|| CatalogError::Configuration {
            message: "mock server not started".to_owned(),
        })?;
    let config = HttpCatalogConfig::new(&format!("{base}/api"))?;
    Ok(Arc::new(HttpCatalogGateway::new(&config)?))
}
