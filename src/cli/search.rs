//! Boat search by type.

use std::io;
use std::sync::Arc;

use boatyard::components::ResultsTable;
use boatyard::host::{MessageBus, StderrNotifier, TracingEventSink};
use boatyard::{BoatyardConfig, CatalogError};

use super::{ModeOutcome, Services};
use super::output::write_boats;

/// Loads and prints the boats matching the configured type.
///
/// # Errors
///
/// Returns the fetch error when the boats cannot be loaded.
pub async fn run(
    config: &BoatyardConfig,
    services: &Services,
) -> Result<ModeOutcome, CatalogError> {
    let catalog = services.catalog();
    let mut table = ResultsTable::new(
        catalog,
        services.records(),
        MessageBus::new(),
        Arc::new(StderrNotifier),
        Arc::new(TracingEventSink),
        services.telemetry(),
    );

    if let Some(pending) = table.search(config.boat_type_filter()) {
        table.apply(pending.resolve().await);
    }
    if let Some(error) = table.error() {
        return Err(error.clone());
    }

    write_boats(&mut io::stdout().lock(), table.filter(), &table.rows())?;
    Ok(ModeOutcome::Completed)
}
