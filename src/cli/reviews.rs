//! Reviews of a single boat.

use std::io;
use std::sync::Arc;

use boatyard::components::ReviewPanel;
use boatyard::host::LogNavigator;
use boatyard::{BoatyardConfig, CatalogError};

use super::{ModeOutcome, Services};
use super::output::write_reviews;

/// Loads and prints the reviews of the configured boat.
///
/// # Errors
///
/// Returns the fetch error when the reviews cannot be loaded.
pub async fn run(
    config: &BoatyardConfig,
    services: &Services,
) -> Result<ModeOutcome, CatalogError> {
    let mut panel = ReviewPanel::new(
        services.catalog(),
        Arc::new(LogNavigator),
        services.telemetry(),
    );

    if let Some(pending) = panel.set_record_id(config.record_id()) {
        panel.apply(pending.resolve().await);
    }
    if let Some(error) = panel.error() {
        return Err(error.clone());
    }

    write_reviews(&mut io::stdout().lock(), panel.record_id(), panel.reviews())?;
    Ok(ModeOutcome::Completed)
}
