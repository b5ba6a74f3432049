//! Boats near the configured position.

use std::io;
use std::sync::Arc;

use boatyard::components::{MapPhase, NearbyMap};
use boatyard::host::{FixedLocationSensor, StderrNotifier};
use boatyard::{BoatyardConfig, CatalogError};

use super::output::write_markers;
use super::{ModeOutcome, Services};

/// Resolves the configured position and prints the nearby boat markers.
///
/// A missing position or a failed fetch is reported by the map's error
/// toast, so it yields [`ModeOutcome::FailureShown`] rather than an error.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] when the markers cannot be written.
pub async fn run(
    config: &BoatyardConfig,
    services: &Services,
) -> Result<ModeOutcome, CatalogError> {
    let mut map = NearbyMap::new(
        config.boat_type_filter(),
        Arc::new(FixedLocationSensor::new(config.coordinates())),
        services.catalog(),
        Arc::new(StderrNotifier),
        services.telemetry(),
    );

    if let Some(pending) = map.initialise().await {
        map.apply(pending.resolve().await);
    }
    if matches!(map.phase(), MapPhase::LocationUnavailable | MapPhase::FetchFailed) {
        return Ok(ModeOutcome::FailureShown);
    }

    write_markers(&mut io::stdout().lock(), map.markers())?;
    Ok(ModeOutcome::Completed)
}
