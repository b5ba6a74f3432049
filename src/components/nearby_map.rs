//! "Boats near me" map.
//!
//! The map reads the caller's position once, then fetches the boats around
//! it for the selected boat type. Every successful fetch rebuilds the marker
//! list with a "You are here!" marker first. A failed fetch leaves the
//! previous markers in place.

use std::sync::Arc;

use serde::Serialize;

use crate::catalog::{
    BoatDataGateway, BoatLocation, BoatTypeFilter, CatalogError, Coordinates, LocationQuery,
};
use crate::fetch::{FetchCompletion, FetchController, FetchState, PendingFetch};
use crate::host::{LocationSensor, Notifier, Toast};
use crate::telemetry::TelemetrySink;

/// Name used for logs and telemetry.
pub const NEARBY_MAP: &str = "nearby_map";

/// Title of the marker placed at the caller's position.
pub const LABEL_YOU_ARE_HERE: &str = "You are here!";

const ICON_STANDARD_USER: &str = "standard:user";
const ERROR_TITLE: &str = "Error loading Boats Near Me";

/// In-flight nearby-boats request.
pub type NearbyFetch = PendingFetch<LocationQuery, Vec<BoatLocation>>;

/// Completed nearby-boats request.
pub type NearbyCompletion = FetchCompletion<LocationQuery, Vec<BoatLocation>>;

/// Lifecycle of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapPhase {
    /// `initialise` has not run yet.
    Uninitialized,
    /// Set while `initialise` awaits the location sensor. `initialise`
    /// holds the map mutably for the whole read, so callers only see it
    /// through `Debug` output or logs emitted during the read.
    SensorPending,
    /// The sensor could not provide a position; nothing will be fetched.
    LocationUnavailable,
    /// A nearby-boats fetch is in flight.
    Fetching,
    /// The last fetch produced markers.
    MarkersReady,
    /// The last fetch failed; markers are from an earlier fetch, if any.
    FetchFailed,
}

/// A point shown on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    /// Marker label.
    pub title: String,
    /// Marker position.
    pub location: Coordinates,
    /// Optional icon name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl MapMarker {
    /// Marker for the caller's own position.
    #[must_use]
    pub fn you_are_here(location: Coordinates) -> Self {
        Self {
            title: LABEL_YOU_ARE_HERE.to_owned(),
            location,
            icon: Some(ICON_STANDARD_USER.to_owned()),
        }
    }
}

impl From<&BoatLocation> for MapMarker {
    fn from(boat: &BoatLocation) -> Self {
        Self {
            title: boat.name.clone(),
            location: Coordinates::new(boat.latitude, boat.longitude),
            icon: None,
        }
    }
}

/// Map of the boats around the caller.
pub struct NearbyMap {
    boat_type: BoatTypeFilter,
    coordinates: Option<Coordinates>,
    initialised: bool,
    phase: MapPhase,
    loading: bool,
    markers: Vec<MapMarker>,
    fetch: FetchController<LocationQuery, Vec<BoatLocation>>,
    sensor: Arc<dyn LocationSensor>,
    gateway: Arc<dyn BoatDataGateway>,
    notifier: Arc<dyn Notifier>,
}

impl NearbyMap {
    /// Creates an uninitialised map for the given boat type.
    #[must_use]
    pub fn new(
        boat_type: BoatTypeFilter,
        sensor: Arc<dyn LocationSensor>,
        gateway: Arc<dyn BoatDataGateway>,
        notifier: Arc<dyn Notifier>,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self {
            boat_type,
            coordinates: None,
            initialised: false,
            phase: MapPhase::Uninitialized,
            loading: true,
            markers: Vec::new(),
            fetch: FetchController::new(NEARBY_MAP, telemetry),
            sensor,
            gateway,
            notifier,
        }
    }

    /// Reads the caller's position and starts the first fetch.
    ///
    /// Only the first call does anything; later calls return `None` without
    /// touching the sensor. A failed read, or a reading that is not a finite
    /// position, leaves the map in [`MapPhase::LocationUnavailable`] with an
    /// error toast.
    pub async fn initialise(&mut self) -> Option<NearbyFetch> {
        if self.initialised {
            return None;
        }
        self.initialised = true;
        self.phase = MapPhase::SensorPending;

        let reading = self
            .sensor
            .current_coordinates()
            .await
            .and_then(|coordinates| {
                if coordinates.is_finite() {
                    Ok(coordinates)
                } else {
                    Err(CatalogError::Location {
                        message: format!(
                            "sensor reported an invalid position ({}, {})",
                            coordinates.latitude, coordinates.longitude
                        ),
                    })
                }
            });

        match reading {
            Ok(coordinates) => {
                tracing::debug!(
                    component = NEARBY_MAP,
                    latitude = coordinates.latitude,
                    longitude = coordinates.longitude,
                    "location resolved"
                );
                self.coordinates = Some(coordinates);
                self.load_markers()
            }
            Err(error) => {
                tracing::warn!(component = NEARBY_MAP, "location unavailable: {error}");
                self.phase = MapPhase::LocationUnavailable;
                self.loading = false;
                self.notifier
                    .notify(&Toast::error(ERROR_TITLE, error.message()));
                None
            }
        }
    }

    /// Changes the boat type and, once the position is known, fetches again.
    pub fn set_boat_type(&mut self, boat_type: BoatTypeFilter) -> Option<NearbyFetch> {
        self.boat_type = boat_type;
        self.load_markers()
    }

    /// Applies a completed fetch.
    pub fn apply(&mut self, completion: NearbyCompletion) {
        let here = completion.key.coordinates;
        match self.fetch.complete(completion) {
            FetchState::Success(boats) => {
                self.markers = std::iter::once(MapMarker::you_are_here(here))
                    .chain(boats.iter().map(MapMarker::from))
                    .collect();
                self.phase = MapPhase::MarkersReady;
            }
            FetchState::Failure(error) => {
                self.notifier
                    .notify(&Toast::error(ERROR_TITLE, error.message()));
                self.phase = MapPhase::FetchFailed;
            }
            FetchState::Idle | FetchState::Loading => {}
        }
        self.loading = false;
    }

    /// Markers from the last successful fetch.
    #[must_use]
    pub fn markers(&self) -> &[MapMarker] {
        &self.markers
    }

    /// Returns `true` until the first outcome (markers, fetch failure, or
    /// sensor failure) and again while a fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> MapPhase {
        self.phase
    }

    /// Caller's position, once resolved.
    #[must_use]
    pub const fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    /// Boat type currently searched for.
    #[must_use]
    pub const fn boat_type(&self) -> &BoatTypeFilter {
        &self.boat_type
    }

    /// Error from the last fetch, if it failed.
    #[must_use]
    pub const fn error(&self) -> Option<&CatalogError> {
        self.fetch.error()
    }

    fn load_markers(&mut self) -> Option<NearbyFetch> {
        let query = LocationQuery {
            coordinates: self.coordinates?,
            boat_type: self.boat_type.clone(),
        };
        let gateway = Arc::clone(&self.gateway);
        let pending = self.fetch.request(&query, move |query| async move {
            let payload = gateway.boats_by_location(&query).await?;
            parse_boat_locations(&payload)
        })?;
        self.phase = MapPhase::Fetching;
        self.loading = true;
        Some(pending)
    }
}

/// Parses the serialised nearby-boats payload.
fn parse_boat_locations(payload: &str) -> Result<Vec<BoatLocation>, CatalogError> {
    Ok(serde_json::from_str(payload)?)
}

#[cfg(test)]
#[path = "nearby_map_tests.rs"]
mod tests;
