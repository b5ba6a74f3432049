//! One-shot current-location reads.

use async_trait::async_trait;

use crate::catalog::{CatalogError, Coordinates};

/// Source of the caller's current position.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationSensor: Send + Sync {
    /// Reads the current coordinates once.
    async fn current_coordinates(&self) -> Result<Coordinates, CatalogError>;
}

/// Sensor reporting a position fixed at construction, typically taken from
/// configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocationSensor {
    coordinates: Option<Coordinates>,
}

impl FixedLocationSensor {
    /// Creates a sensor for the given position; `None` makes every read fail.
    #[must_use]
    pub const fn new(coordinates: Option<Coordinates>) -> Self {
        Self { coordinates }
    }
}

#[async_trait]
impl LocationSensor for FixedLocationSensor {
    async fn current_coordinates(&self) -> Result<Coordinates, CatalogError> {
        self.coordinates
            .filter(Coordinates::is_finite)
            .ok_or_else(|| CatalogError::Location {
                message: "no latitude/longitude configured".to_owned(),
            })
    }
}
