//! Gateways for reading and writing catalogue data.
//!
//! The components only see these traits, which keeps them testable with
//! `mockall` while [`HttpCatalogGateway`] handles real HTTP requests.

use async_trait::async_trait;

use super::error::CatalogError;
use super::models::{Boat, BoatTypeFilter, LocationQuery, RecordId, RecordInput, Review};

mod http;

pub use http::{DEFAULT_TIMEOUT_SECS, HttpCatalogConfig, HttpCatalogGateway};

/// Gateway that can read catalogue lists.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoatDataGateway: Send + Sync {
    /// Fetch every review written for a boat.
    async fn reviews(&self, boat_id: &RecordId) -> Result<Vec<Review>, CatalogError>;

    /// Fetch the boats matching a boat-type filter.
    async fn boats(&self, filter: &BoatTypeFilter) -> Result<Vec<Boat>, CatalogError>;

    /// Fetch the boats near a position.
    ///
    /// The payload is returned as the serialised JSON text the service sends;
    /// callers parse it into [`super::models::BoatLocation`] rows.
    async fn boats_by_location(&self, query: &LocationQuery) -> Result<String, CatalogError>;
}

/// Gateway that can apply field updates to a single record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordGateway: Send + Sync {
    /// Apply the field deltas in `input` to its record.
    async fn update_record(&self, input: &RecordInput) -> Result<(), CatalogError>;
}
