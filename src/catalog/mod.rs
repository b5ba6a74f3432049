//! Boat catalogue data layer: models, errors, and gateways.

pub mod error;
pub mod gateway;
pub mod models;

pub use error::CatalogError;
pub use gateway::{BoatDataGateway, HttpCatalogConfig, HttpCatalogGateway, RecordGateway};
pub use models::{
    Boat, BoatLocation, BoatTypeFilter, Coordinates, EditDraft, LocationQuery, RecordId,
    RecordInput, Review,
};

#[cfg(test)]
pub use gateway::{MockBoatDataGateway, MockRecordGateway};
