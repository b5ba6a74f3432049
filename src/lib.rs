//! Boatyard catalogue components for a boat-rental application.
//!
//! The library provides three components backed by a remote catalogue
//! service: a reviews panel, a searchable and editable boat table, and a
//! "boats near me" map. Every collaborator (data service, message bus,
//! location sensor, navigation, notifications) is a trait or typed channel
//! so hosts can plug in real or test implementations.

pub mod catalog;
pub mod components;
pub mod config;
pub mod fetch;
pub mod host;
pub mod telemetry;

pub use catalog::{
    BoatDataGateway, CatalogError, HttpCatalogConfig, HttpCatalogGateway, RecordGateway,
};
pub use config::{BoatyardConfig, OperationMode};
pub use fetch::{FetchCompletion, FetchController, FetchState, PendingFetch};
pub use telemetry::{NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetryEvent, TelemetrySink};
