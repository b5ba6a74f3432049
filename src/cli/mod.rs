//! CLI operation mode handlers.
//!
//! This module contains the implementations for different operation modes:
//! - [`near_me`]: Boats around the configured position
//! - [`reviews`]: Reviews of a single boat
//! - [`search`]: Boats of a type, or all boats
//!
//! Output formatting utilities are in [`output`]; subscriber setup is in
//! [`logging`].

use std::sync::Arc;

use boatyard::{
    BoatDataGateway, BoatyardConfig, CatalogError, HttpCatalogConfig, HttpCatalogGateway,
    NoopTelemetrySink, RecordGateway, StderrJsonlTelemetrySink, TelemetrySink,
};

pub mod logging;
pub mod near_me;
pub mod output;
pub mod reviews;
pub mod search;

/// How a mode handler finished without an error to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeOutcome {
    /// Results were written to stdout.
    Completed,
    /// A failure was already shown to the user as a toast.
    FailureShown,
}

/// Shared services built once from configuration.
pub struct Services {
    gateway: Arc<HttpCatalogGateway>,
    telemetry: Arc<dyn TelemetrySink>,
}

impl Services {
    /// Builds the HTTP gateway and telemetry sink.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Configuration`] when the API base URL is
    /// missing or invalid.
    pub fn from_config(config: &BoatyardConfig) -> Result<Self, CatalogError> {
        let http = HttpCatalogConfig::new(config.require_api_base()?)?
            .with_timeout(config.request_timeout());
        let telemetry: Arc<dyn TelemetrySink> = if config.telemetry {
            Arc::new(StderrJsonlTelemetrySink)
        } else {
            Arc::new(NoopTelemetrySink)
        };

        Ok(Self {
            gateway: Arc::new(HttpCatalogGateway::new(&http)?),
            telemetry,
        })
    }

    /// Catalogue read gateway.
    pub fn catalog(&self) -> Arc<dyn BoatDataGateway> {
        Arc::clone(&self.gateway) as Arc<dyn BoatDataGateway>
    }

    /// Record update gateway.
    pub fn records(&self) -> Arc<dyn RecordGateway> {
        Arc::clone(&self.gateway) as Arc<dyn RecordGateway>
    }

    /// Telemetry sink shared by every component.
    pub fn telemetry(&self) -> Arc<dyn TelemetrySink> {
        Arc::clone(&self.telemetry)
    }
}
