//! Application configuration loaded from CLI, environment, and files.
//!
//! Values are merged with ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.boatyard.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `BOATYARD_API_BASE`, `BOATYARD_BOAT_ID`,
//!    and so on
//! 4. **Command-line arguments** – `--api-base`/`-a`, `--boat-id`/`-b`, ...
//!
//! # Configuration File
//!
//! ```toml
//! api_base = "https://catalog.example.com/api/"
//! request_timeout_seconds = 10
//! boat_type = "a01Motorboat"
//! latitude = 37.79
//! longitude = -122.4
//! log_level = "debug"
//! ```

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::catalog::gateway::DEFAULT_TIMEOUT_SECS;
use crate::catalog::{BoatTypeFilter, CatalogError, Coordinates, RecordId};

/// Operation mode determined by CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Show the reviews of one boat.
    Reviews,
    /// Show the boats around the configured position.
    NearMe,
    /// List the boats of a type (or all boats).
    Search,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use boatyard::BoatyardConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = BoatyardConfig::load().expect("failed to load configuration");
/// let base = config.require_api_base().expect("API base required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "BOATYARD",
    discovery(
        dotfile_name = ".boatyard.toml",
        config_file_name = "boatyard.toml",
        app_name = "boatyard"
    )
)]
pub struct BoatyardConfig {
    /// Base URL of the catalogue data service.
    ///
    /// Can be provided via:
    /// - CLI: `--api-base <URL>` or `-a <URL>`
    /// - Environment: `BOATYARD_API_BASE`
    /// - Config file: `api_base = "..."`
    #[ortho_config(cli_short = 'a')]
    pub api_base: Option<String>,

    /// HTTP request timeout, in seconds.
    ///
    /// Defaults to the gateway's [`DEFAULT_TIMEOUT_SECS`] (20 seconds).
    #[ortho_config()]
    pub request_timeout_seconds: u64,

    /// Boat whose reviews should be shown.
    ///
    /// Can be provided via:
    /// - CLI: `--boat-id <ID>` or `-b <ID>`
    /// - Environment: `BOATYARD_BOAT_ID`
    /// - Config file: `boat_id = "..."`
    #[ortho_config(cli_short = 'b')]
    pub boat_id: Option<String>,

    /// Boat type to filter by. Absent or empty means all types.
    ///
    /// Can be provided via:
    /// - CLI: `--boat-type <ID>` or `-t <ID>`
    /// - Environment: `BOATYARD_BOAT_TYPE`
    /// - Config file: `boat_type = "..."`
    #[ortho_config(cli_short = 't')]
    pub boat_type: Option<String>,

    /// Latitude reported by the fixed location sensor.
    #[ortho_config()]
    pub latitude: Option<f64>,

    /// Longitude reported by the fixed location sensor.
    ///
    /// Negative values need the `--longitude=-122.4` form on the command line.
    #[ortho_config()]
    pub longitude: Option<f64>,

    /// Shows the boats near the configured position.
    ///
    /// Can be provided via:
    /// - CLI: `--near-me` / `-n`
    /// - Config file: `near_me = true`
    ///
    /// Note: `BOATYARD_NEAR_ME` is not read because `ortho_config` does not
    /// load boolean values from the environment.
    #[ortho_config(cli_short = 'n')]
    pub near_me: bool,

    /// Default `tracing` filter directive, overridden by `RUST_LOG`.
    ///
    /// Defaults to `info`.
    #[ortho_config()]
    pub log_level: String,

    /// Writes fetch telemetry as JSON lines to stderr.
    #[ortho_config()]
    pub telemetry: bool,
}

const DEFAULT_LOG_LEVEL: &str = "info";

impl Default for BoatyardConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            request_timeout_seconds: DEFAULT_TIMEOUT_SECS,
            boat_id: None,
            boat_type: None,
            latitude: None,
            longitude: None,
            near_me: false,
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
            telemetry: false,
        }
    }
}

impl BoatyardConfig {
    /// Determines the operation mode based on provided configuration.
    ///
    /// A non-blank boat id selects `Reviews`, `near_me` selects `NearMe`, and
    /// anything else is a `Search`.
    #[must_use]
    pub fn operation_mode(&self) -> OperationMode {
        if self.boat_id.as_deref().is_some_and(|id| !id.trim().is_empty()) {
            OperationMode::Reviews
        } else if self.near_me {
            OperationMode::NearMe
        } else {
            OperationMode::Search
        }
    }

    /// Returns the service base URL or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Configuration`] when no base URL is configured.
    pub fn require_api_base(&self) -> Result<&str, CatalogError> {
        self.api_base
            .as_deref()
            .filter(|base| !base.trim().is_empty())
            .ok_or_else(|| CatalogError::Configuration {
                message: "catalogue API base URL is required (use --api-base or -a)".to_owned(),
            })
    }

    /// Configured position, when both latitude and longitude are present.
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates::new(self.latitude?, self.longitude?))
    }

    /// Boat whose reviews were requested, possibly blank.
    #[must_use]
    pub fn record_id(&self) -> RecordId {
        RecordId::new(self.boat_id.clone().unwrap_or_default())
    }

    /// Boat type filter; missing or empty means all types.
    #[must_use]
    pub fn boat_type_filter(&self) -> BoatTypeFilter {
        BoatTypeFilter::from_id(self.boat_type.as_deref().unwrap_or_default())
    }

    /// HTTP timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}
