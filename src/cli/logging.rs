//! Tracing subscriber setup.

use boatyard::CatalogError;
use tracing_subscriber::EnvFilter;

/// Installs a stderr `fmt` subscriber.
///
/// `RUST_LOG` wins over `default_directive` when set.
///
/// # Errors
///
/// Returns [`CatalogError::Configuration`] when the directive is invalid or a
/// global subscriber is already installed.
pub fn init(default_directive: &str) -> Result<(), CatalogError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .map_err(|error| CatalogError::Configuration {
            message: format!("invalid log level '{default_directive}': {error}"),
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| CatalogError::Configuration {
            message: format!("failed to initialise logging: {error}"),
        })
}
