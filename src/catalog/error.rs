//! Error types exposed by the catalogue data layer.

use thiserror::Error;

/// Errors surfaced while talking to the boat catalogue or its collaborators.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalogue service answered with a non-success status.
    #[error("{message}")]
    Api {
        /// Message from the response body, or the status line when absent.
        message: String,
    },

    /// Networking failed while calling the catalogue service.
    #[error("network error talking to the catalogue: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// A payload could not be decoded into the expected shape.
    #[error("could not decode catalogue payload: {message}")]
    Decode {
        /// Parser error detail.
        message: String,
    },

    /// The location sensor could not provide coordinates.
    #[error("current location unavailable: {message}")]
    Location {
        /// Sensor error detail.
        message: String,
    },

    /// Configuration could not be loaded or is incomplete.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// One or more record updates in a batch failed.
    ///
    /// Only the first captured failure is kept; per-record outcomes are not
    /// reported and earlier updates may already have been committed.
    #[error("{failed} of {total} record updates failed: {message}")]
    Batch {
        /// Number of updates known to have failed.
        failed: usize,
        /// Number of updates issued.
        total: usize,
        /// Message of the first failing update.
        message: String,
    },
}

impl CatalogError {
    /// Returns the bare message carried by the error, without the prefix
    /// used by its `Display` implementation.
    ///
    /// This is the text shown in toast notifications.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Api { message }
            | Self::Network { message }
            | Self::Decode { message }
            | Self::Location { message }
            | Self::Configuration { message }
            | Self::Io { message }
            | Self::Batch { message, .. } => message,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode {
            message: error.to_string(),
        }
    }
}
