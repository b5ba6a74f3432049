//! Fetch keys and payload sizing.

use std::fmt;

use crate::catalog::{BoatTypeFilter, LocationQuery, RecordId};

/// Parameter of a remote read.
pub trait FetchKey: Clone + fmt::Debug + Send + 'static {
    /// Returns `true` when the key is absent or empty; no request is issued
    /// for an unset key.
    fn is_unset(&self) -> bool;
}

impl FetchKey for RecordId {
    fn is_unset(&self) -> bool {
        self.is_blank()
    }
}

impl FetchKey for BoatTypeFilter {
    // An empty type id means "all types", which is still a valid search.
    fn is_unset(&self) -> bool {
        false
    }
}

impl FetchKey for LocationQuery {
    fn is_unset(&self) -> bool {
        !self.coordinates.is_finite()
    }
}

impl<K: FetchKey> FetchKey for Option<K> {
    fn is_unset(&self) -> bool {
        self.as_ref().is_none_or(FetchKey::is_unset)
    }
}

/// Payload produced by a remote read.
pub trait FetchPayload {
    /// Number of records in the payload, used for telemetry.
    fn item_count(&self) -> usize;
}

impl<T> FetchPayload for Vec<T> {
    fn item_count(&self) -> usize {
        self.len()
    }
}
