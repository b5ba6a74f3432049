//! Test helpers for constructing catalogue fixtures.
//!
//! # Examples
//!
//! ```
//! use boatyard::catalog::models::test_support::{boat_named, review_titled};
//!
//! let boat = boat_named("B001", "Orca");
//! assert_eq!(boat.name, "Orca");
//!
//! let review = review_titled("R1", "Great day out");
//! assert_eq!(review.title.as_deref(), Some("Great day out"));
//! ```

use super::{Boat, Review, RecordId};

/// Constructs a `Boat` with only an id and a name set.
#[must_use]
pub fn boat_named(id: &str, name: &str) -> Boat {
    Boat {
        id: RecordId::new(id),
        name: name.to_owned(),
        ..Boat::default()
    }
}

/// Constructs a `Review` with only an id and a title set.
#[must_use]
pub fn review_titled(id: &str, title: &str) -> Review {
    Review {
        id: RecordId::new(id),
        title: Some(title.to_owned()),
        ..Review::default()
    }
}

/// Builds the serialised nearby-boats payload for `(name, latitude,
/// longitude)` triples, matching the service's wire format.
#[must_use]
pub fn nearby_payload(boats: &[(&str, f64, f64)]) -> String {
    let rows: Vec<serde_json::Value> = boats
        .iter()
        .map(|(name, latitude, longitude)| {
            serde_json::json!({
                "Name": name,
                "Geolocation__Latitude__s": latitude,
                "Geolocation__Longitude__s": longitude,
            })
        })
        .collect();
    serde_json::Value::Array(rows).to_string()
}
