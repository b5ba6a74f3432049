//! Data models for boats, reviews, and the keys used to query them.
//!
//! Types prefixed with `Api` are deserialisation targets matching the
//! catalogue service's field names; they convert into the public domain
//! types used by the components.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Identifier of a catalogue record (boat, boat type, user, review).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wraps a raw identifier. Empty identifiers are allowed and treated as
    /// unset by the fetch layer.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the identifier is empty or whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Boat-type restriction applied to boat searches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum BoatTypeFilter {
    /// Every boat type.
    #[default]
    All,
    /// A single boat type.
    Type(RecordId),
}

impl BoatTypeFilter {
    /// Builds a filter from a raw boat-type id, where an empty id selects all
    /// types.
    #[must_use]
    pub fn from_id(value: &str) -> Self {
        if value.trim().is_empty() {
            Self::All
        } else {
            Self::Type(RecordId::new(value))
        }
    }

    /// Returns the value sent as the `boatTypeId` query parameter.
    #[must_use]
    pub fn query_value(&self) -> &str {
        match self {
            Self::All => "",
            Self::Type(id) => id.as_str(),
        }
    }
}

impl fmt::Display for BoatTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all types"),
            Self::Type(id) => write!(f, "type {id}"),
        }
    }
}

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees.
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    /// Longitude in decimal degrees.
    #[serde(rename = "Longitude")]
    pub longitude: f64,
}

impl Coordinates {
    /// Creates coordinates from a latitude/longitude pair.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns `true` when both components are finite numbers.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// Parameters of a nearby-boats query.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationQuery {
    /// Position to search around.
    pub coordinates: Coordinates,
    /// Boat-type restriction.
    pub boat_type: BoatTypeFilter,
}

/// A review left on a boat.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Review {
    /// Review record identifier.
    pub id: RecordId,
    /// Review title.
    pub title: Option<String>,
    /// Review body.
    pub comment: Option<String>,
    /// Star rating, typically 1 to 5.
    pub rating: Option<u8>,
    /// When the review was written.
    pub created_at: Option<DateTime<Utc>>,
    /// Identifier of the user who wrote the review.
    pub author_id: Option<RecordId>,
    /// Display name of the author.
    pub author_name: Option<String>,
    /// Thumbnail photo of the author.
    pub author_photo_url: Option<String>,
    /// Company the author belongs to.
    pub author_company: Option<String>,
}

/// A boat listed in the catalogue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Boat {
    /// Boat record identifier.
    pub id: RecordId,
    /// Boat name.
    pub name: String,
    /// Length in feet.
    pub length: Option<f64>,
    /// Daily rental price.
    pub price: Option<f64>,
    /// Free-text description.
    pub description: Option<String>,
    /// Boat type identifier.
    pub boat_type_id: Option<RecordId>,
    /// Boat type display name.
    pub boat_type_name: Option<String>,
    /// Owner contact name.
    pub contact_name: Option<String>,
    /// Picture URL.
    pub picture_url: Option<String>,
    /// Mooring position, when known.
    pub location: Option<Coordinates>,
}

/// A boat name and position, as returned by the nearby-boats query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BoatLocation {
    /// Boat name.
    #[serde(rename = "Name")]
    pub name: String,
    /// Latitude of the mooring.
    #[serde(rename = "Geolocation__Latitude__s")]
    pub latitude: f64,
    /// Longitude of the mooring.
    #[serde(rename = "Geolocation__Longitude__s")]
    pub longitude: f64,
}

/// A pending, unsaved set of field edits for one record.
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft {
    /// Record being edited.
    pub id: RecordId,
    /// Changed fields keyed by field name.
    pub fields: Map<String, Value>,
}

impl EditDraft {
    /// Creates an empty draft for the given record.
    #[must_use]
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Adds or replaces a field change.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Merges a later draft for the same record into this one; later values
    /// win per field.
    pub fn merge(&mut self, later: Self) {
        self.fields.extend(later.fields);
    }
}

/// A single record update sent to the catalogue service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordInput {
    /// Record being updated.
    #[serde(skip)]
    pub id: RecordId,
    /// Field deltas to apply.
    pub fields: Map<String, Value>,
}

impl From<EditDraft> for RecordInput {
    fn from(draft: EditDraft) -> Self {
        Self {
            id: draft.id,
            fields: draft.fields,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiUser {
    #[serde(rename = "Id")]
    pub(super) id: Option<String>,
    #[serde(rename = "Name")]
    pub(super) name: Option<String>,
    #[serde(rename = "SmallPhotoUrl")]
    pub(super) small_photo_url: Option<String>,
    #[serde(rename = "CompanyName")]
    pub(super) company_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiReview {
    #[serde(rename = "Id")]
    pub(super) id: String,
    #[serde(rename = "Name")]
    pub(super) name: Option<String>,
    #[serde(rename = "Comment__c")]
    pub(super) comment: Option<String>,
    #[serde(rename = "Rating__c")]
    pub(super) rating: Option<f64>,
    #[serde(rename = "CreatedDate")]
    pub(super) created_date: Option<DateTime<Utc>>,
    #[serde(rename = "CreatedBy")]
    pub(super) created_by: Option<ApiUser>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiBoatType {
    #[serde(rename = "Name")]
    pub(super) name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiContact {
    #[serde(rename = "Name")]
    pub(super) name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiBoat {
    #[serde(rename = "Id")]
    pub(super) id: String,
    #[serde(rename = "Name", default)]
    pub(super) name: String,
    #[serde(rename = "Length__c")]
    pub(super) length: Option<f64>,
    #[serde(rename = "Price__c")]
    pub(super) price: Option<f64>,
    #[serde(rename = "Description__c")]
    pub(super) description: Option<String>,
    #[serde(rename = "BoatType__c")]
    pub(super) boat_type_id: Option<String>,
    #[serde(rename = "BoatType__r")]
    pub(super) boat_type: Option<ApiBoatType>,
    #[serde(rename = "Contact__r")]
    pub(super) contact: Option<ApiContact>,
    #[serde(rename = "Picture__c")]
    pub(super) picture: Option<String>,
    #[serde(rename = "Geolocation__Latitude__s")]
    pub(super) latitude: Option<f64>,
    #[serde(rename = "Geolocation__Longitude__s")]
    pub(super) longitude: Option<f64>,
}

impl From<ApiReview> for Review {
    fn from(value: ApiReview) -> Self {
        let (author_id, author_name, author_photo_url, author_company) = match value.created_by {
            Some(user) => (
                user.id.map(RecordId::from),
                user.name,
                user.small_photo_url,
                user.company_name,
            ),
            None => (None, None, None, None),
        };
        Self {
            id: RecordId::from(value.id),
            title: value.name,
            comment: value.comment,
            rating: value.rating.and_then(rating_from_number),
            created_at: value.created_date,
            author_id,
            author_name,
            author_photo_url,
            author_company,
        }
    }
}

impl From<ApiBoat> for Boat {
    fn from(value: ApiBoat) -> Self {
        let location = match (value.latitude, value.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            _ => None,
        };
        Self {
            id: RecordId::from(value.id),
            name: value.name,
            length: value.length,
            price: value.price,
            description: value.description,
            boat_type_id: value.boat_type_id.map(RecordId::from),
            boat_type_name: value.boat_type.and_then(|boat_type| boat_type.name),
            contact_name: value.contact.and_then(|contact| contact.name),
            picture_url: value.picture,
            location,
        }
    }
}

/// Converts the service's numeric rating into a whole star count.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is rounded and range-checked before the cast"
)]
fn rating_from_number(value: f64) -> Option<u8> {
    let rounded = value.round();
    (0.0..=f64::from(u8::MAX))
        .contains(&rounded)
        .then_some(rounded as u8)
}
