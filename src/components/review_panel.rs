//! Reviews panel for a single boat.
//!
//! Setting the boat id always fetches that boat's reviews, even when the id
//! has not changed. Selecting a review opens the page of the user who wrote
//! it.

use std::sync::Arc;

use crate::catalog::{BoatDataGateway, CatalogError, RecordId, Review};
use crate::fetch::{FetchCompletion, FetchController, FetchState, PendingFetch};
use crate::host::{Navigator, PageReference};
use crate::telemetry::TelemetrySink;

/// Name used for logs and telemetry.
pub const REVIEW_PANEL: &str = "review_panel";

/// Object type opened when a reviewer is selected.
const REVIEWER_OBJECT: &str = "User";

/// In-flight reviews request.
pub type ReviewFetch = PendingFetch<RecordId, Vec<Review>>;

/// Completed reviews request.
pub type ReviewCompletion = FetchCompletion<RecordId, Vec<Review>>;

/// Lists the reviews written for one boat.
pub struct ReviewPanel {
    record_id: RecordId,
    fetch: FetchController<RecordId, Vec<Review>>,
    gateway: Arc<dyn BoatDataGateway>,
    navigator: Arc<dyn Navigator>,
}

impl ReviewPanel {
    /// Creates an empty panel with no boat selected.
    #[must_use]
    pub fn new(
        gateway: Arc<dyn BoatDataGateway>,
        navigator: Arc<dyn Navigator>,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self {
            record_id: RecordId::default(),
            fetch: FetchController::new(REVIEW_PANEL, telemetry),
            gateway,
            navigator,
        }
    }

    /// Sets the boat whose reviews are shown and fetches them.
    ///
    /// The fetch is issued on every call, including when `record_id` equals
    /// the current id. A blank id is stored but fetches nothing.
    pub fn set_record_id(&mut self, record_id: impl Into<RecordId>) -> Option<ReviewFetch> {
        self.record_id = record_id.into();
        self.load_reviews()
    }

    /// Boat whose reviews are shown.
    #[must_use]
    pub const fn record_id(&self) -> &RecordId {
        &self.record_id
    }

    /// Fetches the reviews of the current boat again.
    pub fn refresh(&mut self) -> Option<ReviewFetch> {
        self.load_reviews()
    }

    /// Applies a completed fetch.
    pub fn apply(&mut self, completion: ReviewCompletion) {
        self.fetch.complete(completion);
    }

    /// Returns `true` when the last fetch succeeded with at least one review.
    #[must_use]
    pub fn has_reviews(&self) -> bool {
        self.fetch.payload().is_some_and(|reviews| !reviews.is_empty())
    }

    /// Reviews from the last successful fetch; empty while loading or after
    /// a failure.
    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        self.fetch.payload().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Error from the last fetch, if it failed.
    #[must_use]
    pub const fn error(&self) -> Option<&CatalogError> {
        self.fetch.error()
    }

    /// Returns `true` while a fetch is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.fetch.is_loading()
    }

    /// Current fetch state.
    #[must_use]
    pub const fn state(&self) -> &FetchState<Vec<Review>> {
        self.fetch.state()
    }

    /// Opens the user record of a review's author.
    ///
    /// `author_id` is the user id attached to the selected review row, not
    /// the review's own id.
    pub fn open_reviewer(&self, author_id: &RecordId) {
        if author_id.is_blank() {
            tracing::debug!("ignoring reviewer selection without a user id");
            return;
        }
        self.navigator
            .navigate(&PageReference::view(REVIEWER_OBJECT, author_id.clone()));
    }

    fn load_reviews(&mut self) -> Option<ReviewFetch> {
        let gateway = Arc::clone(&self.gateway);
        self.fetch.request(&self.record_id, move |boat_id| async move {
            gateway.reviews(&boat_id).await
        })
    }
}

#[cfg(test)]
#[path = "review_panel_tests.rs"]
mod tests;
