//! Searchable, inline-editable table of boats.
//!
//! Searches and refreshes raise [`ComponentEvent::Loading`] before the fetch
//! and [`ComponentEvent::DoneLoading`] once its completion is applied,
//! whatever the outcome. Row selection is broadcast on the message bus.
//! Saving sends every staged draft as an independent update; the save only
//! counts as successful when all of them succeed.

use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;

use crate::catalog::{
    Boat, BoatDataGateway, BoatTypeFilter, CatalogError, EditDraft, RecordGateway, RecordId,
    RecordInput,
};
use crate::fetch::{FetchCompletion, FetchController, FetchState, PendingFetch};
use crate::host::{
    BoatMessage, ComponentEvent, ComponentEventSink, MessageBus, Notifier, Toast, ToastVariant,
};
use crate::telemetry::TelemetrySink;

/// Name used for logs and telemetry.
pub const RESULTS_TABLE: &str = "results_table";

const SUCCESS_TITLE: &str = "Success";
const MESSAGE_SHIP_IT: &str = "Ship it!";
const ERROR_TITLE: &str = "Error";

/// In-flight boats request.
pub type BoatFetch = PendingFetch<BoatTypeFilter, Vec<Boat>>;

/// Completed boats request.
pub type BoatCompletion = FetchCompletion<BoatTypeFilter, Vec<Boat>>;

/// How a column's values are formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Plain text.
    Text,
    /// Plain number.
    Number,
    /// Monetary amount.
    Currency,
}

/// Description of one table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Header label.
    pub label: &'static str,
    /// Record field backing the column.
    pub field_name: &'static str,
    /// Formatting.
    #[serde(rename = "type")]
    pub kind: ColumnKind,
    /// Whether cells can be edited inline.
    pub editable: bool,
}

/// Columns shown by the table.
pub const COLUMNS: [Column; 4] = [
    Column {
        label: "Name",
        field_name: "Name",
        kind: ColumnKind::Text,
        editable: true,
    },
    Column {
        label: "Length",
        field_name: "Length__c",
        kind: ColumnKind::Number,
        editable: true,
    },
    Column {
        label: "Price",
        field_name: "Price__c",
        kind: ColumnKind::Currency,
        editable: true,
    },
    Column {
        label: "Description",
        field_name: "Description__c",
        kind: ColumnKind::Text,
        editable: true,
    },
];

/// Display projection of a [`Boat`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoatRow {
    /// Boat record identifier.
    #[serde(rename = "Id")]
    pub id: RecordId,
    /// Boat name.
    #[serde(rename = "Name")]
    pub name: String,
    /// Length in feet.
    #[serde(rename = "Length__c")]
    pub length: Option<f64>,
    /// Daily rental price.
    #[serde(rename = "Price__c")]
    pub price: Option<f64>,
    /// Free-text description.
    #[serde(rename = "Description__c")]
    pub description: Option<String>,
}

impl From<&Boat> for BoatRow {
    fn from(boat: &Boat) -> Self {
        Self {
            id: boat.id.clone(),
            name: boat.name.clone(),
            length: boat.length,
            price: boat.price,
            description: boat.description.clone(),
        }
    }
}

/// Outcome of [`ResultsTable::save`].
#[derive(Debug)]
pub enum SaveOutcome {
    /// There were no drafts to save.
    NothingToSave,
    /// Every update succeeded; carries the refresh started afterwards.
    Saved(Option<BoatFetch>),
    /// At least one update failed; drafts are kept.
    Failed(CatalogError),
}

/// Table of boats filtered by boat type.
pub struct ResultsTable {
    filter: BoatTypeFilter,
    selected_boat_id: Option<RecordId>,
    drafts: Vec<EditDraft>,
    fetch: FetchController<BoatTypeFilter, Vec<Boat>>,
    gateway: Arc<dyn BoatDataGateway>,
    records: Arc<dyn RecordGateway>,
    bus: MessageBus,
    notifier: Arc<dyn Notifier>,
    events: Arc<dyn ComponentEventSink>,
}

impl ResultsTable {
    /// Creates an empty table showing all boat types.
    #[must_use]
    pub fn new(
        gateway: Arc<dyn BoatDataGateway>,
        records: Arc<dyn RecordGateway>,
        bus: MessageBus,
        notifier: Arc<dyn Notifier>,
        events: Arc<dyn ComponentEventSink>,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self {
            filter: BoatTypeFilter::All,
            selected_boat_id: None,
            drafts: Vec::new(),
            fetch: FetchController::new(RESULTS_TABLE, telemetry),
            gateway,
            records,
            bus,
            notifier,
            events,
        }
    }

    /// Switches to a new boat-type filter and fetches matching boats.
    pub fn search(&mut self, filter: BoatTypeFilter) -> Option<BoatFetch> {
        self.filter = filter;
        self.events.dispatch(ComponentEvent::Loading);
        self.load_boats()
    }

    /// Fetches the boats for the current filter again.
    pub fn refresh(&mut self) -> Option<BoatFetch> {
        self.events.dispatch(ComponentEvent::Loading);
        self.load_boats()
    }

    /// Applies a completed fetch and tells the container loading is done.
    pub fn apply(&mut self, completion: BoatCompletion) {
        self.fetch.complete(completion);
        self.events.dispatch(ComponentEvent::DoneLoading);
    }

    /// Current boat-type filter.
    #[must_use]
    pub const fn filter(&self) -> &BoatTypeFilter {
        &self.filter
    }

    /// Current fetch state.
    #[must_use]
    pub const fn state(&self) -> &FetchState<Vec<Boat>> {
        self.fetch.state()
    }

    /// Boats from the last successful fetch.
    #[must_use]
    pub fn boats(&self) -> &[Boat] {
        self.fetch.payload().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rows to display, projected from the current boats.
    #[must_use]
    pub fn rows(&self) -> Vec<BoatRow> {
        self.boats().iter().map(BoatRow::from).collect()
    }

    /// Error from the last fetch, if it failed.
    #[must_use]
    pub const fn error(&self) -> Option<&CatalogError> {
        self.fetch.error()
    }

    /// Selects a boat and broadcasts the selection on the message bus.
    pub fn select_boat(&mut self, boat_id: RecordId) {
        self.bus.publish(BoatMessage {
            record_id: boat_id.as_str().to_owned(),
        });
        self.selected_boat_id = Some(boat_id);
    }

    /// Boat most recently selected.
    #[must_use]
    pub const fn selected_boat_id(&self) -> Option<&RecordId> {
        self.selected_boat_id.as_ref()
    }

    /// Stages an inline edit. Edits of the same record are merged.
    pub fn stage_draft(&mut self, draft: EditDraft) {
        match self.drafts.iter_mut().find(|staged| staged.id == draft.id) {
            Some(staged) => staged.merge(draft),
            None => self.drafts.push(draft),
        }
    }

    /// Edits waiting to be saved.
    #[must_use]
    pub fn drafts(&self) -> &[EditDraft] {
        &self.drafts
    }

    /// Saves every staged draft.
    ///
    /// All updates are issued concurrently and are independent: when one
    /// fails, others may already have been committed. On success the drafts
    /// are cleared, a success toast is shown, and a refresh is started. On
    /// failure an error toast carries the first failing update's message and
    /// the drafts are kept.
    pub async fn save(&mut self) -> SaveOutcome {
        if self.drafts.is_empty() {
            return SaveOutcome::NothingToSave;
        }

        let inputs: Vec<RecordInput> = self
            .drafts
            .iter()
            .cloned()
            .map(RecordInput::from)
            .collect();
        match update_all(self.records.as_ref(), &inputs).await {
            Ok(()) => {
                tracing::info!(component = RESULTS_TABLE, updated = inputs.len(), "drafts saved");
                self.notifier.notify(&Toast::new(
                    SUCCESS_TITLE,
                    MESSAGE_SHIP_IT,
                    ToastVariant::Success,
                ));
                self.drafts.clear();
                SaveOutcome::Saved(self.refresh())
            }
            Err(error) => {
                tracing::warn!(component = RESULTS_TABLE, "saving drafts failed: {error}");
                self.notifier
                    .notify(&Toast::error(ERROR_TITLE, error.message()));
                SaveOutcome::Failed(error)
            }
        }
    }

    fn load_boats(&mut self) -> Option<BoatFetch> {
        let gateway = Arc::clone(&self.gateway);
        self.fetch.request(&self.filter, move |filter| async move {
            gateway.boats(&filter).await
        })
    }
}

/// Issues every update concurrently and folds the outcomes into one result
/// carrying the first failure.
async fn update_all(
    records: &dyn RecordGateway,
    inputs: &[RecordInput],
) -> Result<(), CatalogError> {
    let outcomes = join_all(inputs.iter().map(|input| records.update_record(input))).await;
    let total = outcomes.len();
    let mut failures = outcomes.into_iter().filter_map(Result::err);
    let Some(first) = failures.next() else {
        return Ok(());
    };
    let failed = 1 + failures.count();
    Err(CatalogError::Batch {
        failed,
        total,
        message: first.message().to_owned(),
    })
}

#[cfg(test)]
#[path = "results_table_tests.rs"]
mod tests;
