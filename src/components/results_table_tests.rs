//! Tests for the boat results table.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::catalog::models::test_support::boat_named;
use crate::catalog::{MockBoatDataGateway, MockRecordGateway};
use crate::host::notify::MockNotifier;
use crate::host::test_support::RecordingEventSink;
use crate::telemetry::NoopTelemetrySink;

struct Parts {
    gateway: MockBoatDataGateway,
    records: MockRecordGateway,
    notifier: MockNotifier,
    bus: MessageBus,
    events: Arc<RecordingEventSink>,
}

impl Parts {
    fn build(self) -> ResultsTable {
        ResultsTable::new(
            Arc::new(self.gateway),
            Arc::new(self.records),
            self.bus,
            Arc::new(self.notifier),
            self.events,
            Arc::new(NoopTelemetrySink),
        )
    }
}

#[fixture]
fn parts() -> Parts {
    Parts {
        gateway: MockBoatDataGateway::new(),
        records: MockRecordGateway::new(),
        notifier: MockNotifier::new(),
        bus: MessageBus::new(),
        events: Arc::new(RecordingEventSink::default()),
    }
}

fn api_error(message: &str) -> CatalogError {
    CatalogError::Api {
        message: message.to_owned(),
    }
}

async fn settle(table: &mut ResultsTable, pending: Option<BoatFetch>) {
    let pending = pending.expect("a fetch should have been issued");
    table.apply(pending.resolve().await);
}

#[rstest]
#[tokio::test]
async fn search_notifies_loading_and_done(mut parts: Parts) {
    parts
        .gateway
        .expect_boats()
        .with(eq(BoatTypeFilter::from_id("T1")))
        .times(1)
        .returning(|_| Ok(vec![boat_named("B001", "Orca")]));
    let events = Arc::clone(&parts.events);
    let mut table = parts.build();

    let pending = table.search(BoatTypeFilter::from_id("T1"));
    assert_eq!(events.events(), vec![ComponentEvent::Loading]);
    settle(&mut table, pending).await;

    assert_eq!(
        events.events(),
        vec![ComponentEvent::Loading, ComponentEvent::DoneLoading]
    );
    assert_eq!(table.filter(), &BoatTypeFilter::from_id("T1"));
    assert_eq!(table.rows().len(), 1);
    assert_eq!(
        table.rows().first().map(|row| row.name.as_str()),
        Some("Orca")
    );
}

#[rstest]
#[tokio::test]
async fn refresh_reports_done_even_on_failure(mut parts: Parts) {
    parts
        .gateway
        .expect_boats()
        .with(eq(BoatTypeFilter::All))
        .times(1)
        .returning(|_| Err(api_error("offline")));
    let events = Arc::clone(&parts.events);
    let mut table = parts.build();

    let pending = table.refresh();
    settle(&mut table, pending).await;

    assert_eq!(
        events.events(),
        vec![ComponentEvent::Loading, ComponentEvent::DoneLoading]
    );
    assert_eq!(table.error(), Some(&api_error("offline")));
    assert!(table.rows().is_empty());
}

#[rstest]
fn selection_is_published_on_bus(parts: Parts) {
    let mut receiver = parts.bus.subscribe();
    let mut table = parts.build();

    table.select_boat(RecordId::new("B042"));

    assert_eq!(table.selected_boat_id(), Some(&RecordId::new("B042")));
    assert_eq!(
        receiver.try_recv(),
        Ok(BoatMessage {
            record_id: "B042".to_owned()
        })
    );
}

#[rstest]
fn selection_without_listeners_is_fire_and_forget(parts: Parts) {
    let mut table = parts.build();

    table.select_boat(RecordId::new("B1"));

    assert_eq!(table.selected_boat_id(), Some(&RecordId::new("B1")));
}

#[rstest]
fn staging_merges_edits_of_same_record(parts: Parts) {
    let mut table = parts.build();

    table.stage_draft(EditDraft::new("B1").with_field("Name", "Orca"));
    table.stage_draft(EditDraft::new("B2").with_field("Price__c", 100));
    table.stage_draft(EditDraft::new("B1").with_field("Length__c", 30));

    assert_eq!(table.drafts().len(), 2);
    let merged = table.drafts().first().expect("first draft");
    assert_eq!(merged.fields.get("Name"), Some(&json!("Orca")));
    assert_eq!(merged.fields.get("Length__c"), Some(&json!(30)));
}

#[rstest]
#[tokio::test]
async fn saving_all_drafts_clears_and_refreshes_once(mut parts: Parts) {
    parts
        .records
        .expect_update_record()
        .times(3)
        .returning(|_| Ok(()));
    parts
        .notifier
        .expect_notify()
        .withf(|toast| {
            toast.title == "Success"
                && toast.message == "Ship it!"
                && toast.variant == ToastVariant::Success
        })
        .times(1)
        .return_const(());
    parts
        .gateway
        .expect_boats()
        .times(1)
        .returning(|_| Ok(vec![boat_named("B1", "Renamed")]));
    let events = Arc::clone(&parts.events);
    let mut table = parts.build();
    for id in ["B1", "B2", "B3"] {
        table.stage_draft(EditDraft::new(id).with_field("Name", "Renamed"));
    }

    let outcome = table.save().await;

    assert!(table.drafts().is_empty(), "drafts should be cleared");
    let SaveOutcome::Saved(pending) = outcome else {
        panic!("expected Saved, got {outcome:?}");
    };
    settle(&mut table, pending).await;
    assert_eq!(
        events.events(),
        vec![ComponentEvent::Loading, ComponentEvent::DoneLoading]
    );
    assert_eq!(table.boats(), [boat_named("B1", "Renamed")].as_slice());
}

#[rstest]
#[tokio::test]
async fn one_failed_update_reports_error_and_keeps_drafts(mut parts: Parts) {
    parts
        .records
        .expect_update_record()
        .withf(|input| input.id == RecordId::new("B2"))
        .times(1)
        .returning(|_| Err(api_error("Price must be positive")));
    parts
        .records
        .expect_update_record()
        .withf(|input| input.id != RecordId::new("B2"))
        .times(2)
        .returning(|_| Ok(()));
    parts
        .notifier
        .expect_notify()
        .withf(|toast| {
            toast.title == "Error"
                && toast.message == "Price must be positive"
                && toast.variant == ToastVariant::Error
        })
        .times(1)
        .return_const(());
    parts.gateway.expect_boats().times(0);
    let events = Arc::clone(&parts.events);
    let mut table = parts.build();
    table.stage_draft(EditDraft::new("B1").with_field("Price__c", 10));
    table.stage_draft(EditDraft::new("B2").with_field("Price__c", -1));
    table.stage_draft(EditDraft::new("B3").with_field("Price__c", 30));

    let outcome = table.save().await;

    assert!(
        matches!(
            &outcome,
            SaveOutcome::Failed(CatalogError::Batch { failed: 1, total: 3, message })
                if message == "Price must be positive"
        ),
        "unexpected outcome {outcome:?}"
    );
    assert_eq!(table.drafts().len(), 3, "drafts are kept after a failure");
    assert!(events.events().is_empty(), "no refresh after a failure");
}

#[rstest]
#[tokio::test]
async fn saving_without_drafts_does_nothing(mut parts: Parts) {
    parts.records.expect_update_record().times(0);
    parts.notifier.expect_notify().times(0);
    let mut table = parts.build();

    let outcome = table.save().await;

    assert!(matches!(outcome, SaveOutcome::NothingToSave));
}

/// Filter changes do not cancel earlier fetches; whichever completion is
/// applied last is what the table shows.
#[rstest]
#[tokio::test]
async fn slower_earlier_search_overwrites_later_one(mut parts: Parts) {
    parts
        .gateway
        .expect_boats()
        .with(eq(BoatTypeFilter::from_id("TypeA")))
        .returning(|_| Ok(vec![boat_named("A1", "From A")]));
    parts
        .gateway
        .expect_boats()
        .with(eq(BoatTypeFilter::from_id("TypeB")))
        .returning(|_| Ok(vec![boat_named("B1", "From B")]));
    let mut table = parts.build();

    let type_a = table
        .search(BoatTypeFilter::from_id("TypeA"))
        .expect("TypeA fetch");
    let type_b = table
        .search(BoatTypeFilter::from_id("TypeB"))
        .expect("TypeB fetch");
    let (a_done, b_done) = tokio::join!(type_a.resolve(), type_b.resolve());
    table.apply(b_done);
    table.apply(a_done);

    assert_eq!(table.filter(), &BoatTypeFilter::from_id("TypeB"));
    assert_eq!(table.boats(), [boat_named("A1", "From A")].as_slice());
}

#[rstest]
fn columns_match_editable_boat_fields() {
    let fields: Vec<_> = COLUMNS.iter().map(|column| column.field_name).collect();

    assert_eq!(fields, ["Name", "Length__c", "Price__c", "Description__c"]);
    assert!(COLUMNS.iter().all(|column| column.editable));
    assert_eq!(
        COLUMNS.get(2).map(|column| column.kind),
        Some(ColumnKind::Currency)
    );
}
