//! Catalogue components.
//!
//! Each component owns its state and a [`FetchController`](crate::fetch::FetchController).
//! Fetch-starting operations return the in-flight request; the host awaits it
//! and hands the completion back through `apply`. Components never call each
//! other; the results table reaches listeners only through the
//! [`MessageBus`](crate::host::MessageBus).
//!
//! - [`review_panel`]: reviews of one boat
//! - [`results_table`]: searchable, editable boat list
//! - [`nearby_map`]: boats around the caller's position

pub mod nearby_map;
pub mod results_table;
pub mod review_panel;

pub use nearby_map::{LABEL_YOU_ARE_HERE, MapMarker, MapPhase, NearbyMap};
pub use results_table::{BoatRow, COLUMNS, Column, ColumnKind, ResultsTable, SaveOutcome};
pub use review_panel::ReviewPanel;
