//! Collaborators supplied by the hosting container.
//!
//! Components never talk to a terminal, browser, or map widget directly.
//! They receive these services at construction time:
//!
//! - [`bus`]: typed publish/subscribe channel shared between components
//! - [`events`]: custom `loading`/`done loading` events for the container
//! - [`navigation`]: record-page navigation requests
//! - [`notify`]: toast-style notifications
//! - [`sensor`]: one-shot current-location reads

pub mod bus;
pub mod events;
pub mod navigation;
pub mod notify;
pub mod sensor;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use bus::{BOAT_MESSAGE_CHANNEL, BoatMessage, MessageBus};
pub use events::{ComponentEvent, ComponentEventSink, TracingEventSink};
pub use navigation::{LogNavigator, Navigator, PageAction, PageReference};
pub use notify::{Notifier, StderrNotifier, Toast, ToastVariant};
pub use sensor::{FixedLocationSensor, LocationSensor};
