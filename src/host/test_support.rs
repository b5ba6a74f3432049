//! In-memory host collaborators for tests.
//!
//! Each recorder keeps everything it receives so assertions can inspect the
//! exact sequence after the fact.

use std::sync::Mutex;

use super::{ComponentEvent, ComponentEventSink, Navigator, Notifier, PageReference, Toast};

fn snapshot<T: Clone>(items: &Mutex<Vec<T>>) -> Vec<T> {
    items.lock().map(|guard| guard.clone()).unwrap_or_default()
}

fn push<T>(items: &Mutex<Vec<T>>, item: T) {
    if let Ok(mut guard) = items.lock() {
        guard.push(item);
    }
}

/// Notifier that records every toast.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    /// Toasts shown so far.
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        snapshot(&self.toasts)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: &Toast) {
        push(&self.toasts, toast.clone());
    }
}

/// Navigator that records every requested page.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pages: Mutex<Vec<PageReference>>,
}

impl RecordingNavigator {
    /// Pages requested so far.
    #[must_use]
    pub fn pages(&self) -> Vec<PageReference> {
        snapshot(&self.pages)
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, page: &PageReference) {
        push(&self.pages, page.clone());
    }
}

/// Event sink that records every dispatched event.
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<ComponentEvent>>,
}

impl RecordingEventSink {
    /// Events dispatched so far.
    #[must_use]
    pub fn events(&self) -> Vec<ComponentEvent> {
        snapshot(&self.events)
    }
}

impl ComponentEventSink for RecordingEventSink {
    fn dispatch(&self, event: ComponentEvent) {
        push(&self.events, event);
    }
}
