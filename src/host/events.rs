//! Custom events dispatched to the hosting container.

use std::fmt;

/// Event a component raises towards its container, such as a parent status
/// bar showing a spinner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentEvent {
    /// A search or refresh has started.
    Loading,
    /// The last search or refresh has finished, successfully or not.
    DoneLoading,
}

impl ComponentEvent {
    /// Event name as seen by the container.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::DoneLoading => "doneloading",
        }
    }
}

impl fmt::Display for ComponentEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Receiver of component events.
#[cfg_attr(test, mockall::automock)]
pub trait ComponentEventSink: Send + Sync {
    /// Delivers an event. Fire-and-forget.
    fn dispatch(&self, event: ComponentEvent);
}

/// Sink that logs events through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl ComponentEventSink for TracingEventSink {
    fn dispatch(&self, event: ComponentEvent) {
        tracing::info!(event = event.name(), "component event");
    }
}
