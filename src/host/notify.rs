//! Toast-style user notifications.

use std::fmt;
use std::io::{self, Write};

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    /// Informational message.
    Info,
    /// Operation succeeded.
    Success,
    /// Something may need attention.
    Warning,
    /// Operation failed.
    Error,
}

impl ToastVariant {
    /// Variant name as understood by the container.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A short notification shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Heading.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Severity.
    pub variant: ToastVariant,
}

impl Toast {
    /// Creates a toast.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        variant: ToastVariant,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            variant,
        }
    }

    /// Creates an error toast.
    #[must_use]
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, ToastVariant::Error)
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{variant}] {title}: {message}",
            variant = self.variant.as_str(),
            title = self.title,
            message = self.message
        )
    }
}

/// Notification surface. Fire-and-forget.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Shows a toast.
    fn notify(&self, toast: &Toast);
}

/// Writes toasts to stderr, one per line.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, toast: &Toast) {
        let mut stderr = io::stderr().lock();
        if writeln!(stderr, "{toast}").is_err() {
            tracing::warn!(%toast, "failed to write toast to stderr");
        }
    }
}
