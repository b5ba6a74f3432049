//! Record-page navigation requests.

use std::fmt;

use crate::catalog::RecordId;

/// Action to perform on the target record page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    /// Open the record read-only.
    View,
    /// Open the record for editing.
    Edit,
}

impl PageAction {
    /// Action name understood by the container.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
        }
    }
}

/// Target of a navigation request: a standard record page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReference {
    /// Record to open.
    pub record_id: RecordId,
    /// Object type of the record, e.g. `User`.
    pub object_api_name: String,
    /// Action to perform.
    pub action: PageAction,
}

impl PageReference {
    /// Builds a reference that views the given record.
    #[must_use]
    pub fn view(object_api_name: &str, record_id: RecordId) -> Self {
        Self {
            record_id,
            object_api_name: object_api_name.to_owned(),
            action: PageAction::View,
        }
    }
}

impl fmt::Display for PageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{object}/{id}/{action}",
            object = self.object_api_name,
            id = self.record_id,
            action = self.action.as_str()
        )
    }
}

/// Navigation service. Fire-and-forget.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Requests navigation to a record page.
    fn navigate(&self, page: &PageReference);
}

/// Navigator that only logs the requested page; used by the CLI host, which
/// has nowhere to navigate to.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, page: &PageReference) {
        tracing::info!(%page, "navigation requested");
    }
}
