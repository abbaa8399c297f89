use crate::models::{MemoFilter, StatusFilter};

/// Transient search state owned by the list controller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchState {
    /// Text as typed, updated on every keystroke.
    pub query_text: String,
    /// Text the loaded items are filtered by; trails `query_text` by the
    /// debounce window.
    pub debounced_query_text: String,
    pub status_filter: StatusFilter,
    pub current_user_id: Option<i64>,
    /// Continuation token of the last applied page.
    pub page_cursor: Option<String>,
}

impl SearchState {
    pub fn new(initial_query: impl Into<String>, status_filter: StatusFilter) -> Self {
        let query = initial_query.into();
        Self {
            debounced_query_text: query.clone(),
            query_text: query,
            status_filter,
            current_user_id: None,
            page_cursor: None,
        }
    }
}

/// Identity of one list request.
///
/// `generation` names the list epoch (bumped by every first-page fetch) and
/// `sequence` the individual request within the controller's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    pub generation: u64,
    pub sequence: u64,
}

/// A list fetch the driver should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub filter: MemoFilter,
    /// `None` requests the first page.
    pub page_token: Option<String>,
}

impl FetchRequest {
    pub fn is_first_page(&self) -> bool {
        self.page_token.is_none()
    }
}

/// Result of offering a page to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page belonged to the current request; `added` new items were kept.
    Applied { added: usize },
    /// The page answered a superseded request and was dropped.
    Stale,
}
