use std::time::Duration;

use crate::models::{MemoPage, RowStatus, StatusFilter, User};

use super::state::{FetchRequest, FetchTicket};

/// Inputs accepted by [`super::ListController::handle`].
#[derive(Debug, Clone)]
pub enum Event {
    QueryChanged(String),
    DebounceFired { ticket: u64 },
    StatusFilterChanged(StatusFilter),
    UserResolved(User),
    UserUnavailable { reason: String },
    LoadNextPage,
    Revalidate,
    PageLoaded { ticket: FetchTicket, page: MemoPage },
    PageFailed { ticket: FetchTicket, reason: String },
    TransitionStarted(TransitionKind),
    TransitionFinished { kind: TransitionKind, succeeded: bool },
}

/// Work the controller asks its driver to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Replace the live debounce timer; expiry must come back as
    /// [`Event::DebounceFired`] carrying the same ticket.
    ArmDebounce { ticket: u64, delay: Duration },
    Fetch(FetchRequest),
    Notify(Notice),
    /// The derived list changed and should be presented again.
    Render,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeStyle {
    Animated,
    Success,
    Failure,
}

/// A short user-visible message, the terminal counterpart of a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub style: NoticeStyle,
    pub title: String,
}

impl Notice {
    pub fn animated(title: impl Into<String>) -> Self {
        Self {
            style: NoticeStyle::Animated,
            title: title.into(),
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self {
            style: NoticeStyle::Success,
            title: title.into(),
        }
    }

    pub fn failure(title: impl Into<String>) -> Self {
        Self {
            style: NoticeStyle::Failure,
            title: title.into(),
        }
    }
}

/// Remote status changes a user can request on a memo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    Archive,
    Restore,
    Delete,
}

impl TransitionKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Archive => "Archive",
            Self::Restore => "Restore",
            Self::Delete => "Delete",
        }
    }

    /// Row status to set remotely, `None` for a delete.
    pub fn target_status(self) -> Option<RowStatus> {
        match self {
            Self::Archive => Some(RowStatus::Archived),
            Self::Restore => Some(RowStatus::Normal),
            Self::Delete => None,
        }
    }

    pub fn confirm_prompt(self) -> ConfirmPrompt {
        ConfirmPrompt {
            title: "Are you sure?".to_string(),
            action: self.label().to_string(),
            destructive: !matches!(self, Self::Restore),
        }
    }

    pub fn in_progress_notice(self) -> Notice {
        Notice::animated(format!("{}...", self.label()))
    }

    pub fn success_notice(self) -> Notice {
        Notice::success(format!("{} Success", self.label()))
    }

    pub fn failure_notice(self) -> Notice {
        Notice::failure(format!("{} Failed", self.label()))
    }
}

impl std::fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Confirmation requested before a transition runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub action: String,
    pub destructive: bool,
}
