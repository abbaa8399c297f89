use serde::Serialize;

use crate::models::{Memo, StatusFilter};

use super::event::TransitionKind;

/// Actions offered for a single memo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MemoAction {
    OpenInBrowser,
    CopyContent,
    CopyUrl,
    Archive,
    Restore,
    Delete,
}

impl MemoAction {
    pub fn transition(self) -> Option<TransitionKind> {
        match self {
            Self::Archive => Some(TransitionKind::Archive),
            Self::Restore => Some(TransitionKind::Restore),
            Self::Delete => Some(TransitionKind::Delete),
            _ => None,
        }
    }
}

/// Archived memos can be restored, everything else can be archived; every
/// memo can be deleted.
pub fn available_actions(memo: &Memo) -> Vec<MemoAction> {
    let mut actions = vec![
        MemoAction::OpenInBrowser,
        MemoAction::CopyContent,
        MemoAction::CopyUrl,
    ];
    if memo.is_archived() {
        actions.push(MemoAction::Restore);
    } else {
        actions.push(MemoAction::Archive);
    }
    actions.push(MemoAction::Delete);
    actions
}

pub fn offers_transition(memo: &Memo, kind: TransitionKind) -> bool {
    available_actions(memo)
        .into_iter()
        .any(|action| action.transition() == Some(kind))
}

/// A loaded memo prepared for presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoView {
    #[serde(flatten)]
    pub memo: Memo,
    pub markdown: String,
    pub actions: Vec<MemoAction>,
}

impl From<&Memo> for MemoView {
    fn from(memo: &Memo) -> Self {
        Self {
            markdown: memo.markdown(),
            actions: available_actions(memo),
            memo: memo.clone(),
        }
    }
}

/// Everything the presentation layer needs to draw the list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
    pub is_loading: bool,
    pub has_more: bool,
    pub status_filter: StatusFilter,
    pub query: String,
    pub items: Vec<MemoView>,
}
