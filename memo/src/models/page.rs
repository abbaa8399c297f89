use serde::{Deserialize, Serialize};

use super::{Memo, StatusFilter};

/// Server-side selection applied to the memo list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoFilter {
    pub creator_id: i64,
    pub status: StatusFilter,
}

impl MemoFilter {
    pub fn new(creator_id: i64, status: StatusFilter) -> Self {
        Self { creator_id, status }
    }

    /// Filter expression understood by the list endpoint, e.g.
    /// `creator == "users/1" && row_status == "NORMAL"`.
    pub fn to_expression(&self) -> String {
        let mut clauses = vec![format!("creator == \"users/{}\"", self.creator_id)];
        if let Some(row_status) = self.status.row_status() {
            clauses.push(format!("row_status == \"{row_status}\""));
        }
        clauses.join(" && ")
    }
}

/// One page of the remote memo list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoPage {
    #[serde(default)]
    pub memos: Vec<Memo>,
    /// Continuation token; `None` once the last page has been served.
    #[serde(default, deserialize_with = "empty_token_as_none")]
    pub next_page_token: Option<String>,
}

fn empty_token_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let token: Option<String> = Option::deserialize(deserializer)?;
    Ok(token.filter(|t| !t.is_empty()))
}
