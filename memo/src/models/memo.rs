use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{RowStatus, Visibility};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memo {
    /// Resource name assigned by the service, e.g. `memos/42`.
    #[serde(rename = "name")]
    pub id: String,
    /// Short public identifier used in website URLs.
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub creator: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub visibility: String,
    #[serde(default)]
    pub row_status: RowStatus,
    pub create_time: Option<DateTime<Utc>>,
    pub update_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub property: MemoProperty,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub external_link: String,
    #[serde(default, rename = "type")]
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoProperty {
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Memo {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            uid: String::new(),
            creator: String::new(),
            content: content.into(),
            resources: Vec::new(),
            pinned: false,
            visibility: Visibility::default().to_string(),
            row_status: RowStatus::Normal,
            create_time: None,
            update_time: None,
            property: MemoProperty::default(),
        }
    }

    pub fn is_archived(&self) -> bool {
        self.row_status == RowStatus::Archived
    }

    /// Content with every attached resource appended as a markdown image.
    ///
    /// Each resource contributes `"\n![index](externalLink)"`; the fragments
    /// are joined with a single space.
    pub fn markdown(&self) -> String {
        let resource_markdowns: Vec<String> = self
            .resources
            .iter()
            .enumerate()
            .map(|(index, resource)| format!("\n![{index}]({})", resource.external_link))
            .collect();

        let mut markdown = self.content.clone();
        markdown.push_str(&resource_markdowns.join(" "));
        markdown
    }

    /// Website URL of the memo under the given host.
    pub fn web_url(&self, host: &str) -> String {
        let uid = if self.uid.is_empty() {
            self.id.rsplit('/').next().unwrap_or(&self.id)
        } else {
            &self.uid
        };
        format!("{}/m/{}", host.trim_end_matches('/'), uid)
    }
}

/// Body of a create-memo request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemoRequest {
    pub content: String,
    pub visibility: Visibility,
}

/// Body of a row-status update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemoStateRequest {
    pub name: String,
    pub row_status: RowStatus,
}
