use serde::{Deserialize, Serialize};

/// Lifecycle flag of a memo as stored by the service.
///
/// Older servers report live memos as `ACTIVE`; both spellings map to
/// [`RowStatus::Normal`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum RowStatus {
    #[default]
    #[serde(alias = "ACTIVE")]
    Normal,
    Archived,
}

impl std::fmt::Display for RowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Archived => write!(f, "ARCHIVED"),
        }
    }
}

/// Status selector of the memo list. `All` is synthetic and is never sent to
/// the service as a row status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatusFilter {
    All,
    #[default]
    Normal,
    Archived,
}

impl StatusFilter {
    pub fn row_status(self) -> Option<RowStatus> {
        match self {
            Self::All => None,
            Self::Normal => Some(RowStatus::Normal),
            Self::Archived => Some(RowStatus::Archived),
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "ALL"),
            Self::Normal => write!(f, "NORMAL"),
            Self::Archived => write!(f, "ARCHIVED"),
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "normal" | "active" => Ok(Self::Normal),
            "archived" => Ok(Self::Archived),
            _ => Err(format!("Unknown status filter: {s}")),
        }
    }
}

/// Visibility requested when creating a memo.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Visibility {
    #[default]
    Private,
    Protected,
    Public,
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Private => write!(f, "PRIVATE"),
            Self::Protected => write!(f, "PROTECTED"),
            Self::Public => write!(f, "PUBLIC"),
        }
    }
}

impl std::str::FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "private" => Ok(Self::Private),
            "protected" => Ok(Self::Protected),
            "public" => Ok(Self::Public),
            _ => Err(format!("Unknown visibility: {s}")),
        }
    }
}
