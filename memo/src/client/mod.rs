//! Remote memo service access.
//!
//! [`MemoApi`] is the seam between the list controller's driver and the
//! network; [`MemosApiClient`] is the HTTP implementation.

mod api;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Memo, MemoFilter, MemoPage, RowStatus, User, Visibility};

pub use api::MemosApiClient;

#[async_trait]
pub trait MemoApi: Send + Sync {
    /// Base URL of the memos website, without a trailing slash.
    fn host(&self) -> &str;

    async fn list_memos(&self, filter: &MemoFilter, page_token: Option<&str>) -> Result<MemoPage>;

    async fn current_user(&self) -> Result<User>;

    async fn set_memo_state(&self, id: &str, state: RowStatus) -> Result<Memo>;

    async fn delete_memo(&self, id: &str) -> Result<()>;

    async fn create_memo(&self, content: &str, visibility: Visibility) -> Result<Memo>;

    fn memo_url(&self, memo: &Memo) -> String {
        memo.web_url(self.host())
    }
}
