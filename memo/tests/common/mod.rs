// Shared fakes for session-level integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, Once};

use async_trait::async_trait;

use memo::client::MemoApi;
use memo::controller::{ConfirmPrompt, ListView, Notice};
use memo::error::{MemoError, Result};
use memo::models::{Memo, MemoFilter, MemoPage, RowStatus, StatusFilter, User, Visibility};
use memo::presenter::Presenter;

static INIT: Once = Once::new();

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

pub use serial_test::serial;
pub use wiremock;

pub fn sample_memo(id: u32, content: &str) -> Memo {
    let mut memo = Memo::new(format!("memos/{id}"), content);
    memo.uid = format!("uid{id}");
    memo
}

pub fn archived_memo(id: u32, content: &str) -> Memo {
    let mut memo = sample_memo(id, content);
    memo.row_status = RowStatus::Archived;
    memo
}

pub fn page(memos: Vec<Memo>, next: Option<&str>) -> MemoPage {
    MemoPage {
        memos,
        next_page_token: next.map(str::to_string),
    }
}

/// In-memory [`MemoApi`] serving canned pages keyed by status and page token.
pub struct FakeMemoApi {
    user: Option<User>,
    pages: Mutex<HashMap<(StatusFilter, Option<String>), MemoPage>>,
    list_calls: Mutex<Vec<(MemoFilter, Option<String>)>>,
    state_calls: Mutex<Vec<(String, RowStatus)>>,
    delete_calls: Mutex<Vec<String>>,
    created: Mutex<Vec<(String, Visibility)>>,
    fail_lists: AtomicBool,
    fail_mutations: AtomicBool,
}

impl FakeMemoApi {
    pub fn new() -> Self {
        Self::with_user(Some(User {
            name: "users/1".to_string(),
            id: 1,
            username: "tester".to_string(),
            nickname: "Tester".to_string(),
        }))
    }

    pub fn with_user(user: Option<User>) -> Self {
        Self {
            user,
            pages: Mutex::new(HashMap::new()),
            list_calls: Mutex::new(Vec::new()),
            state_calls: Mutex::new(Vec::new()),
            delete_calls: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            fail_lists: AtomicBool::new(false),
            fail_mutations: AtomicBool::new(false),
        }
    }

    pub fn set_page(&self, status: StatusFilter, token: Option<&str>, page: MemoPage) {
        self.pages
            .lock()
            .unwrap()
            .insert((status, token.map(str::to_string)), page);
    }

    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    pub fn fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> Vec<(MemoFilter, Option<String>)> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn state_calls(&self) -> Vec<(String, RowStatus)> {
        self.state_calls.lock().unwrap().clone()
    }

    pub fn delete_calls(&self) -> Vec<String> {
        self.delete_calls.lock().unwrap().clone()
    }

    fn mutation_result(&self) -> Result<()> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            Err(MemoError::Network("connection reset".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl MemoApi for FakeMemoApi {
    fn host(&self) -> &str {
        "https://memos.example.com"
    }

    async fn list_memos(&self, filter: &MemoFilter, page_token: Option<&str>) -> Result<MemoPage> {
        self.list_calls
            .lock()
            .unwrap()
            .push((*filter, page_token.map(str::to_string)));

        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(MemoError::Network("timed out".to_string()));
        }

        let key = (filter.status, page_token.map(str::to_string));
        Ok(self.pages.lock().unwrap().get(&key).cloned().unwrap_or_default())
    }

    async fn current_user(&self) -> Result<User> {
        self.user
            .clone()
            .ok_or_else(|| MemoError::Auth("401 Unauthorized: token expired".to_string()))
    }

    async fn set_memo_state(&self, id: &str, state: RowStatus) -> Result<Memo> {
        self.state_calls
            .lock()
            .unwrap()
            .push((id.to_string(), state));
        self.mutation_result()?;

        let mut memo = Memo::new(id, "");
        memo.row_status = state;
        Ok(memo)
    }

    async fn delete_memo(&self, id: &str) -> Result<()> {
        self.delete_calls.lock().unwrap().push(id.to_string());
        self.mutation_result()
    }

    async fn create_memo(&self, content: &str, visibility: Visibility) -> Result<Memo> {
        self.created
            .lock()
            .unwrap()
            .push((content.to_string(), visibility));
        self.mutation_result()?;
        Ok(sample_memo(99, content))
    }
}

/// Presenter that records notices and answers confirmations with a fixed
/// value.
pub struct RecordingPresenter {
    answer: AtomicBool,
    prompts: Mutex<Vec<ConfirmPrompt>>,
    notices: Mutex<Vec<Notice>>,
    renders: AtomicUsize,
}

impl RecordingPresenter {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer: AtomicBool::new(answer),
            prompts: Mutex::new(Vec::new()),
            notices: Mutex::new(Vec::new()),
            renders: AtomicUsize::new(0),
        }
    }

    pub fn prompts(&self) -> Vec<ConfirmPrompt> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn notice_titles(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.title.clone())
            .collect()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn renders(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Presenter for RecordingPresenter {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        self.prompts.lock().unwrap().push(prompt.clone());
        self.answer.load(Ordering::SeqCst)
    }

    fn notify(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }

    fn render(&self, _view: &ListView) {
        self.renders.fetch_add(1, Ordering::SeqCst);
    }
}
