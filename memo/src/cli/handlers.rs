use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use memo::client::MemoApi;
use memo::config::ListConfig;
use memo::error::MemoError;
use memo::models::{StatusFilter, Visibility};
use memo::presenter::{format_row, TerminalInput, TerminalPresenter};
use memo::session::MemoSession;

use super::browse::run_browse;
use super::Commands;

pub async fn run(command: Commands, api: Arc<dyn MemoApi>, settings: &ListConfig) -> Result<()> {
    let mut out = std::io::stdout();
    match command {
        Commands::List {
            text,
            status,
            pages,
            json,
        } => list(api, settings, text, status, pages, json, &mut out).await,
        Commands::Browse { text, status, yes } => {
            let input = TerminalInput::spawn();
            let presenter = Arc::new(TerminalPresenter::interactive(input.clone(), yes));
            let session = MemoSession::new(api, presenter, settings, text, status);
            run_browse(session, input).await
        }
        Commands::Send { text, visibility } => {
            send(api.as_ref(), &text, visibility, &mut out).await
        }
        Commands::Open => open(api.as_ref(), &mut out),
    }
}

/// Load up to `pages` pages and print the memos matching `text`.
///
/// Paging stops at the first failed page; the failure is reported once and
/// never re-requested.
async fn list(
    api: Arc<dyn MemoApi>,
    settings: &ListConfig,
    text: String,
    status: StatusFilter,
    pages: u32,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let presenter = Arc::new(TerminalPresenter::non_interactive(false));
    let mut session = MemoSession::new(api, presenter, settings, text, status);

    session.start().await;
    if session.controller().state().current_user_id.is_none() {
        return Err(MemoError::UserUnresolved.into());
    }
    session.settle().await;

    let mut loaded = 1;
    while loaded < pages
        && session.controller().has_more()
        && !session.controller().last_fetch_failed()
    {
        session.load_next_page();
        session.settle().await;
        loaded += 1;
    }

    let view = session.view();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&view.items)?)?;
        return Ok(());
    }

    if view.items.is_empty() {
        eprintln!("No memos found");
    }
    for (index, item) in view.items.iter().enumerate() {
        writeln!(out, "{}", format_row(index, item))?;
    }
    if view.has_more {
        eprintln!("More memos available, pass --pages to load them");
    }
    Ok(())
}

async fn send(
    api: &dyn MemoApi,
    text: &str,
    visibility: Visibility,
    out: &mut impl Write,
) -> Result<()> {
    let memo = api.create_memo(text, visibility).await?;
    info!("Sent memo {}", memo.id);
    writeln!(out, "{}", api.memo_url(&memo))?;
    Ok(())
}

fn open(api: &dyn MemoApi, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", api.host())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use memo::models::{Memo, MemoFilter, MemoPage, RowStatus, User};

    /// Pages keyed by token; a token mapped to `None` fails.
    struct PagedApi {
        user: Option<User>,
        pages: HashMap<Option<String>, Option<MemoPage>>,
        list_calls: Mutex<Vec<Option<String>>>,
        created: Mutex<Vec<(String, Visibility)>>,
    }

    impl PagedApi {
        fn new() -> Self {
            Self {
                user: Some(User {
                    name: "users/1".to_string(),
                    id: 1,
                    username: "tester".to_string(),
                    nickname: String::new(),
                }),
                pages: HashMap::new(),
                list_calls: Mutex::new(Vec::new()),
                created: Mutex::new(Vec::new()),
            }
        }

        fn page(mut self, token: Option<&str>, ids: &[u32], next: Option<&str>) -> Self {
            let memos = ids
                .iter()
                .map(|id| {
                    let mut memo = Memo::new(format!("memos/{id}"), format!("memo {id}"));
                    memo.uid = format!("uid{id}");
                    memo
                })
                .collect();
            self.pages.insert(
                token.map(str::to_string),
                Some(MemoPage {
                    memos,
                    next_page_token: next.map(str::to_string),
                }),
            );
            self
        }

        fn failing(mut self, token: Option<&str>) -> Self {
            self.pages.insert(token.map(str::to_string), None);
            self
        }

        fn list_calls(&self) -> Vec<Option<String>> {
            self.list_calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MemoApi for PagedApi {
        fn host(&self) -> &str {
            "https://memos.example.com"
        }

        async fn list_memos(
            &self,
            _filter: &MemoFilter,
            page_token: Option<&str>,
        ) -> memo::error::Result<MemoPage> {
            let token = page_token.map(str::to_string);
            self.list_calls.lock().unwrap().push(token.clone());
            match self.pages.get(&token) {
                Some(Some(page)) => Ok(page.clone()),
                Some(None) => Err(MemoError::Network("timed out".to_string())),
                None => Ok(MemoPage::default()),
            }
        }

        async fn current_user(&self) -> memo::error::Result<User> {
            self.user
                .clone()
                .ok_or_else(|| MemoError::Auth("401 Unauthorized".to_string()))
        }

        async fn set_memo_state(&self, id: &str, state: RowStatus) -> memo::error::Result<Memo> {
            let mut memo = Memo::new(id, "");
            memo.row_status = state;
            Ok(memo)
        }

        async fn delete_memo(&self, _id: &str) -> memo::error::Result<()> {
            Ok(())
        }

        async fn create_memo(
            &self,
            content: &str,
            visibility: Visibility,
        ) -> memo::error::Result<Memo> {
            self.created
                .lock()
                .unwrap()
                .push((content.to_string(), visibility));
            let mut memo = Memo::new("memos/99", content);
            memo.uid = "fresh".to_string();
            Ok(memo)
        }
    }

    async fn run_list(api: &Arc<PagedApi>, pages: u32, json: bool) -> (Result<()>, String) {
        let mut out = Vec::new();
        let result = list(
            api.clone(),
            &ListConfig::default(),
            String::new(),
            StatusFilter::Normal,
            pages,
            json,
            &mut out,
        )
        .await;
        (result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_list_stops_at_first_failed_page() {
        let api = Arc::new(PagedApi::new().page(None, &[1], Some("t1")).failing(Some("t1")));

        let (result, output) = run_list(&api, 5, false).await;

        assert!(result.is_ok());
        assert_eq!(api.list_calls(), vec![None, Some("t1".to_string())]);
        assert_eq!(output, "  1. memo 1\n");
    }

    #[tokio::test]
    async fn test_list_loads_at_most_requested_pages() {
        let api = Arc::new(
            PagedApi::new()
                .page(None, &[1, 2], Some("t1"))
                .page(Some("t1"), &[3], Some("t2"))
                .page(Some("t2"), &[4], None),
        );

        let (result, output) = run_list(&api, 2, false).await;

        assert!(result.is_ok());
        assert_eq!(api.list_calls().len(), 2);
        assert_eq!(output, "  1. memo 1\n  2. memo 2\n  3. memo 3\n");
    }

    #[tokio::test]
    async fn test_list_json_prints_memo_views() {
        let api = Arc::new(PagedApi::new().page(None, &[1], None));

        let (result, output) = run_list(&api, 1, true).await;
        assert!(result.is_ok());

        let items: Vec<serde_json::Value> = serde_json::from_str(&output).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["name"], "memos/1");
        assert_eq!(items[0]["content"], "memo 1");
        assert_eq!(items[0]["markdown"], "memo 1");
        assert_eq!(items[0]["rowStatus"], "NORMAL");
        assert_eq!(
            items[0]["actions"],
            serde_json::json!(["openInBrowser", "copyContent", "copyUrl", "archive", "delete"])
        );
    }

    #[tokio::test]
    async fn test_list_without_user_fails() {
        let mut api = PagedApi::new();
        api.user = None;
        let api = Arc::new(api);

        let (result, output) = run_list(&api, 1, false).await;

        let error = result.unwrap_err();
        assert!(matches!(
            error.downcast_ref::<MemoError>(),
            Some(MemoError::UserUnresolved)
        ));
        assert!(api.list_calls().is_empty());
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn test_send_prints_memo_url() {
        let api = PagedApi::new();
        let mut out = Vec::new();

        send(&api, "hello", Visibility::Public, &mut out)
            .await
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "https://memos.example.com/m/fresh\n"
        );
        assert_eq!(
            api.created.lock().unwrap().clone(),
            vec![("hello".to_string(), Visibility::Public)]
        );
    }

    #[test]
    fn test_open_prints_host() {
        let api = PagedApi::new();
        let mut out = Vec::new();

        open(&api, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "https://memos.example.com\n");
    }
}
