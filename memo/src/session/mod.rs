//! Async driver around [`ListController`].
//!
//! The session owns the debounce timer and the remote client, turns
//! controller effects into timers, spawned fetches and presenter calls, and
//! feeds their results back into the controller as events.

mod debounce;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::client::MemoApi;
use crate::config::ListConfig;
use crate::controller::{
    offers_transition, Effect, Event, FetchRequest, ListController, ListView, TransitionKind,
};
use crate::models::{Memo, StatusFilter};
use crate::presenter::Presenter;

pub use debounce::Debouncer;

/// How a requested transition ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The action is not offered for this memo; nothing was sent.
    NotOffered,
    /// The user declined the confirmation; nothing was sent.
    Declined,
    Succeeded,
    Failed,
}

pub struct MemoSession {
    api: Arc<dyn MemoApi>,
    presenter: Arc<dyn Presenter>,
    controller: ListController,
    debouncer: Debouncer,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
}

impl MemoSession {
    pub fn new(
        api: Arc<dyn MemoApi>,
        presenter: Arc<dyn Presenter>,
        settings: &ListConfig,
        initial_query: impl Into<String>,
        status_filter: StatusFilter,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            api,
            presenter,
            controller: ListController::new(initial_query, status_filter)
                .with_debounce(settings.debounce()),
            debouncer: Debouncer::new(),
            events_tx,
            events_rx,
        }
    }

    pub fn controller(&self) -> &ListController {
        &self.controller
    }

    pub fn view(&self) -> ListView {
        self.controller.view()
    }

    pub fn memo_url(&self, memo: &Memo) -> String {
        self.api.memo_url(memo)
    }

    /// Resolve the current user; on success the first page is requested.
    pub async fn start(&mut self) {
        match self.api.current_user().await {
            Ok(user) => {
                info!("Signed in as {}", user.display_name());
                self.dispatch(Event::UserResolved(user));
            }
            Err(e) => {
                if e.is_auth() {
                    warn!("Memo service rejected the access token, check MEMO_TOKEN");
                }
                warn!("Failed to resolve current user: {}", e);
                self.dispatch(Event::UserUnavailable {
                    reason: e.to_string(),
                });
            }
        }
    }

    pub fn set_query_text(&mut self, text: impl Into<String>) {
        self.dispatch(Event::QueryChanged(text.into()));
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.dispatch(Event::StatusFilterChanged(filter));
    }

    pub fn load_next_page(&mut self) {
        self.dispatch(Event::LoadNextPage);
    }

    pub fn revalidate(&mut self) {
        self.dispatch(Event::Revalidate);
    }

    /// Confirm and run an archive, restore or delete.
    ///
    /// Failures are reported through the presenter and never returned; the
    /// list is only refreshed after a success.
    pub async fn transition(&mut self, memo: &Memo, kind: TransitionKind) -> TransitionOutcome {
        if !offers_transition(memo, kind) {
            debug!("{} is not offered for {}", kind, memo.id);
            return TransitionOutcome::NotOffered;
        }

        if !self.presenter.confirm(&kind.confirm_prompt()).await {
            return TransitionOutcome::Declined;
        }

        self.dispatch(Event::TransitionStarted(kind));

        let result = match kind.target_status() {
            Some(status) => self
                .api
                .set_memo_state(&memo.id, status)
                .await
                .map(|_| ()),
            None => self.api.delete_memo(&memo.id).await,
        };

        let succeeded = match result {
            Ok(()) => true,
            Err(e) => {
                warn!("{} of {} failed: {}", kind, memo.id, e);
                false
            }
        };

        self.dispatch(Event::TransitionFinished { kind, succeeded });

        if succeeded {
            TransitionOutcome::Succeeded
        } else {
            TransitionOutcome::Failed
        }
    }

    /// Wait for the next timer or fetch result.
    pub async fn next_event(&mut self) -> Option<Event> {
        self.events_rx.recv().await
    }

    /// Wait for one asynchronous result and apply it.
    pub async fn pump(&mut self) -> bool {
        match self.next_event().await {
            Some(event) => {
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    /// Apply results until no list request is on the wire.
    pub async fn settle(&mut self) {
        while self.controller.is_fetching() {
            if !self.pump().await {
                break;
            }
        }
    }

    pub fn dispatch(&mut self, event: Event) {
        for effect in self.controller.handle(event) {
            self.execute(effect);
        }
    }

    fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::ArmDebounce { ticket, delay } => {
                self.debouncer
                    .arm(delay, self.events_tx.clone(), Event::DebounceFired { ticket });
            }
            Effect::Fetch(request) => self.spawn_fetch(request),
            Effect::Notify(notice) => self.presenter.notify(&notice),
            Effect::Render => self.presenter.render(&self.controller.view()),
        }
    }

    fn spawn_fetch(&self, request: FetchRequest) {
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();

        tokio::spawn(async move {
            debug!(ticket = ?request.ticket, "Fetching memo page");
            let event = match api
                .list_memos(&request.filter, request.page_token.as_deref())
                .await
            {
                Ok(page) => Event::PageLoaded {
                    ticket: request.ticket,
                    page,
                },
                Err(e) => Event::PageFailed {
                    ticket: request.ticket,
                    reason: e.to_string(),
                },
            };
            let _ = tx.send(event);
        });
    }
}
