//! Search/list/pagination controller.
//!
//! [`ListController`] is a synchronous state machine: every input arrives as
//! an [`Event`] and every side effect leaves as an [`Effect`] for the driver
//! (see `crate::session`) to carry out. It never talks to the network and
//! never starts timers itself, which keeps every transition testable.
//!
//! | event                 | state change                                   | effects              |
//! |-----------------------|------------------------------------------------|----------------------|
//! | `QueryChanged`        | `query_text` set, debounce ticket bumped       | `ArmDebounce`        |
//! | `DebounceFired`       | live ticket only: `debounced_query_text` set   | `Render`             |
//! | `StatusFilterChanged` | items + cursor dropped, generation bumped      | `Fetch` (or defer)   |
//! | `UserResolved`        | user recorded, generation bumped               | `Fetch`              |
//! | `UserUnavailable`     | deferred fetch abandoned                       | `Notify`             |
//! | `LoadNextPage`        | next-page request recorded                     | `Fetch` when allowed |
//! | `Revalidate`          | generation bumped, items kept until replaced   | `Fetch` (or defer)   |
//! | `PageLoaded`          | current ticket only: items replaced/appended   | `Render`             |
//! | `PageFailed`          | current ticket only: request cleared           | `Notify`             |
//! | `TransitionStarted`   | none                                           | `Notify`             |
//! | `TransitionFinished`  | success: generation bumped                     | `Notify` (+ `Fetch`) |

mod event;
mod state;
mod view;

use std::collections::HashSet;
use std::time::Duration;

use tracing::{debug, warn};

use crate::models::{Memo, MemoFilter, MemoPage, StatusFilter};

pub use event::{ConfirmPrompt, Effect, Event, Notice, NoticeStyle, TransitionKind};
pub use state::{FetchRequest, FetchTicket, PageOutcome, SearchState};
pub use view::{available_actions, offers_transition, ListView, MemoAction, MemoView};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug)]
pub struct ListController {
    state: SearchState,
    items: Vec<Memo>,
    debounce: Duration,
    debounce_ticket: u64,
    debounce_armed: bool,
    generation: u64,
    sequence: u64,
    in_flight: Option<FetchRequest>,
    /// A first-page fetch is wanted but the user is not resolved yet.
    deferred: bool,
    user_unavailable: bool,
    /// The most recent list request failed and nothing has been issued since.
    last_fetch_failed: bool,
}

impl ListController {
    /// Build a controller seeded with an initial query.
    ///
    /// The first page is wanted immediately but stays deferred until the
    /// current user has been resolved.
    pub fn new(initial_query: impl Into<String>, status_filter: StatusFilter) -> Self {
        Self {
            state: SearchState::new(initial_query, status_filter),
            items: Vec::new(),
            debounce: DEFAULT_DEBOUNCE,
            debounce_ticket: 0,
            debounce_armed: false,
            generation: 0,
            sequence: 0,
            in_flight: None,
            deferred: true,
            user_unavailable: false,
            last_fetch_failed: false,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// All loaded items, unfiltered, in server order.
    pub fn items(&self) -> &[Memo] {
        &self.items
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Loading covers both a request on the wire and a first page that is
    /// waiting for the user to be resolved.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some() || (self.deferred && !self.user_unavailable)
    }

    pub fn has_more(&self) -> bool {
        self.state.page_cursor.is_some()
    }

    /// Whether the last list request ended in an error. Cleared by the next
    /// request; failed pages are never re-requested on their own.
    pub fn last_fetch_failed(&self) -> bool {
        self.last_fetch_failed
    }

    /// Apply one event and return the effects it produces.
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::QueryChanged(text) => vec![self.set_query_text(text)],
            Event::DebounceFired { ticket } => {
                if self.on_debounce_fire(ticket) {
                    vec![Effect::Render]
                } else {
                    Vec::new()
                }
            }
            Event::StatusFilterChanged(filter) => {
                let mut effects = vec![Effect::Render];
                effects.extend(self.set_status_filter(filter).map(Effect::Fetch));
                effects
            }
            Event::UserResolved(user) => match user.resolved_id() {
                Some(user_id) => self
                    .on_user_resolved(user_id)
                    .map(Effect::Fetch)
                    .into_iter()
                    .collect(),
                None => {
                    warn!("Current user '{}' carries no usable id", user.name);
                    self.on_user_unavailable()
                }
            },
            Event::UserUnavailable { reason } => {
                warn!("Current user could not be resolved: {}", reason);
                self.on_user_unavailable()
            }
            Event::LoadNextPage => self.load_next_page().map(Effect::Fetch).into_iter().collect(),
            Event::Revalidate => self.revalidate().map(Effect::Fetch).into_iter().collect(),
            Event::PageLoaded { ticket, page } => match self.apply_page(ticket, page) {
                PageOutcome::Applied { added } => {
                    debug!(added, "Applied memo page");
                    vec![Effect::Render]
                }
                PageOutcome::Stale => Vec::new(),
            },
            Event::PageFailed { ticket, reason } => self
                .apply_fetch_error(ticket, &reason)
                .map(Effect::Notify)
                .into_iter()
                .collect(),
            Event::TransitionStarted(kind) => vec![Effect::Notify(kind.in_progress_notice())],
            Event::TransitionFinished { kind, succeeded } => {
                self.on_transition_finished(kind, succeeded)
            }
        }
    }

    /// Record typed text and re-arm the debounce. Any previously armed
    /// ticket becomes stale.
    pub fn set_query_text(&mut self, text: impl Into<String>) -> Effect {
        self.state.query_text = text.into();
        self.debounce_ticket += 1;
        self.debounce_armed = true;
        Effect::ArmDebounce {
            ticket: self.debounce_ticket,
            delay: self.debounce,
        }
    }

    /// Commit the typed text if `ticket` is the live debounce ticket.
    ///
    /// Returns whether the filter text was committed. No fetch is issued:
    /// filtering runs over the pages already loaded.
    pub fn on_debounce_fire(&mut self, ticket: u64) -> bool {
        if !self.debounce_armed || ticket != self.debounce_ticket {
            debug!(ticket, live = self.debounce_ticket, "Ignoring stale debounce");
            return false;
        }
        self.debounce_armed = false;
        self.state.debounced_query_text = self.state.query_text.clone();
        true
    }

    /// Switch the status filter, dropping everything loaded so far.
    pub fn set_status_filter(&mut self, filter: StatusFilter) -> Option<FetchRequest> {
        self.state.status_filter = filter;
        self.items.clear();
        self.state.page_cursor = None;
        self.start_first_page()
    }

    pub fn on_user_resolved(&mut self, user_id: i64) -> Option<FetchRequest> {
        self.state.current_user_id = Some(user_id);
        self.user_unavailable = false;
        self.start_first_page()
    }

    fn on_user_unavailable(&mut self) -> Vec<Effect> {
        self.user_unavailable = true;
        self.deferred = false;
        vec![
            Effect::Notify(Notice::failure("Failed to resolve current user")),
            Effect::Render,
        ]
    }

    /// Request the page after the last applied one.
    ///
    /// Nothing is requested while another list request is on the wire, before
    /// the first page arrived, or after the server reported the last page.
    pub fn load_next_page(&mut self) -> Option<FetchRequest> {
        if self.in_flight.is_some() {
            return None;
        }
        let user_id = self.state.current_user_id?;
        let token = self.state.page_cursor.clone()?;
        Some(self.issue(user_id, Some(token)))
    }

    /// Refetch from the first page. Loaded items stay visible until the
    /// replacement page arrives.
    pub fn revalidate(&mut self) -> Option<FetchRequest> {
        self.start_first_page()
    }

    fn start_first_page(&mut self) -> Option<FetchRequest> {
        self.generation += 1;
        self.in_flight = None;

        match self.state.current_user_id {
            Some(user_id) => {
                self.deferred = false;
                Some(self.issue(user_id, None))
            }
            None => {
                debug!("Deferring memo fetch until the current user is resolved");
                self.deferred = true;
                None
            }
        }
    }

    fn issue(&mut self, user_id: i64, page_token: Option<String>) -> FetchRequest {
        self.sequence += 1;
        let request = FetchRequest {
            ticket: FetchTicket {
                generation: self.generation,
                sequence: self.sequence,
            },
            filter: MemoFilter::new(user_id, self.state.status_filter),
            page_token,
        };
        self.in_flight = Some(request.clone());
        self.last_fetch_failed = false;
        request
    }

    fn is_current(&self, ticket: FetchTicket) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|request| request.ticket == ticket)
    }

    /// Offer a fetched page. Pages answering anything but the in-flight
    /// request are dropped.
    pub fn apply_page(&mut self, ticket: FetchTicket, page: MemoPage) -> PageOutcome {
        if !self.is_current(ticket) {
            debug!(?ticket, "Dropping stale memo page");
            return PageOutcome::Stale;
        }
        let Some(request) = self.in_flight.take() else {
            return PageOutcome::Stale;
        };

        if request.is_first_page() {
            self.items.clear();
        }

        let mut seen: HashSet<String> = self.items.iter().map(|m| m.id.clone()).collect();
        let before = self.items.len();
        for memo in page.memos {
            if seen.insert(memo.id.clone()) {
                self.items.push(memo);
            }
        }
        self.state.page_cursor = page.next_page_token;

        PageOutcome::Applied {
            added: self.items.len() - before,
        }
    }

    /// Clear a failed request. The loaded list is left exactly as it was.
    pub fn apply_fetch_error(&mut self, ticket: FetchTicket, reason: &str) -> Option<Notice> {
        if !self.is_current(ticket) {
            debug!(?ticket, "Ignoring failure of a superseded memo fetch");
            return None;
        }
        self.in_flight = None;
        self.last_fetch_failed = true;
        warn!("Memo fetch failed: {}", reason);
        Some(Notice::failure("Failed to load memos"))
    }

    /// Report a finished transition; a success triggers one revalidation.
    pub fn on_transition_finished(&mut self, kind: TransitionKind, succeeded: bool) -> Vec<Effect> {
        if !succeeded {
            return vec![Effect::Notify(kind.failure_notice())];
        }

        let mut effects = vec![Effect::Notify(kind.success_notice())];
        effects.extend(self.revalidate().map(Effect::Fetch));
        effects
    }

    /// Loaded items whose content contains the debounced query, in order.
    pub fn filter_view(&self) -> Vec<MemoView> {
        let needle = self.state.debounced_query_text.as_str();
        self.items
            .iter()
            .filter(|memo| memo.content.contains(needle))
            .map(MemoView::from)
            .collect()
    }

    pub fn view(&self) -> ListView {
        ListView {
            is_loading: self.is_loading(),
            has_more: self.has_more(),
            status_filter: self.state.status_filter,
            query: self.state.debounced_query_text.clone(),
            items: self.filter_view(),
        }
    }
}

impl Default for ListController {
    fn default() -> Self {
        Self::new(String::new(), StatusFilter::default())
    }
}
