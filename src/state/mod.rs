//! Application state container.
//!
//! All UI state lives in one [`AppState`] owned by the controller and is
//! changed only through the named actions below. Listing fetches are
//! tagged with a generation number: a result is applied only if no newer
//! fetch was issued since and the filter still matches what was asked for.

use tracing::debug;

use crate::auth::{Role, Session};
use crate::i18n::{Lang, Translator};
use crate::market::{FilterState, Market, MarketQuery, MarketStatus};

/// Features surfaced in the UI that have no implementation yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    CreateMarket,
    ConnectWallet,
}

impl Capability {
    fn notice_key(self) -> &'static str {
        match self {
            Capability::CreateMarket => "notice_create_unavailable",
            Capability::ConnectWallet => "notice_wallet_unavailable",
        }
    }
}

/// Transient message shown to the user (the toast).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    MarketActivated,
    ActivationFailed,
    ApiError,
    AdminRequired,
    Unavailable(Capability),
}

impl Notice {
    pub fn is_error(self) -> bool {
        !matches!(self, Notice::MarketActivated | Notice::Unavailable(_))
    }

    pub fn message(self, tr: &Translator) -> String {
        let key = match self {
            Notice::MarketActivated => "notice_market_activated",
            Notice::ActivationFailed => "notice_activation_failed",
            Notice::ApiError => "notice_api_error",
            Notice::AdminRequired => "notice_admin_required",
            Notice::Unavailable(cap) => cap.notice_key(),
        };
        tr.text(key)
    }
}

/// Handle for one in-flight listing fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub query: MarketQuery,
}

/// Handle for one debounced search keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    lang: Lang,
    session: Session,
    filter: FilterState,
    listings: Vec<Market>,
    /// Query the current listings were fetched for.
    listings_query: Option<MarketQuery>,
    loading: bool,
    fetch_generation: u64,
    search_generation: u64,
    min_search_len: usize,
    notice: Option<Notice>,
}

impl AppState {
    pub fn new(lang: Lang, min_search_len: usize) -> Self {
        Self {
            lang,
            session: Session::guest(),
            filter: FilterState::default(),
            listings: Vec::new(),
            listings_query: None,
            loading: false,
            fetch_generation: 0,
            search_generation: 0,
            min_search_len,
            notice: None,
        }
    }

    // --- Reads ---

    pub fn lang(&self) -> Lang {
        self.lang
    }

    pub fn translator(&self) -> Translator {
        Translator::new(self.lang)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn role(&self) -> Role {
        self.session.role()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn listings(&self) -> &[Market] {
        &self.listings
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    /// Query for the current filter.
    pub fn current_query(&self) -> MarketQuery {
        self.filter.query(self.min_search_len)
    }

    // --- Actions ---

    pub fn set_language(&mut self, lang: Lang) {
        self.lang = lang;
    }

    pub fn set_session(&mut self, session: Session) {
        self.session = session;
    }

    pub fn clear_session(&mut self) {
        self.session = Session::guest();
    }

    /// Returns false when the tab was already selected.
    pub fn set_tab(&mut self, tab: MarketStatus) -> bool {
        let changed = self.filter.tab != tab;
        self.filter.tab = tab;
        changed
    }

    /// Returns false when the category was already selected.
    pub fn set_category(&mut self, category: &str) -> bool {
        let changed = self.filter.category != category;
        self.filter.category = category.to_string();
        changed
    }

    /// Record the search box contents. Only the latest ticket is allowed to
    /// trigger the debounced fetch.
    pub fn set_search(&mut self, text: &str) -> SearchTicket {
        self.filter.search = text.to_string();
        self.search_generation += 1;
        SearchTicket(self.search_generation)
    }

    pub fn is_current_search(&self, ticket: SearchTicket) -> bool {
        ticket.0 == self.search_generation
    }

    /// Start a listing fetch for the current filter. Listings fetched for
    /// a different query are dropped right away; a re-fetch of the same
    /// query keeps them on screen until the result arrives.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.fetch_generation += 1;
        self.loading = true;
        let query = self.current_query();
        if self.listings_query.as_ref() != Some(&query) {
            self.listings.clear();
            self.listings_query = None;
        }
        FetchTicket {
            generation: self.fetch_generation,
            query,
        }
    }

    /// Whether a result for `ticket` may still be shown.
    pub fn accepts(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.fetch_generation && ticket.query == self.current_query()
    }

    /// Replace the listings with a fetch result; `None` means the fetch
    /// failed and the list is emptied. Returns false if the result was
    /// superseded and dropped.
    pub fn finish_fetch(&mut self, ticket: &FetchTicket, result: Option<Vec<Market>>) -> bool {
        if !self.accepts(ticket) {
            debug!(
                generation = ticket.generation,
                latest = self.fetch_generation,
                "discarding superseded listing result"
            );
            return false;
        }
        self.listings = result.unwrap_or_default();
        self.listings_query = Some(ticket.query.clone());
        self.loading = false;
        true
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
