//! The app controller: sole owner of [`AppState`].
//!
//! Every state change goes through a controller method, which mutates the
//! state and then notifies subscribers so the UI re-renders. Network work
//! is done between two short state borrows; no borrow is held across an
//! `.await`, so event handlers and the poll loop can interleave freely on
//! the single browser thread.

use std::cell::{Ref, RefCell};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::{ApiError, MarketApi};
use crate::auth::{AuthGrant, IdentitySource, PlatformContext, Session, User};
use crate::config::AppConfig;
use crate::i18n::Lang;
use crate::market::{MarketId, MarketStatus};
use crate::state::{AppState, Capability, Notice, SearchTicket};
use crate::store::SessionStore;

/// A UI affordance that exists but has no implementation yet.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{0:?} is not available yet")]
pub struct Unavailable(pub Capability);

type Listener = Box<dyn Fn()>;

pub struct Controller<A, S> {
    api: A,
    store: S,
    config: AppConfig,
    state: RefCell<AppState>,
    listeners: RefCell<Vec<Listener>>,
}

impl<A: MarketApi, S: SessionStore> Controller<A, S> {
    pub fn new(api: A, store: S, config: AppConfig) -> Self {
        let state = AppState::new(Lang::default(), config.listings.min_search_len);
        Self {
            api,
            store,
            config,
            state: RefCell::new(state),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn state(&self) -> Ref<'_, AppState> {
        self.state.borrow()
    }

    /// Register a callback run after every state change.
    pub fn subscribe(&self, listener: impl Fn() + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    fn update<R>(&self, f: impl FnOnce(&mut AppState) -> R) -> R {
        let out = {
            let mut state = self.state.borrow_mut();
            f(&mut state)
        };
        for listener in self.listeners.borrow().iter() {
            listener();
        }
        out
    }

    /// Page load: language, identity, first listing fetch.
    pub async fn bootstrap(&self, platform: &PlatformContext) -> IdentitySource {
        let lang = Lang::detect(
            platform.language_code.as_deref(),
            platform.browser_locale.as_deref(),
        );
        self.set_language(lang);

        let source = self.resolve_identity(platform).await;
        self.refresh_listings().await;

        info!(
            lang = %lang,
            identity = ?source,
            role = %self.state().role(),
            "app initialized"
        );
        source
    }

    // --- Identity ---

    /// Platform bridge first, stored token second, guest last. Failures at
    /// any tier only move on to the next one.
    pub async fn resolve_identity(&self, platform: &PlatformContext) -> IdentitySource {
        match platform.auth_request() {
            Some(request) => match self.api.authenticate(&request).await {
                Ok(grant) => {
                    let user = self.refine_user(&grant).await;
                    self.adopt_session(grant.token, user);
                    return IdentitySource::Platform;
                }
                Err(e) => warn!(error = %e, "platform sign-in failed"),
            },
            None => debug!("no platform payload, skipping bridge sign-in"),
        }

        if let Some(token) = self.store.load_token() {
            match self.api.whoami(&token).await {
                Ok(user) => {
                    info!(user = %user.username, role = %user.role, "stored session accepted");
                    self.adopt_session(token, user);
                    return IdentitySource::Token;
                }
                Err(e) => {
                    warn!(error = %e, "stored session rejected, clearing token");
                    self.store.clear_token();
                }
            }
        }

        self.update(|s| s.clear_session());
        info!("continuing as guest");
        IdentitySource::Guest
    }

    /// Ask `/auth/me` for the authoritative record after platform sign-in.
    async fn refine_user(&self, grant: &AuthGrant) -> User {
        if !self.config.api.refine_role {
            return grant.user.clone();
        }
        match self.api.whoami(&grant.token).await {
            Ok(user) => {
                if user.role != grant.user.role {
                    info!(from = %grant.user.role, to = %user.role, "role refined");
                }
                user
            }
            Err(e) => {
                debug!(error = %e, "role refinement failed, keeping sign-in user");
                grant.user.clone()
            }
        }
    }

    fn adopt_session(&self, token: String, user: User) {
        if let Err(e) = self.store.save_token(&token) {
            warn!(error = %e, "could not persist session token");
        }
        self.update(|s| s.set_session(Session::authenticated(token, user)));
    }

    // --- Listings ---

    /// Fetch listings for the current filter. Returns false if the result
    /// arrived after a newer fetch and was dropped.
    pub async fn refresh_listings(&self) -> bool {
        let ticket = self.update(|s| s.begin_fetch());

        let result = match self.api.fetch_markets(&ticket.query).await {
            Ok(markets) => {
                info!(
                    generation = ticket.generation,
                    status = %ticket.query.status,
                    count = markets.len(),
                    "fetched markets"
                );
                Some(markets)
            }
            Err(e) => {
                warn!(generation = ticket.generation, error = %e, "market fetch failed");
                None
            }
        };

        self.update(|s| s.finish_fetch(&ticket, result))
    }

    pub async fn select_tab(&self, tab: MarketStatus) -> bool {
        self.update(|s| s.set_tab(tab));
        self.refresh_listings().await
    }

    pub async fn select_category(&self, key: &str) -> bool {
        self.update(|s| s.set_category(key));
        self.refresh_listings().await
    }

    /// Record a keystroke. The caller waits out the debounce period and
    /// then hands the ticket to [`Controller::flush_search`].
    pub fn input_search(&self, text: &str) -> SearchTicket {
        self.update(|s| s.set_search(text))
    }

    /// Fetch for a debounced search unless a later keystroke superseded it.
    pub async fn flush_search(&self, ticket: SearchTicket) -> bool {
        if !self.state().is_current_search(ticket) {
            return false;
        }
        self.refresh_listings().await
    }

    /// Admin shortcut to the moderation queue.
    pub async fn show_pending(&self) -> bool {
        self.select_tab(MarketStatus::Pending).await
    }

    pub fn set_language(&self, lang: Lang) {
        self.update(|s| s.set_language(lang));
    }

    // --- Actions ---

    /// Admin moderation: move a pending listing to active, then re-read the
    /// list. The resulting notice is also set on the state.
    pub async fn activate_market(&self, id: &MarketId) -> Notice {
        let (token, role) = {
            let state = self.state();
            (state.session().token.clone(), state.role())
        };

        let notice = match token {
            Some(token) if role.is_admin() => match self.api.activate_market(&token, id).await {
                Ok(()) => {
                    info!(id = %id, "market activated");
                    self.refresh_listings().await;
                    Notice::MarketActivated
                }
                Err(e @ (ApiError::Transport(_) | ApiError::Url(_))) => {
                    warn!(id = %id, error = %e, "activation request failed");
                    Notice::ApiError
                }
                Err(e) => {
                    warn!(id = %id, error = %e, "activation refused");
                    Notice::ActivationFailed
                }
            },
            _ => {
                warn!(id = %id, role = %role, "activation without admin session");
                Notice::AdminRequired
            }
        };

        self.update(|s| s.set_notice(notice));
        notice
    }

    pub fn create_market(&self) -> Result<(), Unavailable> {
        self.unavailable(Capability::CreateMarket)
    }

    pub fn connect_wallet(&self) -> Result<(), Unavailable> {
        self.unavailable(Capability::ConnectWallet)
    }

    fn unavailable(&self, capability: Capability) -> Result<(), Unavailable> {
        debug!(?capability, "placeholder action invoked");
        self.update(|s| s.set_notice(Notice::Unavailable(capability)));
        Err(Unavailable(capability))
    }

    pub fn dismiss_notice(&self) {
        self.update(|s| s.dismiss_notice());
    }
}
