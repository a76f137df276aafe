//! Dioxus front end.
//!
//! The root component owns the [`Controller`] (shared through context) and
//! a revision signal bumped by the controller after every state change.
//! Components read the revision, rebuild the [`AppView`] and render it;
//! events call back into the controller.

mod bridge;
mod components;

use std::rc::Rc;

use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use tracing::debug;

use crate::api::HttpApi;
use crate::config::AppConfig;
use crate::controller::Controller;
use crate::store::BrowserStorage;
use crate::view::{self, AppView};

use components::{
    BottomNav, CategoryBar, FilterChips, Header, MarketList, RoleActionsBar, SearchBar, Toast,
};

pub type AppController = Controller<HttpApi, BrowserStorage>;

/// Context shared by every component.
#[derive(Clone)]
pub struct AppCtx {
    pub ctrl: Rc<AppController>,
    revision: Signal<u64>,
}

impl AppCtx {
    /// Current view. Reading the revision subscribes the caller to changes.
    pub fn view(&self) -> AppView {
        let _ = *self.revision.read();
        view::build(&self.ctrl.state(), self.ctrl.config())
    }
}

#[derive(Routable, Clone, PartialEq, Debug)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/")]
        Markets {},
        #[route("/portfolio")]
        Portfolio {},
}

#[component]
pub fn App() -> Element {
    let revision = use_signal(|| 0u64);

    let ctx = use_context_provider(|| {
        let config = AppConfig::embedded();
        let api = HttpApi::new(config.api.base_url.clone());
        let store = BrowserStorage::new(config.session.storage_key.clone());
        let ctrl = Rc::new(Controller::new(api, store, config));
        ctrl.subscribe(move || {
            let mut revision = revision;
            revision += 1;
        });
        AppCtx { ctrl, revision }
    });

    // Load, then poll on a fixed interval with whatever filter is current.
    let boot = ctx.ctrl.clone();
    use_future(move || {
        let ctrl = boot.clone();
        async move {
            let platform = bridge::read_platform().await;
            ctrl.bootstrap(&platform).await;

            let interval = ctrl.config().listings.poll_interval_ms;
            loop {
                TimeoutFuture::new(interval).await;
                debug!("poll tick");
                ctrl.refresh_listings().await;
            }
        }
    });

    rsx! {
        Router::<Route> {}
    }
}

/// Page chrome: header, notice, bottom navigation.
#[component]
fn Shell() -> Element {
    let ctx = use_context::<AppCtx>();
    let view = ctx.view();

    rsx! {
        div { class: "ts-app",
            Header { view: view.clone() }
            if let Some(notice) = view.notice.clone() {
                Toast { notice }
            }
            main { class: "ts-main",
                Outlet::<Route> {}
            }
            BottomNav { labels: view.nav.clone() }
        }
    }
}

#[component]
fn Markets() -> Element {
    let ctx = use_context::<AppCtx>();
    let view = ctx.view();

    rsx! {
        SearchBar {
            placeholder: view.search_placeholder.clone(),
            value: view.search_text.clone(),
        }
        CategoryBar { categories: view.categories.clone() }
        FilterChips { tabs: view.tabs.clone() }
        if view.role_actions.any() {
            RoleActionsBar { actions: view.role_actions.clone() }
        }
        MarketList { listing: view.listing.clone() }
    }
}

#[component]
fn Portfolio() -> Element {
    let ctx = use_context::<AppCtx>();
    let view = ctx.view();

    rsx! {
        div { class: "ts-empty",
            div { class: "ts-empty-title", "{view.nav.portfolio}" }
            div { class: "ts-empty-sub", "{view.nav.portfolio_placeholder}" }
        }
    }
}
