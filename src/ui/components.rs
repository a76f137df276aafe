use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use tracing::debug;

use super::{AppCtx, Route};
use crate::i18n::Lang;
use crate::view::{
    AppView, CategoryView, ListingView, MarketCard, NavLabels, NoticeView, RoleActions, TabView,
    PLACEHOLDER_LOGO, SKELETON_CARDS,
};

#[component]
pub fn Header(view: AppView) -> Element {
    let ctx = use_context::<AppCtx>();
    let wallet_ctrl = ctx.ctrl.clone();

    rsx! {
        header { class: "ts-header",
            div { class: "ts-brand",
                img { class: "ts-brand-logo", src: PLACEHOLDER_LOGO, alt: "" }
                div {
                    div { class: "ts-brand-name", "{view.brand_name}" }
                    div { class: "ts-brand-tagline", "{view.brand_tagline}" }
                }
            }
            div { class: "ts-header-right",
                LangSwitch { current: view.lang }
                div { class: "ts-user",
                    span { class: "ts-user-label", "{view.header.user_label}" }
                    if let Some(badge) = view.header.role_badge.clone() {
                        span { class: "ts-role-label {view.header.role_class}", "{badge}" }
                    }
                }
                button {
                    class: "ts-wallet-btn",
                    r#type: "button",
                    onclick: move |_| {
                        if let Err(e) = wallet_ctrl.connect_wallet() {
                            debug!(error = %e, "wallet connect requested");
                        }
                    },
                    "{view.wallet_label}"
                }
            }
        }
    }
}

#[component]
fn LangSwitch(current: Lang) -> Element {
    let ctx = use_context::<AppCtx>();
    let mut open = use_signal(|| false);

    rsx! {
        div { class: "ts-lang-wrap",
            button {
                class: "ts-lang-current",
                r#type: "button",
                onclick: move |_| open.set(!open()),
                "{current.flag()}"
            }
            if open() {
                div { class: "ts-lang-menu",
                    for lang in Lang::ALL {
                        button {
                            key: "{lang.code()}",
                            class: if lang == current { "ts-lang-item active" } else { "ts-lang-item" },
                            r#type: "button",
                            onclick: {
                                let ctrl = ctx.ctrl.clone();
                                move |_| {
                                    ctrl.set_language(lang);
                                    open.set(false);
                                }
                            },
                            "{lang.flag()} {lang.code()}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn Toast(notice: NoticeView) -> Element {
    let ctx = use_context::<AppCtx>();
    let ctrl = ctx.ctrl.clone();
    let class = if notice.is_error { "ts-toast ts-toast-error" } else { "ts-toast" };

    rsx! {
        div { class: "{class}",
            span { "{notice.message}" }
            button {
                class: "ts-toast-close",
                r#type: "button",
                onclick: move |_| ctrl.dismiss_notice(),
                "×"
            }
        }
    }
}

#[component]
pub fn SearchBar(placeholder: String, value: String) -> Element {
    let ctx = use_context::<AppCtx>();
    let ctrl = ctx.ctrl.clone();
    let debounce_ms = ctrl.config().listings.search_debounce_ms;

    rsx! {
        div { class: "ts-search",
            input {
                class: "ts-search-input",
                r#type: "search",
                placeholder: "{placeholder}",
                value: "{value}",
                oninput: move |evt: FormEvent| {
                    let ticket = ctrl.input_search(&evt.value());
                    let ctrl = ctrl.clone();
                    spawn(async move {
                        TimeoutFuture::new(debounce_ms).await;
                        ctrl.flush_search(ticket).await;
                    });
                }
            }
        }
    }
}

#[component]
pub fn CategoryBar(categories: Vec<CategoryView>) -> Element {
    let ctx = use_context::<AppCtx>();

    rsx! {
        nav { class: "ts-categories",
            for cat in categories {
                button {
                    key: "{cat.key}",
                    class: if cat.active { "ts-category-pill active" } else { "ts-category-pill" },
                    r#type: "button",
                    onclick: {
                        let ctrl = ctx.ctrl.clone();
                        let key = cat.key;
                        move |_| {
                            let ctrl = ctrl.clone();
                            spawn(async move {
                                ctrl.select_category(key).await;
                            });
                        }
                    },
                    "{cat.label}"
                }
            }
        }
    }
}

#[component]
pub fn FilterChips(tabs: Vec<TabView>) -> Element {
    let ctx = use_context::<AppCtx>();

    rsx! {
        div { class: "ts-filter-chips",
            for tab in tabs {
                button {
                    key: "{tab.status}",
                    class: if tab.active { "ts-filter-chip ts-filter-chip-active" } else { "ts-filter-chip" },
                    r#type: "button",
                    onclick: {
                        let ctrl = ctx.ctrl.clone();
                        let status = tab.status;
                        move |_| {
                            let ctrl = ctrl.clone();
                            spawn(async move {
                                ctrl.select_tab(status).await;
                            });
                        }
                    },
                    "{tab.label}"
                }
            }
        }
    }
}

#[component]
pub fn RoleActionsBar(actions: RoleActions) -> Element {
    let ctx = use_context::<AppCtx>();
    let create_ctrl = ctx.ctrl.clone();
    let pending_ctrl = ctx.ctrl.clone();

    rsx! {
        div { class: "ts-role-actions",
            if actions.create_market {
                button {
                    class: "ts-role-btn",
                    r#type: "button",
                    onclick: move |_| {
                        if let Err(e) = create_ctrl.create_market() {
                            debug!(error = %e, "create market requested");
                        }
                    },
                    "{actions.create_label}"
                }
            }
            if actions.pending_markets {
                button {
                    class: "ts-role-btn ts-role-btn-secondary",
                    r#type: "button",
                    onclick: move |_| {
                        let ctrl = pending_ctrl.clone();
                        spawn(async move {
                            ctrl.show_pending().await;
                        });
                    },
                    "{actions.pending_label}"
                }
            }
        }
    }
}

#[component]
pub fn MarketList(listing: ListingView) -> Element {
    match listing {
        ListingView::Loading => rsx! {
            div { class: "ts-markets-list",
                for i in 0..SKELETON_CARDS {
                    SkeletonCard { key: "{i}" }
                }
            }
        },
        ListingView::Empty(empty) => rsx! {
            div { class: "ts-empty",
                div { class: "ts-empty-title", "{empty.title}" }
                div { class: "ts-empty-sub", "{empty.hint}" }
            }
        },
        ListingView::Cards(cards) => rsx! {
            div { class: "ts-markets-list",
                for card in cards {
                    MarketCardView { key: "{card.id}", card: card.clone() }
                }
            }
        },
    }
}

#[component]
fn SkeletonCard() -> Element {
    rsx! {
        article { class: "market-card skeleton",
            div { class: "market-card-left",
                div { class: "market-logo skeleton-box" }
                div { class: "market-text",
                    div { class: "skeleton-line w-80" }
                    div { class: "skeleton-line w-40" }
                }
            }
            div { class: "market-card-right",
                div { class: "skeleton-pill" }
                div { class: "skeleton-pill" }
            }
        }
    }
}

#[component]
fn MarketCardView(card: MarketCard) -> Element {
    let ctx = use_context::<AppCtx>();
    let mut logo_failed = use_signal(|| false);
    let logo = if logo_failed() { PLACEHOLDER_LOGO.to_string() } else { card.logo_url.clone() };

    rsx! {
        article { class: "market-card", "data-market-id": "{card.id}",
            div { class: "market-card-left",
                div { class: "market-logo-wrap",
                    img {
                        class: "market-logo",
                        src: "{logo}",
                        alt: "",
                        onerror: move |_| logo_failed.set(true),
                    }
                    div { class: "market-status-pill market-status-{card.status_class}",
                        "{card.status_label}"
                    }
                }
                div { class: "market-text",
                    h2 { class: "market-question", "{card.question}" }
                    div { class: "market-meta-line",
                        span { class: "market-category", "{card.category_label}" }
                        span { class: "market-dot", "•" }
                        span { class: "market-volume", "{card.volume_label}" }
                    }
                    if let Some(deadline) = card.deadline.clone() {
                        div { class: "market-deadline", "{deadline}" }
                    }
                    if let Some((label, url)) = card.source.clone() {
                        a {
                            class: "market-source",
                            href: "{url}",
                            target: "_blank",
                            rel: "noopener noreferrer",
                            "{label}"
                        }
                    }
                }
            }
            div { class: "market-card-right",
                div { class: "market-buttons",
                    button { class: "market-btn market-btn-yes", r#type: "button", disabled: true,
                        "{card.yes_button}"
                    }
                    button { class: "market-btn market-btn-no", r#type: "button", disabled: true,
                        "{card.no_button}"
                    }
                }
                div { class: "market-prob",
                    div { class: "market-prob-bar",
                        div { class: "market-prob-yes", style: "width: {card.prob_yes}%" }
                        div { class: "market-prob-no", style: "width: {card.prob_no}%" }
                    }
                    "{card.prob_label}"
                }
                if let Some(label) = card.activate_label.clone() {
                    button {
                        class: "market-admin-activate",
                        r#type: "button",
                        onclick: {
                            let ctrl = ctx.ctrl.clone();
                            let id = card.id.clone();
                            move |_| {
                                let ctrl = ctrl.clone();
                                let id = id.clone();
                                spawn(async move {
                                    ctrl.activate_market(&id).await;
                                });
                            }
                        },
                        "{label}"
                    }
                }
            }
        }
    }
}

#[component]
pub fn BottomNav(labels: NavLabels) -> Element {
    rsx! {
        nav { class: "ts-bottom-nav",
            Link {
                class: "ts-bottom-nav-btn",
                active_class: "ts-bottom-nav-btn-active",
                to: Route::Markets {},
                "{labels.markets}"
            }
            Link {
                class: "ts-bottom-nav-btn",
                active_class: "ts-bottom-nav-btn-active",
                to: Route::Portfolio {},
                "{labels.portfolio}"
            }
        }
    }
}
