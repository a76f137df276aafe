//! View models: everything the components render, derived from
//! [`AppState`] in one pass so the DOM layer holds no logic of its own.

use crate::auth::Role;
use crate::categories;
use crate::config::AppConfig;
use crate::i18n::{Lang, Translator};
use crate::market::{Market, MarketId, MarketStatus};
use crate::state::AppState;

/// Shown when a listing has no logo or its logo fails to load.
pub const PLACEHOLDER_LOGO: &str = "./assets/logo.png";

/// Number of skeleton cards while the first fetch is in flight.
pub const SKELETON_CARDS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct AppView {
    pub lang: Lang,
    pub brand_name: String,
    pub brand_tagline: String,
    pub header: HeaderView,
    pub wallet_label: String,
    pub search_placeholder: String,
    pub search_text: String,
    pub tabs: Vec<TabView>,
    pub categories: Vec<CategoryView>,
    pub role_actions: RoleActions,
    pub listing: ListingView,
    pub notice: Option<NoticeView>,
    pub nav: NavLabels,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub user_label: String,
    pub role_badge: Option<String>,
    /// Extra CSS class on the badge: `creator`, `admin` or empty.
    pub role_class: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabView {
    pub status: MarketStatus,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryView {
    pub key: &'static str,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleActions {
    pub create_market: bool,
    pub pending_markets: bool,
    pub create_label: String,
    pub pending_label: String,
}

impl RoleActions {
    pub fn any(&self) -> bool {
        self.create_market || self.pending_markets
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListingView {
    Loading,
    Empty(EmptyState),
    Cards(Vec<MarketCard>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub title: String,
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketCard {
    pub id: MarketId,
    pub question: String,
    pub logo_url: String,
    pub status_class: &'static str,
    pub status_label: String,
    pub category_label: String,
    pub deadline: Option<String>,
    pub source: Option<(String, String)>,
    pub prob_yes: u8,
    pub prob_no: u8,
    pub prob_label: String,
    pub volume_label: String,
    pub yes_button: String,
    pub no_button: String,
    /// Present only for pending listings seen by an admin.
    pub activate_label: Option<String>,
}

impl MarketCard {
    pub fn show_activate(&self) -> bool {
        self.activate_label.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeView {
    pub message: String,
    pub is_error: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLabels {
    pub markets: String,
    pub portfolio: String,
    pub portfolio_placeholder: String,
}

pub fn build(state: &AppState, config: &AppConfig) -> AppView {
    let tr = state.translator();
    let role = state.role();
    let filter = state.filter();

    AppView {
        lang: state.lang(),
        brand_name: tr.text("brand_name"),
        brand_tagline: tr.text("brand_tagline"),
        header: header(state, &tr),
        wallet_label: tr.text("wallet_connect"),
        search_placeholder: tr.text("search_placeholder"),
        search_text: filter.search.clone(),
        tabs: MarketStatus::ALL
            .iter()
            .map(|&status| TabView {
                status,
                label: tr.text(status.tab_key()),
                active: status == filter.tab,
            })
            .collect(),
        categories: categories::visible(&config.categories)
            .into_iter()
            .map(|c| CategoryView {
                key: c.key,
                label: tr.text(c.i18n_key),
                active: c.key == filter.category,
            })
            .collect(),
        role_actions: RoleActions {
            create_market: role.can_create(),
            pending_markets: role.is_admin(),
            create_label: tr.text("create_market"),
            pending_label: tr.text("pending_markets"),
        },
        listing: listing(state, &tr),
        notice: state.notice().map(|n| NoticeView {
            message: n.message(&tr),
            is_error: n.is_error(),
        }),
        nav: NavLabels {
            markets: tr.text("nav_markets"),
            portfolio: tr.text("nav_portfolio"),
            portfolio_placeholder: tr.text("portfolio_soon"),
        },
    }
}

fn header(state: &AppState, tr: &Translator) -> HeaderView {
    match &state.session().user {
        None => HeaderView {
            user_label: tr.text("guest"),
            role_badge: None,
            role_class: "",
        },
        Some(user) => HeaderView {
            user_label: format!("@{}", user.username),
            role_badge: user.role.badge_key().map(|k| tr.text(k)),
            role_class: match user.role {
                Role::Creator => "creator",
                Role::Admin => "admin",
                _ => "",
            },
        },
    }
}

fn listing(state: &AppState, tr: &Translator) -> ListingView {
    let markets = state.listings();
    // Re-fetches of the same query keep their cards; a new query starts
    // from an empty list and shows the skeleton.
    if state.is_loading() && markets.is_empty() {
        return ListingView::Loading;
    }
    if markets.is_empty() {
        return ListingView::Empty(EmptyState {
            title: tr.text(state.filter().tab.empty_key()),
            hint: tr.text("empty_hint"),
        });
    }
    let admin = state.role().is_admin();
    ListingView::Cards(markets.iter().map(|m| card(m, tr, admin)).collect())
}

pub fn card(m: &Market, tr: &Translator, admin: bool) -> MarketCard {
    MarketCard {
        id: m.id.clone(),
        question: m.question.clone(),
        logo_url: m
            .logo_url
            .clone()
            .unwrap_or_else(|| PLACEHOLDER_LOGO.to_string()),
        status_class: m.status.as_str(),
        status_label: tr.text(m.status.badge_key()),
        category_label: categories::label(tr, &m.category),
        deadline: m
            .resolution_ts
            .as_ref()
            .map(|ts| format!("{}: {}", tr.text("resolution_by"), tr.date(ts))),
        source: m
            .resolution_source
            .clone()
            .map(|url| (tr.text("source"), url)),
        prob_yes: m.prob_yes,
        prob_no: m.prob_no(),
        prob_label: format!("{}% {}", m.prob_yes, tr.text("yes_label")),
        volume_label: format!("{}{}", tr.text("vol_prefix"), tr.volume(m.volume_usd)),
        yes_button: tr.text("btn_yes"),
        no_button: tr.text("btn_no"),
        activate_label: (admin && m.status == MarketStatus::Pending)
            .then(|| tr.text("activate_market")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Session, User};
    use crate::state::Notice;
    use serde_json::json;

    fn market(v: serde_json::Value) -> Market {
        Market::from_value(&v).unwrap()
    }

    fn signed_in(role: Role) -> AppState {
        let mut state = AppState::new(Lang::En, 1);
        state.set_session(Session::authenticated(
            "tok".to_string(),
            User {
                id: "1".to_string(),
                username: "alice".to_string(),
                role,
            },
        ));
        state
    }

    fn cards(state: &AppState) -> Vec<MarketCard> {
        match build(state, &AppConfig::default()).listing {
            ListingView::Cards(cards) => cards,
            other => panic!("expected cards, got {other:?}"),
        }
    }

    fn load(state: &mut AppState, markets: Vec<Market>) {
        let ticket = state.begin_fetch();
        assert!(state.finish_fetch(&ticket, Some(markets)));
    }

    #[test]
    fn test_admin_sees_activate_only_on_pending() {
        let mut state = signed_in(Role::Admin);
        load(
            &mut state,
            vec![
                market(json!({ "id": 1, "status": "pending" })),
                market(json!({ "id": 2, "status": "active" })),
                market(json!({ "id": 3, "status": "resolved" })),
            ],
        );
        let cards = cards(&state);
        assert!(cards[0].show_activate());
        assert!(!cards[1].show_activate());
        assert!(!cards[2].show_activate());
    }

    #[test]
    fn test_non_admin_never_sees_activate() {
        for role in [Role::User, Role::Creator] {
            let mut state = signed_in(role);
            load(&mut state, vec![market(json!({ "id": 1, "status": "pending" }))]);
            assert!(!cards(&state)[0].show_activate());
        }
    }

    #[test]
    fn test_card_defaults() {
        let mut state = AppState::new(Lang::En, 1);
        load(&mut state, vec![market(json!({ "id": 9, "question": "Rain?" }))]);
        let card = &cards(&state)[0];
        assert_eq!(card.prob_label, "50% YES");
        assert_eq!(card.prob_no, 50);
        assert_eq!(card.volume_label, "Vol: $0");
        assert_eq!(card.logo_url, PLACEHOLDER_LOGO);
        assert_eq!(card.category_label, "Other");
        assert_eq!(card.deadline, None);
        assert_eq!(card.source, None);
    }

    #[test]
    fn test_category_label_keeps_server_text() {
        let tr = Translator::new(Lang::En);
        let free = market(json!({ "id": 1, "category": "US Elections" }));
        assert_eq!(card(&free, &tr, false).category_label, "US Elections");
        let known = market(json!({ "id": 2, "category": "Crypto" }));
        assert_eq!(card(&known, &tr, false).category_label, "Crypto");
        let ru = Translator::new(Lang::Ru);
        assert_eq!(card(&known, &ru, false).category_label, "Крипто");
    }

    #[test]
    fn test_card_localized() {
        let mut state = AppState::new(Lang::Ru, 1);
        load(
            &mut state,
            vec![market(json!({
                "id": 1,
                "category": "crypto",
                "status": "resolved",
                "volume_usd": 12345,
                "prob_yes": 30,
                "resolution_ts": "2025-03-01",
                "resolution_source": "https://example.com"
            }))],
        );
        let card = &cards(&state)[0];
        assert_eq!(card.status_label, "завершен");
        assert_eq!(card.category_label, "Крипто");
        assert_eq!(card.volume_label, "Объём: $12\u{a0}345");
        assert_eq!(card.prob_label, "30% ДА");
        assert_eq!(card.deadline.as_deref(), Some("Результат к: 1 мар. 2025 г."));
        assert_eq!(
            card.source,
            Some(("Источник".to_string(), "https://example.com".to_string()))
        );
    }

    #[test]
    fn test_header_and_role_actions() {
        let view = build(&signed_in(Role::Admin), &AppConfig::default());
        assert_eq!(view.header.user_label, "@alice");
        assert_eq!(view.header.role_badge.as_deref(), Some("admin"));
        assert_eq!(view.header.role_class, "admin");
        assert!(view.role_actions.create_market);
        assert!(view.role_actions.pending_markets);

        let view = build(&signed_in(Role::User), &AppConfig::default());
        assert_eq!(view.header.role_badge.as_deref(), Some("user"));
        assert!(!view.role_actions.any());

        let view = build(&AppState::new(Lang::En, 1), &AppConfig::default());
        assert_eq!(view.header.user_label, "guest");
        assert_eq!(view.header.role_badge, None);
    }

    #[test]
    fn test_loading_and_empty_states() {
        let mut state = AppState::new(Lang::En, 1);
        let ticket = state.begin_fetch();
        assert_eq!(
            build(&state, &AppConfig::default()).listing,
            ListingView::Loading
        );

        state.set_tab(MarketStatus::Pending);
        let ticket2 = state.begin_fetch();
        assert!(!state.finish_fetch(&ticket, Some(vec![])));
        assert!(state.finish_fetch(&ticket2, Some(vec![])));
        match build(&state, &AppConfig::default()).listing {
            ListingView::Empty(empty) => assert_eq!(empty.title, "No pending markets"),
            other => panic!("expected empty, got {other:?}"),
        }
    }

    #[test]
    fn test_tab_switch_hides_previous_cards() {
        let mut state = signed_in(Role::Admin);
        state.set_tab(MarketStatus::Pending);
        load(&mut state, vec![market(json!({ "id": 1, "status": "pending" }))]);
        assert!(cards(&state)[0].show_activate());

        state.set_tab(MarketStatus::Active);
        state.begin_fetch();
        assert_eq!(
            build(&state, &AppConfig::default()).listing,
            ListingView::Loading
        );
    }

    #[test]
    fn test_poll_keeps_cards_visible() {
        let mut state = AppState::new(Lang::En, 1);
        load(&mut state, vec![market(json!({ "id": 1 }))]);
        state.begin_fetch();
        assert_eq!(cards(&state).len(), 1);
    }

    #[test]
    fn test_tabs_and_categories_track_filter() {
        let mut state = AppState::new(Lang::En, 1);
        state.set_category("sports");
        state.set_tab(MarketStatus::Resolved);
        let view = build(&state, &AppConfig::default());
        let active_tabs: Vec<_> = view.tabs.iter().filter(|t| t.active).collect();
        assert_eq!(active_tabs.len(), 1);
        assert_eq!(active_tabs[0].status, MarketStatus::Resolved);
        let active_cats: Vec<_> = view.categories.iter().filter(|c| c.active).collect();
        assert_eq!(active_cats[0].key, "sports");
    }

    #[test]
    fn test_notice_view() {
        let mut state = AppState::new(Lang::Ru, 1);
        state.set_notice(Notice::AdminRequired);
        let notice = build(&state, &AppConfig::default()).notice.unwrap();
        assert_eq!(notice.message, "Нужна авторизация админа.");
        assert!(notice.is_error);
    }
}
