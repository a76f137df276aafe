//! English dictionary. Also the fallback for keys missing from other languages.

pub(super) const ENTRIES: &[(&str, &str)] = &[
    ("brand_name", "TrueStake"),
    ("brand_tagline", "on TON · Telegram Mini App"),
    ("cat_all", "All"),
    ("cat_politics", "Politics"),
    ("cat_economy", "Economy"),
    ("cat_crypto", "Crypto"),
    ("cat_sports", "Sports"),
    ("cat_world", "World"),
    ("cat_other", "Other"),
    ("search_placeholder", "Search markets..."),
    ("nav_markets", "Markets"),
    ("nav_portfolio", "Portfolio"),
    ("btn_create", "+ Create"),
    ("tab_active", "Active"),
    ("tab_pending", "Pending"),
    ("tab_resolved", "Resolved"),
    ("no_markets", "No markets yet. Creators/Admins can add events."),
    ("no_pending_markets", "No pending markets"),
    ("no_resolved_markets", "No resolved markets yet"),
    ("empty_hint", "Please check again later or try another filter."),
    ("status_pending", "pending"),
    ("status_active", "active"),
    ("status_resolved", "resolved"),
    ("vol_prefix", "Vol: $"),
    ("yes_label", "YES"),
    ("no_label", "NO"),
    ("btn_yes", "Yes"),
    ("btn_no", "No"),
    ("resolution_by", "Resolution by"),
    ("source", "Source"),
    ("activate_market", "Activate"),
    ("guest", "guest"),
    ("role_user", "user"),
    ("role_creator", "creator"),
    ("role_admin", "admin"),
    ("create_market", "Create market"),
    ("pending_markets", "Pending markets"),
    ("wallet_connect", "Connect TON wallet"),
    ("wallet_connected", "Wallet connected"),
    ("wallet_balance", "Balance"),
    ("portfolio_soon", "Your positions will appear here."),
    ("notice_market_activated", "Market activated."),
    ("notice_activation_failed", "Failed to activate market."),
    ("notice_api_error", "Error while calling API."),
    ("notice_admin_required", "Admin authorization required."),
    ("notice_create_unavailable", "Market creation form is not implemented yet."),
    ("notice_wallet_unavailable", "TON wallet connection will be implemented later."),
];
