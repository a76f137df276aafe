//! Russian dictionary.

pub(super) const ENTRIES: &[(&str, &str)] = &[
    ("brand_name", "TrueStake"),
    ("brand_tagline", "на TON · Telegram Mini App"),
    ("cat_all", "Все"),
    ("cat_politics", "Политика"),
    ("cat_economy", "Экономика"),
    ("cat_crypto", "Крипто"),
    ("cat_sports", "Спорт"),
    ("cat_world", "Мир"),
    ("cat_other", "Другое"),
    ("search_placeholder", "Поиск событий..."),
    ("nav_markets", "Рынки"),
    ("nav_portfolio", "Портфель"),
    ("btn_create", "+ Создать"),
    ("tab_active", "Активные"),
    ("tab_pending", "Модерация"),
    ("tab_resolved", "Завершённые"),
    ("no_markets", "Пока нет рынков. Создатель может добавить событие."),
    ("no_pending_markets", "Нет рынков на модерации"),
    ("no_resolved_markets", "Пока нет завершённых рынков"),
    ("empty_hint", "Загляните позже или попробуйте другой фильтр."),
    ("status_pending", "модерация"),
    ("status_active", "активен"),
    ("status_resolved", "завершен"),
    ("vol_prefix", "Объём: $"),
    ("yes_label", "ДА"),
    ("no_label", "НЕТ"),
    ("btn_yes", "Да"),
    ("btn_no", "Нет"),
    ("resolution_by", "Результат к"),
    ("source", "Источник"),
    ("activate_market", "Активировать"),
    ("guest", "гость"),
    ("role_user", "пользователь"),
    ("role_creator", "creator"),
    ("role_admin", "admin"),
    ("create_market", "Создать рынок"),
    ("pending_markets", "Pending рынки"),
    ("wallet_connect", "Подключить TON-кошелёк"),
    ("wallet_connected", "Кошелёк подключен"),
    ("wallet_balance", "Баланс"),
    ("portfolio_soon", "Здесь появятся ваши позиции."),
    ("notice_market_activated", "Рынок активирован."),
    ("notice_activation_failed", "Не удалось активировать рынок."),
    ("notice_api_error", "Ошибка при запросе к API."),
    ("notice_admin_required", "Нужна авторизация админа."),
    ("notice_create_unavailable", "Форма создания рынка ещё не реализована."),
    ("notice_wallet_unavailable", "Подключение TON-кошелька будет реализовано позже."),
];
