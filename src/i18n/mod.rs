//! Localization: language detection, dictionary lookup, locale formatting.
//!
//! Two languages are supported. English is the default and also the
//! fallback dictionary; Russian is selected when the platform hint or the
//! browser locale asks for it. Lookups never fail: a missing key falls back
//! to English, then to the caller's literal, then to the key itself.

mod en;
mod ru;

use chrono::{DateTime, Datelike, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    En,
    Ru,
}

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::En, Lang::Ru];

    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Ru => "ru",
        }
    }

    /// Flag shown on the language switch.
    pub fn flag(self) -> &'static str {
        match self {
            Lang::En => "🇺🇸",
            Lang::Ru => "🇷🇺",
        }
    }

    /// Parse a language code or locale tag (`ru`, `ru-RU`, `EN_us`).
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_ascii_lowercase();
        if tag.starts_with("ru") {
            Some(Lang::Ru)
        } else if tag.starts_with("en") {
            Some(Lang::En)
        } else {
            None
        }
    }

    /// Pick the active language. A recognized platform hint wins; otherwise
    /// only a Russian browser locale moves us off the default.
    pub fn detect(platform_hint: Option<&str>, browser_locale: Option<&str>) -> Self {
        if let Some(lang) = platform_hint.and_then(Lang::from_tag) {
            return lang;
        }
        match browser_locale.and_then(Lang::from_tag) {
            Some(Lang::Ru) => Lang::Ru,
            _ => Lang::En,
        }
    }

    fn entries(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Lang::En => en::ENTRIES,
            Lang::Ru => ru::ENTRIES,
        }
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

fn lookup(lang: Lang, key: &str) -> Option<&'static str> {
    lang.entries()
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

/// Dictionary view bound to one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translator {
    lang: Lang,
}

impl Translator {
    pub fn new(lang: Lang) -> Self {
        Self { lang }
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    /// Active dictionary, then the default dictionary, then `fallback`,
    /// then the key.
    pub fn t(&self, key: &str, fallback: Option<&str>) -> String {
        lookup(self.lang, key)
            .or_else(|| lookup(Lang::default(), key))
            .or(fallback)
            .unwrap_or(key)
            .to_string()
    }

    /// Shorthand for a lookup without a literal fallback.
    pub fn text(&self, key: &str) -> String {
        self.t(key, None)
    }

    pub fn volume(&self, value: f64) -> String {
        format_volume(self.lang, value)
    }

    pub fn date(&self, ts: &DateTime<Utc>) -> String {
        format_date(self.lang, ts)
    }
}

/// Whole-dollar amount with locale thousands grouping.
pub fn format_volume(lang: Lang, value: f64) -> String {
    let rounded = if value.is_finite() { value.round() } else { 0.0 };
    let negative = rounded < 0.0;
    let digits = format!("{}", rounded.abs() as u64);

    let separator = match lang {
        Lang::En => ',',
        Lang::Ru => '\u{a0}',
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const MONTHS_RU: [&str; 12] = [
    "янв.", "февр.", "мар.", "апр.", "мая", "июн.", "июл.", "авг.", "сент.", "окт.", "нояб.",
    "дек.",
];

/// Medium date: `Mar 1, 2025` / `1 мар. 2025 г.`
pub fn format_date(lang: Lang, ts: &DateTime<Utc>) -> String {
    let month = ts.month0() as usize;
    match lang {
        Lang::En => format!("{} {}, {}", MONTHS_EN[month], ts.day(), ts.year()),
        Lang::Ru => format!("{} {} {} г.", ts.day(), MONTHS_RU[month], ts.year()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_platform_hint_wins() {
        assert_eq!(Lang::detect(Some("ru"), Some("en-US")), Lang::Ru);
        assert_eq!(Lang::detect(Some("RU-ru"), None), Lang::Ru);
        assert_eq!(Lang::detect(Some("en"), Some("ru-RU")), Lang::En);
    }

    #[test]
    fn test_browser_locale_fallback() {
        assert_eq!(Lang::detect(None, Some("ru-RU")), Lang::Ru);
        assert_eq!(Lang::detect(Some("de"), Some("ru")), Lang::Ru);
        assert_eq!(Lang::detect(None, Some("fr-FR")), Lang::En);
        assert_eq!(Lang::detect(None, None), Lang::En);
        assert_eq!(Lang::detect(Some(""), Some("")), Lang::En);
    }

    #[test]
    fn test_lookup_chain() {
        let ru = Translator::new(Lang::Ru);
        assert_eq!(ru.text("cat_crypto"), "Крипто");
        // Present only in the default dictionary.
        assert_eq!(lookup(Lang::Ru, "missing_everywhere"), None);
        assert_eq!(ru.t("missing_everywhere", Some("Literal")), "Literal");
        assert_eq!(ru.text("missing_everywhere"), "missing_everywhere");
    }

    #[test]
    fn test_dictionaries_cover_same_keys() {
        for (key, _) in en::ENTRIES {
            assert!(lookup(Lang::Ru, key).is_some(), "ru is missing {key}");
        }
        for (key, _) in ru::ENTRIES {
            assert!(lookup(Lang::En, key).is_some(), "en is missing {key}");
        }
    }

    #[test]
    fn test_format_volume() {
        assert_eq!(format_volume(Lang::En, 0.0), "0");
        assert_eq!(format_volume(Lang::En, 999.4), "999");
        assert_eq!(format_volume(Lang::En, 12_345.0), "12,345");
        assert_eq!(format_volume(Lang::En, 1_234_567.6), "1,234,568");
        assert_eq!(format_volume(Lang::Ru, 12_345.0), "12\u{a0}345");
        assert_eq!(format_volume(Lang::En, -1_500.0), "-1,500");
        assert_eq!(format_volume(Lang::En, f64::NAN), "0");
    }

    #[test]
    fn test_format_date() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(format_date(Lang::En, &ts), "Mar 1, 2025");
        assert_eq!(format_date(Lang::Ru, &ts), "1 мар. 2025 г.");
    }
}
