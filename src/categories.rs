//! Category bar catalog.

use crate::config::CategoriesConfig;
use crate::i18n::Translator;

/// Category key meaning "no category filter".
pub const ALL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub key: &'static str,
    pub i18n_key: &'static str,
    pub enabled: bool,
}

const CATALOG: &[Category] = &[
    Category { key: ALL, i18n_key: "cat_all", enabled: true },
    Category { key: "politics", i18n_key: "cat_politics", enabled: true },
    Category { key: "economy", i18n_key: "cat_economy", enabled: true },
    Category { key: "crypto", i18n_key: "cat_crypto", enabled: true },
    Category { key: "sports", i18n_key: "cat_sports", enabled: true },
    Category { key: "world", i18n_key: "cat_world", enabled: true },
    Category { key: "other", i18n_key: "cat_other", enabled: true },
];

/// Categories shown in the bar, in display order. `all` is always first
/// and cannot be disabled.
pub fn visible(config: &CategoriesConfig) -> Vec<Category> {
    CATALOG
        .iter()
        .filter(|c| c.enabled)
        .filter(|c| {
            c.key == ALL
                || !config
                    .disabled
                    .iter()
                    .any(|d| d.eq_ignore_ascii_case(c.key))
        })
        .copied()
        .collect()
}

/// Display label for a market's category. Catalog keys are localized;
/// anything else the API sends is shown as-is.
pub fn label(tr: &Translator, key: &str) -> String {
    match CATALOG.iter().find(|c| c.key.eq_ignore_ascii_case(key)) {
        Some(c) => tr.text(c.i18n_key),
        None => key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Lang;

    #[test]
    fn test_all_first() {
        let cats = visible(&CategoriesConfig::default());
        assert_eq!(cats.len(), 7);
        assert_eq!(cats[0].key, ALL);
    }

    #[test]
    fn test_disabled_categories_hidden() {
        let config = CategoriesConfig {
            disabled: vec!["Sports".to_string(), "all".to_string()],
        };
        let keys: Vec<_> = visible(&config).iter().map(|c| c.key).collect();
        assert!(!keys.contains(&"sports"));
        assert_eq!(keys[0], ALL);
    }

    #[test]
    fn test_label() {
        let ru = Translator::new(Lang::Ru);
        assert_eq!(label(&ru, "crypto"), "Крипто");
        assert_eq!(label(&ru, "weather"), "weather");
    }
}
