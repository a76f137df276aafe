//! Market records and listing filters.
//!
//! The API is loose about record shape: the probability arrives as
//! `prob_yes` or `probability_yes`, numbers are sometimes strings, and ids
//! are sometimes numeric. Everything is normalized here, once, into
//! [`Market`]; render code never looks at raw JSON.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::categories;

pub const DEFAULT_PROB_YES: u8 = 50;
pub const DEFAULT_CATEGORY: &str = "other";

/// Opaque listing id as the API addresses it in paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MarketId(String);

impl MarketId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MarketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Listing lifecycle, owned by the server:
/// pending --(admin activates)--> active --(resolution)--> resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarketStatus {
    Pending,
    #[default]
    Active,
    Resolved,
}

impl MarketStatus {
    pub const ALL: [MarketStatus; 3] = [
        MarketStatus::Active,
        MarketStatus::Pending,
        MarketStatus::Resolved,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MarketStatus::Pending => "pending",
            MarketStatus::Active => "active",
            MarketStatus::Resolved => "resolved",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(MarketStatus::Pending),
            "active" => Some(MarketStatus::Active),
            "resolved" => Some(MarketStatus::Resolved),
            _ => None,
        }
    }

    /// Dictionary key of the badge text on a card.
    pub fn badge_key(self) -> &'static str {
        match self {
            MarketStatus::Pending => "status_pending",
            MarketStatus::Active => "status_active",
            MarketStatus::Resolved => "status_resolved",
        }
    }

    /// Dictionary key of the filter chip.
    pub fn tab_key(self) -> &'static str {
        match self {
            MarketStatus::Pending => "tab_pending",
            MarketStatus::Active => "tab_active",
            MarketStatus::Resolved => "tab_resolved",
        }
    }

    /// Dictionary key of the empty-list title for this tab.
    pub fn empty_key(self) -> &'static str {
        match self {
            MarketStatus::Pending => "no_pending_markets",
            MarketStatus::Active => "no_markets",
            MarketStatus::Resolved => "no_resolved_markets",
        }
    }
}

impl std::fmt::Display for MarketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A listing record after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Market {
    pub id: MarketId,
    pub question: String,
    pub category: String,
    pub status: MarketStatus,
    /// Yes-probability in whole percent, 0..=100.
    pub prob_yes: u8,
    pub volume_usd: f64,
    pub resolution_ts: Option<DateTime<Utc>>,
    pub resolution_source: Option<String>,
    pub logo_url: Option<String>,
}

impl Market {
    pub fn prob_no(&self) -> u8 {
        100 - self.prob_yes
    }

    /// Normalize one raw record. Returns None when the record has no
    /// usable id or is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let raw: RawMarket = match serde_json::from_value(value.clone()) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "skipping malformed market record");
                return None;
            }
        };
        raw.normalize()
    }
}

/// Wire shape of a market record. Every field is optional; defaults are
/// applied in [`RawMarket::normalize`].
#[derive(Debug, Deserialize)]
struct RawMarket {
    id: Option<Value>,
    question: Option<String>,
    category: Option<String>,
    status: Option<String>,
    prob_yes: Option<Value>,
    probability_yes: Option<Value>,
    volume_usd: Option<Value>,
    resolution_ts: Option<Value>,
    resolution_source: Option<String>,
    logo_url: Option<String>,
}

impl RawMarket {
    fn normalize(self) -> Option<Market> {
        let id = match self.id.as_ref()? {
            Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            other => {
                warn!(id = %other, "skipping market record with unusable id");
                return None;
            }
        };

        let status = match self.status.as_deref() {
            None => MarketStatus::Active,
            Some(s) => MarketStatus::parse(s).unwrap_or_else(|| {
                warn!(id = %id, status = s, "unknown market status, treating as active");
                MarketStatus::Active
            }),
        };

        let prob_yes = self
            .prob_yes
            .as_ref()
            .and_then(as_number)
            .or_else(|| self.probability_yes.as_ref().and_then(as_number))
            .map(|p| p.clamp(0.0, 100.0).round() as u8)
            .unwrap_or(DEFAULT_PROB_YES);

        let volume_usd = self
            .volume_usd
            .as_ref()
            .and_then(as_number)
            .filter(|v| *v >= 0.0)
            .unwrap_or(0.0);

        let resolution_ts = self.resolution_ts.as_ref().and_then(parse_timestamp);
        if self.resolution_ts.is_some() && resolution_ts.is_none() {
            debug!(id = %id, "unparsable resolution_ts ignored");
        }

        Some(Market {
            id: MarketId(id),
            question: self.question.unwrap_or_default(),
            category: non_empty(self.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            status,
            prob_yes,
            volume_usd,
            resolution_ts,
            resolution_source: non_empty(self.resolution_source),
            logo_url: non_empty(self.logo_url),
        })
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// JSON number or numeric string.
fn as_number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

/// RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DD`, or a unix timestamp in
/// seconds or milliseconds (number or numeric string, fractions truncated).
fn parse_timestamp(v: &Value) -> Option<DateTime<Utc>> {
    match v {
        Value::Number(n) => from_epoch(n.as_f64()?),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
                if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                    return Some(naive.and_utc());
                }
            }
            if let Some(naive) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
            {
                return Some(naive.and_utc());
            }
            from_epoch(s.parse::<f64>().ok()?)
        }
        _ => None,
    }
}

/// Values of 1e11 and above are milliseconds.
fn from_epoch(n: f64) -> Option<DateTime<Utc>> {
    if !n.is_finite() {
        return None;
    }
    let n = n.trunc();
    if n.abs() >= 1e11 {
        DateTime::from_timestamp_millis(n as i64)
    } else {
        DateTime::from_timestamp(n as i64, 0)
    }
}

/// User-controlled listing filter. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub tab: MarketStatus,
    pub category: String,
    pub search: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            tab: MarketStatus::Active,
            category: categories::ALL.to_string(),
            search: String::new(),
        }
    }
}

impl FilterState {
    /// The query this filter translates to on the wire.
    pub fn query(&self, min_search_len: usize) -> MarketQuery {
        let category = Some(self.category.trim())
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(categories::ALL))
            .map(str::to_string);
        let search = Some(self.search.trim())
            .filter(|s| !s.is_empty() && s.chars().count() >= min_search_len)
            .map(str::to_string);
        MarketQuery {
            status: self.tab,
            category,
            search,
        }
    }
}

/// Parameters of one `GET /markets` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketQuery {
    pub status: MarketStatus,
    pub category: Option<String>,
    pub search: Option<String>,
}

impl MarketQuery {
    /// Query pairs in wire order.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![("status", self.status.as_str())];
        if let Some(category) = &self.category {
            pairs.push(("category", category));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_probability_defaults_to_50() {
        let m = Market::from_value(&json!({ "id": 1, "question": "Q?" })).unwrap();
        assert_eq!(m.prob_yes, 50);
        assert_eq!(m.prob_no(), 50);
    }

    #[test]
    fn test_missing_volume_defaults_to_0() {
        let m = Market::from_value(&json!({ "id": 1 })).unwrap();
        assert_eq!(m.volume_usd, 0.0);
        assert_eq!(m.category, DEFAULT_CATEGORY);
        assert_eq!(m.status, MarketStatus::Active);
    }

    #[test]
    fn test_probability_aliases() {
        let a = Market::from_value(&json!({ "id": "a", "prob_yes": 63.6 })).unwrap();
        assert_eq!(a.prob_yes, 64);
        let b = Market::from_value(&json!({ "id": "b", "probability_yes": "27" })).unwrap();
        assert_eq!(b.prob_yes, 27);
        // prob_yes takes precedence, zero is a real value.
        let c = Market::from_value(&json!({ "id": "c", "prob_yes": 0, "probability_yes": 80 }))
            .unwrap();
        assert_eq!(c.prob_yes, 0);
        assert_eq!(c.prob_no(), 100);
        let d = Market::from_value(&json!({ "id": "d", "prob_yes": 140 })).unwrap();
        assert_eq!(d.prob_yes, 100);
    }

    #[test]
    fn test_full_record() {
        let m = Market::from_value(&json!({
            "id": 42,
            "question": "Will BTC close above $100k?",
            "category": "Crypto",
            "status": "PENDING",
            "prob_yes": 71,
            "volume_usd": "1234.5",
            "resolution_ts": "2025-03-01T12:00:00Z",
            "resolution_source": "https://example.com/src",
            "logo_url": ""
        }))
        .unwrap();
        assert_eq!(m.id, MarketId::new("42"));
        assert_eq!(m.category, "Crypto");
        assert_eq!(m.status, MarketStatus::Pending);
        assert_eq!(m.volume_usd, 1234.5);
        assert!(m.resolution_ts.is_some());
        assert_eq!(m.resolution_source.as_deref(), Some("https://example.com/src"));
        assert_eq!(m.logo_url, None);
    }

    #[test]
    fn test_records_without_id_dropped() {
        assert!(Market::from_value(&json!({ "question": "no id" })).is_none());
        assert!(Market::from_value(&json!({ "id": "  " })).is_none());
        assert!(Market::from_value(&json!("not an object")).is_none());
    }

    #[test]
    fn test_timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        for v in [
            json!("2025-03-01T10:00:00+00:00"),
            json!("2025-03-01 10:00:00"),
            json!("2025-03-01"),
            json!(1_740_823_200),
            json!(1_740_823_200_000i64),
            json!(1_740_823_200.5),
            json!("1740823200"),
            json!(" 1740823200000 "),
        ] {
            let ts = parse_timestamp(&v).unwrap();
            assert_eq!(ts.date_naive(), expected, "{v}");
        }
        assert!(parse_timestamp(&json!("soon")).is_none());
    }

    #[test]
    fn test_query_omits_all_category() {
        let filter = FilterState::default();
        let q = filter.query(1);
        assert_eq!(q.pairs(), vec![("status", "active")]);

        let filter = FilterState {
            category: "crypto".to_string(),
            ..FilterState::default()
        };
        assert_eq!(
            filter.query(1).pairs(),
            vec![("status", "active"), ("category", "crypto")]
        );
    }

    #[test]
    fn test_query_search_trimmed_and_min_length() {
        let filter = FilterState {
            tab: MarketStatus::Resolved,
            search: "  bt ".to_string(),
            ..FilterState::default()
        };
        assert_eq!(filter.query(1).search.as_deref(), Some("bt"));
        assert_eq!(filter.query(3).search, None);

        let blank = FilterState {
            search: "   ".to_string(),
            ..FilterState::default()
        };
        assert_eq!(blank.query(1).search, None);
    }
}
