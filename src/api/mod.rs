//! Client for the TrueStake market API.
//!
//! Every endpoint answers with a JSON envelope carrying an `ok` flag:
//!   POST /auth/telegram            → { ok, token, user }
//!   GET  /auth/me                  → { ok, user }
//!   GET  /markets?status&category&search → { ok, markets: [...] }
//!   POST /markets/activate/{id}    → { ok }
//!
//! Transport failures, unexpected shapes and `ok:false` are kept apart in
//! [`ApiError`] for logging, but callers treat them alike.

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::auth::{AuthGrant, PlatformAuthRequest, User};
use crate::market::{Market, MarketId, MarketQuery};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("request rejected by API")]
    Rejected,
    #[error("invalid URL: {0}")]
    Url(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Malformed(e.to_string())
    }
}

/// The four remote operations the app performs.
///
/// `?Send`: in the browser, reqwest futures live on the single JS thread.
#[async_trait(?Send)]
pub trait MarketApi {
    /// Exchange the platform bridge payload for a session token.
    async fn authenticate(&self, request: &PlatformAuthRequest) -> Result<AuthGrant, ApiError>;

    /// Who does this token belong to.
    async fn whoami(&self, token: &str) -> Result<User, ApiError>;

    async fn fetch_markets(&self, query: &MarketQuery) -> Result<Vec<Market>, ApiError>;

    /// Move a pending listing to active. Admin token required.
    async fn activate_market(&self, token: &str, id: &MarketId) -> Result<(), ApiError>;
}

/// Check the `ok` flag of an envelope.
fn ensure_ok(body: &Value) -> Result<(), ApiError> {
    match body.get("ok") {
        Some(Value::Bool(true)) => Ok(()),
        Some(Value::Bool(false)) => Err(ApiError::Rejected),
        _ => Err(ApiError::Malformed("missing ok flag".to_string())),
    }
}

pub fn parse_auth_response(body: &Value) -> Result<AuthGrant, ApiError> {
    ensure_ok(body)?;
    let token = body
        .get("token")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Malformed("missing token".to_string()))?;
    let user = body
        .get("user")
        .and_then(User::from_value)
        .ok_or_else(|| ApiError::Malformed("missing user".to_string()))?;
    Ok(AuthGrant {
        token: token.to_string(),
        user,
    })
}

pub fn parse_whoami_response(body: &Value) -> Result<User, ApiError> {
    ensure_ok(body)?;
    body.get("user")
        .and_then(User::from_value)
        .ok_or_else(|| ApiError::Malformed("missing user".to_string()))
}

/// Normalize a listing envelope. Individual malformed records are skipped;
/// a missing `markets` array fails the whole response.
pub fn parse_listing_response(body: &Value) -> Result<Vec<Market>, ApiError> {
    ensure_ok(body)?;
    let records = body
        .get("markets")
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::Malformed("markets is not an array".to_string()))?;

    let markets: Vec<Market> = records.iter().filter_map(Market::from_value).collect();
    if markets.len() < records.len() {
        warn!(
            received = records.len(),
            kept = markets.len(),
            "dropped malformed market records"
        );
    }
    Ok(markets)
}

pub fn parse_ack_response(body: &Value) -> Result<(), ApiError> {
    ensure_ok(body)
}

/// HTTP implementation on reqwest (browser fetch under wasm).
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        Url::parse(&format!("{}{}", self.base_url, path)).map_err(|e| ApiError::Url(e.to_string()))
    }

    /// Full listings URL for a query.
    pub fn markets_url(&self, query: &MarketQuery) -> Result<Url, ApiError> {
        let mut url = self.url("/markets")?;
        url.query_pairs_mut().extend_pairs(query.pairs());
        Ok(url)
    }

    fn activate_url(&self, id: &MarketId) -> Result<Url, ApiError> {
        let mut url = self.url("/markets/activate")?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Url("base URL cannot carry a path".to_string()))?
            .push(id.as_str());
        Ok(url)
    }

    async fn read_json(resp: reqwest::Response) -> Result<Value, ApiError> {
        let status = resp.status().as_u16();
        if status >= 400 {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }
        let text = resp.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait(?Send)]
impl MarketApi for HttpApi {
    async fn authenticate(&self, request: &PlatformAuthRequest) -> Result<AuthGrant, ApiError> {
        let url = self.url("/auth/telegram")?;
        debug!(platform = %request.platform, "POST /auth/telegram");
        let resp = self.client.post(url).json(request).send().await?;
        let body = Self::read_json(resp).await?;
        let grant = parse_auth_response(&body)?;
        info!(user = %grant.user.username, role = %grant.user.role, "platform sign-in accepted");
        Ok(grant)
    }

    async fn whoami(&self, token: &str) -> Result<User, ApiError> {
        let url = self.url("/auth/me")?;
        debug!("GET /auth/me");
        let resp = self.client.get(url).bearer_auth(token).send().await?;
        let body = Self::read_json(resp).await?;
        parse_whoami_response(&body)
    }

    async fn fetch_markets(&self, query: &MarketQuery) -> Result<Vec<Market>, ApiError> {
        let url = self.markets_url(query)?;
        debug!(url = %url, "GET /markets");
        let resp = self.client.get(url).send().await?;
        let body = Self::read_json(resp).await?;
        parse_listing_response(&body)
    }

    async fn activate_market(&self, token: &str, id: &MarketId) -> Result<(), ApiError> {
        let url = self.activate_url(id)?;
        debug!(id = %id, "POST /markets/activate");
        let resp = self.client.post(url).bearer_auth(token).send().await?;
        let body = Self::read_json(resp).await?;
        parse_ack_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::market::{FilterState, MarketStatus};
    use serde_json::json;

    #[test]
    fn test_markets_url_with_category() {
        let api = HttpApi::new("https://api.example.com/");
        let filter = FilterState {
            category: "crypto".to_string(),
            ..FilterState::default()
        };
        let url = api.markets_url(&filter.query(1)).unwrap();
        assert_eq!(url.path(), "/markets");
        assert_eq!(url.query(), Some("status=active&category=crypto"));
    }

    #[test]
    fn test_markets_url_all_category_omitted() {
        let api = HttpApi::new("https://api.example.com");
        let url = api.markets_url(&FilterState::default().query(1)).unwrap();
        assert_eq!(url.query(), Some("status=active"));
    }

    #[test]
    fn test_markets_url_encodes_search() {
        let api = HttpApi::new("https://api.example.com");
        let filter = FilterState {
            tab: MarketStatus::Pending,
            search: " btc & eth ".to_string(),
            ..FilterState::default()
        };
        let url = api.markets_url(&filter.query(1)).unwrap();
        assert_eq!(url.query(), Some("status=pending&search=btc+%26+eth"));
    }

    #[test]
    fn test_activate_url_escapes_id() {
        let api = HttpApi::new("https://api.example.com");
        let url = api.activate_url(&MarketId::new("42")).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/markets/activate/42");
        let url = api.activate_url(&MarketId::new("a/b")).unwrap();
        assert_eq!(url.path(), "/markets/activate/a%2Fb");
    }

    #[test]
    fn test_parse_auth_response() {
        let grant = parse_auth_response(&json!({
            "ok": true,
            "token": "abc",
            "user": { "id": 7, "username": "bob", "role": "admin" }
        }))
        .unwrap();
        assert_eq!(grant.token, "abc");
        assert_eq!(grant.user.role, Role::Admin);

        assert!(matches!(
            parse_auth_response(&json!({ "ok": false })),
            Err(ApiError::Rejected)
        ));
        assert!(matches!(
            parse_auth_response(&json!({ "ok": true, "user": { "id": 1 } })),
            Err(ApiError::Malformed(_))
        ));
        assert!(matches!(
            parse_auth_response(&json!({})),
            Err(ApiError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_listing_response() {
        let markets = parse_listing_response(&json!({
            "ok": true,
            "markets": [
                { "id": 1, "question": "A?" },
                { "question": "no id" },
                { "id": "3", "probability_yes": 12 }
            ]
        }))
        .unwrap();
        assert_eq!(markets.len(), 2);
        assert_eq!(markets[1].prob_yes, 12);

        assert!(parse_listing_response(&json!({ "ok": true })).is_err());
        assert!(parse_listing_response(&json!({ "ok": false, "markets": [] })).is_err());
        assert!(parse_listing_response(&json!({ "ok": true, "markets": {} })).is_err());
    }

    #[test]
    fn test_parse_ack() {
        assert!(parse_ack_response(&json!({ "ok": true })).is_ok());
        assert!(parse_ack_response(&json!({ "ok": "yes" })).is_err());
    }
}
