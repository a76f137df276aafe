//! Identity types: roles, users, sessions and the platform bridge payload.
//!
//! Identity is resolved in three tiers (see `Controller::resolve_identity`):
//! - platform: the chat bridge's signed `initData` exchanged for a token
//! - token: a previously stored token checked against `/auth/me`
//! - guest: neither worked
//!
//! This module only holds the data; the network side lives in `api`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Access tier gating the action controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord)]
pub enum Role {
    #[default]
    Guest,
    User,
    Creator,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::User => "user",
            Role::Creator => "creator",
            Role::Admin => "admin",
        }
    }

    /// Server role names are case-insensitive. A signed-in user with a
    /// missing or unknown role is a plain user.
    pub fn from_server(role: Option<&str>) -> Self {
        match role.map(|r| r.trim().to_ascii_lowercase()).as_deref() {
            Some("admin") => Role::Admin,
            Some("creator") => Role::Creator,
            Some("guest") => Role::Guest,
            _ => Role::User,
        }
    }

    pub fn badge_key(self) -> Option<&'static str> {
        match self {
            Role::Guest => None,
            Role::User => Some("role_user"),
            Role::Creator => Some("role_creator"),
            Role::Admin => Some("role_admin"),
        }
    }

    /// Creators and admins may create markets.
    pub fn can_create(self) -> bool {
        matches!(self, Role::Creator | Role::Admin)
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub role: Role,
}

impl User {
    /// Build a user from the `user` object of an auth response. Returns None
    /// when the value is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let id = match obj.get("id") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };
        let username = obj
            .get("username")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("guest")
            .to_string();
        let role = Role::from_server(obj.get("role").and_then(Value::as_str));
        Some(Self { id, username, role })
    }
}

/// Current identity. A token without a user never reaches the state: the
/// controller only installs complete sessions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    pub fn guest() -> Self {
        Self::default()
    }

    pub fn authenticated(token: String, user: User) -> Self {
        Self {
            token: Some(token),
            user: Some(user),
        }
    }

    pub fn role(&self) -> Role {
        self.user.as_ref().map(|u| u.role).unwrap_or(Role::Guest)
    }

    pub fn is_guest(&self) -> bool {
        self.user.is_none()
    }
}

/// Which tier produced the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    Platform,
    Token,
    Guest,
}

/// What the host page exposes: the chat bridge's signed payload and the
/// locale hints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlatformContext {
    /// Signed `initData` string, absent outside the chat client.
    #[serde(default)]
    pub init_data: Option<String>,
    /// Client platform tag (`ios`, `android`, `tdesktop`, ...).
    #[serde(default)]
    pub platform: Option<String>,
    /// `initDataUnsafe.user.language_code`.
    #[serde(default)]
    pub language_code: Option<String>,
    /// `navigator.language`.
    #[serde(default)]
    pub browser_locale: Option<String>,
    /// `location.origin`.
    #[serde(default)]
    pub origin: String,
}

impl PlatformContext {
    /// The auth request body, if the bridge supplied a payload.
    pub fn auth_request(&self) -> Option<PlatformAuthRequest> {
        let init_data = self.init_data.as_deref()?.trim();
        if init_data.is_empty() {
            return None;
        }
        Some(PlatformAuthRequest {
            init_data: init_data.to_string(),
            origin: self.origin.clone(),
            platform: self
                .platform
                .clone()
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| "webapp".to_string()),
        })
    }
}

/// Body of `POST /auth/telegram`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformAuthRequest {
    pub init_data: String,
    pub origin: String,
    pub platform: String,
}

/// Successful `POST /auth/telegram` result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_parsing() {
        assert_eq!(Role::from_server(Some("ADMIN")), Role::Admin);
        assert_eq!(Role::from_server(Some("creator")), Role::Creator);
        assert_eq!(Role::from_server(Some("moderator")), Role::User);
        assert_eq!(Role::from_server(None), Role::User);
        assert!(Role::Admin.can_create());
        assert!(!Role::User.can_create());
    }

    #[test]
    fn test_user_from_value() {
        let u = User::from_value(&json!({ "id": 1, "username": "alice", "role": "creator" }))
            .unwrap();
        assert_eq!(u.id, "1");
        assert_eq!(u.username, "alice");
        assert_eq!(u.role, Role::Creator);

        let anon = User::from_value(&json!({ "id": "x" })).unwrap();
        assert_eq!(anon.username, "guest");
        assert_eq!(anon.role, Role::User);

        assert!(User::from_value(&json!(null)).is_none());
    }

    #[test]
    fn test_auth_request_requires_payload() {
        let mut ctx = PlatformContext {
            origin: "https://app.example".to_string(),
            ..PlatformContext::default()
        };
        assert!(ctx.auth_request().is_none());

        ctx.init_data = Some("   ".to_string());
        assert!(ctx.auth_request().is_none());

        ctx.init_data = Some("query_id=1&hash=abc".to_string());
        let req = ctx.auth_request().unwrap();
        assert_eq!(req.platform, "webapp");
        assert_eq!(req.origin, "https://app.example");
    }

    #[test]
    fn test_session_role() {
        assert_eq!(Session::guest().role(), Role::Guest);
        let s = Session::authenticated(
            "tok".to_string(),
            User {
                id: "1".to_string(),
                username: "root".to_string(),
                role: Role::Admin,
            },
        );
        assert!(s.role().is_admin());
        assert!(!s.is_guest());
    }
}
