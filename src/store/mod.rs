//! Session token persistence.
//!
//! One string survives reloads: the session token, under a fixed key
//! (default `ts_token`). No expiry is tracked; a stale token simply fails
//! the next `/auth/me` and gets cleared.
//!
//! Storage failures (private mode, quota, disabled storage) are logged and
//! otherwise ignored: the app keeps working with an in-memory session.

use std::cell::RefCell;

use gloo_storage::{LocalStorage, Storage};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub trait SessionStore {
    fn load_token(&self) -> Option<String>;
    fn save_token(&self, token: &str) -> Result<(), StorageError>;
    fn clear_token(&self);
}

/// Browser `localStorage` backed store.
#[derive(Debug, Clone)]
pub struct BrowserStorage {
    key: String,
}

impl BrowserStorage {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl SessionStore for BrowserStorage {
    fn load_token(&self) -> Option<String> {
        // Raw string values are stored unquoted, so read them untyped.
        let raw = LocalStorage::raw().get_item(&self.key);
        match raw {
            Ok(Some(token)) if !token.is_empty() => Some(token),
            Ok(_) => None,
            Err(e) => {
                warn!(key = %self.key, error = ?e, "localStorage read failed");
                None
            }
        }
    }

    fn save_token(&self, token: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .set_item(&self.key, token)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?;
        debug!(key = %self.key, "session token stored");
        Ok(())
    }

    fn clear_token(&self) {
        LocalStorage::delete(&self.key);
        debug!(key = %self.key, "session token cleared");
    }
}

/// Process-local store for tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    token: RefCell<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: RefCell::new(Some(token.to_string())),
        }
    }
}

impl SessionStore for MemoryStorage {
    fn load_token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save_token(&self, token: &str) -> Result<(), StorageError> {
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear_token(&self) {
        self.token.borrow_mut().take();
    }
}
