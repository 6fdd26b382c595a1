//! Persisted sign-in state.
//!
//! The key names match what earlier versions of the web client wrote to
//! `localStorage`, so existing browser sessions survive an upgrade.

use store::{KeyValueStore, StoreError};

use crate::models::{AuthResponse, User};

pub const ACCESS_TOKEN_KEY: &str = "authToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "authUser";

/// Token and profile storage on top of a [`KeyValueStore`].
#[derive(Debug, Clone, Default)]
pub struct Session<S> {
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn access_token(&self) -> Option<String> {
        self.store.get(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.store.get(REFRESH_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Cached profile. A value that no longer parses counts as signed out.
    pub fn user(&self) -> Option<User> {
        let raw = self.store.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("Discarding unreadable cached user: {}", e);
                None
            }
        }
    }

    /// Signed in means both a token and a readable profile are stored.
    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some() && self.user().is_some()
    }

    pub fn save_login(&self, auth: &AuthResponse) -> Result<(), StoreError> {
        self.store.set(ACCESS_TOKEN_KEY, &auth.access_token)?;
        match auth.refresh_token.as_deref() {
            Some(refresh) => self.store.set(REFRESH_TOKEN_KEY, refresh)?,
            None => self.store.remove(REFRESH_TOKEN_KEY)?,
        }
        self.set_user(&auth.user)
    }

    pub fn update_access_token(&self, token: &str) -> Result<(), StoreError> {
        self.store.set(ACCESS_TOKEN_KEY, token)
    }

    pub fn update_refresh_token(&self, token: &str) -> Result<(), StoreError> {
        self.store.set(REFRESH_TOKEN_KEY, token)
    }

    pub fn set_user(&self, user: &User) -> Result<(), StoreError> {
        let json = serde_json::to_string(user).map_err(|e| StoreError::Write(e.to_string()))?;
        self.store.set(USER_KEY, &json)
    }

    /// Remove every stored value. Keeps going past individual failures and
    /// reports the first one.
    pub fn clear(&self) -> Result<(), StoreError> {
        let mut first_error = None;
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.store.remove(key) {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use store::MemoryStore;

    fn auth(refresh: Option<&str>) -> AuthResponse {
        AuthResponse {
            access_token: "access-1".into(),
            refresh_token: refresh.map(str::to_string),
            user: serde_json::from_str(
                r#"{"id":3,"email":"m@x.io","username":"mod","role":"MODERATOR"}"#,
            )
            .unwrap(),
        }
    }

    #[test]
    fn test_save_and_read_back() {
        let store = MemoryStore::new();
        let session = Session::new(store.clone());
        session.save_login(&auth(Some("refresh-1"))).unwrap();

        assert_eq!(store.get("authToken").as_deref(), Some("access-1"));
        assert_eq!(session.refresh_token().as_deref(), Some("refresh-1"));
        assert_eq!(session.user().map(|u| u.role), Some(Role::Moderator));
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_login_without_refresh_drops_stale_one() {
        let store = MemoryStore::new();
        store.set(REFRESH_TOKEN_KEY, "old").unwrap();
        let session = Session::new(store);
        session.save_login(&auth(None)).unwrap();
        assert!(session.refresh_token().is_none());
    }

    #[test]
    fn test_corrupt_user_reads_as_signed_out() {
        let store = MemoryStore::new();
        store.set(ACCESS_TOKEN_KEY, "t").unwrap();
        store.set(USER_KEY, "{not json").unwrap();
        let session = Session::new(store);
        assert!(session.user().is_none());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_clear_removes_everything() {
        let store = MemoryStore::new();
        let session = Session::new(store.clone());
        session.save_login(&auth(Some("r"))).unwrap();
        session.clear().unwrap();
        assert!(store.is_empty());
        assert!(session.access_token().is_none());
    }
}
