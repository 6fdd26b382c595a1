//! # Browser `localStorage` store
//!
//! [`LocalStore`] is the [`KeyValueStore`] used on the web platform. Keys are
//! written as-is so sessions created by earlier builds of the client remain
//! readable. The storage handle is looked up on every call; `web_sys` returns
//! a cheap reference to the window's `Storage` object.
//!
//! Private browsing modes can deny access to `localStorage`. Reads then return
//! `None` and writes return [`StoreError::Unavailable`].

use web_sys::Storage;

use crate::kv::{KeyValueStore, StoreError};

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = Self::storage().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StoreError::Write(format!("{e:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let storage = Self::storage().ok_or(StoreError::Unavailable)?;
        storage
            .remove_item(key)
            .map_err(|e| StoreError::Write(format!("{e:?}")))
    }
}
