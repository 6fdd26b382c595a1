//! # Key/value persistence for client-side state
//!
//! The web client keeps a handful of small string values between page loads:
//! the access token, the refresh token and the cached user profile. Everything
//! else is owned by the backend. [`KeyValueStore`] is the seam that lets the
//! same session logic run against browser `localStorage`
//! ([`crate::LocalStore`]), a directory of files on native targets
//! ([`crate::FileStore`]) or plain memory in tests ([`crate::MemoryStore`]).
//!
//! Reads never fail: a value that cannot be read is reported as absent.
//! Writes return [`StoreError`] so callers can log storage problems, but the
//! UI keeps working when persistence is unavailable.

use thiserror::Error;

/// Errors raised while writing client-side state.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage is not available in this environment")]
    Unavailable,
    #[error("storage write failed: {0}")]
    Write(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Synchronous string store keyed by name.
///
/// `localStorage` is synchronous, so the trait is too.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
