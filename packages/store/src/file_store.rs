//! # Filesystem-backed key/value store
//!
//! [`FileStore`] persists each key as a small file. It is used on native
//! targets (desktop runs of the client, tooling) so a login survives restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── session/
//!     ├── authToken
//!     ├── refreshToken
//!     └── authUser
//! ```
//!
//! ## Platform data directories
//!
//! [`FileStore::default_location`] uses [`dirs::data_dir()`]:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/learnhub/` |
//! | Linux | `~/.local/share/learnhub/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\learnhub\` |

use std::path::PathBuf;

use crate::kv::{KeyValueStore, StoreError};

/// Filesystem-backed KeyValueStore for native targets.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    /// Store rooted in the platform data directory, or `./learnhub` when the
    /// platform has none.
    pub fn default_location() -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("learnhub");
        Self::new(base)
    }

    fn session_dir(&self) -> PathBuf {
        self.base.join("session")
    }

    fn key_path(&self, key: &str) -> PathBuf {
        // keys are fixed identifiers, but never let one escape the directory
        let safe: String = key
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
            .collect();
        self.session_dir().join(safe)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(self.session_dir())?;
        std::fs::write(self.key_path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_base(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("learnhub_test_{}_{}", name, std::process::id()))
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = temp_base("roundtrip");
        let _ = std::fs::remove_dir_all(&dir);

        let store = FileStore::new(dir.clone());
        store.set("authToken", "token-1").unwrap();

        // Re-open from same directory
        let reopened = FileStore::new(dir.clone());
        assert_eq!(reopened.get("authToken").as_deref(), Some("token-1"));

        reopened.remove("authToken").unwrap();
        assert!(store.get("authToken").is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_remove_missing_key() {
        let dir = temp_base("missing");
        let _ = std::fs::remove_dir_all(&dir);

        let store = FileStore::new(dir.clone());
        assert!(store.remove("refreshToken").is_ok());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_key_cannot_escape_directory() {
        let store = FileStore::new(PathBuf::from("/tmp/base"));
        let path = store.key_path("../../etc/passwd");
        assert_eq!(path, PathBuf::from("/tmp/base/session/etcpasswd"));
    }
}
