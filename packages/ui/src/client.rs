//! Shared API client constructor for all platforms.
//!
//! The session lives in a platform-appropriate [`store::KeyValueStore`]:
//! - **Web** (WASM + `web` feature): `localStorage` via [`store::LocalStore`]
//! - **Desktop / tests** (native): files under the data directory via [`store::FileStore`]
//! - **WASM without `web`**: in memory, lost on reload

use api::{ApiClient, ApiError, HttpTransport};
use dioxus::prelude::*;
use store::ClientConfig;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStore = store::LocalStore;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStore = store::FileStore;
#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub type PlatformStore = store::MemoryStore;

/// The client every view talks to.
pub type AppClient = ApiClient<HttpTransport, PlatformStore>;

fn platform_store() -> PlatformStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStore::new()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        store::FileStore::default_location()
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        store::MemoryStore::new()
    }
}

/// Build the client from `config`.
pub fn make_client(config: &ClientConfig) -> Result<AppClient, ApiError> {
    let transport = HttpTransport::new(&config.api)?;
    tracing::debug!("API base URL: {}", transport.base_url());
    Ok(ApiClient::new(transport, platform_store()))
}

/// The client provided by [`AuthProvider`](crate::AuthProvider).
pub fn use_client() -> AppClient {
    use_context::<AppClient>()
}

/// The configuration the app was started with.
pub fn use_config() -> ClientConfig {
    use_context::<ClientConfig>()
}
