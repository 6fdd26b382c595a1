//! # Client configuration - `client.toml`
//!
//! Settings the web client needs before it can talk to the backend.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8080"
//! timeout_secs = 10
//!
//! [ui]
//! toast_duration_secs = 4
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`ClientConfig`] | Top-level config with TOML parsing and the canonical filename. |
//! | [`ApiConfig`] | Backend base URL and request timeout. |
//! | [`UiConfig`] | Toast display duration. |
//!
//! All structs derive or implement `Default`, so a missing or empty file is
//! equivalent to the default configuration. The default base URL can be
//! replaced at build time through the `LEARNHUB_API_BASE_URL` environment
//! variable, which is how web builds point at a deployed backend.

use serde::Deserialize;

/// Base URL used when neither the build nor a config file provides one.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Top-level configuration stored in `client.toml`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Backend connection settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout. Only enforced on native targets.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Presentation settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_toast_duration")]
    pub toast_duration_secs: u32,
}

fn default_base_url() -> String {
    option_env!("LEARNHUB_API_BASE_URL")
        .unwrap_or(DEFAULT_API_BASE_URL)
        .trim_end_matches('/')
        .to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_toast_duration() -> u32 {
    4
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_duration_secs: default_toast_duration(),
        }
    }
}

impl ClientConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "client.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(s)?;
        config.api.base_url = config.api.base_url.trim_end_matches('/').to_string();
        // reqwest treats a zero timeout as already elapsed.
        config.api.timeout_secs = config.api.timeout_secs.max(1);
        Ok(config)
    }

    /// Load the configuration for the current platform.
    ///
    /// Native targets read `<config_dir>/learnhub/client.toml` when it exists;
    /// a malformed file is logged and ignored. Web builds always use the
    /// build-time defaults.
    pub fn load() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        {
            let Some(path) = dirs::config_dir().map(|d| d.join("learnhub").join(Self::filename()))
            else {
                return Self::default();
            };
            match std::fs::read_to_string(&path) {
                Ok(text) => match Self::from_toml(&text) {
                    Ok(config) => config,
                    Err(e) => {
                        tracing::warn!("Ignoring invalid {}: {}", path.display(), e);
                        Self::default()
                    }
                },
                Err(_) => Self::default(),
            }
        }
        #[cfg(target_arch = "wasm32")]
        {
            Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = ClientConfig::from_toml("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.ui.toast_duration_secs, 4);
    }

    #[test]
    fn test_partial_sections() {
        let config = ClientConfig::from_toml(
            r#"
            [api]
            base_url = "https://lms.example.com/"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://lms.example.com");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.ui, UiConfig::default());
    }

    #[test]
    fn test_full_file() {
        let config = ClientConfig::from_toml(
            r#"
            [api]
            base_url = "http://10.0.0.2:9000/"
            timeout_secs = 3

            [ui]
            toast_duration_secs = 6
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://10.0.0.2:9000");
        assert_eq!(config.api.timeout_secs, 3);
        assert_eq!(config.ui.toast_duration_secs, 6);
    }

    #[test]
    fn test_zero_timeout_is_raised_to_one_second() {
        let config = ClientConfig::from_toml("[api]\ntimeout_secs = 0").unwrap();
        assert_eq!(config.api.timeout_secs, 1);
    }

    #[test]
    fn test_invalid_type_is_error() {
        assert!(ClientConfig::from_toml("[api]\ntimeout_secs = \"ten\"").is_err());
    }
}
