//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const UI_CSS: Asset = asset!("/assets/ui.css");

mod client;
pub use client::{make_client, use_client, use_config, AppClient, PlatformStore};

mod auth;
pub use auth::{sign_out, use_auth, use_error_reporter, AuthProvider, AuthState, ErrorReporter};

pub mod toast;
pub use toast::{use_toast, ToastLevel, ToastProvider, Toaster};

pub mod nav;
pub use nav::{NavMenu, TopBar, UserBadge};

mod notification_bell;
pub use notification_bell::{notification_path, NotificationBell};

pub mod time;
