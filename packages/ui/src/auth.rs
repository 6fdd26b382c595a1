//! Authentication context and hooks for the UI.

use api::models::{Role, User};
use api::ApiError;
use dioxus::prelude::*;
use store::ClientConfig;

use crate::client::{make_client, AppClient};
use crate::toast::{use_toast, Toaster};

/// Authentication state for the application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
}

impl AuthState {
    pub fn signed_in(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.id)
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    /// Whether the signed-in user holds one of `roles`. An empty list admits
    /// any signed-in user.
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        match self.role() {
            Some(role) => roles.is_empty() || role.is_any_of(roles),
            None => false,
        }
    }

    pub fn is_staff(&self) -> bool {
        self.role().is_some_and(Role::is_staff)
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that loads the [`ClientConfig`], builds the API client
/// and restores the stored session. Wrap the app with this component.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let config = use_context_provider(ClientConfig::load);
    let built = use_hook(|| make_client(&config).map_err(|e| e.to_string()));

    let client = match built {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to create API client: {}", e);
            return rsx! {
                div { class: "fatal-error", "Unable to start the application: {e}" }
            };
        }
    };

    let restored = use_hook(|| restore(&client));
    use_context_provider(|| client);
    use_context_provider(|| Signal::new(restored));

    rsx! {
        {children}
    }
}

fn restore(client: &AppClient) -> AuthState {
    let session = client.session();
    if !session.is_authenticated() {
        return AuthState::default();
    }
    match session.user() {
        Some(user) => {
            tracing::info!("Restored session for {}", user.username);
            AuthState::signed_in(user)
        }
        None => AuthState::default(),
    }
}

/// Clear the stored session and mark the app signed out.
pub fn sign_out(client: &AppClient, auth: &mut Signal<AuthState>) {
    if let Err(e) = client.auth().logout() {
        tracing::warn!("Failed to clear stored session: {}", e);
    }
    auth.set(AuthState::default());
}

/// Turns request failures into toasts. A [`ApiError::SessionExpired`] also
/// signs the app out, which sends guarded routes back to the login page.
#[derive(Clone, Copy)]
pub struct ErrorReporter {
    auth: Signal<AuthState>,
    toast: Toaster,
}

impl ErrorReporter {
    pub fn report(mut self, error: &ApiError, fallback: &str) {
        if *error == ApiError::SessionExpired {
            if self.auth.peek().is_authenticated() {
                self.auth.set(AuthState::default());
                self.toast.info(error.user_message(fallback));
            }
            return;
        }
        tracing::warn!("{}: {}", fallback, error);
        self.toast.error(error.user_message(fallback));
    }

    pub fn toast(&self) -> Toaster {
        self.toast
    }
}

pub fn use_error_reporter() -> ErrorReporter {
    ErrorReporter {
        auth: use_auth(),
        toast: use_toast(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str) -> User {
        serde_json::from_str(&format!(
            r#"{{"id":9,"email":"a@b.c","username":"ada","role":"{role}"}}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_role_checks() {
        let signed_out = AuthState::default();
        assert!(!signed_out.has_any_role(&[]));
        assert!(!signed_out.is_staff());

        let learner = AuthState::signed_in(user("USER"));
        assert!(learner.has_any_role(&[]));
        assert!(!learner.has_any_role(&[Role::Admin, Role::Moderator]));
        assert_eq!(learner.user_id(), Some(9));

        let moderator = AuthState::signed_in(user("MODERATOR"));
        assert!(moderator.is_staff());
        assert!(moderator.has_any_role(&Role::STAFF));
        assert!(!moderator.has_any_role(&[Role::Admin]));
    }
}
