//! Login page: username/password and guest sign-in.

use api::models::LoginRequest;
use api::{guest_login_error_message, login_error_message};
use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, Input, Label};
use ui::icons::FaGraduationCap;
use ui::{use_auth, use_client, use_toast, AuthState, Icon};

use crate::Route;

const GUEST_CREDENTIALS: (&str, &str) = ("guest", "guest");

/// Login page component.
#[component]
pub fn Login() -> Element {
    let mut auth = use_auth();
    let client = use_client();
    let toast = use_toast();
    let nav = use_navigator();

    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut loading = use_signal(|| false);

    // Already signed in
    if auth().is_authenticated() {
        nav.replace(Route::Dashboard {});
        return rsx! {};
    }

    let login_client = client.clone();
    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let credentials = LoginRequest {
            username: username().trim().to_string(),
            password: password(),
        };
        if credentials.username.is_empty() || credentials.password.is_empty() {
            toast.error("Please fill in all fields");
            return;
        }
        let client = login_client.clone();
        spawn(async move {
            loading.set(true);
            match client.auth().login(&credentials).await {
                Ok(response) => {
                    auth.set(AuthState::signed_in(response.user));
                    toast.success("Login successful!");
                    nav.replace(Route::Dashboard {});
                }
                Err(e) => {
                    tracing::warn!("Login failed: {}", e);
                    toast.error(login_error_message(&e));
                }
            }
            loading.set(false);
        });
    };

    let on_guest = move |_| {
        let client = client.clone();
        spawn(async move {
            loading.set(true);
            let (username, password) = GUEST_CREDENTIALS;
            let credentials = LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            };
            match client.auth().login(&credentials).await {
                Ok(response) => {
                    auth.set(AuthState::signed_in(response.user));
                    toast.success("Logged in as guest");
                    nav.replace(Route::Dashboard {});
                }
                Err(e) => {
                    tracing::warn!("Guest login failed: {}", e);
                    toast.error(guest_login_error_message(&e));
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "card auth-card",
                div {
                    class: "auth-header",
                    span { class: "auth-logo", Icon { icon: FaGraduationCap, width: 32, height: 32 } }
                    h1 { "Welcome Back" }
                    p { class: "muted", "Sign in to your account to continue learning" }
                }
                form {
                    class: "form",
                    onsubmit,
                    div {
                        class: "field",
                        Label { html_for: "username", "Username" }
                        Input {
                            id: "username",
                            placeholder: "Enter your username",
                            value: username(),
                            disabled: loading(),
                            oninput: move |e: FormEvent| username.set(e.value()),
                        }
                    }
                    div {
                        class: "field",
                        Label { html_for: "password", "Password" }
                        Input {
                            id: "password",
                            input_type: "password",
                            placeholder: "Enter your password",
                            value: password(),
                            disabled: loading(),
                            oninput: move |e: FormEvent| password.set(e.value()),
                        }
                    }
                    Button {
                        class: "btn--block",
                        submit: true,
                        disabled: loading(),
                        if loading() { "Signing in..." } else { "Sign In" }
                    }
                }
                div { class: "divider", span { "Or" } }
                Button {
                    variant: ButtonVariant::Outline,
                    class: "btn--block",
                    disabled: loading(),
                    onclick: on_guest,
                    "Continue as Guest"
                }
                p {
                    class: "auth-footer",
                    span { class: "muted", "Don't have an account? " }
                    Link { to: Route::Register {}, "Sign up" }
                }
            }
        }
    }
}
