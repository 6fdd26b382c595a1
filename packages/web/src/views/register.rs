//! Account registration page.

use api::models::RegisterRequest;
use dioxus::prelude::*;
use ui::components::{Button, Input, Label};
use ui::icons::FaGraduationCap;
use ui::{use_auth, use_client, use_toast, AuthState, Icon};

use crate::Route;

#[component]
pub fn Register() -> Element {
    let mut auth = use_auth();
    let client = use_client();
    let toast = use_toast();
    let nav = use_navigator();

    let mut form = use_signal(RegisterRequest::default);
    let mut confirm = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    if auth().is_authenticated() {
        nav.replace(Route::Dashboard {});
        return rsx! {};
    }

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let request = form();
        if let Err(message) = request.validate(&confirm()) {
            error.set(Some(message));
            return;
        }
        error.set(None);
        let client = client.clone();
        spawn(async move {
            loading.set(true);
            match client.auth().register(&request).await {
                Ok(response) => {
                    auth.set(AuthState::signed_in(response.user));
                    toast.success("Registration successful!");
                    nav.replace(Route::Dashboard {});
                }
                Err(e) => {
                    tracing::warn!("Registration failed: {}", e);
                    error.set(Some(e.user_message("Registration failed. Please try again")));
                }
            }
            loading.set(false);
        });
    };

    let current = form();

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "card auth-card",
                div {
                    class: "auth-header",
                    span { class: "auth-logo", Icon { icon: FaGraduationCap, width: 32, height: 32 } }
                    h1 { "Create an account" }
                    p { class: "muted", "Join LearnHub and start learning" }
                }
                form {
                    class: "form",
                    onsubmit,
                    if let Some(message) = error() {
                        div { class: "form-error", "{message}" }
                    }
                    div {
                        class: "form-row",
                        div {
                            class: "field",
                            Label { html_for: "first-name", "First name" }
                            Input {
                                id: "first-name",
                                value: current.first_name.clone(),
                                disabled: loading(),
                                oninput: move |e: FormEvent| form.write().first_name = e.value(),
                            }
                        }
                        div {
                            class: "field",
                            Label { html_for: "last-name", "Last name" }
                            Input {
                                id: "last-name",
                                value: current.last_name.clone(),
                                disabled: loading(),
                                oninput: move |e: FormEvent| form.write().last_name = e.value(),
                            }
                        }
                    }
                    div {
                        class: "field",
                        Label { html_for: "username", "Username" }
                        Input {
                            id: "username",
                            value: current.username.clone(),
                            disabled: loading(),
                            oninput: move |e: FormEvent| form.write().username = e.value(),
                        }
                    }
                    div {
                        class: "field",
                        Label { html_for: "email", "Email" }
                        Input {
                            id: "email",
                            input_type: "email",
                            value: current.email.clone(),
                            disabled: loading(),
                            oninput: move |e: FormEvent| form.write().email = e.value(),
                        }
                    }
                    div {
                        class: "field",
                        Label { html_for: "phone", "Phone number (optional)" }
                        Input {
                            id: "phone",
                            input_type: "tel",
                            value: current.phone_number.clone(),
                            disabled: loading(),
                            oninput: move |e: FormEvent| form.write().phone_number = e.value(),
                        }
                    }
                    div {
                        class: "field",
                        Label { html_for: "password", "Password" }
                        Input {
                            id: "password",
                            input_type: "password",
                            value: current.password.clone(),
                            disabled: loading(),
                            oninput: move |e: FormEvent| form.write().password = e.value(),
                        }
                    }
                    div {
                        class: "field",
                        Label { html_for: "confirm", "Confirm password" }
                        Input {
                            id: "confirm",
                            input_type: "password",
                            value: confirm(),
                            disabled: loading(),
                            oninput: move |e: FormEvent| confirm.set(e.value()),
                        }
                    }
                    Button {
                        class: "btn--block",
                        submit: true,
                        disabled: loading(),
                        if loading() { "Creating account..." } else { "Sign Up" }
                    }
                }
                p {
                    class: "auth-footer",
                    span { class: "muted", "Already have an account? " }
                    Link { to: Route::Login {}, "Sign in" }
                }
            }
        }
    }
}
