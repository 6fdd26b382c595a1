//! Signed-in shell and the role-gated layouts nested inside it.

use api::models::Role;
use dioxus::prelude::*;
use ui::components::EmptyState;
use ui::{sign_out, use_auth, use_client, use_toast, NavMenu, TopBar};

use crate::guard::{access, Access, ADMIN};
use crate::Route;

/// Top bar, role-filtered sidebar and the routed page. Anyone not signed in
/// is sent to the login page.
#[component]
pub fn AppLayout() -> Element {
    let mut auth = use_auth();
    let client = use_client();
    let toast = use_toast();
    let nav = use_navigator();
    let route = use_route::<Route>();
    let mut menu_open = use_signal(|| false);

    let Some(user) = auth().user else {
        nav.replace(Route::Login {});
        return rsx! {};
    };

    let go = move |path: String| {
        menu_open.set(false);
        nav.push(path);
    };

    let on_logout = move |_| {
        sign_out(&client, &mut auth);
        toast.success("Logged out successfully");
        nav.replace(Route::Login {});
    };

    rsx! {
        div {
            class: "app-shell",
            TopBar {
                user: user.clone(),
                on_toggle_menu: move |_| menu_open.toggle(),
                on_navigate: go,
                on_logout,
            }
            div {
                class: "app-body",
                aside {
                    class: if menu_open() { "sidebar sidebar--open" } else { "sidebar" },
                    NavMenu {
                        role: user.role,
                        current_path: route.to_string(),
                        on_navigate: go,
                    }
                }
                if menu_open() {
                    div { class: "sidebar-scrim", onclick: move |_| menu_open.set(false) }
                }
                main {
                    class: "app-main",
                    Outlet::<Route> {}
                }
            }
        }
    }
}

/// Moderator and admin pages.
#[component]
pub fn StaffOnly() -> Element {
    let auth = use_auth();
    let decision = access(&auth.read(), &Role::STAFF);
    gate(decision)
}

/// Admin-only pages.
#[component]
pub fn AdminOnly() -> Element {
    let auth = use_auth();
    let decision = access(&auth.read(), ADMIN);
    gate(decision)
}

fn gate(decision: Access) -> Element {
    match decision {
        Access::Granted => rsx! { Outlet::<Route> {} },
        Access::Denied => rsx! { AccessDenied {} },
        // AppLayout above already redirects
        Access::SignedOut => rsx! {},
    }
}

#[component]
fn AccessDenied() -> Element {
    rsx! {
        div {
            class: "page",
            EmptyState {
                title: "Access denied",
                message: "You do not have permission to view this page.",
            }
        }
    }
}
