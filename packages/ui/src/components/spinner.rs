use dioxus::prelude::*;

#[component]
pub fn Spinner(#[props(default)] label: String) -> Element {
    rsx! {
        div {
            class: "spinner-wrap",
            role: "status",
            div { class: "spinner" }
            if !label.is_empty() {
                span { class: "spinner-label", "{label}" }
            }
        }
    }
}

/// Centered spinner filling the content area while a page loads.
#[component]
pub fn LoadingScreen() -> Element {
    rsx! {
        div { class: "loading-screen", Spinner { label: "Loading..." } }
    }
}
