use dioxus::prelude::*;

#[component]
pub fn Card(
    #[props(default)] title: Option<String>,
    #[props(default)] description: Option<String>,
    #[props(default)] class: String,
    children: Element,
) -> Element {
    rsx! {
        section {
            class: "card {class}",
            if title.is_some() || description.is_some() {
                header {
                    class: "card-header",
                    if let Some(title) = title {
                        h2 { class: "card-title", "{title}" }
                    }
                    if let Some(description) = description {
                        p { class: "card-description", "{description}" }
                    }
                }
            }
            div { class: "card-body", {children} }
        }
    }
}

/// A labelled number on dashboards and result pages.
#[component]
pub fn StatCard(label: String, value: String, #[props(default)] hint: Option<String>) -> Element {
    rsx! {
        div {
            class: "stat-card",
            span { class: "stat-label", "{label}" }
            span { class: "stat-value", "{value}" }
            if let Some(hint) = hint {
                span { class: "stat-hint", "{hint}" }
            }
        }
    }
}

#[component]
pub fn EmptyState(title: String, #[props(default)] message: String) -> Element {
    rsx! {
        div {
            class: "empty-state",
            h3 { "{title}" }
            if !message.is_empty() {
                p { "{message}" }
            }
        }
    }
}
