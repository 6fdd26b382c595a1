use api::models::{visible_resources, Resource, ResourceType, Topic};
use api::ApiError;
use dioxus::prelude::*;
use ui::components::{Badge, BadgeVariant, Button, ButtonVariant, Card, EmptyState, LoadingScreen};
use ui::icons::{FaArrowLeft, FaArrowUpRightFromSquare, FaFileLines, FaLink, FaVideo};
use ui::{use_client, use_error_reporter, use_toast, AppClient, Icon};

use crate::Route;

async fn load(client: &AppClient, id: i64) -> Result<(Topic, Vec<Resource>), ApiError> {
    let topic = client.topics().get(id).await?;
    let resources = client.resources().by_topic(id, true, true).await?;
    Ok((topic, visible_resources(&resources)))
}

#[component]
fn ResourceIcon(kind: ResourceType) -> Element {
    match kind {
        ResourceType::Pdf | ResourceType::Document => {
            rsx! { Icon { icon: FaFileLines, width: 20, height: 20 } }
        }
        ResourceType::Link => rsx! { Icon { icon: FaLink, width: 20, height: 20 } },
        ResourceType::Video => rsx! { Icon { icon: FaVideo, width: 20, height: 20 } },
    }
}

/// One topic with its active resources. Resources open in a new tab.
#[component]
pub fn TopicDetail(id: i64) -> Element {
    let client = use_client();
    let reporter = use_error_reporter();
    let toast = use_toast();
    let nav = use_navigator();
    let mut tab = use_signal(|| "resources");

    let data = use_resource(use_reactive!(|id| {
        let client = client.clone();
        async move {
            match load(&client, id).await {
                Ok(data) => Some(data),
                Err(e) => {
                    reporter.report(&e, "Failed to load topic");
                    None
                }
            }
        }
    }));

    let Some(loaded) = data() else {
        return rsx! { LoadingScreen {} };
    };
    let Some((topic, resources)) = loaded else {
        return rsx! {
            div {
                class: "page",
                EmptyState { title: "Topic not found", message: "The topic may have been removed." }
                Button { onclick: move |_| { nav.push(Route::Topics {}); }, "Back to Topics" }
            }
        };
    };

    rsx! {
        div {
            class: "page",
            header {
                class: "page-header",
                Button {
                    variant: ButtonVariant::Ghost,
                    onclick: move |_| { nav.push(Route::Topics {}); },
                    Icon { icon: FaArrowLeft, width: 14, height: 14 }
                    "Back to Topics"
                }
                h1 { "{topic.title}" }
                p { class: "muted", "{topic.description}" }
                div {
                    class: "badge-row",
                    Badge { variant: BadgeVariant::Outline, "{resources.len()} Resources" }
                    Badge { variant: BadgeVariant::Outline, "{topic.quiz_count} Quizzes" }
                }
            }
            div {
                class: "tabs",
                button {
                    class: if tab() == "resources" { "tab tab--active" } else { "tab" },
                    onclick: move |_| tab.set("resources"),
                    "Resources"
                }
                button {
                    class: if tab() == "about" { "tab tab--active" } else { "tab" },
                    onclick: move |_| tab.set("about"),
                    "About"
                }
            }
            if tab() == "resources" {
                if resources.is_empty() {
                    EmptyState {
                        title: "No resources available",
                        message: "Resources will appear here once they are added",
                    }
                } else {
                    div {
                        class: "resource-list",
                        for resource in resources {
                            a {
                                key: "{resource.id}",
                                class: "card resource-card",
                                href: "{resource.url}",
                                target: "_blank",
                                rel: "noopener noreferrer",
                                onclick: move |_| toast.success("Opening resource..."),
                                span { class: "resource-icon", ResourceIcon { kind: resource.kind } }
                                div {
                                    class: "item-main",
                                    h3 { "{resource.title}" }
                                    Badge { "{resource.kind.label()}" }
                                    if !resource.description.is_empty() {
                                        p { class: "muted", "{resource.description}" }
                                    }
                                }
                                Icon { icon: FaArrowUpRightFromSquare, width: 14, height: 14 }
                            }
                        }
                    }
                }
            } else {
                Card {
                    title: "About this Topic",
                    p { "{topic.description}" }
                    if let Some(parent) = topic.parent_topic_title.clone() {
                        p { class: "muted", "Part of: {parent}" }
                    }
                    if !topic.sub_topics.is_empty() {
                        h3 { "Subtopics" }
                        ul {
                            class: "item-list",
                            for sub in topic.sub_topics.clone() {
                                li {
                                    key: "{sub.id}",
                                    class: "item clickable",
                                    onclick: move |_| { nav.push(Route::TopicDetail { id: sub.id }); },
                                    "{sub.title}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
