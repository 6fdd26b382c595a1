use api::models::{build_topic_tree, filter_topics, TopicNode};
use dioxus::prelude::*;
use ui::components::{Badge, BadgeVariant, EmptyState, Input, LoadingScreen};
use ui::icons::{FaBookOpen, FaChevronDown, FaChevronRight, FaMagnifyingGlass};
use ui::{use_client, use_error_reporter, Icon};

use crate::Route;

/// Active topics as a searchable tree.
#[component]
pub fn Topics() -> Element {
    let client = use_client();
    let reporter = use_error_reporter();
    let mut query = use_signal(String::new);

    let topics = use_resource(move || {
        let client = client.clone();
        async move {
            client.topics().list(true).await.unwrap_or_else(|e| {
                reporter.report(&e, "Failed to load topics");
                Vec::new()
            })
        }
    });

    let Some(all) = topics() else {
        return rsx! { LoadingScreen {} };
    };
    // Searching before building keeps matches whose parent was filtered out
    // visible as roots.
    let tree = build_topic_tree(&filter_topics(&all, &query()));
    let empty_message = if query().trim().is_empty() {
        "No topics have been published yet."
    } else {
        "Try a different search term."
    };

    rsx! {
        div {
            class: "page",
            header {
                class: "page-header",
                h1 { "Learning Topics" }
                p { class: "muted", "Explore topics and their learning resources" }
            }
            div {
                class: "search-box",
                Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                Input {
                    placeholder: "Search topics...",
                    value: query(),
                    oninput: move |e: FormEvent| query.set(e.value()),
                }
            }
            if tree.is_empty() {
                EmptyState {
                    title: "No topics found",
                    message: "{empty_message}",
                }
            } else {
                ul {
                    class: "topic-tree",
                    for node in tree {
                        TopicTreeItem { key: "{node.topic.id}", node, level: 0 }
                    }
                }
            }
        }
    }
}

#[component]
fn TopicTreeItem(node: TopicNode, level: usize) -> Element {
    let nav = use_navigator();
    let mut expanded = use_signal(|| true);
    let topic = node.topic.clone();
    let has_children = !node.children.is_empty();
    let id = topic.id;

    rsx! {
        li {
            class: if level > 0 { "topic-node topic-node--nested" } else { "topic-node" },
            div {
                class: "topic-row",
                if has_children {
                    button {
                        class: "btn btn--ghost topic-toggle",
                        title: if expanded() { "Collapse" } else { "Expand" },
                        onclick: move |_| expanded.toggle(),
                        if expanded() {
                            Icon { icon: FaChevronDown, width: 12, height: 12 }
                        } else {
                            Icon { icon: FaChevronRight, width: 12, height: 12 }
                        }
                    }
                }
                div {
                    class: "topic-summary clickable",
                    onclick: move |_| { nav.push(Route::TopicDetail { id }); },
                    Icon { icon: FaBookOpen, width: 16, height: 16 }
                    div {
                        class: "item-main",
                        h3 { "{topic.title}" }
                        if !topic.description.is_empty() {
                            p { class: "muted", "{topic.description}" }
                        }
                    }
                    div {
                        class: "badge-row",
                        Badge { variant: BadgeVariant::Outline, "{topic.resource_count} resources" }
                        if topic.has_quiz || topic.quiz_count > 0 {
                            Badge { variant: BadgeVariant::Info, "{topic.quiz_count} quizzes" }
                        }
                        if has_children {
                            Badge { "{node.children.len()} subtopics" }
                        }
                    }
                }
            }
            if has_children && expanded() {
                ul {
                    class: "topic-tree",
                    for child in node.children.clone() {
                        TopicTreeItem { key: "{child.topic.id}", node: child, level: level + 1 }
                    }
                }
            }
        }
    }
}
