use api::models::{Topic, TopicDraft};
use dioxus::prelude::*;
use ui::components::{
    Badge, BadgeVariant, Button, ButtonVariant, Checkbox, ConfirmDialog, EmptyState, Input,
    Label, LoadingScreen, ModalOverlay, Select, Textarea,
};
use ui::icons::{FaBookOpen, FaMagnifyingGlass, FaPen, FaPlus, FaToggleOff, FaToggleOn, FaTrash};
use ui::time::format_optional;
use ui::{use_client, use_error_reporter, use_toast, Icon};

use crate::views::filters::{matches_query, StatusFilter};

pub fn filter_managed_topics(topics: &[Topic], query: &str, status: StatusFilter) -> Vec<Topic> {
    topics
        .iter()
        .filter(|t| status.matches(t.active) && matches_query(query, &[&t.title, &t.description]))
        .cloned()
        .collect()
}

/// Root topics a topic may be nested under. A topic cannot be its own parent.
pub fn parent_options(topics: &[Topic], editing: Option<i64>) -> Vec<(String, String)> {
    let mut options = vec![("none".to_string(), "No parent (Root topic)".to_string())];
    options.extend(
        topics
            .iter()
            .filter(|t| t.parent_topic_id.is_none() && Some(t.id) != editing)
            .map(|t| (t.id.to_string(), t.title.clone())),
    );
    options
}

pub fn toggle_label(active: bool) -> &'static str {
    if active {
        "Deactivate"
    } else {
        "Activate"
    }
}

#[derive(Debug, Clone, PartialEq)]
struct TopicEditor {
    id: Option<i64>,
    draft: TopicDraft,
}

#[component]
pub fn TopicManagement() -> Element {
    let client = use_client();
    let reporter = use_error_reporter();
    let toast = use_toast();

    let mut query = use_signal(String::new);
    let mut status = use_signal(StatusFilter::default);
    let mut editor = use_signal(|| Option::<TopicEditor>::None);
    let mut deleting = use_signal(|| Option::<i64>::None);
    let mut busy = use_signal(|| false);

    let load_client = client.clone();
    let mut topics = use_resource(move || {
        let client = load_client.clone();
        async move {
            client.topics().list(false).await.unwrap_or_else(|e| {
                reporter.report(&e, "Failed to load topics");
                Vec::new()
            })
        }
    });

    let delete_client = client.clone();
    let on_delete = move |_| {
        let Some(id) = deleting() else {
            return;
        };
        let client = delete_client.clone();
        spawn(async move {
            busy.set(true);
            match client.topics().delete(id).await {
                Ok(()) => {
                    toast.success("Topic deleted successfully");
                    topics.restart();
                }
                Err(e) => reporter.report(&e, "Failed to delete topic"),
            }
            busy.set(false);
            deleting.set(None);
        });
    };

    let on_toggle = use_callback(move |topic: Topic| {
        let client = client.clone();
        spawn(async move {
            let result = if topic.active {
                client.topics().deactivate(topic.id).await
            } else {
                let draft = TopicDraft {
                    active: Some(true),
                    ..TopicDraft::from_topic(&topic)
                };
                client.topics().update(topic.id, &draft).await.map(|_| ())
            };
            match result {
                Ok(()) => {
                    toast.success(if topic.active { "Topic deactivated" } else { "Topic activated" });
                    topics.restart();
                }
                Err(e) => reporter.report(&e, "Failed to update topic status"),
            }
        });
    });

    let Some(all) = topics() else {
        return rsx! { LoadingScreen {} };
    };
    let visible = filter_managed_topics(&all, &query(), status());

    rsx! {
        div {
            class: "page",
            header {
                class: "page-header page-header--actions",
                div {
                    h1 { "Topic Management" }
                    p { class: "muted", "Create and manage learning topics" }
                }
                Button {
                    onclick: move |_| editor.set(Some(TopicEditor { id: None, draft: TopicDraft::default() })),
                    Icon { icon: FaPlus, width: 14, height: 14 }
                    " Add Topic"
                }
            }

            div {
                class: "filter-bar",
                div {
                    class: "search-box",
                    Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                    Input {
                        placeholder: "Search topics...",
                        value: query(),
                        oninput: move |e: FormEvent| query.set(e.value()),
                    }
                }
                Select {
                    value: "{status().key()}",
                    options: StatusFilter::options(),
                    onchange: move |e: FormEvent| status.set(StatusFilter::from_key(&e.value())),
                }
            }

            if visible.is_empty() {
                EmptyState {
                    title: "No topics yet",
                    message: "Create your first topic to get started",
                }
            } else {
                div {
                    class: "item-list",
                    for topic in visible {
                        div {
                            key: "{topic.id}",
                            class: "card item",
                            span { class: "resource-icon", Icon { icon: FaBookOpen, width: 20, height: 20 } }
                            div {
                                class: "item-main",
                                div {
                                    class: "badge-row",
                                    strong { "{topic.title}" }
                                    if let Some(parent) = topic.parent_topic_title.clone() {
                                        span { class: "muted", "(Subtopic of {parent})" }
                                    } else if topic.parent_topic_id.is_some() {
                                        span { class: "muted", "(Subtopic)" }
                                    }
                                    if !topic.active {
                                        Badge { variant: BadgeVariant::Outline, "Inactive" }
                                    }
                                }
                                p { class: "muted", "{topic.description}" }
                                div {
                                    class: "meta-row",
                                    span { "{topic.resource_count} resources" }
                                    span { "{topic.quiz_count} quizzes" }
                                    span { "Created {format_optional(topic.created_at)}" }
                                }
                            }
                            div {
                                class: "item-actions",
                                Button {
                                    variant: ButtonVariant::Ghost,
                                    title: "{toggle_label(topic.active)}",
                                    onclick: {
                                        let topic = topic.clone();
                                        move |_| on_toggle.call(topic.clone())
                                    },
                                    if topic.active {
                                        Icon { icon: FaToggleOn, width: 16, height: 16 }
                                    } else {
                                        Icon { icon: FaToggleOff, width: 16, height: 16 }
                                    }
                                }
                                Button {
                                    variant: ButtonVariant::Ghost,
                                    title: "Edit",
                                    onclick: {
                                        let topic = topic.clone();
                                        move |_| editor.set(Some(TopicEditor {
                                            id: Some(topic.id),
                                            draft: TopicDraft::from_topic(&topic),
                                        }))
                                    },
                                    Icon { icon: FaPen, width: 14, height: 14 }
                                }
                                Button {
                                    variant: ButtonVariant::Ghost,
                                    title: "Delete",
                                    onclick: move |_| deleting.set(Some(topic.id)),
                                    Icon { icon: FaTrash, width: 14, height: 14 }
                                }
                            }
                        }
                    }
                }
            }

            if let Some(current) = editor() {
                TopicDialog {
                    editing: current.id,
                    initial: current.draft,
                    parents: parent_options(&all, current.id),
                    on_close: move |_| editor.set(None),
                    on_saved: move |_| {
                        editor.set(None);
                        topics.restart();
                    },
                }
            }

            if deleting().is_some() {
                ConfirmDialog {
                    title: "Delete Topic?",
                    message: "This action cannot be undone. This will permanently delete the topic and all associated resources.",
                    confirm_label: "Delete",
                    destructive: true,
                    busy: busy(),
                    on_confirm: on_delete,
                    on_cancel: move |_| deleting.set(None),
                }
            }
        }
    }
}

#[component]
fn TopicDialog(
    editing: Option<i64>,
    initial: TopicDraft,
    parents: Vec<(String, String)>,
    on_close: EventHandler<()>,
    on_saved: EventHandler<()>,
) -> Element {
    let client = use_client();
    let reporter = use_error_reporter();
    let toast = use_toast();
    let mut draft = use_signal(|| initial.clone());
    let mut saving = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let body = draft();
        if let Err(message) = body.validate() {
            toast.error(message);
            return;
        }
        let client = client.clone();
        spawn(async move {
            saving.set(true);
            let result = match editing {
                Some(id) => client.topics().update(id, &body).await,
                None => client.topics().create(&body).await,
            };
            saving.set(false);
            match result {
                Ok(topic) => {
                    tracing::info!("Saved topic {}", topic.id);
                    toast.success(if editing.is_some() {
                        "Topic updated successfully"
                    } else {
                        "Topic created successfully"
                    });
                    on_saved.call(());
                }
                Err(e) => reporter.report(&e, "Failed to save topic"),
            }
        });
    };

    let current = draft();
    let parent_value = current
        .parent_topic_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "none".to_string());

    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            form {
                class: "form modal-body",
                onsubmit,
                h2 { class: "modal-title", if editing.is_some() { "Edit Topic" } else { "Create New Topic" } }
                p {
                    class: "muted",
                    if editing.is_some() { "Update topic information" } else { "Add a new topic to the learning platform" }
                }
                div {
                    class: "field",
                    Label { html_for: "topic-title", "Title" }
                    Input {
                        id: "topic-title",
                        placeholder: "Topic title",
                        value: current.title.clone(),
                        disabled: saving(),
                        oninput: move |e: FormEvent| draft.write().title = e.value(),
                    }
                }
                div {
                    class: "field",
                    Label { html_for: "topic-description", "Description" }
                    Textarea {
                        id: "topic-description",
                        placeholder: "Describe what this topic covers...",
                        value: current.description.clone().unwrap_or_default(),
                        disabled: saving(),
                        oninput: move |e: FormEvent| draft.write().description = Some(e.value()),
                    }
                }
                div {
                    class: "field",
                    Label { html_for: "topic-parent", "Parent Topic (Optional)" }
                    Select {
                        id: "topic-parent",
                        value: parent_value,
                        options: parents,
                        disabled: saving(),
                        onchange: move |e: FormEvent| {
                            draft.write().parent_topic_id = e.value().parse().ok();
                        },
                    }
                }
                div {
                    class: "form-row",
                    div {
                        class: "field",
                        Label { html_for: "topic-order", "Display Order" }
                        Input {
                            id: "topic-order",
                            input_type: "number",
                            value: current.display_order.unwrap_or(0).to_string(),
                            disabled: saving(),
                            oninput: move |e: FormEvent| draft.write().display_order = e.value().parse().ok(),
                        }
                    }
                    Checkbox {
                        id: "topic-active",
                        label: "Active",
                        checked: current.active.unwrap_or(true),
                        disabled: saving(),
                        onchange: move |checked| draft.write().active = Some(checked),
                    }
                }
                div {
                    class: "modal-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled: saving(),
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    Button {
                        submit: true,
                        disabled: saving(),
                        if saving() { "Saving..." } else if editing.is_some() { "Update" } else { "Create" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics() -> Vec<Topic> {
        serde_json::from_str(
            r#"[
            {"id":1,"title":"Rust","description":"Systems programming","active":true},
            {"id":2,"title":"Ownership","description":"Borrowing rules","parentTopicId":1,"active":true},
            {"id":3,"title":"Go","description":"Old course","active":false}
        ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_filters_by_status_and_query() {
        let all = topics();
        let inactive = filter_managed_topics(&all, "", StatusFilter::Inactive);
        assert_eq!(inactive.len(), 1);
        assert_eq!(inactive[0].id, 3);

        let hits = filter_managed_topics(&all, "borrow", StatusFilter::All);
        assert_eq!(hits.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_parent_options_skip_children_and_self() {
        let all = topics();
        let values: Vec<String> = parent_options(&all, Some(1)).into_iter().map(|(v, _)| v).collect();
        assert_eq!(values, vec!["none", "3"]);
        assert_eq!(parent_options(&all, None).len(), 3);
    }
}
