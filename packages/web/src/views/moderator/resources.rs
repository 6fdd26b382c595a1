use api::models::{Resource, ResourceDraft, ResourceType, Topic};
use dioxus::prelude::*;
use ui::components::{
    Badge, BadgeVariant, Button, ButtonVariant, Checkbox, ConfirmDialog, EmptyState, Input, Label,
    LoadingScreen, ModalOverlay, Select, Textarea,
};
use ui::icons::{FaArrowUpRightFromSquare, FaMagnifyingGlass, FaPen, FaPlus, FaTrash};
use ui::{use_client, use_error_reporter, use_toast, Icon};

use super::topics::toggle_label;
use crate::views::filters::{matches_query, parse_id, StatusFilter};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResourceFilter {
    pub query: String,
    pub topic_id: Option<i64>,
    pub kind: Option<ResourceType>,
    pub status: StatusFilter,
}

impl ResourceFilter {
    pub fn apply(&self, resources: &[Resource]) -> Vec<Resource> {
        resources
            .iter()
            .filter(|r| {
                matches_query(&self.query, &[&r.title, &r.description])
                    && self.topic_id.is_none_or(|id| r.topic_id == Some(id))
                    && self.kind.is_none_or(|kind| r.kind == kind)
                    && self.status.matches(r.active)
            })
            .cloned()
            .collect()
    }
}

fn blank_resource() -> ResourceDraft {
    ResourceDraft {
        title: String::new(),
        description: String::new(),
        kind: ResourceType::Link,
        url: String::new(),
        topic_id: 0,
        display_order: Some(0),
        active: Some(true),
    }
}

fn type_options(with_all: bool) -> Vec<(String, String)> {
    let mut options = Vec::new();
    if with_all {
        options.push(("all".to_string(), "All Types".to_string()));
    }
    options.extend(
        ResourceType::ALL
            .into_iter()
            .map(|t| (t.as_str().to_string(), t.label().to_string())),
    );
    options
}

fn topic_options(topics: &[Topic], first: (&str, &str)) -> Vec<(String, String)> {
    std::iter::once((first.0.to_string(), first.1.to_string()))
        .chain(topics.iter().map(|t| (t.id.to_string(), t.title.clone())))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
struct ResourceEditor {
    id: Option<i64>,
    draft: ResourceDraft,
}

#[component]
pub fn ResourceManagement() -> Element {
    let client = use_client();
    let reporter = use_error_reporter();
    let toast = use_toast();

    let mut filter = use_signal(ResourceFilter::default);
    let mut editor = use_signal(|| Option::<ResourceEditor>::None);
    let mut deleting = use_signal(|| Option::<i64>::None);
    let mut busy = use_signal(|| false);

    let load_client = client.clone();
    let mut data = use_resource(move || {
        let client = load_client.clone();
        async move {
            let resources = client.resources().list(true, false).await;
            let topics = client.topics().list(false).await;
            match (resources, topics) {
                (Ok(resources), Ok(topics)) => Some((resources, topics)),
                (Err(e), _) | (_, Err(e)) => {
                    reporter.report(&e, "Failed to load resources");
                    None
                }
            }
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
            match client.resources().delete(id).await {
                Ok(()) => {
                    toast.success("Resource deleted successfully");
                    data.restart();
                }
                Err(e) => reporter.report(&e, "Failed to delete resource"),
            }
            busy.set(false);
            deleting.set(None);
        });
    };

    let on_toggle = use_callback(move |(id, active): (i64, bool)| {
        let client = client.clone();
        spawn(async move {
            let result = if active {
                client.resources().deactivate(id).await
            } else {
                client.resources().activate(id).await
            };
            match result {
                Ok(()) => {
                    toast.success(if active { "Resource deactivated" } else { "Resource activated" });
                    data.restart();
                }
                Err(e) => reporter.report(&e, "Failed to update resource status"),
            }
        });
    });

    let Some(loaded) = data() else {
        return rsx! { LoadingScreen {} };
    };
    let (resources, topics) = loaded.unwrap_or_default();
    let current = filter();
    let visible = current.apply(&resources);
    let topic_value = current
        .topic_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "all".to_string());
    let kind_value = current.kind.map(|k| k.as_str()).unwrap_or("all");

    rsx! {
        div {
            class: "page",
            header {
                class: "page-header page-header--actions",
                div {
                    h1 { "Resource Management" }
                    p { class: "muted", "Manage learning materials for each topic" }
                }
                Button {
                    onclick: move |_| editor.set(Some(ResourceEditor { id: None, draft: blank_resource() })),
                    Icon { icon: FaPlus, width: 14, height: 14 }
                    " Add Resource"
                }
            }

            div {
                class: "filter-bar",
                div {
                    class: "search-box",
                    Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                    Input {
                        placeholder: "Search resources...",
                        value: current.query.clone(),
                        oninput: move |e: FormEvent| filter.write().query = e.value(),
                    }
                }
                Select {
                    value: topic_value,
                    options: topic_options(&topics, ("all", "All Topics")),
                    onchange: move |e: FormEvent| filter.write().topic_id = parse_id(&e.value()),
                }
                Select {
                    value: "{kind_value}",
                    options: type_options(true),
                    onchange: move |e: FormEvent| filter.write().kind = ResourceType::parse(&e.value()),
                }
                Select {
                    value: "{current.status.key()}",
                    options: StatusFilter::options(),
                    onchange: move |e: FormEvent| filter.write().status = StatusFilter::from_key(&e.value()),
                }
            }
            p { class: "muted", "Showing {visible.len()} of {resources.len()} resources" }

            if visible.is_empty() {
                EmptyState {
                    title: "No resources found",
                    message: "Add a resource or adjust the filters",
                }
            } else {
                div {
                    class: "item-list",
                    for resource in visible {
                        div {
                            key: "{resource.id}",
                            class: "card item",
                            div {
                                class: "item-main",
                                div {
                                    class: "badge-row",
                                    strong { "{resource.title}" }
                                    Badge { variant: BadgeVariant::Info, "{resource.kind.label()}" }
                                    if !resource.active {
                                        Badge { variant: BadgeVariant::Outline, "Inactive" }
                                    }
                                }
                                if !resource.description.is_empty() {
                                    p { class: "muted", "{resource.description}" }
                                }
                                div {
                                    class: "meta-row",
                                    if let Some(topic) = resource.topic_title.clone() {
                                        span { "{topic}" }
                                    }
                                    span { "Order {resource.display_order}" }
                                    a {
                                        href: "{resource.url}",
                                        target: "_blank",
                                        rel: "noopener noreferrer",
                                        Icon { icon: FaArrowUpRightFromSquare, width: 12, height: 12 }
                                        " Open"
                                    }
                                }
                            }
                            div {
                                class: "item-actions",
                                Button {
                                    variant: ButtonVariant::Outline,
                                    onclick: move |_| on_toggle.call((resource.id, resource.active)),
                                    "{toggle_label(resource.active)}"
                                }
                                Button {
                                    variant: ButtonVariant::Ghost,
                                    title: "Edit",
                                    onclick: {
                                        let resource = resource.clone();
                                        move |_| editor.set(Some(ResourceEditor {
                                            id: Some(resource.id),
                                            draft: ResourceDraft::from_resource(&resource),
                                        }))
                                    },
                                    Icon { icon: FaPen, width: 14, height: 14 }
                                }
                                Button {
                                    variant: ButtonVariant::Ghost,
                                    title: "Delete",
                                    onclick: move |_| deleting.set(Some(resource.id)),
                                    Icon { icon: FaTrash, width: 14, height: 14 }
                                }
                            }
                        }
                    }
                }
            }

            if let Some(open) = editor() {
                ResourceDialog {
                    editing: open.id,
                    initial: open.draft,
                    topics: topics.clone(),
                    on_close: move |_| editor.set(None),
                    on_saved: move |_| {
                        editor.set(None);
                        data.restart();
                    },
                }
            }

            if deleting().is_some() {
                ConfirmDialog {
                    title: "Delete Resource?",
                    message: "This action cannot be undone. The resource will be permanently removed.",
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
fn ResourceDialog(
    editing: Option<i64>,
    initial: ResourceDraft,
    topics: Vec<Topic>,
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
                Some(id) => client.resources().update(id, &body).await,
                None => client.resources().create(&body).await,
            };
            saving.set(false);
            match result {
                Ok(_) => {
                    toast.success(if editing.is_some() {
                        "Resource updated successfully"
                    } else {
                        "Resource created successfully"
                    });
                    on_saved.call(());
                }
                Err(e) => reporter.report(&e, "Failed to save resource"),
            }
        });
    };

    let current = draft();
    let topic_value = if current.topic_id > 0 {
        current.topic_id.to_string()
    } else {
        "none".to_string()
    };

    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            wide: true,
            form {
                class: "form modal-body",
                onsubmit,
                h2 { class: "modal-title", if editing.is_some() { "Edit Resource" } else { "Add New Resource" } }
                div {
                    class: "field",
                    Label { html_for: "resource-title", "Title *" }
                    Input {
                        id: "resource-title",
                        placeholder: "Resource title",
                        value: current.title.clone(),
                        disabled: saving(),
                        oninput: move |e: FormEvent| draft.write().title = e.value(),
                    }
                }
                div {
                    class: "field",
                    Label { html_for: "resource-description", "Description" }
                    Textarea {
                        id: "resource-description",
                        placeholder: "Brief description of the resource",
                        value: current.description.clone(),
                        disabled: saving(),
                        oninput: move |e: FormEvent| draft.write().description = e.value(),
                    }
                }
                div {
                    class: "form-row",
                    div {
                        class: "field",
                        Label { html_for: "resource-type", "Type *" }
                        Select {
                            id: "resource-type",
                            value: "{current.kind.as_str()}",
                            options: type_options(false),
                            disabled: saving(),
                            onchange: move |e: FormEvent| {
                                if let Some(kind) = ResourceType::parse(&e.value()) {
                                    draft.write().kind = kind;
                                }
                            },
                        }
                    }
                    div {
                        class: "field",
                        Label { html_for: "resource-topic", "Topic *" }
                        Select {
                            id: "resource-topic",
                            value: topic_value,
                            options: topic_options(&topics, ("none", "Select topic")),
                            disabled: saving(),
                            onchange: move |e: FormEvent| {
                                draft.write().topic_id = parse_id(&e.value()).unwrap_or(0);
                            },
                        }
                    }
                }
                div {
                    class: "field",
                    Label { html_for: "resource-url", "URL *" }
                    Input {
                        id: "resource-url",
                        input_type: "url",
                        placeholder: "https://...",
                        value: current.url.clone(),
                        disabled: saving(),
                        oninput: move |e: FormEvent| draft.write().url = e.value(),
                    }
                }
                div {
                    class: "form-row",
                    div {
                        class: "field",
                        Label { html_for: "resource-order", "Display Order" }
                        Input {
                            id: "resource-order",
                            input_type: "number",
                            value: current.display_order.unwrap_or(0).to_string(),
                            disabled: saving(),
                            oninput: move |e: FormEvent| draft.write().display_order = e.value().parse().ok(),
                        }
                    }
                    Checkbox {
                        id: "resource-active",
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

    fn resources() -> Vec<Resource> {
        serde_json::from_str(
            r#"[
            {"id":1,"title":"The Book","type":"PDF","url":"https://x/b.pdf","topicId":1,"active":true},
            {"id":2,"title":"Talk","description":"Conference talk","type":"VIDEO","url":"https://x/v","topicId":2,"active":true},
            {"id":3,"title":"Old link","type":"LINK","url":"https://x/o","topicId":1,"active":false}
        ]"#,
        )
        .unwrap()
    }

    fn ids(list: Vec<Resource>) -> Vec<i64> {
        list.into_iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_default_filter_keeps_everything() {
        assert_eq!(ids(ResourceFilter::default().apply(&resources())), vec![1, 2, 3]);
    }

    #[test]
    fn test_filters_combine() {
        let filter = ResourceFilter {
            topic_id: Some(1),
            status: StatusFilter::Active,
            ..Default::default()
        };
        assert_eq!(ids(filter.apply(&resources())), vec![1]);

        let filter = ResourceFilter {
            query: "conference".to_string(),
            kind: Some(ResourceType::Video),
            ..Default::default()
        };
        assert_eq!(ids(filter.apply(&resources())), vec![2]);
    }

    #[test]
    fn test_blank_draft_fails_validation() {
        assert!(blank_resource().validate().is_err());
    }
}
