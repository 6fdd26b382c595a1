use api::models::{Quiz, QuizDraft};
use dioxus::prelude::*;
use ui::components::{
    Badge, BadgeVariant, Button, ButtonVariant, ConfirmDialog, EmptyState, Input, LoadingScreen,
    ModalOverlay, Select,
};
use ui::icons::{
    FaCalendar, FaCircleQuestion, FaClipboardList, FaClock, FaMagnifyingGlass, FaPen, FaPlus,
    FaTrash,
};
use ui::time::{format_date, now};
use ui::{use_client, use_error_reporter, use_toast, Icon};

use super::quiz_form::{check_quiz_draft, new_quiz_draft, QuizForm};
use super::topics::toggle_label;
use crate::views::filters::{matches_query, parse_id, StatusFilter};
use crate::Route;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuizFilter {
    pub query: String,
    pub topic_id: Option<i64>,
    pub status: StatusFilter,
}

impl QuizFilter {
    pub fn is_set(&self) -> bool {
        !self.query.trim().is_empty() || self.topic_id.is_some() || self.status != StatusFilter::All
    }

    pub fn apply(&self, quizzes: &[Quiz]) -> Vec<Quiz> {
        quizzes
            .iter()
            .filter(|q| {
                let topic = q.topic_title.as_deref().unwrap_or_default();
                matches_query(&self.query, &[&q.title, &q.description, topic])
                    && self.topic_id.is_none_or(|id| q.topic_id == Some(id))
                    && self.status.matches(q.active)
            })
            .cloned()
            .collect()
    }
}

#[component]
pub fn QuizManagement() -> Element {
    let client = use_client();
    let reporter = use_error_reporter();
    let toast = use_toast();

    let mut filter = use_signal(QuizFilter::default);
    let mut creating = use_signal(|| false);
    let mut deleting = use_signal(|| Option::<i64>::None);
    let mut busy = use_signal(|| false);

    let load_client = client.clone();
    let mut data = use_resource(move || {
        let client = load_client.clone();
        async move {
            let quizzes = client.quizzes().list(false).await;
            let topics = client.topics().list(true).await;
            match (quizzes, topics) {
                (Ok(quizzes), Ok(topics)) => Some((quizzes, topics)),
                (Err(e), _) | (_, Err(e)) => {
                    reporter.report(&e, "Failed to load data");
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
            match client.quizzes().delete(id).await {
                Ok(()) => {
                    toast.success("Quiz deleted successfully");
                    data.restart();
                }
                Err(e) => reporter.report(&e, "Failed to delete quiz"),
            }
            busy.set(false);
            deleting.set(None);
        });
    };

    let on_toggle = use_callback(move |(id, active): (i64, bool)| {
        let client = client.clone();
        spawn(async move {
            let result = if active {
                client.quizzes().deactivate(id).await
            } else {
                client.quizzes().activate(id).await
            };
            match result {
                Ok(()) => {
                    toast.success(if active { "Quiz deactivated" } else { "Quiz activated" });
                    data.restart();
                }
                Err(e) => reporter.report(&e, "Failed to update quiz status"),
            }
        });
    });

    let Some(loaded) = data() else {
        return rsx! { LoadingScreen {} };
    };
    let (quizzes, topics) = loaded.unwrap_or_default();
    let current = filter();
    let visible = current.apply(&quizzes);
    let mut topic_options = vec![("all".to_string(), "All Topics".to_string())];
    topic_options.extend(topics.iter().map(|t| (t.id.to_string(), t.title.clone())));
    let topic_value = current
        .topic_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "all".to_string());

    rsx! {
        div {
            class: "page",
            header {
                class: "page-header page-header--actions",
                div {
                    h1 { "Quiz Management" }
                    p { class: "muted", "Create and manage quizzes for your topics" }
                }
                Button {
                    onclick: move |_| creating.set(true),
                    Icon { icon: FaPlus, width: 14, height: 14 }
                    " Create Quiz"
                }
            }

            div {
                class: "filter-bar",
                div {
                    class: "search-box",
                    Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                    Input {
                        placeholder: "Search quizzes...",
                        value: current.query.clone(),
                        oninput: move |e: FormEvent| filter.write().query = e.value(),
                    }
                }
                Select {
                    value: topic_value,
                    options: topic_options,
                    onchange: move |e: FormEvent| filter.write().topic_id = parse_id(&e.value()),
                }
                Select {
                    value: "{current.status.key()}",
                    options: StatusFilter::options(),
                    onchange: move |e: FormEvent| filter.write().status = StatusFilter::from_key(&e.value()),
                }
            }
            if current.is_set() {
                div {
                    class: "filter-summary",
                    span { class: "muted", "Showing {visible.len()} of {quizzes.len()} quizzes" }
                    Button {
                        variant: ButtonVariant::Ghost,
                        onclick: move |_| filter.set(QuizFilter::default()),
                        "Clear filters"
                    }
                }
            }

            if visible.is_empty() {
                if current.is_set() {
                    EmptyState { title: "No quizzes match your filters", message: "Try adjusting your search or filters" }
                } else {
                    EmptyState { title: "No quizzes yet", message: "Create your first quiz to get started" }
                }
            } else {
                div {
                    class: "item-list",
                    for quiz in visible {
                        ManagedQuizCard {
                            key: "{quiz.id}",
                            quiz,
                            on_toggle: move |pair| on_toggle.call(pair),
                            on_delete: move |id| deleting.set(Some(id)),
                        }
                    }
                }
            }

            if creating() {
                CreateQuizDialog {
                    topics: topics.clone(),
                    on_close: move |_| creating.set(false),
                }
            }

            if deleting().is_some() {
                ConfirmDialog {
                    title: "Delete Quiz?",
                    message: "This action cannot be undone. This will permanently delete the quiz and all its questions.",
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
fn ManagedQuizCard(
    quiz: Quiz,
    on_toggle: EventHandler<(i64, bool)>,
    on_delete: EventHandler<i64>,
) -> Element {
    let nav = use_navigator();
    let id = quiz.id;
    let active = quiz.active;

    rsx! {
        div {
            class: "card item",
            span { class: "resource-icon", Icon { icon: FaClipboardList, width: 20, height: 20 } }
            div {
                class: "item-main",
                div {
                    class: "badge-row",
                    strong { "{quiz.title}" }
                    if active {
                        Badge { variant: BadgeVariant::Success, "Active" }
                    } else {
                        Badge { variant: BadgeVariant::Outline, "Inactive" }
                    }
                }
                if let Some(topic) = quiz.topic_title.clone() {
                    p { class: "accent", "{topic}" }
                }
                p { class: "muted", "{quiz.description}" }
                div {
                    class: "meta-row",
                    span { Icon { icon: FaClock, width: 12, height: 12 } " {quiz.duration_minutes} min" }
                    span { Icon { icon: FaCircleQuestion, width: 12, height: 12 } " {quiz.total_questions()} questions" }
                    if let Some(start) = quiz.start_time {
                        span { Icon { icon: FaCalendar, width: 12, height: 12 } " {format_date(start)}" }
                    }
                    Badge { variant: BadgeVariant::Outline, "Pass: {quiz.passing_score}%" }
                }
                div {
                    class: "item-actions item-actions--row",
                    Button {
                        onclick: move |_| { nav.push(Route::QuizQuestions { quiz_id: id }); },
                        Icon { icon: FaCircleQuestion, width: 14, height: 14 }
                        " Manage Questions"
                    }
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| { nav.push(Route::QuizEdit { id }); },
                        Icon { icon: FaPen, width: 14, height: 14 }
                        " Edit Quiz"
                    }
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_toggle.call((id, active)),
                        "{toggle_label(active)}"
                    }
                    Button {
                        variant: ButtonVariant::Destructive,
                        onclick: move |_| on_delete.call(id),
                        Icon { icon: FaTrash, width: 14, height: 14 }
                        " Delete"
                    }
                }
            }
        }
    }
}

#[component]
fn CreateQuizDialog(topics: Vec<api::models::Topic>, on_close: EventHandler<()>) -> Element {
    let client = use_client();
    let reporter = use_error_reporter();
    let toast = use_toast();
    let nav = use_navigator();
    let draft = use_signal(|| new_quiz_draft(now()));
    let mut saving = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let body: QuizDraft = draft();
        if let Err(message) = check_quiz_draft(&body) {
            toast.error(message);
            return;
        }
        let client = client.clone();
        spawn(async move {
            saving.set(true);
            match client.quizzes().create(&body).await {
                Ok(quiz) => {
                    tracing::info!("Created quiz {}", quiz.id);
                    toast.success("Quiz created successfully! Now add questions to it.");
                    nav.push(Route::QuizQuestions { quiz_id: quiz.id });
                }
                Err(e) => reporter.report(&e, "Failed to create quiz"),
            }
            saving.set(false);
        });
    };

    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            wide: true,
            form {
                class: "form modal-body",
                onsubmit,
                h2 { class: "modal-title", "Create New Quiz" }
                p { class: "muted", "Set up the quiz details. You can add questions after creating." }
                QuizForm { draft, topics, disabled: saving() }
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
                        if saving() { "Creating..." } else { "Create Quiz" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quizzes() -> Vec<Quiz> {
        serde_json::from_str(
            r#"[
            {"id":1,"title":"Ownership","description":"Moves and borrows","topicId":1,"topicTitle":"Rust",
             "durationMinutes":20,"passingScore":70,"active":true},
            {"id":2,"title":"Goroutines","description":"","topicId":2,"topicTitle":"Go",
             "durationMinutes":15,"passingScore":60,"active":false}
        ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_filter_by_topic_title_and_status() {
        let filter = QuizFilter {
            query: "rust".to_string(),
            ..Default::default()
        };
        assert_eq!(filter.apply(&quizzes()).len(), 1);
        assert!(filter.is_set());

        let filter = QuizFilter {
            status: StatusFilter::Inactive,
            ..Default::default()
        };
        let hits = filter.apply(&quizzes());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);
    }

    #[test]
    fn test_default_filter_is_clear() {
        assert!(!QuizFilter::default().is_set());
        assert_eq!(QuizFilter::default().apply(&quizzes()).len(), 2);
    }
}
