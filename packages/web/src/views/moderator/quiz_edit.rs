use api::models::{Question, Quiz, QuizDraft, Topic};
use dioxus::prelude::*;
use ui::components::{Badge, BadgeVariant, Button, ButtonVariant, Card, ConfirmDialog, LoadingScreen};
use ui::icons::{FaArrowLeft, FaFloppyDisk, FaPen, FaPlus, FaTriangleExclamation, FaXmark};
use ui::{use_client, use_error_reporter, use_toast, Icon};

use super::quiz_form::QuizForm;
use crate::Route;

#[derive(Debug, Clone, PartialEq)]
struct EditData {
    quiz: Quiz,
    topics: Vec<Topic>,
    questions: Vec<Question>,
}

/// Whether the form differs from what was loaded.
pub fn has_changes(original: &Quiz, draft: &QuizDraft) -> bool {
    QuizDraft::from_quiz(original) != *draft
}

#[component]
pub fn QuizEdit(id: i64) -> Element {
    let client = use_client();
    let reporter = use_error_reporter();
    let nav = use_navigator();

    let data = use_resource(use_reactive!(|id| {
        let client = client.clone();
        async move {
            let loaded = async {
                let quiz = client.quizzes().get(id).await?;
                let topics = client.topics().list(true).await?;
                let mut questions = client.questions().list(id).await?;
                questions.sort_by_key(|q| q.display_order);
                Ok::<_, api::ApiError>(EditData {
                    quiz,
                    topics,
                    questions,
                })
            }
            .await;
            match loaded {
                Ok(data) => Some(data),
                Err(e) => {
                    reporter.report(&e, "Failed to load quiz");
                    nav.replace(Route::QuizManagement {});
                    None
                }
            }
        }
    }));

    match data() {
        Some(Some(loaded)) => rsx! {
            QuizEditor {
                key: "{loaded.quiz.id}",
                quiz: loaded.quiz,
                topics: loaded.topics,
                questions: loaded.questions,
            }
        },
        _ => rsx! { LoadingScreen {} },
    }
}

#[component]
fn QuizEditor(quiz: Quiz, topics: Vec<Topic>, questions: Vec<Question>) -> Element {
    let client = use_client();
    let reporter = use_error_reporter();
    let toast = use_toast();
    let nav = use_navigator();
    let id = quiz.id;

    let original = quiz.clone();
    let draft = use_signal(|| QuizDraft::from_quiz(&original));
    let mut saving = use_signal(|| false);
    let mut confirm_leave = use_signal(|| false);

    let changed = has_changes(&quiz, &draft.read());

    let on_save = move |_| {
        let body = draft();
        if let Err(message) = body.validate() {
            toast.error(message);
            return;
        }
        let client = client.clone();
        spawn(async move {
            saving.set(true);
            match client.quizzes().update(id, &body).await {
                Ok(_) => {
                    toast.success("Quiz updated successfully");
                    nav.push(Route::QuizManagement {});
                }
                Err(e) => reporter.report(&e, "Failed to update quiz"),
            }
            saving.set(false);
        });
    };

    let on_cancel = move |_| {
        if changed {
            confirm_leave.set(true);
        } else {
            nav.push(Route::QuizManagement {});
        }
    };

    rsx! {
        div {
            class: "page page--narrow",
            header {
                class: "page-header",
                Button {
                    variant: ButtonVariant::Ghost,
                    onclick: on_cancel,
                    Icon { icon: FaArrowLeft, width: 14, height: 14 }
                    " Back"
                }
                h1 { "Edit Quiz" }
                p { class: "muted", "Update quiz settings" }
            }

            Card {
                title: "Quiz Details",
                div {
                    class: "form",
                    QuizForm { draft, topics, disabled: saving() }
                }
            }

            Card {
                title: "Questions ({questions.len()})",
                description: "Questions are managed separately. Use \"Manage Questions\" to add or edit them.",
                if questions.is_empty() {
                    div {
                        class: "empty-state",
                        Icon { icon: FaTriangleExclamation, width: 32, height: 32 }
                        h3 { "No questions added yet" }
                        p { "Questions for this quiz are managed separately" }
                        Button {
                            onclick: move |_| { nav.push(Route::QuizQuestions { quiz_id: id }); },
                            Icon { icon: FaPlus, width: 14, height: 14 }
                            " Manage Questions"
                        }
                    }
                } else {
                    div {
                        class: "item-list",
                        for (index, question) in questions.iter().enumerate() {
                            div {
                                key: "{question.id}",
                                class: "item",
                                Badge { variant: BadgeVariant::Outline, "Q{index + 1}" }
                                div {
                                    class: "item-main",
                                    p { "{question.question_text}" }
                                    p { class: "muted", "{question.points} point(s)" }
                                }
                            }
                        }
                    }
                    Button {
                        variant: ButtonVariant::Outline,
                        class: "btn--block",
                        onclick: move |_| { nav.push(Route::QuizQuestions { quiz_id: id }); },
                        Icon { icon: FaPen, width: 14, height: 14 }
                        " Manage Questions"
                    }
                }
            }

            div {
                class: "sticky-actions",
                Button {
                    variant: ButtonVariant::Outline,
                    disabled: saving(),
                    onclick: on_cancel,
                    Icon { icon: FaXmark, width: 14, height: 14 }
                    " Cancel"
                }
                Button {
                    disabled: saving() || !changed,
                    onclick: on_save,
                    Icon { icon: FaFloppyDisk, width: 14, height: 14 }
                    if saving() { " Saving..." } else { " Save Changes" }
                }
            }

            if confirm_leave() {
                ConfirmDialog {
                    title: "Unsaved Changes",
                    message: "You have unsaved changes. Are you sure you want to leave? All changes will be lost.",
                    confirm_label: "Discard Changes",
                    cancel_label: "Continue Editing",
                    destructive: true,
                    on_confirm: move |_| {
                        confirm_leave.set(false);
                        nav.push(Route::QuizManagement {});
                    },
                    on_cancel: move |_| confirm_leave.set(false),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_detection() {
        let quiz: Quiz = serde_json::from_str(
            r#"{"id":9,"title":"Lifetimes","description":"Borrow checker","topicId":2,
                "durationMinutes":20,"passingScore":75,"active":true}"#,
        )
        .unwrap();
        let mut draft = QuizDraft::from_quiz(&quiz);
        assert!(!has_changes(&quiz, &draft));

        draft.passing_score = 80;
        assert!(has_changes(&quiz, &draft));
    }
}
