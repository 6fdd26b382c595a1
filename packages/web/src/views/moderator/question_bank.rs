use api::models::{Question, Quiz};
use api::ApiError;
use dioxus::prelude::*;
use ui::components::{ConfirmDialog, EmptyState, Input, LoadingScreen, Select};
use ui::icons::FaMagnifyingGlass;
use ui::{use_client, use_error_reporter, use_toast, AppClient, Icon};

use super::quiz_questions::{QuestionDialog, QuestionEditor, QuestionRow};
use crate::views::filters::{matches_query, parse_id};

/// A question with the quiz it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct BankEntry {
    pub quiz: Quiz,
    pub question: Question,
}

async fn load_bank(client: &AppClient) -> Result<Vec<BankEntry>, ApiError> {
    let quizzes = client.quizzes().list(false).await?;
    let mut entries = Vec::new();
    for quiz in quizzes {
        let mut questions = client.questions().list(quiz.id).await?;
        questions.sort_by_key(|q| q.display_order);
        entries.extend(questions.into_iter().map(|question| BankEntry {
            quiz: quiz.clone(),
            question,
        }));
    }
    tracing::debug!("Question bank holds {} questions", entries.len());
    Ok(entries)
}

pub fn filter_bank(entries: &[BankEntry], query: &str, quiz_id: Option<i64>) -> Vec<BankEntry> {
    entries
        .iter()
        .filter(|e| {
            let answers: Vec<&str> = e.question.answers.iter().map(|a| a.answer_text.as_str()).collect();
            let mut fields = vec![e.question.question_text.as_str(), e.quiz.title.as_str()];
            fields.extend(answers);
            matches_query(query, &fields) && quiz_id.is_none_or(|id| e.quiz.id == id)
        })
        .cloned()
        .collect()
}

/// Every question across all quizzes.
#[component]
pub fn QuestionBank() -> Element {
    let client = use_client();
    let reporter = use_error_reporter();
    let toast = use_toast();

    let mut query = use_signal(String::new);
    let mut quiz_filter = use_signal(|| Option::<i64>::None);
    let mut editing = use_signal(|| Option::<(Quiz, QuestionEditor)>::None);
    let mut deleting = use_signal(|| Option::<(i64, i64)>::None);
    let mut busy = use_signal(|| false);

    let load_client = client.clone();
    let mut bank = use_resource(move || {
        let client = load_client.clone();
        async move {
            load_bank(&client).await.unwrap_or_else(|e| {
                reporter.report(&e, "Failed to load data");
                Vec::new()
            })
        }
    });

    let on_delete = move |_| {
        let Some((quiz_id, question_id)) = deleting() else {
            return;
        };
        let client = client.clone();
        spawn(async move {
            busy.set(true);
            match client.questions().delete(quiz_id, question_id).await {
                Ok(()) => {
                    toast.success("Question deleted successfully");
                    bank.restart();
                }
                Err(e) => reporter.report(&e, "Failed to delete question"),
            }
            busy.set(false);
            deleting.set(None);
        });
    };

    let Some(entries) = bank() else {
        return rsx! { LoadingScreen {} };
    };
    let visible = filter_bank(&entries, &query(), quiz_filter());

    let mut quiz_options = vec![("all".to_string(), "All Quizzes".to_string())];
    for entry in &entries {
        let value = entry.quiz.id.to_string();
        if !quiz_options.iter().any(|(v, _)| *v == value) {
            quiz_options.push((value, entry.quiz.title.clone()));
        }
    }
    let quiz_value = quiz_filter()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "all".to_string());
    let total = entries.len();

    rsx! {
        div {
            class: "page",
            header {
                class: "page-header",
                h1 { "Question Bank" }
                p { class: "muted", "All questions across your quizzes" }
            }

            div {
                class: "filter-bar",
                div {
                    class: "search-box",
                    Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                    Input {
                        placeholder: "Search questions...",
                        value: query(),
                        oninput: move |e: FormEvent| query.set(e.value()),
                    }
                }
                Select {
                    value: quiz_value,
                    options: quiz_options,
                    onchange: move |e: FormEvent| quiz_filter.set(parse_id(&e.value())),
                }
            }
            p { class: "muted", "Showing {visible.len()} of {total} questions" }

            if visible.is_empty() {
                EmptyState {
                    title: "No questions found",
                    message: "Questions are added from a quiz's question page",
                }
            } else {
                div {
                    class: "item-list",
                    for (index, entry) in visible.into_iter().enumerate() {
                        div {
                            key: "{entry.question.id}",
                            class: "bank-entry",
                            p { class: "accent", "{entry.quiz.title}" }
                            QuestionRow {
                                index,
                                question: entry.question.clone(),
                                on_edit: {
                                    let quiz = entry.quiz.clone();
                                    move |q: Question| editing.set(Some((quiz.clone(), QuestionEditor::edit(&q))))
                                },
                                on_delete: {
                                    let quiz_id = entry.quiz.id;
                                    move |id| deleting.set(Some((quiz_id, id)))
                                },
                            }
                        }
                    }
                }
            }

            if let Some((quiz, editor)) = editing() {
                QuestionDialog {
                    quiz,
                    initial: editor,
                    on_close: move |_| editing.set(None),
                    on_saved: move |_| {
                        editing.set(None);
                        bank.restart();
                    },
                }
            }

            if deleting().is_some() {
                ConfirmDialog {
                    title: "Delete Question?",
                    message: "This action cannot be undone. The question will be removed from its quiz.",
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

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(quiz_id: i64, quiz_title: &str, text: &str) -> BankEntry {
        let quiz: Quiz = serde_json::from_value(serde_json::json!({
            "id": quiz_id, "title": quiz_title, "durationMinutes": 10,
            "passingScore": 50, "active": true
        }))
        .unwrap();
        let question: Question = serde_json::from_value(serde_json::json!({
            "id": quiz_id * 100, "questionText": text, "points": 1, "displayOrder": 0,
            "answers": [{"id": 1, "answerText": "Box<dyn Error>", "correct": true, "displayOrder": 0}]
        }))
        .unwrap();
        BankEntry { quiz, question }
    }

    #[test]
    fn test_filter_by_text_answer_and_quiz() {
        let entries = vec![
            entry(1, "Errors", "What does `?` return?"),
            entry(2, "Closures", "Which trait does a move closure implement?"),
        ];
        assert_eq!(filter_bank(&entries, "", None).len(), 2);
        assert_eq!(filter_bank(&entries, "closure", None).len(), 1);
        assert_eq!(filter_bank(&entries, "dyn error", None).len(), 2);
        assert_eq!(filter_bank(&entries, "", Some(2))[0].quiz.title, "Closures");
        assert!(filter_bank(&entries, "closure", Some(1)).is_empty());
    }
}
