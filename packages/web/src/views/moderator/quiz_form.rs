//! Quiz settings fields, used by the create dialog and the edit page.

use api::models::{format_datetime_local, parse_datetime_local, QuizDraft, Topic};
use chrono::{Duration, NaiveDateTime};
use dioxus::prelude::*;
use ui::components::{Checkbox, Input, Label, Select, Textarea};

use crate::views::filters::parse_id;

/// New quizzes open tomorrow and close a week from now.
pub fn new_quiz_draft(now: NaiveDateTime) -> QuizDraft {
    QuizDraft {
        start_time: Some(now + Duration::days(1)),
        end_time: Some(now + Duration::days(7)),
        ..QuizDraft::default()
    }
}

/// Checks beyond [`QuizDraft::validate`] that the management forms enforce.
pub fn check_quiz_draft(draft: &QuizDraft) -> Result<(), String> {
    if draft.title.trim().is_empty() || draft.description.trim().is_empty() || draft.topic_id <= 0 {
        return Err("Please fill in all required fields".to_string());
    }
    draft.validate()
}

fn set_time(value: &str) -> Option<NaiveDateTime> {
    parse_datetime_local(value).unwrap_or_else(|e| {
        tracing::debug!("{}", e);
        None
    })
}

#[component]
pub fn QuizForm(draft: Signal<QuizDraft>, topics: Vec<Topic>, disabled: bool) -> Element {
    let current = draft();
    let mut options = vec![("none".to_string(), "Select topic".to_string())];
    options.extend(topics.iter().map(|t| (t.id.to_string(), t.title.clone())));
    let topic_value = if current.topic_id > 0 {
        current.topic_id.to_string()
    } else {
        "none".to_string()
    };

    rsx! {
        div {
            class: "field",
            Label { html_for: "quiz-title", "Quiz Title *" }
            Input {
                id: "quiz-title",
                placeholder: "e.g. JavaScript Fundamentals Quiz",
                value: current.title.clone(),
                disabled,
                oninput: move |e: FormEvent| draft.write().title = e.value(),
            }
        }
        div {
            class: "field",
            Label { html_for: "quiz-description", "Description *" }
            Textarea {
                id: "quiz-description",
                placeholder: "Describe what this quiz covers...",
                value: current.description.clone(),
                disabled,
                oninput: move |e: FormEvent| draft.write().description = e.value(),
            }
        }
        div {
            class: "field",
            Label { html_for: "quiz-topic", "Topic *" }
            Select {
                id: "quiz-topic",
                value: topic_value,
                options,
                disabled,
                onchange: move |e: FormEvent| draft.write().topic_id = parse_id(&e.value()).unwrap_or(0),
            }
        }
        div {
            class: "form-row",
            div {
                class: "field",
                Label { html_for: "quiz-duration", "Duration (minutes) *" }
                Input {
                    id: "quiz-duration",
                    input_type: "number",
                    value: current.duration_minutes.to_string(),
                    disabled,
                    oninput: move |e: FormEvent| draft.write().duration_minutes = e.value().parse().unwrap_or(0),
                }
            }
            div {
                class: "field",
                Label { html_for: "quiz-passing", "Passing Score (%) *" }
                Input {
                    id: "quiz-passing",
                    input_type: "number",
                    value: current.passing_score.to_string(),
                    disabled,
                    oninput: move |e: FormEvent| draft.write().passing_score = e.value().parse().unwrap_or(0),
                }
            }
        }
        div {
            class: "form-row",
            div {
                class: "field",
                Label { html_for: "quiz-start", "Start Time" }
                Input {
                    id: "quiz-start",
                    input_type: "datetime-local",
                    value: format_datetime_local(current.start_time),
                    disabled,
                    oninput: move |e: FormEvent| draft.write().start_time = set_time(&e.value()),
                }
            }
            div {
                class: "field",
                Label { html_for: "quiz-end", "End Time" }
                Input {
                    id: "quiz-end",
                    input_type: "datetime-local",
                    value: format_datetime_local(current.end_time),
                    disabled,
                    oninput: move |e: FormEvent| draft.write().end_time = set_time(&e.value()),
                }
            }
        }
        div {
            class: "checkbox-group",
            Checkbox {
                id: "quiz-shuffle",
                label: "Shuffle questions",
                checked: current.shuffle_questions,
                disabled,
                onchange: move |checked| draft.write().shuffle_questions = checked,
            }
            Checkbox {
                id: "quiz-show-results",
                label: "Show results immediately",
                checked: current.show_results_immediately,
                disabled,
                onchange: move |checked| draft.write().show_results_immediately = checked,
            }
            Checkbox {
                id: "quiz-active",
                label: "Active (visible to students)",
                checked: current.active,
                disabled,
                onchange: move |checked| draft.write().active = checked,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_new_draft_window() {
        let draft = new_quiz_draft(now());
        assert_eq!(draft.start_time, Some(now() + Duration::days(1)));
        assert_eq!(draft.end_time, Some(now() + Duration::days(7)));
        assert_eq!(draft.duration_minutes, 30);
        assert_eq!(draft.passing_score, 70);
    }

    #[test]
    fn test_required_fields() {
        let mut draft = new_quiz_draft(now());
        draft.title = "Traits".to_string();
        assert_eq!(
            check_quiz_draft(&draft).unwrap_err(),
            "Please fill in all required fields"
        );
        draft.description = "Trait objects and generics".to_string();
        draft.topic_id = 4;
        assert!(check_quiz_draft(&draft).is_ok());

        draft.end_time = draft.start_time;
        assert_eq!(
            check_quiz_draft(&draft).unwrap_err(),
            "Start time must be before end time"
        );
    }

    #[test]
    fn test_bad_time_input_clears_field() {
        assert_eq!(set_time("not a date"), None);
        assert_eq!(set_time(""), None);
        assert!(set_time("2024-05-02T10:00").is_some());
    }
}
