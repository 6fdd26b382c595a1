use dioxus::prelude::*;
use ui::components::{Button, ButtonVariant, EmptyState, LoadingScreen};
use ui::icons::{FaHouse, FaRotateLeft};
use ui::time::format_date_time;
use ui::{use_client, use_error_reporter, Icon};

use super::result_review::{load_result, AnswerReview, ResultSummary};
use crate::Route;

/// Result of one finished attempt, for the user who took it.
#[component]
pub fn QuizResult(id: i64, attempt_id: i64) -> Element {
    let client = use_client();
    let reporter = use_error_reporter();
    let nav = use_navigator();

    let result = use_resource(use_reactive!(|attempt_id| {
        let client = client.clone();
        async move {
            match load_result(&client, attempt_id).await {
                Ok(data) => Some(data),
                Err(e) => {
                    reporter.report(&e, "Failed to load quiz results");
                    nav.replace(Route::Quizzes {});
                    None
                }
            }
        }
    }));

    let Some(loaded) = result() else {
        return rsx! { LoadingScreen {} };
    };
    let Some(data) = loaded else {
        return rsx! {
            div {
                class: "page page--narrow",
                EmptyState { title: "No quiz results found" }
                Button { onclick: move |_| { nav.push(Route::Quizzes {}); }, "Back to Quizzes" }
            }
        };
    };
    if data.quiz.id != id {
        tracing::debug!("Attempt {} belongs to quiz {}, not {}", attempt_id, data.quiz.id, id);
    }

    rsx! {
        div {
            class: "page page--narrow",
            div {
                class: "page-header",
                h1 { "{data.quiz.title}" }
                if let Some(topic) = data.quiz.topic_title.clone() {
                    p { class: "accent", "{topic}" }
                }
                if let Some(completed) = data.attempt.completed_at {
                    p { class: "muted", "Completed on {format_date_time(completed)}" }
                }
            }

            ResultSummary { data: data.clone() }
            AnswerReview { data }

            div {
                class: "modal-actions",
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| { nav.push(Route::Dashboard {}); },
                    Icon { icon: FaHouse, width: 14, height: 14 }
                    " Dashboard"
                }
                Button {
                    onclick: move |_| { nav.push(Route::Quizzes {}); },
                    Icon { icon: FaRotateLeft, width: 14, height: 14 }
                    " More Quizzes"
                }
            }
        }
    }
}
