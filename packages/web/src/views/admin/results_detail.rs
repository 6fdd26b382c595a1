use api::analytics::{
    attempt_display_name, completed, csv_filename, format_duration, results_csv, sort_attempts,
    QuizStats, SortKey,
};
use api::models::{AttemptSummary, Quiz};
use dioxus::prelude::*;
use ui::components::{Badge, BadgeVariant, Button, ButtonVariant, Card, EmptyState, LoadingScreen, Select};
use ui::icons::{FaArrowDown, FaArrowLeft, FaArrowUp, FaDownload, FaEye};
use ui::time::format_optional;
use ui::{use_client, use_error_reporter, use_toast, Icon};

use super::analytics::QuizStatCards;
use crate::download::download_csv;
use crate::Route;

fn sort_options() -> Vec<(String, String)> {
    SortKey::ALL
        .into_iter()
        .map(|k| (k.key().to_string(), format!("Sort by {}", k.label())))
        .collect()
}

/// Points cell: correct over total, falling back to the quiz's question count.
pub fn points_cell(attempt: &AttemptSummary, question_count: u32) -> String {
    format!(
        "{}/{}",
        attempt.correct_answers.unwrap_or(0),
        attempt.total_questions.unwrap_or(question_count)
    )
}

#[component]
pub fn QuizResultsDetail(id: i64) -> Element {
    let client = use_client();
    let reporter = use_error_reporter();
    let nav = use_navigator();

    let data = use_resource(use_reactive!(|id| {
        let client = client.clone();
        async move {
            let quiz = client.quizzes().get(id).await;
            let attempts = client.attempts().summaries_by_quiz(id).await;
            match (quiz, attempts) {
                (Ok(quiz), Ok(attempts)) => Some((quiz, completed(&attempts))),
                (Err(e), _) | (_, Err(e)) => {
                    reporter.report(&e, "Failed to load quiz results");
                    nav.replace(Route::QuizResultsOverview {});
                    None
                }
            }
        }
    }));

    match data() {
        Some(Some((quiz, attempts))) => rsx! {
            ResultsBoard { key: "{quiz.id}", quiz, attempts }
        },
        _ => rsx! { LoadingScreen {} },
    }
}

#[component]
fn ResultsBoard(quiz: Quiz, attempts: Vec<AttemptSummary>) -> Element {
    let toast = use_toast();
    let nav = use_navigator();
    let mut sort_key = use_signal(SortKey::default);
    let mut ascending = use_signal(|| false);

    let stats = QuizStats::from_attempts(&attempts);
    let question_count = quiz.total_questions() as u32;
    let mut sorted = attempts.clone();
    sort_attempts(&mut sorted, sort_key(), ascending());

    let export_rows = sorted.clone();
    let export_title = quiz.title.clone();
    let on_export = move |_| {
        if export_rows.is_empty() {
            toast.error("No data to export");
            return;
        }
        let csv = results_csv(&export_rows, question_count);
        match download_csv(&csv_filename(&export_title), &csv) {
            Ok(()) => toast.success("Results exported successfully"),
            Err(e) => {
                tracing::warn!("CSV export failed: {}", e);
                toast.error("Failed to export results");
            }
        }
    };

    let quiz_id = quiz.id;
    let topic = quiz.topic_title.clone().unwrap_or_else(|| "N/A".to_string());
    let passing = quiz.passing_score;
    let empty = sorted.is_empty();
    let order = if ascending() { "Ascending" } else { "Descending" };

    rsx! {
        div {
            class: "page",
            header {
                class: "page-header page-header--actions",
                div {
                    Button {
                        variant: ButtonVariant::Ghost,
                        onclick: move |_| { nav.push(Route::QuizResultsOverview {}); },
                        Icon { icon: FaArrowLeft, width: 14, height: 14 }
                        " Back"
                    }
                    h1 { "{quiz.title}" }
                    p { class: "muted", "{quiz.description}" }
                }
                Button {
                    disabled: empty,
                    onclick: on_export,
                    Icon { icon: FaDownload, width: 14, height: 14 }
                    " Export CSV"
                }
            }

            Card {
                title: "Quiz Information",
                div {
                    class: "fact-grid",
                    div { class: "fact", span { class: "muted", "Topic" } strong { "{topic}" } }
                    div { class: "fact", span { class: "muted", "Duration" } strong { "{quiz.duration_minutes} minutes" } }
                    div { class: "fact", span { class: "muted", "Questions" } strong { "{question_count}" } }
                    div { class: "fact", span { class: "muted", "Passing Score" } strong { "{passing}%" } }
                }
            }

            QuizStatCards { stats, detailed: true }

            Card {
                title: "Participant Results",
                description: "Detailed results for each participant",
                div {
                    class: "filter-bar",
                    Select {
                        value: "{sort_key().key()}",
                        options: sort_options(),
                        onchange: move |e: FormEvent| {
                            if let Some(key) = SortKey::from_key(&e.value()) {
                                sort_key.set(key);
                            }
                        },
                    }
                    Button {
                        variant: ButtonVariant::Outline,
                        title: "{order}",
                        onclick: move |_| ascending.toggle(),
                        if ascending() {
                            Icon { icon: FaArrowUp, width: 12, height: 12 }
                        } else {
                            Icon { icon: FaArrowDown, width: 12, height: 12 }
                        }
                    }
                }
                if empty {
                    EmptyState { title: "No attempts yet" }
                } else {
                    table {
                        class: "data-table",
                        thead {
                            tr {
                                th { "Student" }
                                th { "Score" }
                                th { "Points" }
                                th { "Time Taken" }
                                th { "Submitted At" }
                                th { "Status" }
                                th { class: "text-right", "Action" }
                            }
                        }
                        tbody {
                            for attempt in sorted {
                                ParticipantRow {
                                    key: "{attempt.id}",
                                    quiz_id,
                                    passing,
                                    question_count,
                                    attempt,
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ParticipantRow(quiz_id: i64, passing: u32, question_count: u32, attempt: AttemptSummary) -> Element {
    let nav = use_navigator();
    let attempt_id = attempt.id;
    let email = attempt.user.as_ref().map(|u| u.email.clone()).unwrap_or_default();
    let score = attempt.display_score();
    let passed = attempt.passed.unwrap_or(false);

    rsx! {
        tr {
            td {
                p { strong { "{attempt_display_name(&attempt)}" } }
                if !email.is_empty() {
                    p { class: "muted", "{email}" }
                }
            }
            td { Badge { variant: BadgeVariant::for_result(score >= i64::from(passing)), "{score}%" } }
            td { "{points_cell(&attempt, question_count)}" }
            td { "{format_duration(attempt.time_taken_secs())}" }
            td { class: "muted", "{format_optional(attempt.completed_at)}" }
            td {
                if passed {
                    Badge { variant: BadgeVariant::Success, "Passed" }
                } else {
                    Badge { variant: BadgeVariant::Danger, "Failed" }
                }
            }
            td {
                class: "text-right",
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| { nav.push(Route::UserResultDetail { quiz_id, attempt_id }); },
                    Icon { icon: FaEye, width: 14, height: 14 }
                    " View"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_fall_back_to_question_count() {
        let with_totals: AttemptSummary = serde_json::from_value(serde_json::json!({
            "id": 1, "quizId": 4, "status": "COMPLETED", "correctAnswers": 7, "totalQuestions": 9
        }))
        .unwrap();
        assert_eq!(points_cell(&with_totals, 10), "7/9");

        let bare: AttemptSummary = serde_json::from_value(serde_json::json!({
            "id": 2, "quizId": 4, "status": "COMPLETED"
        }))
        .unwrap();
        assert_eq!(points_cell(&bare, 10), "0/10");
    }

    #[test]
    fn test_sort_choices_cover_every_key() {
        let options = sort_options();
        assert_eq!(options.len(), SortKey::ALL.len());
        assert_eq!(options[0], ("score".to_string(), "Sort by Score".to_string()));
    }
}
