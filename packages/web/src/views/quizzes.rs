use api::models::{filter_quizzes, AttemptSummary, Quiz, QuizStatus};
use dioxus::prelude::*;
use ui::components::{Badge, BadgeVariant, Button, ButtonVariant, EmptyState, Input, LoadingScreen, Spinner};
use ui::icons::{FaAward, FaCalendar, FaClock, FaMagnifyingGlass};
use ui::time::{format_date_time, format_optional, now};
use ui::{use_auth, use_client, use_error_reporter, Icon};

use crate::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuizTab {
    All,
    Status(QuizStatus),
    Results,
}

impl QuizTab {
    const ALL: [QuizTab; 5] = [
        QuizTab::All,
        QuizTab::Status(QuizStatus::Active),
        QuizTab::Status(QuizStatus::Upcoming),
        QuizTab::Status(QuizStatus::Expired),
        QuizTab::Results,
    ];

    fn label(self) -> &'static str {
        match self {
            QuizTab::All => "All",
            QuizTab::Status(QuizStatus::Expired) => "Past",
            QuizTab::Status(status) => status.label(),
            QuizTab::Results => "My Results",
        }
    }
}

/// Active quizzes by status, plus the signed-in user's completed attempts.
#[component]
pub fn Quizzes() -> Element {
    let auth = use_auth();
    let client = use_client();
    let reporter = use_error_reporter();
    let mut query = use_signal(String::new);
    let mut tab = use_signal(|| QuizTab::All);

    let quiz_client = client.clone();
    let quizzes = use_resource(move || {
        let client = quiz_client.clone();
        async move {
            client.quizzes().list(true).await.unwrap_or_else(|e| {
                reporter.report(&e, "Failed to load quizzes");
                Vec::new()
            })
        }
    });

    // Loaded the first time the results tab is opened.
    let user_id = auth.read().user_id();
    let completed = use_resource(move || {
        let client = client.clone();
        let wanted = tab() == QuizTab::Results;
        async move {
            let (true, Some(user_id)) = (wanted, user_id) else {
                return None;
            };
            match client.attempts().summaries_by_user(user_id).await {
                Ok(attempts) => Some(
                    attempts
                        .into_iter()
                        .filter(AttemptSummary::is_completed)
                        .collect::<Vec<_>>(),
                ),
                Err(e) => {
                    tracing::warn!("Failed to load completed attempts: {}", e);
                    Some(Vec::new())
                }
            }
        }
    });

    let Some(all) = quizzes() else {
        return rsx! { LoadingScreen {} };
    };
    let reference = now();

    rsx! {
        div {
            class: "page",
            header {
                class: "page-header",
                h1 { "Quizzes" }
                p { class: "muted", "Test your knowledge with our quizzes" }
            }
            div {
                class: "search-box",
                Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                Input {
                    placeholder: "Search quizzes...",
                    value: query(),
                    oninput: move |e: FormEvent| query.set(e.value()),
                }
            }
            div {
                class: "tabs",
                for option in QuizTab::ALL {
                    button {
                        key: "{option.label()}",
                        class: if tab() == option { "tab tab--active" } else { "tab" },
                        onclick: move |_| tab.set(option),
                        "{option.label()}"
                    }
                }
            }
            {match tab() {
                QuizTab::Results => rsx! {
                    {match completed().flatten() {
                        None => rsx! { Spinner { label: "Loading results..." } },
                        Some(attempts) if attempts.is_empty() => rsx! {
                            EmptyState {
                                title: "No completed quizzes yet",
                                message: "Complete a quiz to see your results here",
                            }
                        },
                        Some(attempts) => rsx! {
                            div {
                                class: "card-grid",
                                for attempt in attempts {
                                    CompletedAttemptCard { key: "{attempt.id}", attempt }
                                }
                            }
                        },
                    }}
                },
                QuizTab::All => rsx! {
                    QuizList { quizzes: filter_quizzes(&all, &query(), None, reference) }
                },
                QuizTab::Status(status) => rsx! {
                    QuizList { quizzes: filter_quizzes(&all, &query(), Some(status), reference) }
                },
            }}
        }
    }
}

#[component]
fn QuizList(quizzes: Vec<Quiz>) -> Element {
    if quizzes.is_empty() {
        return rsx! {
            EmptyState { title: "No quizzes found", message: "Try a different search or filter." }
        };
    }
    rsx! {
        div {
            class: "card-grid",
            for quiz in quizzes {
                QuizCard { key: "{quiz.id}", quiz }
            }
        }
    }
}

#[component]
fn QuizCard(quiz: Quiz) -> Element {
    let nav = use_navigator();
    let status = quiz.status(now());
    let id = quiz.id;

    rsx! {
        div {
            class: "card quiz-card clickable",
            onclick: move |_| { nav.push(Route::QuizTaking { id }); },
            div {
                class: "card-body",
                div {
                    class: "quiz-card-head",
                    h3 { "{quiz.title}" }
                    Badge {
                        variant: BadgeVariant::for_quiz_status(status),
                        if status == QuizStatus::Active { "Active Now" } else { "{status.label()}" }
                    }
                }
                if let Some(topic) = quiz.topic_title.clone() {
                    p { class: "muted", "{topic}" }
                }
                if !quiz.description.is_empty() {
                    p { "{quiz.description}" }
                }
                div {
                    class: "meta-row",
                    span { Icon { icon: FaClock, width: 12, height: 12 } " {quiz.duration_minutes} min" }
                    span { Icon { icon: FaAward, width: 12, height: 12 } " Pass: {quiz.passing_score}%" }
                    if quiz.question_count > 0 {
                        span { "{quiz.question_count} questions" }
                    }
                }
                if let Some(start) = quiz.start_time {
                    p {
                        class: "muted",
                        Icon { icon: FaCalendar, width: 12, height: 12 }
                        " Starts {format_date_time(start)}"
                    }
                }
                if let Some(end) = quiz.end_time {
                    p { class: "muted", "Ends {format_date_time(end)}" }
                }
            }
        }
    }
}

#[component]
fn CompletedAttemptCard(attempt: AttemptSummary) -> Element {
    let nav = use_navigator();
    let passed = attempt.passed.unwrap_or(false);
    let (quiz_id, attempt_id) = (attempt.quiz_id, attempt.id);

    rsx! {
        div {
            class: if passed { "card attempt-card attempt-card--passed" } else { "card attempt-card attempt-card--failed" },
            div {
                class: "card-body",
                div {
                    class: "quiz-card-head",
                    h3 { "{attempt.quiz_title}" }
                    Badge {
                        variant: BadgeVariant::for_result(passed),
                        if passed { "Passed" } else { "Not Passed" }
                    }
                }
                div {
                    class: "meta-row",
                    span { "Score: {attempt.display_score()}%" }
                    if let (Some(correct), Some(total)) = (attempt.correct_answers, attempt.total_questions) {
                        span { "{correct}/{total} correct" }
                    }
                    span { "Completed {format_optional(attempt.completed_at)}" }
                }
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: move |_| { nav.push(Route::QuizResult { id: quiz_id, attempt_id }); },
                    "View Results"
                }
            }
        }
    }
}
