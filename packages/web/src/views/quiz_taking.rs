//! Taking a quiz: preview, timed attempt, answer saving and submit.
//!
//! All state lives in one [`QuizSession`] signal. Handlers mutate it
//! synchronously, release the borrow and only then await the request, so the
//! countdown keeps ticking while saves are in flight.

use std::time::Duration;

use api::models::{Question, Quiz};
use api::quiz_session::{
    load_quiz_session, persist_answer, start_attempt, Phase, QuizSession, StartBlocked, Tick,
    TimerBand,
};
use api::ApiError;
use dioxus::prelude::*;
use ui::components::{
    Badge, BadgeVariant, Button, ButtonVariant, Card, ConfirmDialog, EmptyState, LoadingScreen,
};
use ui::icons::{FaCircleCheck, FaClock, FaPaperPlane, FaTriangleExclamation};
use ui::time::{format_date_time, now, sleep, time_ago};
use ui::{use_auth, use_client, use_error_reporter, use_toast, Icon};

use crate::Route;

const TIME_UP: &str = "Time is up! Submitting quiz automatically...";

fn timer_class(band: TimerBand) -> &'static str {
    match band {
        TimerBand::Green => "timer timer--green",
        TimerBand::Yellow => "timer timer--yellow",
        TimerBand::Red => "timer timer--red",
    }
}

fn start_label(blocked: Option<StartBlocked>) -> &'static str {
    match blocked {
        None => "Start Quiz",
        Some(StartBlocked::Unavailable(api::models::QuizStatus::Upcoming)) => "Not Started",
        Some(_) => "Not Available",
    }
}

fn submit_prompt(unanswered: usize) -> String {
    if unanswered > 0 {
        format!(
            "You have {unanswered} unanswered question(s). Are you sure you want to submit?"
        )
    } else {
        "Are you sure you want to submit your quiz?".to_string()
    }
}

#[component]
pub fn QuizTaking(id: i64) -> Element {
    let auth = use_auth();
    let client = use_client();
    let reporter = use_error_reporter();
    let toast = use_toast();
    let nav = use_navigator();

    let mut session = use_signal(QuizSession::loading);
    let mut confirm_submit = use_signal(|| false);
    let user_id = auth.read().user_id();

    let submit_client = client.clone();
    let submit = use_callback(move |()| {
        confirm_submit.set(false);
        let Some(attempt_id) = session.write().begin_submit() else {
            return;
        };
        let client = submit_client.clone();
        spawn(async move {
            match client.attempts().submit(attempt_id).await {
                Ok(result) => {
                    session.write().finish_submit(result);
                    toast.success("Quiz submitted successfully!");
                    nav.replace(Route::QuizResult { id, attempt_id });
                }
                Err(e) => {
                    session.write().fail_submit();
                    reporter.report(&e, "Failed to submit quiz");
                }
            }
        });
    });

    // An attempt entered with no time left is submitted right away.
    let mut submit_if_expired = move || {
        if session.write().take_immediate_expiry() {
            toast.info(TIME_UP);
            submit.call(());
        }
    };

    let load_client = client.clone();
    let _loader = use_resource(use_reactive!(|id| {
        let client = load_client.clone();
        async move {
            let Some(user_id) = user_id else {
                return;
            };
            session.set(QuizSession::loading());
            match load_quiz_session(&client, id, user_id, now()).await {
                Ok(loaded) => {
                    if loaded.was_resumed() {
                        toast.info("Resuming your quiz attempt...");
                    }
                    session.set(loaded);
                    submit_if_expired();
                }
                Err(e) => {
                    reporter.report(&e, "Failed to load quiz");
                    nav.replace(Route::Quizzes {});
                }
            }
        }
    }));

    // Countdown. Ticks outside an attempt are no-ops.
    use_future(move || async move {
        loop {
            sleep(Duration::from_secs(1)).await;
            let tick = session.write().tick();
            if tick == Tick::Expired {
                toast.info(TIME_UP);
                submit.call(());
            }
        }
    });

    let start_client = client.clone();
    let on_start = move |_| {
        let Some(user_id) = user_id else {
            return;
        };
        match session.write().begin_start(now()) {
            Ok(()) => {}
            Err(StartBlocked::Starting) => return,
            Err(blocked) => {
                toast.warning(blocked.message());
                return;
            }
        }
        let client = start_client.clone();
        spawn(async move {
            match start_attempt(&client, id, user_id).await {
                Ok((quiz, attempt)) => {
                    let recorded = attempt.user_answers.clone();
                    session.set(QuizSession::taking(quiz, attempt, &recorded, now(), false));
                    toast.success("Quiz started! Good luck!");
                    submit_if_expired();
                }
                Err(e) => {
                    session.write().start_failed();
                    reporter.report(&e, "Failed to start quiz");
                }
            }
        });
    };

    let on_select = use_callback(move |(question_id, answer_id): (i64, i64)| {
        let Some(attempt_id) = session.peek().attempt_id() else {
            return;
        };
        let Some(save) = session.write().select_answer(question_id, answer_id) else {
            return;
        };
        let client = client.clone();
        spawn(async move {
            let outcome = persist_answer(&client, attempt_id, &save).await;
            let expired = matches!(outcome, Err(ApiError::SessionExpired));
            let message = session.write().resolve_answer(save, outcome);
            if expired {
                reporter.report(&ApiError::SessionExpired, "");
            } else if let Some(message) = message {
                toast.error(message);
            }
        });
    });

    let on_submit_click = move |_| {
        if session.read().needs_submit_confirmation() {
            confirm_submit.set(true);
        } else {
            submit.call(());
        }
    };

    let state = session.read();
    match state.phase() {
        Phase::Loading => rsx! { LoadingScreen {} },
        Phase::Completed => rsx! {
            div { class: "page page--narrow", EmptyState { title: "Quiz submitted", message: "Loading your results..." } }
        },
        Phase::PreQuiz => {
            let Some(quiz) = state.quiz().cloned() else {
                return rsx! { QuizMissing {} };
            };
            let starting = state.is_starting();
            let blocked = state
                .check_start(now())
                .err()
                .filter(|b| *b != StartBlocked::Starting);
            match state.completed_attempt_id() {
                Some(attempt_id) => rsx! {
                    AlreadyCompleted { quiz, attempt_id }
                },
                None => rsx! {
                    PreQuiz { quiz, blocked, starting, on_start }
                },
            }
        }
        Phase::Taking | Phase::Submitting => {
            let submitting = state.phase() == Phase::Submitting;
            let total = state.questions().len();
            let Some(question) = state.current_question().cloned() else {
                return rsx! {
                    div {
                        class: "page page--narrow",
                        EmptyState { title: "No questions available for this quiz" }
                        Button { onclick: move |_| { nav.push(Route::Quizzes {}); }, "Back to Quizzes" }
                    }
                };
            };
            let index = state.current_index();
            let selected = state.selected_answer(question.id);
            let saving = state.is_saving(question.id);
            let answered: Vec<bool> = state
                .questions()
                .iter()
                .map(|q| state.record(q.id).is_some())
                .collect();
            let progress = state.progress_percent();
            let clock = state.clock();
            let band = state.timer_band();
            let is_first = state.is_first();
            let is_last = state.is_last();
            let unanswered = state.unanswered_count();
            let title = state.quiz().map(|q| q.title.clone()).unwrap_or_default();

            rsx! {
                div {
                    class: "quiz-taking",
                    div {
                        class: "quiz-bar",
                        div {
                            class: "quiz-bar-row",
                            span {
                                class: timer_class(band),
                                Icon { icon: FaClock, width: 16, height: 16 }
                                " {clock}"
                            }
                            span { class: "quiz-title", "{title}" }
                            span { "Question " strong { "{index + 1}" } " / {total}" }
                            Button {
                                disabled: submitting,
                                onclick: on_submit_click,
                                Icon { icon: FaPaperPlane, width: 12, height: 12 }
                                if submitting { "Submitting..." } else { "Submit" }
                            }
                        }
                        div {
                            class: "progress",
                            div { class: "progress-bar", style: "width: {progress}%" }
                        }
                    }

                    div {
                        class: "page page--narrow",
                        QuestionCard {
                            question,
                            selected,
                            disabled: saving || submitting,
                            on_select: move |pair| on_select.call(pair),
                        }
                        div {
                            class: "quiz-nav",
                            Button {
                                variant: ButtonVariant::Outline,
                                disabled: is_first,
                                onclick: move |_| session.write().previous(),
                                "Previous"
                            }
                            if is_last {
                                Button {
                                    disabled: submitting,
                                    onclick: on_submit_click,
                                    "Submit Quiz"
                                }
                            } else {
                                Button {
                                    onclick: move |_| session.write().next(),
                                    "Next"
                                }
                            }
                        }
                        Card {
                            title: "Question Navigator",
                            div {
                                class: "question-grid",
                                for (i, done) in answered.into_iter().enumerate() {
                                    button {
                                        key: "{i}",
                                        class: if i == index { "qnav qnav--current" } else if done { "qnav qnav--answered" } else { "qnav" },
                                        onclick: move |_| session.write().go_to(i),
                                        "{i + 1}"
                                    }
                                }
                            }
                            div {
                                class: "legend",
                                span { class: "legend-answered", "Answered" }
                                span { class: "legend-open", "Not Answered" }
                                span { class: "legend-current", "Current" }
                            }
                        }
                    }

                    if confirm_submit() {
                        ConfirmDialog {
                            title: "Submit Quiz?",
                            message: submit_prompt(unanswered),
                            confirm_label: "Submit Quiz",
                            cancel_label: "Continue Quiz",
                            busy: submitting,
                            on_confirm: move |_| submit.call(()),
                            on_cancel: move |_| confirm_submit.set(false),
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn QuestionCard(
    question: Question,
    selected: Option<i64>,
    disabled: bool,
    on_select: EventHandler<(i64, i64)>,
) -> Element {
    let question_id = question.id;
    let answers: Vec<(i64, String)> = question
        .ordered_answers()
        .into_iter()
        .map(|a| (a.id, a.answer_text.clone()))
        .collect();

    rsx! {
        Card {
            title: question.question_text.clone(),
            div {
                class: "answer-list",
                role: "radiogroup",
                for (answer_id, text) in answers {
                    label {
                        key: "{answer_id}",
                        class: if selected == Some(answer_id) { "answer answer--selected" } else { "answer" },
                        r#for: "answer-{answer_id}",
                        input {
                            id: "answer-{answer_id}",
                            r#type: "radio",
                            name: "question-{question_id}",
                            checked: selected == Some(answer_id),
                            disabled,
                            onchange: move |_| on_select.call((question_id, answer_id)),
                        }
                        span { "{text}" }
                    }
                }
            }
            if question.points > 1 {
                p { class: "muted", "{question.points} points" }
            }
        }
    }
}

#[component]
fn QuizFacts(quiz: Quiz) -> Element {
    let available_until = quiz
        .end_time
        .map(format_date_time)
        .unwrap_or_else(|| "No limit".to_string());
    rsx! {
        div {
            class: "fact-grid",
            div { class: "fact", span { class: "muted", "Duration" } strong { "{quiz.duration_minutes} min" } }
            div { class: "fact", span { class: "muted", "Questions" } strong { "{quiz.total_questions()}" } }
            div { class: "fact", span { class: "muted", "Passing Score" } strong { "{quiz.passing_score}%" } }
            div { class: "fact", span { class: "muted", "Available Until" } strong { "{available_until}" } }
        }
    }
}

#[component]
fn PreQuiz(
    quiz: Quiz,
    blocked: Option<StartBlocked>,
    starting: bool,
    on_start: EventHandler<MouseEvent>,
) -> Element {
    let nav = use_navigator();
    let reference = now();

    rsx! {
        div {
            class: "page page--narrow",
            Card {
                title: quiz.title.clone(),
                description: quiz.description.clone(),
                QuizFacts { quiz: quiz.clone() }
                {match blocked {
                    Some(StartBlocked::Unavailable(api::models::QuizStatus::Upcoming)) => rsx! {
                        div {
                            class: "notice notice--warning",
                            Icon { icon: FaClock, width: 16, height: 16 }
                            if let Some(start) = quiz.start_time {
                                " Quiz starts {format_date_time(start)}"
                            }
                        }
                    },
                    Some(blocked) => rsx! {
                        div {
                            class: "notice notice--danger",
                            Icon { icon: FaTriangleExclamation, width: 16, height: 16 }
                            " {blocked.message()}"
                        }
                    },
                    None => rsx! {
                        div {
                            class: "notice notice--info",
                            p { strong { "Important:" } }
                            ul {
                                li { "Once started, the timer begins immediately" }
                                li { "You cannot pause the quiz" }
                                li { "The quiz will auto-submit when time runs out" }
                                li { "Make sure you have a stable internet connection" }
                            }
                        }
                    },
                }}
                if let Some(updated) = quiz.updated_at {
                    p { class: "muted", "Last updated {time_ago(updated, reference)}" }
                }
                div {
                    class: "modal-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| { nav.push(Route::Quizzes {}); },
                        "Cancel"
                    }
                    Button {
                        disabled: blocked.is_some() || starting,
                        onclick: move |evt| on_start.call(evt),
                        if starting { "Starting..." } else { "{start_label(blocked)}" }
                    }
                }
            }
        }
    }
}

#[component]
fn AlreadyCompleted(quiz: Quiz, attempt_id: i64) -> Element {
    let nav = use_navigator();
    let quiz_id = quiz.id;

    rsx! {
        div {
            class: "page page--narrow",
            Card {
                title: quiz.title.clone(),
                description: quiz.description.clone(),
                div {
                    class: "notice notice--info",
                    Icon { icon: FaCircleCheck, width: 32, height: 32 }
                    h3 { "Quiz Already Completed" }
                    p { "You have already completed this quiz. Only one attempt is allowed per quiz." }
                    p { class: "muted", "You can view your results below." }
                }
                QuizFacts { quiz: quiz.clone() }
                div {
                    class: "badge-row",
                    Badge { variant: BadgeVariant::Success, "Completed" }
                }
                div {
                    class: "modal-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| { nav.push(Route::Quizzes {}); },
                        "Back to Quizzes"
                    }
                    Button {
                        onclick: move |_| { nav.push(Route::QuizResult { id: quiz_id, attempt_id }); },
                        "View Results"
                    }
                }
            }
        }
    }
}

#[component]
fn QuizMissing() -> Element {
    let nav = use_navigator();
    rsx! {
        div {
            class: "page page--narrow",
            EmptyState { title: "Quiz not found" }
            Button { onclick: move |_| { nav.push(Route::Quizzes {}); }, "Back to Quizzes" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::models::QuizStatus;

    #[test]
    fn test_start_labels() {
        assert_eq!(start_label(None), "Start Quiz");
        assert_eq!(
            start_label(Some(StartBlocked::Unavailable(QuizStatus::Upcoming))),
            "Not Started"
        );
        assert_eq!(
            start_label(Some(StartBlocked::Unavailable(QuizStatus::Expired))),
            "Not Available"
        );
    }

    #[test]
    fn test_submit_prompt_mentions_unanswered() {
        assert!(submit_prompt(3).contains("3 unanswered question(s)"));
        assert_eq!(submit_prompt(0), "Are you sure you want to submit your quiz?");
    }

    #[test]
    fn test_timer_classes() {
        assert_eq!(timer_class(TimerBand::Red), "timer timer--red");
    }
}
