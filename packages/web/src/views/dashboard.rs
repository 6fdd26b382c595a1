//! Landing page after sign-in: counts, recent results, new topics and
//! quizzes that are open or about to open.

use api::models::{AttemptSummary, Quiz, Role, Topic};
use api::ApiError;
use chrono::{Duration, NaiveDateTime};
use dioxus::prelude::*;
use ui::components::{Badge, BadgeVariant, Card, EmptyState, LoadingScreen, StatCard};
use ui::time::{format_date_time, now, time_ago};
use ui::{use_auth, use_client, use_error_reporter, AppClient};

use crate::Route;

const RECENT_ATTEMPTS: usize = 5;
const NEW_TOPIC_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Default)]
struct DashboardData {
    topic_count: usize,
    new_topics: Vec<Topic>,
    quizzes: Vec<Quiz>,
    attempts: Vec<AttemptSummary>,
    completed: usize,
    passed: usize,
}

/// Topics created within the last week.
fn new_topics(topics: &[Topic], now: NaiveDateTime) -> Vec<Topic> {
    let since = now - Duration::days(NEW_TOPIC_DAYS);
    topics
        .iter()
        .filter(|t| t.created_at.is_some_and(|c| c > since))
        .cloned()
        .collect()
}

/// Quizzes that have not ended yet, earliest start first. A quiz without a
/// start time counts as starting now.
fn open_quizzes(quizzes: &[Quiz], now: NaiveDateTime) -> Vec<Quiz> {
    let mut out: Vec<Quiz> = quizzes
        .iter()
        .filter(|q| q.end_time.is_none_or(|end| end >= now))
        .cloned()
        .collect();
    out.sort_by_key(|q| q.start_time.unwrap_or(now));
    out
}

/// Latest completed attempts, newest first.
fn recent_attempts(attempts: &[AttemptSummary]) -> Vec<AttemptSummary> {
    let mut done: Vec<AttemptSummary> =
        attempts.iter().filter(|a| a.is_completed()).cloned().collect();
    done.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
    done.truncate(RECENT_ATTEMPTS);
    done
}

fn pass_rate(passed: usize, completed: usize) -> usize {
    if completed == 0 {
        0
    } else {
        (passed as f64 / completed as f64 * 100.0).round() as usize
    }
}

async fn load(client: &AppClient, user_id: i64, now: NaiveDateTime) -> Result<DashboardData, ApiError> {
    let topics = client.topics().list(true).await?;
    let quizzes = client.quizzes().list(true).await?;

    let mut data = DashboardData {
        topic_count: topics.len(),
        new_topics: new_topics(&topics, now),
        quizzes: open_quizzes(&quizzes, now),
        ..Default::default()
    };

    // Personal stats are optional; the page still renders without them.
    match client.attempts().summaries_by_user(user_id).await {
        Ok(attempts) => {
            data.completed = attempts.iter().filter(|a| a.is_completed()).count();
            data.passed = attempts
                .iter()
                .filter(|a| a.is_completed() && a.passed.unwrap_or(false))
                .count();
            data.attempts = recent_attempts(&attempts);
        }
        Err(ApiError::SessionExpired) => return Err(ApiError::SessionExpired),
        Err(e) => tracing::warn!("Failed to load user stats: {}", e),
    }
    Ok(data)
}

#[component]
pub fn Dashboard() -> Element {
    let auth = use_auth();
    let client = use_client();
    let reporter = use_error_reporter();
    let nav = use_navigator();

    let Some(user) = auth().user else {
        return rsx! {};
    };
    let user_id = user.id;

    let data = use_resource(move || {
        let client = client.clone();
        async move {
            match load(&client, user_id, now()).await {
                Ok(data) => Some(data),
                Err(e) => {
                    reporter.report(&e, "Failed to load dashboard data");
                    None
                }
            }
        }
    });

    let Some(loaded) = data() else {
        return rsx! { LoadingScreen {} };
    };
    let data = loaded.unwrap_or_default();
    let reference = now();
    let is_staff = user.role.is_staff();
    let is_admin = user.role == Role::Admin;

    rsx! {
        div {
            class: "page",
            header {
                class: "page-header",
                h1 { "Welcome back, {user.first_name}!" }
                p {
                    class: "muted",
                    "Role: "
                    Badge { variant: BadgeVariant::Outline, "{user.role.label()}" }
                }
            }

            div {
                class: "stat-grid",
                div {
                    class: "clickable",
                    onclick: move |_| { nav.push(Route::Topics {}); },
                    StatCard {
                        label: "Total Topics",
                        value: "{data.topic_count}",
                        hint: format!("{} new this week", data.new_topics.len()),
                    }
                }
                div {
                    class: "clickable",
                    onclick: move |_| { nav.push(Route::Quizzes {}); },
                    StatCard { label: "Available Quizzes", value: "{data.quizzes.len()}", hint: "Active now" }
                }
                div {
                    class: "clickable",
                    onclick: move |_| { nav.push(Route::Quizzes {}); },
                    StatCard {
                        label: "Completed Quizzes",
                        value: "{data.completed}",
                        hint: format!("{} passed", data.passed),
                    }
                }
                StatCard {
                    label: "Pass Rate",
                    value: format!("{}%", pass_rate(data.passed, data.completed)),
                    hint: "Success rate",
                }
                if is_staff {
                    div {
                        class: "clickable",
                        onclick: move |_| { nav.push(Route::TopicManagement {}); },
                        StatCard { label: "Manage Topics", value: "+" }
                    }
                    div {
                        class: "clickable",
                        onclick: move |_| { nav.push(Route::QuizManagement {}); },
                        StatCard { label: "Create Quiz", value: "+" }
                    }
                }
                if is_admin {
                    div {
                        class: "clickable",
                        onclick: move |_| { nav.push(Route::UserManagement {}); },
                        StatCard { label: "Manage Users", value: "→" }
                    }
                }
            }

            h2 { class: "section-title", "Latest Updates" }

            if !data.attempts.is_empty() {
                Card {
                    title: "Recent Quiz Results",
                    description: "Your latest quiz attempts",
                    ul {
                        class: "item-list",
                        for attempt in data.attempts.clone() {
                            li {
                                key: "{attempt.id}",
                                class: if attempt.passed.unwrap_or(false) { "item item--success" } else { "item item--danger" },
                                onclick: move |_| {
                                    nav.push(Route::QuizResult { id: attempt.quiz_id, attempt_id: attempt.id });
                                },
                                div {
                                    class: "item-main",
                                    h3 { "{attempt.quiz_title}" }
                                    span {
                                        class: "muted",
                                        "Score: {attempt.display_score()}%"
                                        if let Some(done) = attempt.completed_at {
                                            " · {time_ago(done, reference)}"
                                        }
                                    }
                                }
                                Badge {
                                    variant: BadgeVariant::for_result(attempt.passed.unwrap_or(false)),
                                    if attempt.passed.unwrap_or(false) { "Passed" } else { "Not Passed" }
                                }
                            }
                        }
                    }
                }
            }

            if !data.new_topics.is_empty() {
                Card {
                    title: "New Topics Added",
                    description: "Topics added in the last 7 days",
                    ul {
                        class: "item-list",
                        for topic in data.new_topics.clone() {
                            li {
                                key: "{topic.id}",
                                class: "item",
                                onclick: move |_| { nav.push(Route::TopicDetail { id: topic.id }); },
                                div {
                                    class: "item-main",
                                    h3 { "{topic.title}" }
                                    p { class: "muted", "{topic.description}" }
                                    span {
                                        class: "muted",
                                        "{topic.resource_count} resources · {topic.quiz_count} quizzes"
                                    }
                                }
                                if let Some(created) = topic.created_at {
                                    span { class: "muted", "{time_ago(created, reference)}" }
                                }
                            }
                        }
                    }
                }
            }

            Card {
                title: "Upcoming & Active Quizzes",
                if data.quizzes.is_empty() {
                    EmptyState { title: "No quizzes available", message: "Check back later for new quizzes." }
                } else {
                    ul {
                        class: "item-list",
                        for quiz in data.quizzes.clone() {
                            li {
                                key: "{quiz.id}",
                                class: "item",
                                onclick: move |_| { nav.push(Route::QuizTaking { id: quiz.id }); },
                                div {
                                    class: "item-main",
                                    h3 { "{quiz.title}" }
                                    span {
                                        class: "muted",
                                        "{quiz.duration_minutes} min · pass {quiz.passing_score}%"
                                        if let Some(start) = quiz.start_time {
                                            " · starts {format_date_time(start)}"
                                        }
                                    }
                                }
                                Badge {
                                    variant: BadgeVariant::for_quiz_status(quiz.status(reference)),
                                    "{quiz.status(reference).label()}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn quiz(id: i64, start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Quiz {
        let mut quiz: Quiz = serde_json::from_str(&format!(
            r#"{{"id":{id},"title":"Q{id}","durationMinutes":10,"active":true}}"#
        ))
        .unwrap();
        quiz.start_time = start;
        quiz.end_time = end;
        quiz
    }

    fn attempt(id: i64, status: &str, completed: Option<&str>, passed: bool) -> AttemptSummary {
        let completed = completed
            .map(|c| format!(r#","completedAt":"{c}""#))
            .unwrap_or_default();
        serde_json::from_str(&format!(
            r#"{{"id":{id},"quizId":1,"quizTitle":"Q","userId":2,"status":"{status}","passed":{passed},"score":80{completed}}}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_open_quizzes_drop_ended_and_sort_by_start() {
        let now = at(10, 12);
        let quizzes = vec![
            quiz(1, Some(at(12, 9)), None),
            quiz(2, None, Some(at(9, 9))),
            quiz(3, Some(at(8, 9)), Some(at(11, 9))),
            quiz(4, None, None),
        ];
        let ids: Vec<i64> = open_quizzes(&quizzes, now).iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![3, 4, 1]);
    }

    #[test]
    fn test_new_topics_window() {
        let now = at(20, 12);
        let topics: Vec<Topic> = serde_json::from_str(
            r#"[
                {"id":1,"title":"Fresh","createdAt":"2024-05-18T08:00:00"},
                {"id":2,"title":"Old","createdAt":"2024-05-01T08:00:00"},
                {"id":3,"title":"Undated"}
            ]"#,
        )
        .unwrap();
        let ids: Vec<i64> = new_topics(&topics, now).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_recent_attempts_completed_newest_first() {
        let mut attempts = vec![attempt(1, "IN_PROGRESS", None, false)];
        for (id, day) in [(2, 3), (3, 9), (4, 1), (5, 7), (6, 5), (7, 2)] {
            let completed = format!("2024-05-0{day}T10:00:00");
            attempts.push(attempt(id, "COMPLETED", Some(&completed), id % 2 == 0));
        }
        let ids: Vec<i64> = recent_attempts(&attempts).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![3, 5, 6, 2, 7]);
    }

    #[test]
    fn test_pass_rate() {
        assert_eq!(pass_rate(0, 0), 0);
        assert_eq!(pass_rate(2, 3), 67);
    }
}
