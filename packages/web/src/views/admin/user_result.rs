use api::analytics::format_duration;
use api::models::User;
use dioxus::prelude::*;
use ui::components::{Badge, BadgeVariant, Button, ButtonVariant, Card, LoadingScreen, StatCard};
use ui::icons::{FaArrowLeft, FaCalendar, FaEnvelope, FaUser};
use ui::time::format_date_time;
use ui::{use_client, use_error_reporter, Icon};

use crate::views::result_review::{load_result, AnswerReview, ResultData};
use crate::Route;

/// Name for the header card: the fetched account, else the name on the
/// attempt, else the user id.
pub fn participant_name(data: &ResultData, user: Option<&User>) -> String {
    if let Some(user) = user {
        return user.full_name();
    }
    match data.attempt.user_full_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => match data.attempt.user_id {
            Some(id) => format!("User #{id}"),
            None => "Unknown user".to_string(),
        },
    }
}

/// One participant's attempt, as seen by staff.
#[component]
pub fn UserResultDetail(quiz_id: i64, attempt_id: i64) -> Element {
    let client = use_client();
    let reporter = use_error_reporter();
    let nav = use_navigator();

    let result = use_resource(use_reactive!(|attempt_id| {
        let client = client.clone();
        async move {
            let data = match load_result(&client, attempt_id).await {
                Ok(data) => data,
                Err(e) => {
                    reporter.report(&e, "Failed to load user result");
                    nav.replace(Route::QuizResultsDetail { id: quiz_id });
                    return None;
                }
            };
            // Moderators may not be allowed to read accounts; the attempt's
            // own name is enough then.
            let user = match data.attempt.user_id {
                Some(id) => client
                    .users()
                    .get(id)
                    .await
                    .inspect_err(|e| tracing::debug!("No account details for user {}: {}", id, e))
                    .ok(),
                None => None,
            };
            Some((data, user))
        }
    }));

    let Some(Some((data, user))) = result() else {
        return rsx! { LoadingScreen {} };
    };

    let name = participant_name(&data, user.as_ref());
    let tally = data.tally();
    let score = data.score();
    let passed = data.passed();
    let elapsed = format_duration(data.attempt.time_taken_secs());
    let started = data
        .attempt
        .started_at
        .map(format_date_time)
        .unwrap_or_else(|| "N/A".to_string());
    let finished = data
        .attempt
        .completed_at
        .map(format_date_time)
        .unwrap_or_else(|| "Not completed".to_string());
    let topic = data.quiz.topic_title.clone().unwrap_or_else(|| "N/A".to_string());
    let question_count = data.quiz.total_questions();

    rsx! {
        div {
            class: "page page--narrow",
            header {
                class: "page-header",
                Button {
                    variant: ButtonVariant::Ghost,
                    onclick: move |_| { nav.push(Route::QuizResultsDetail { id: quiz_id }); },
                    Icon { icon: FaArrowLeft, width: 14, height: 14 }
                    " Back to Results"
                }
            }

            Card {
                div {
                    class: "person person--large",
                    span { class: "avatar avatar--large", Icon { icon: FaUser, width: 24, height: 24 } }
                    div {
                        h2 { "{name}" }
                        if let Some(user) = user.clone() {
                            div {
                                class: "meta-row",
                                span { Icon { icon: FaEnvelope, width: 12, height: 12 } " {user.email}" }
                                span { "@{user.username}" }
                            }
                        }
                    }
                }
            }

            Card {
                title: data.quiz.title.clone(),
                description: data.quiz.description.clone(),
                div {
                    class: "fact-grid",
                    div { class: "fact", span { class: "muted", "Topic" } strong { "{topic}" } }
                    div { class: "fact", span { class: "muted", "Duration" } strong { "{data.quiz.duration_minutes} minutes" } }
                    div { class: "fact", span { class: "muted", "Passing Score" } strong { "{data.quiz.passing_score}%" } }
                    div { class: "fact", span { class: "muted", "Total Questions" } strong { "{question_count}" } }
                }
            }

            div {
                class: "stat-grid",
                div {
                    class: "card stat-card",
                    p { class: "stat-value", "{score}%" }
                    p { class: "muted", "Final Score" }
                    if passed {
                        Badge { variant: BadgeVariant::Success, "Passed" }
                    } else {
                        Badge { variant: BadgeVariant::Danger, "Failed" }
                    }
                }
                StatCard { label: "Correct Answers", value: "{tally.correct}" }
                StatCard { label: "Incorrect Answers", value: "{tally.incorrect + tally.unanswered}" }
                StatCard { label: "Time Taken", value: elapsed }
            }

            Card {
                div {
                    class: "meta-row",
                    span { Icon { icon: FaCalendar, width: 12, height: 12 } " Started: {started}" }
                    span { Icon { icon: FaCalendar, width: 12, height: 12 } " Completed: {finished}" }
                }
            }

            AnswerReview { data, staff_view: true }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::models::{Quiz, QuizAttempt};

    fn data(attempt: serde_json::Value) -> ResultData {
        let quiz: Quiz = serde_json::from_value(serde_json::json!({
            "id": 5, "title": "Pattern matching", "durationMinutes": 15,
            "passingScore": 60, "active": true
        }))
        .unwrap();
        let attempt: QuizAttempt = serde_json::from_value(attempt).unwrap();
        ResultData {
            quiz,
            attempt,
            answers: Vec::new(),
        }
    }

    #[test]
    fn test_participant_name_fallbacks() {
        let named = data(serde_json::json!({
            "id": 1, "quizId": 5, "status": "COMPLETED", "userId": 8, "userFullName": " Lin Chen "
        }));
        assert_eq!(participant_name(&named, None), "Lin Chen");

        let anonymous = data(serde_json::json!({
            "id": 2, "quizId": 5, "status": "COMPLETED", "userId": 8, "userFullName": ""
        }));
        assert_eq!(participant_name(&anonymous, None), "User #8");

        let user: User = serde_json::from_value(serde_json::json!({
            "id": 8, "email": "lin@learnhub.dev", "username": "lin",
            "firstName": "Lin", "lastName": "Chen", "role": "USER"
        }))
        .unwrap();
        assert_eq!(participant_name(&anonymous, Some(&user)), user.full_name());
    }
}
